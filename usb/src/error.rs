use crate::request::MAX_REQUEST_LEN;

#[derive(thiserror::Error, Debug)]
pub enum ConnectError {
    #[error("Can't find a U401 device plugged in")]
    DeviceNotFound,

    #[error("A U401 was found, but it cannot be opened: {0}")]
    OpenFailed(#[source] rusb::Error),

    #[error("A U401 was found, but it couldn't be claimed: {0}")]
    DeviceNotClaimed(#[source] rusb::Error),
}

#[derive(thiserror::Error, Debug)]
pub enum CommandError {
    #[error("USB error: {0}")]
    UsbError(#[from] rusb::Error),

    #[error("Device acknowledged {acked} of {sent} frame bytes")]
    BadAck { sent: usize, acked: usize },

    #[error("Expected {expected} response bytes, received {received}")]
    ShortResponse { expected: usize, received: usize },
}

/// Overall outcome of applying a queue and closing the session. A command
/// failure always takes precedence over a teardown failure.
#[derive(thiserror::Error, Debug)]
pub enum SessionError {
    #[error("Failed to set output: {0}")]
    Command(#[from] CommandError),

    #[error(transparent)]
    Teardown(#[from] TeardownError),
}

#[derive(thiserror::Error, Debug)]
pub enum TeardownError {
    #[error("Failed to release interface: {0}")]
    ReleaseFailed(#[from] rusb::Error),
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ParseError {
    #[error("Argument exceeds {} bytes", MAX_REQUEST_LEN)]
    TooLong,

    #[error("Expected KEY=VALUE, but no delimiter was found")]
    MissingDelimiter,

    #[error("Expected KEY=VALUE, but one side is empty")]
    EmptyToken,

    #[error("Output must be 0-7 or 'all', got '{0}'")]
    InvalidBit(String),

    #[error("Expected 'on' or 'off', got '{0}'")]
    InvalidState(String),
}
