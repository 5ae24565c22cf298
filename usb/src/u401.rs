use crate::commands::Command;
use crate::device::base::U401Transport;
use crate::device::LibUsbU401;
use crate::devices;
use crate::error::{CommandError, ConnectError, SessionError, TeardownError};
use crate::request::SwitchRequest;
use log::{debug, error, warn};

/// One claimed device session. Frames are applied strictly in order — the
/// device latches them sequentially — and the interface is released exactly
/// once on every exit path, via `close()` or the `Drop` fallback.
pub struct U401<T: U401Transport> {
    transport: T,
    released: bool,
}

impl U401<LibUsbU401> {
    /// Locate, open and claim the first U401 on the bus.
    pub fn open() -> Result<Self, ConnectError> {
        Ok(Self::attach(LibUsbU401::connect(devices::U401)?))
    }
}

impl<T: U401Transport> U401<T> {
    pub fn attach(transport: T) -> Self {
        Self {
            transport,
            released: false,
        }
    }

    /// Declare port A as all-outputs. Best effort at session start; the
    /// device may still hold the configuration from an earlier run, so a
    /// failure is a warning rather than an abort.
    pub fn configure_outputs(&mut self) {
        let command = Command::ConfigurePort {
            direction: 0xFF,
            mask: 0xFF,
        };
        if let Err(error) = self.send(command) {
            warn!("Unable to configure U401 outputs: {}", error);
        }
    }

    /// Encode and send the set-output frame for one request.
    pub fn apply(&mut self, request: &SwitchRequest) -> Result<(), CommandError> {
        debug!("{:#04x}={:?}", request.target.mask(), request.state);
        self.send(request.command())
    }

    /// Apply requests in argument order, stopping at the first failure.
    /// Nothing after a failed frame is sent.
    pub fn run(&mut self, requests: &[SwitchRequest]) -> Result<(), CommandError> {
        for request in requests {
            self.apply(request)?;
        }
        Ok(())
    }

    /// Apply the whole queue, then release. Teardown runs even when a
    /// command failed partway; in that case the command failure is the
    /// session's result and the teardown error is only logged.
    pub fn run_and_close(mut self, requests: &[SwitchRequest]) -> Result<(), SessionError> {
        let applied = self.run(requests);
        let teardown = self.close();
        match (applied, teardown) {
            (Err(command), teardown) => {
                if let Err(error) = teardown {
                    error!("{}", error);
                }
                Err(command.into())
            }
            (Ok(()), Err(teardown)) => Err(teardown.into()),
            (Ok(()), Ok(())) => Ok(()),
        }
    }

    fn send(&mut self, command: Command) -> Result<(), CommandError> {
        let frame = command.encode();
        let acked = self.transport.send_frame(&frame)?;
        if acked != frame.len() {
            return Err(CommandError::BadAck {
                sent: frame.len(),
                acked,
            });
        }

        let expected = command.response_len();
        if expected > 0 {
            let response = self.transport.read_response(expected)?;
            if response.len() != expected {
                return Err(CommandError::ShortResponse {
                    expected,
                    received: response.len(),
                });
            }
        }
        Ok(())
    }

    /// Release the interface and close the handle. Teardown runs at most
    /// once; any path that never reaches this is covered by `Drop`.
    pub fn close(mut self) -> Result<(), TeardownError> {
        self.released = true;
        self.transport.teardown()
    }
}

impl<T: U401Transport> Drop for U401<T> {
    fn drop(&mut self) {
        if !self.released {
            self.released = true;
            if let Err(error) = self.transport.teardown() {
                error!("Failed to release interface: {}", error);
            }
        }
    }
}
