use crate::commands::FRAME_LEN;
use crate::error::{CommandError, TeardownError};

/// The only seam performing actual bus I/O. The session layer is written
/// against this trait, which keeps the protocol testable without hardware.
pub trait U401Transport {
    /// Send one command frame as a class control transfer and return the
    /// number of bytes the device acknowledged.
    fn send_frame(&mut self, frame: &[u8; FRAME_LEN]) -> Result<usize, CommandError>;

    /// Bulk-read the response of a report-bearing command.
    fn read_response(&mut self, length: usize) -> Result<Vec<u8>, CommandError>;

    /// Release the claimed interface. The handle itself closes when the
    /// transport is dropped.
    fn teardown(&mut self) -> Result<(), TeardownError>;
}
