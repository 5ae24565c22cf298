//! Plain descriptions of the hardware this crate can drive. Session logic
//! only ever consults a `DeviceSpec`, so a future device model with the same
//! configure/set-output capability is a new constant, not new code.

use std::time::Duration;

/// USBmicro vendor id.
pub const VID_USBMICRO: u16 = 0x0de7;
/// U401 product id.
pub const PID_U401: u16 = 0x0191;

/// Identity and transfer constants for one device model.
#[derive(Debug, Clone, Copy)]
pub struct DeviceSpec {
    pub vendor_id: u16,
    pub product_id: u16,
    /// Interface holding the HID endpoints.
    pub interface: u8,
    /// Configuration the device is expected to run.
    pub configuration: u8,
    /// Class request for sending a report (HID SET_REPORT).
    pub request: u8,
    /// wValue: output report, report id 0.
    pub value: u16,
    pub index: u16,
    /// Bulk-in endpoint for report-bearing commands.
    pub read_endpoint: u8,
    /// Per-transfer timeout; there is no retry on expiry.
    pub timeout_ms: u64,
}

impl DeviceSpec {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

pub const U401: DeviceSpec = DeviceSpec {
    vendor_id: VID_USBMICRO,
    product_id: PID_U401,
    interface: 0,
    configuration: 1,
    request: 9,
    value: 0x0200,
    index: 0,
    read_endpoint: 0x81,
    timeout_ms: 5000,
};
