use crate::commands::FRAME_LEN;
use crate::device::base::U401Transport;
use crate::devices::DeviceSpec;
use crate::error::{CommandError, ConnectError, TeardownError};
use log::{debug, info};
use rusb::{Device, DeviceHandle, Direction, GlobalContext, Recipient, RequestType};
use std::time::Duration;

/// Blocking libusb transport. Owns the claimed handle exclusively for the
/// lifetime of the session.
pub struct LibUsbU401 {
    handle: DeviceHandle<GlobalContext>,
    spec: DeviceSpec,
    timeout: Duration,
}

impl LibUsbU401 {
    /// Locate the first matching device on any bus, open it and claim its
    /// interface. A kernel driver bound to the interface is detached
    /// best-effort; alternate-setting and configuration failures are
    /// non-fatal, as the device may already be configured.
    pub fn connect(spec: DeviceSpec) -> Result<Self, ConnectError> {
        let device = find_device(&spec).ok_or(ConnectError::DeviceNotFound)?;
        let handle = device.open().map_err(ConnectError::OpenFailed)?;

        let _ = handle.set_auto_detach_kernel_driver(true);

        handle
            .claim_interface(spec.interface)
            .map_err(ConnectError::DeviceNotClaimed)?;

        if let Err(error) = handle.set_alternate_setting(spec.interface, 0) {
            debug!("Unable to set alternate setting: {}", error);
        }
        if let Err(error) = handle.set_active_configuration(spec.configuration) {
            debug!("Unable to configure U401: {}", error);
        }

        info!(
            "Claimed U401 at bus {} address {}",
            device.bus_number(),
            device.address()
        );

        Ok(Self {
            handle,
            timeout: spec.timeout(),
            spec,
        })
    }
}

impl U401Transport for LibUsbU401 {
    fn send_frame(&mut self, frame: &[u8; FRAME_LEN]) -> Result<usize, CommandError> {
        let written = self.handle.write_control(
            rusb::request_type(Direction::Out, RequestType::Class, Recipient::Interface),
            self.spec.request,
            self.spec.value,
            self.spec.index,
            frame,
            self.timeout,
        )?;
        Ok(written)
    }

    fn read_response(&mut self, length: usize) -> Result<Vec<u8>, CommandError> {
        let mut buf = vec![0; length];
        let read = self
            .handle
            .read_bulk(self.spec.read_endpoint, &mut buf, self.timeout)?;
        buf.truncate(read);
        Ok(buf)
    }

    fn teardown(&mut self) -> Result<(), TeardownError> {
        self.handle.release_interface(self.spec.interface)?;
        Ok(())
    }
}

fn find_device(spec: &DeviceSpec) -> Option<Device<GlobalContext>> {
    if let Ok(devices) = rusb::devices() {
        for device in devices.iter() {
            if let Ok(descriptor) = device.device_descriptor() {
                if descriptor.vendor_id() == spec.vendor_id
                    && descriptor.product_id() == spec.product_id
                {
                    return Some(device);
                }
            }
        }
    }
    None
}
