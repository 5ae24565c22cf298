pub mod base;

mod libusb;

pub use libusb::device::LibUsbU401;
