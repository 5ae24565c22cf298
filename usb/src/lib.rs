pub use rusb;
pub mod commands;
pub mod devices;
pub mod error;
pub mod outputs;
pub mod request;
pub mod u401;

mod device;

pub use device::base::U401Transport;
