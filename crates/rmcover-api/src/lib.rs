// rmcover-api: Device transport boundary for RM-style IR/RF transmitters

pub mod bridge;
pub mod device;
pub mod error;
pub mod transport;

pub use bridge::BridgeClient;
pub use device::{DeviceAddress, DeviceTransport};
pub use error::Error;
pub use transport::TransportConfig;
