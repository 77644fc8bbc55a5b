// rmcover-core: Cover state and command delivery on top of rmcover-api.

pub mod command;
pub mod config;
pub mod cover;
pub mod device;
pub mod error;
pub mod model;
pub mod platform;
pub mod retry;

#[cfg(test)]
pub(crate) mod mock;

// ── Primary re-exports ──────────────────────────────────────────────
pub use command::{CommandOutcome, CoverCommand};
pub use config::{CoverConfig, DeviceConfig, RetryPolicy};
pub use cover::CoverController;
pub use device::SharedDevice;
pub use error::CoreError;
pub use platform::Platform;
pub use retry::Retrier;

pub use model::{CommandPacket, CoverFeature, CoverState, DeviceClass, MacAddress};
