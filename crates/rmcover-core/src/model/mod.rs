// ── Domain model ──
//
// Identity, payload and state types shared by the controller, the
// config crate and the CLI.

pub mod cover;
pub mod mac;
pub mod packet;

pub use cover::{CoverFeature, CoverState, DeviceClass, SUPPORTED_FEATURES};
pub use mac::MacAddress;
pub use packet::CommandPacket;
