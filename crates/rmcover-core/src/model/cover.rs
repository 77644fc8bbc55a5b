// ── Cover state model ──

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Cached position of a cover.
///
/// There is no position feedback from the device; every value here is an
/// assumption made after a command was delivered.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString, EnumIter, Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum CoverState {
    #[default]
    Unknown,
    Open,
    Closed,
    Opening,
    Closing,
    Stopped,
    Offline,
}

impl CoverState {
    /// Tri-state "is the cover closed".
    ///
    /// `Opening` still reads as closed: the motor has only just engaged.
    pub fn is_closed(self) -> Option<bool> {
        match self {
            Self::Unknown | Self::Offline => None,
            Self::Closed | Self::Opening => Some(true),
            Self::Open | Self::Closing | Self::Stopped => Some(false),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum DeviceClass {
    Garage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum CoverFeature {
    Open,
    Close,
    Stop,
}

pub const SUPPORTED_FEATURES: [CoverFeature; 3] =
    [CoverFeature::Open, CoverFeature::Close, CoverFeature::Stop];
