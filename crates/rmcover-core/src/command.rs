// ── Command API ──
//
// Every cover operation is one of three commands. Controllers route a
// command to its recorded packet and report how it went.

use serde::Serialize;
use strum::{Display, EnumString};

/// The operations a cover accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum CoverCommand {
    Open,
    Close,
    Stop,
}

/// Result of a controller operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum CommandOutcome {
    /// Every packet in the sequence was delivered (or had nothing to send).
    Sent,
    /// A guard was not satisfied; nothing was transmitted.
    Skipped,
    /// Delivery failed after retries; the failure has been logged.
    Failed,
}

impl CommandOutcome {
    pub fn is_failed(self) -> bool {
        self == Self::Failed
    }
}
