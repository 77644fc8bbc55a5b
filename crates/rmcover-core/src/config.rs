// ── Runtime cover configuration ──
//
// These types describe *what* to drive and *how hard* to retry. They
// carry decoded packets and typed durations but never touch disk; the
// config crate builds them and hands them in.

use std::time::Duration;

use rmcover_api::DeviceAddress;

use crate::command::CoverCommand;
use crate::model::{CommandPacket, MacAddress};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_TRIGGER_TIME: Duration = Duration::from_secs(10);
pub const DEFAULT_SEND_RETRIES: u32 = 2;
pub const DEFAULT_AUTH_RETRIES: u32 = 2;

/// How many extra attempts the retrier may spend.
///
/// Both counts are *retries*: a value of 2 means three tries in total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Resends after a retryable send failure (each preceded by a reauth).
    pub send_retries: u32,
    /// Re-tries of the authentication handshake itself.
    pub auth_retries: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            send_retries: DEFAULT_SEND_RETRIES,
            auth_retries: DEFAULT_AUTH_RETRIES,
        }
    }
}

/// The physical transmitter all covers of one platform share.
#[derive(Debug, Clone)]
pub struct DeviceConfig {
    /// IP address or hostname of the transmitter.
    pub host: String,
    pub mac: MacAddress,
    /// Per-request device timeout.
    pub timeout: Duration,
    pub retry: RetryPolicy,
}

impl DeviceConfig {
    pub fn new(host: impl Into<String>, mac: MacAddress) -> Self {
        Self {
            host: host.into(),
            mac,
            timeout: DEFAULT_TIMEOUT,
            retry: RetryPolicy::default(),
        }
    }

    /// Address in the form the transport layer expects.
    pub fn address(&self) -> DeviceAddress {
        DeviceAddress {
            host: self.host.clone(),
            mac: self.mac.to_string(),
        }
    }
}

/// One cover wired to the transmitter.
#[derive(Debug, Clone)]
pub struct CoverConfig {
    /// Stable slug identifying the cover (e.g. `garage`).
    pub object_id: String,
    /// Display name.
    pub name: String,
    pub command_open: Option<CommandPacket>,
    pub command_close: Option<CommandPacket>,
    pub command_stop: Option<CommandPacket>,
    /// Assumed full-travel time; the stop command is sent after this.
    pub trigger_time: Duration,
}

impl CoverConfig {
    /// A cover with no commands, named after its slug.
    pub fn new(object_id: impl Into<String>) -> Self {
        let object_id = object_id.into();
        Self {
            name: object_id.clone(),
            object_id,
            command_open: None,
            command_close: None,
            command_stop: None,
            trigger_time: DEFAULT_TRIGGER_TIME,
        }
    }

    /// The recorded packet for a command, if one is configured.
    pub fn packet(&self, command: CoverCommand) -> Option<&CommandPacket> {
        match command {
            CoverCommand::Open => self.command_open.as_ref(),
            CoverCommand::Close => self.command_close.as_ref(),
            CoverCommand::Stop => self.command_stop.as_ref(),
        }
    }
}
