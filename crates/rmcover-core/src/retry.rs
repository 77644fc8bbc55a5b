// ── Transmission / auth retrier ──
//
// Wraps the single "send packet" primitive with bounded reauthentication.
// Transmitters drop packets silently once their session key expires;
// that surfaces as a timeout or a malformed reply, and a fresh handshake
// followed by a resend usually gets the packet through.

use tracing::{debug, error, warn};

use rmcover_api::DeviceTransport;

use crate::config::RetryPolicy;
use crate::device::SharedDevice;
use crate::error::CoreError;
use crate::model::CommandPacket;

/// Delivers packets to one shared device, reauthenticating as needed.
pub struct Retrier<T> {
    device: SharedDevice<T>,
    policy: RetryPolicy,
}

impl<T: DeviceTransport> Retrier<T> {
    pub fn new(device: SharedDevice<T>, policy: RetryPolicy) -> Self {
        Self { device, policy }
    }

    /// Send with the policy's retry budget.
    pub async fn send(&self, packet: Option<&CommandPacket>) -> Result<(), CoreError> {
        self.send_with(packet, self.policy.send_retries).await
    }

    /// Send a packet, retrying up to `retries` times after reauthenticating.
    ///
    /// An absent packet is a configured no-op and succeeds without touching
    /// the device. Errors that a new session cannot fix are returned after
    /// the first attempt.
    pub async fn send_with(
        &self,
        packet: Option<&CommandPacket>,
        retries: u32,
    ) -> Result<(), CoreError> {
        let Some(packet) = packet else {
            debug!("empty packet");
            return Ok(());
        };

        let mut remaining = retries;
        let mut attempts: u32 = 0;

        loop {
            attempts += 1;
            let result = self.device.lock().await.send_data(packet.as_bytes()).await;

            let err = match result {
                Ok(()) => {
                    debug!(attempts, bytes = packet.len(), "packet delivered");
                    return Ok(());
                }
                Err(e) => e,
            };

            if !err.is_retryable() {
                error!(error = %err, attempts, "packet rejected");
                return Err(err.into());
            }

            if remaining == 0 {
                error!(error = %err, attempts, "giving up on packet");
                return Err(CoreError::RetriesExhausted {
                    attempts,
                    reason: err.to_string(),
                });
            }

            warn!(error = %err, remaining, "send failed, re-authenticating");
            if !self.authenticate().await {
                error!(error = %err, attempts, "re-authentication failed, dropping packet");
                return Err(CoreError::AuthenticationFailed {
                    message: format!("could not renew session after: {err}"),
                });
            }
            remaining -= 1;
        }
    }

    /// Authenticate with the policy's retry budget.
    pub async fn authenticate(&self) -> bool {
        self.authenticate_with(self.policy.auth_retries).await
    }

    /// Run the handshake, retrying up to `retries` times.
    ///
    /// Any transport error, timeouts included, counts as a failed
    /// handshake rather than propagating.
    pub async fn authenticate_with(&self, retries: u32) -> bool {
        let mut remaining = retries;

        loop {
            match self.device.lock().await.authenticate().await {
                Ok(()) => {
                    debug!("session renewed");
                    return true;
                }
                Err(e) if remaining > 0 => {
                    debug!(error = %e, remaining, "authentication failed, retrying");
                    remaining -= 1;
                }
                Err(e) => {
                    warn!(error = %e, "authentication failed");
                    return false;
                }
            }
        }
    }
}
