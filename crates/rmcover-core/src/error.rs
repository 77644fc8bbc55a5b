// ── Core error types ──
//
// Errors from rmcover-core. Transport details are flattened into
// messages here; hosts only ever learn that a command did not make it,
// not whether the device was offline or the session kept expiring.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Delivery errors ──────────────────────────────────────────────
    #[error("Command not delivered after {attempts} attempts: {reason}")]
    RetriesExhausted { attempts: u32, reason: String },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Transport error: {message}")]
    Transport { message: String },

    // ── Data errors ──────────────────────────────────────────────────
    #[error("Invalid MAC address '{value}': {reason}")]
    InvalidMac { value: String, reason: String },

    #[error("Invalid command packet: {reason}")]
    InvalidPacket { reason: String },

    #[error("Cover not found: {object_id}")]
    CoverNotFound { object_id: String },
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<rmcover_api::Error> for CoreError {
    fn from(err: rmcover_api::Error) -> Self {
        match err {
            rmcover_api::Error::Authentication { message } => {
                CoreError::AuthenticationFailed { message }
            }
            rmcover_api::Error::SessionExpired => CoreError::AuthenticationFailed {
                message: "Session expired -- re-authentication required".into(),
            },
            rmcover_api::Error::Timeout { timeout_secs } => CoreError::Transport {
                message: format!("device did not respond within {timeout_secs}s"),
            },
            rmcover_api::Error::InvalidResponse { message } => CoreError::Transport {
                message: format!("invalid response: {message}"),
            },
            rmcover_api::Error::Bridge { status, message } => CoreError::Transport {
                message: format!("bridge returned HTTP {status}: {message}"),
            },
            rmcover_api::Error::Transport(e) => CoreError::Transport {
                message: e.to_string(),
            },
            rmcover_api::Error::InvalidUrl(e) => CoreError::Transport {
                message: format!("invalid URL: {e}"),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn device_timeout_becomes_transport_error() {
        let err = CoreError::from(rmcover_api::Error::Timeout { timeout_secs: 4 });

        assert!(
            matches!(err, CoreError::Transport { ref message } if message.contains("4s")),
            "got: {err:?}"
        );
    }

    #[test]
    fn expired_session_becomes_auth_failure() {
        let err = CoreError::from(rmcover_api::Error::SessionExpired);

        assert!(matches!(err, CoreError::AuthenticationFailed { .. }));
    }
}
