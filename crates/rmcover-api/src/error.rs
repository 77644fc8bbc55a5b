use thiserror::Error;

/// Top-level error type for the `rmcover-api` crate.
///
/// Covers every failure mode a device transport can report: device
/// timeouts, malformed replies, session loss, and the HTTP plumbing of the
/// bridge adapter. `rmcover-core` decides which of these are worth a
/// reauthentication retry via [`Error::is_retryable`].
#[derive(Debug, Error)]
pub enum Error {
    // ── Device ──────────────────────────────────────────────────────
    /// The device did not answer within the configured timeout.
    #[error("Device did not respond within {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// The device (or bridge) answered with something we could not use.
    #[error("Invalid response from device: {message}")]
    InvalidResponse { message: String },

    // ── Authentication ──────────────────────────────────────────────
    /// The session key has expired or was never negotiated.
    #[error("Session expired -- re-authentication required")]
    SessionExpired,

    /// The device refused the authentication handshake.
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Non-success status from the device bridge.
    #[error("Bridge error (HTTP {status}): {message}")]
    Bridge { status: u16, message: String },
}

impl Error {
    /// Returns `true` if a fresh session might make the same packet go through.
    ///
    /// Timeouts and malformed replies are how an expired session key shows
    /// up on these transmitters, so both sit on the retry path.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Timeout { .. } | Self::InvalidResponse { .. } | Self::SessionExpired => true,
            Self::Transport(e) => e.is_timeout(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeouts_and_bad_replies_are_retryable() {
        assert!(Error::Timeout { timeout_secs: 10 }.is_retryable());
        assert!(
            Error::InvalidResponse {
                message: "garbage".into()
            }
            .is_retryable()
        );
        assert!(Error::SessionExpired.is_retryable());
    }

    #[test]
    fn rejections_are_not_retryable() {
        assert!(
            !Error::Authentication {
                message: "bad key".into()
            }
            .is_retryable()
        );
        assert!(
            !Error::Bridge {
                status: 500,
                message: "boom".into()
            }
            .is_retryable()
        );
    }
}
