//! CLI error types with miette diagnostics.
//!
//! Maps config and core errors into user-facing errors with help text.

use miette::Diagnostic;
use thiserror::Error;

use rmcover_config::ConfigError;
use rmcover_core::CoreError;

pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────

    #[error("Could not reach the device bridge at {url}")]
    #[diagnostic(
        code(rmcover::connection_failed),
        help(
            "Check that the bridge is running and that bridge_url is correct.\n\
             URL: {url}"
        )
    )]
    ConnectionFailed {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("{command} was not delivered to cover '{cover}'")]
    #[diagnostic(
        code(rmcover::command_failed),
        help(
            "The transmitter did not accept the packet after retrying.\n\
             Rerun with -v for the retry log, or raise send_retries / timeout."
        )
    )]
    CommandFailed { cover: String, command: String },

    #[error("Device error: {message}")]
    #[diagnostic(
        code(rmcover::device),
        help("Rerun with -v for the transport log.")
    )]
    Device { message: String },

    // ── Authentication ───────────────────────────────────────────────

    #[error("Authentication with the transmitter failed: {message}")]
    #[diagnostic(
        code(rmcover::auth_failed),
        help("Check ip_address and mac in your config, and that the device is powered.")
    )]
    AuthFailed { message: String },

    // ── Resources ────────────────────────────────────────────────────

    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(rmcover::not_found),
        help("Run: rmcover {list_command} to see available {resource_type}s")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(rmcover::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error("Configuration file not found")]
    #[diagnostic(
        code(rmcover::no_config),
        help(
            "Create a TOML config with ip_address, mac and a [covers.<id>] table.\n\
             Expected at: {path}"
        )
    )]
    NoConfig { path: String },

    #[error(transparent)]
    #[diagnostic(code(rmcover::config))]
    Config(Box<ConfigError>),

    // ── IO / Serialization ────────────────────────────────────────────

    #[error("Failed to write output: {0}")]
    #[diagnostic(code(rmcover::io))]
    Io(#[from] std::io::Error),

    #[error("Failed to render JSON: {0}")]
    #[diagnostic(code(rmcover::json))]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// The bridge at `url` could not be set up.
    pub fn connection_failed(url: &str, err: rmcover_api::Error) -> Self {
        Self::ConnectionFailed {
            url: url.to_string(),
            source: Box::new(err),
        }
    }

    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } | Self::CommandFailed { .. } | Self::Device { .. } => {
                exit_code::CONNECTION
            }
            Self::AuthFailed { .. } => exit_code::AUTH,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Validation { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            ConfigError::NotFound { path } => CliError::NoConfig {
                path: path.display().to_string(),
            },
            other => CliError::Config(Box::new(other)),
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::CoverNotFound { object_id } => CliError::NotFound {
                resource_type: "cover".into(),
                identifier: object_id,
                list_command: "covers".into(),
            },

            CoreError::AuthenticationFailed { message } => CliError::AuthFailed { message },

            CoreError::InvalidMac { value, reason } => CliError::Validation {
                field: "mac".into(),
                reason: format!("{value}: {reason}"),
            },

            CoreError::InvalidPacket { reason } => CliError::Validation {
                field: "command".into(),
                reason,
            },

            e @ (CoreError::RetriesExhausted { .. } | CoreError::Transport { .. }) => {
                CliError::Device {
                    message: e.to_string(),
                }
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes() {
        let not_found: CliError = CoreError::CoverNotFound {
            object_id: "shed".into(),
        }
        .into();
        assert_eq!(not_found.exit_code(), exit_code::NOT_FOUND);

        let auth: CliError = CoreError::AuthenticationFailed {
            message: "refused".into(),
        }
        .into();
        assert_eq!(auth.exit_code(), exit_code::AUTH);

        let failed = CliError::CommandFailed {
            cover: "garage".into(),
            command: "close".into(),
        };
        assert_eq!(failed.exit_code(), exit_code::CONNECTION);

        let invalid: CliError = ConfigError::Validation {
            field: "mac".into(),
            reason: "bad".into(),
        }
        .into();
        assert_eq!(invalid.exit_code(), exit_code::USAGE);

        let missing: CliError = ConfigError::NotFound {
            path: "/nope.toml".into(),
        }
        .into();
        assert_eq!(missing.exit_code(), exit_code::GENERAL);
    }

    #[test]
    fn connection_failure_names_configured_bridge() {
        let err = CliError::connection_failed(
            "http://bridge.lan:8780/",
            rmcover_api::Error::SessionExpired,
        );

        assert_eq!(err.exit_code(), exit_code::CONNECTION);
        assert!(matches!(
            err,
            CliError::ConnectionFailed { ref url, .. } if url == "http://bridge.lan:8780/"
        ));
        assert!(err.to_string().contains("bridge.lan"));
    }

    #[test]
    fn transport_failures_map_to_device_error() {
        let err: CliError = CoreError::Transport {
            message: "device did not respond within 10s".into(),
        }
        .into();

        assert_eq!(err.exit_code(), exit_code::CONNECTION);
        assert_eq!(err.to_string(), "Device error: device did not respond within 10s");
    }
}
