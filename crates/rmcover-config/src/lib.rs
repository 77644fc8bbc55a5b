//! Configuration for rmcover.
//!
//! One TOML file describes the transmitter and the covers wired to it.
//! Values are layered (built-in defaults, then the file, then `RMCOVER_`
//! environment variables) and validated before being translated into
//! `rmcover_core` runtime types.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use rmcover_core::{CommandPacket, CoverConfig, DeviceConfig, MacAddress, RetryPolicy};

/// Prefix for environment overrides. Nested keys use `__`, e.g.
/// `RMCOVER_COVERS__GARAGE__TRIGGER_TIME=15`.
pub const ENV_PREFIX: &str = "RMCOVER_";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("config file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

impl ConfigError {
    fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level configuration: one transmitter and its covers.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// Transmitter IP address or hostname.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,

    /// Transmitter MAC address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mac: Option<String>,

    /// Per-request device timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Display name for the transmitter.
    #[serde(default = "default_friendly_name")]
    pub friendly_name: String,

    #[serde(default = "default_retries")]
    pub send_retries: u32,

    #[serde(default = "default_retries")]
    pub auth_retries: u32,

    /// Root URL of the device bridge.
    #[serde(default = "default_bridge_url")]
    pub bridge_url: String,

    /// Covers keyed by slug.
    #[serde(default)]
    pub covers: BTreeMap<String, CoverEntry>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ip_address: None,
            mac: None,
            timeout: default_timeout(),
            friendly_name: default_friendly_name(),
            send_retries: default_retries(),
            auth_retries: default_retries(),
            bridge_url: default_bridge_url(),
            covers: BTreeMap::new(),
        }
    }
}

/// One `[covers.<slug>]` table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CoverEntry {
    /// Base64 packet sent to open.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command_open: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command_close: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command_stop: Option<String>,

    /// Seconds between the close and stop commands.
    #[serde(default = "default_trigger_time")]
    pub trigger_time: u64,

    /// Display name; the slug when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub friendly_name: Option<String>,
}

impl Default for CoverEntry {
    fn default() -> Self {
        Self {
            command_open: None,
            command_close: None,
            command_stop: None,
            trigger_time: default_trigger_time(),
            friendly_name: None,
        }
    }
}

fn default_timeout() -> u64 {
    10
}
fn default_trigger_time() -> u64 {
    10
}
fn default_retries() -> u32 {
    2
}
fn default_friendly_name() -> String {
    "broadlink".into()
}
fn default_bridge_url() -> String {
    "http://127.0.0.1:8780".into()
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "rmcover", "rmcover").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("rmcover");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load and validate config from `path`, with `RMCOVER_` env overrides.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let config: Config = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
        .extract()?;

    config.validate()?;
    Ok(config)
}

/// Parse and validate config from a TOML string. No environment overrides.
pub fn parse_config(toml: &str) -> Result<Config, ConfigError> {
    let config: Config = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::string(toml))
        .extract()?;

    config.validate()?;
    Ok(config)
}

// ── Validation & translation ────────────────────────────────────────

impl Config {
    /// Check every field that the runtime types would reject.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.device_config()?;
        self.bridge_url()?;
        self.cover_configs()?;
        Ok(())
    }

    /// Build the transmitter description.
    pub fn device_config(&self) -> Result<DeviceConfig, ConfigError> {
        let host = self
            .ip_address
            .as_deref()
            .map(str::trim)
            .filter(|h| !h.is_empty())
            .ok_or_else(|| ConfigError::invalid("ip_address", "required"))?;

        let mac_raw = self
            .mac
            .as_deref()
            .ok_or_else(|| ConfigError::invalid("mac", "required"))?;
        let mac: MacAddress = mac_raw
            .parse()
            .map_err(|e: rmcover_core::CoreError| ConfigError::invalid("mac", e.to_string()))?;

        if self.timeout == 0 {
            return Err(ConfigError::invalid("timeout", "must be at least 1 second"));
        }

        let mut device = DeviceConfig::new(host, mac);
        device.timeout = Duration::from_secs(self.timeout);
        device.retry = RetryPolicy {
            send_retries: self.send_retries,
            auth_retries: self.auth_retries,
        };
        Ok(device)
    }

    pub fn bridge_url(&self) -> Result<Url, ConfigError> {
        let url: Url = self
            .bridge_url
            .parse()
            .map_err(|e: url::ParseError| ConfigError::invalid("bridge_url", e.to_string()))?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(ConfigError::invalid(
                "bridge_url",
                format!("expected http or https, got '{other}'"),
            )),
        }
    }

    /// Build one runtime config per cover, sorted by slug.
    pub fn cover_configs(&self) -> Result<Vec<CoverConfig>, ConfigError> {
        if self.covers.is_empty() {
            return Err(ConfigError::invalid(
                "covers",
                "at least one cover must be configured",
            ));
        }

        self.covers
            .iter()
            .map(|(slug, entry)| entry.to_cover_config(slug))
            .collect()
    }

    /// Render as TOML, e.g. for `config show`.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

impl CoverEntry {
    fn to_cover_config(&self, slug: &str) -> Result<CoverConfig, ConfigError> {
        validate_slug(slug)?;

        let mut config = CoverConfig::new(slug);
        if let Some(name) = self.friendly_name.as_deref().filter(|n| !n.trim().is_empty()) {
            config.name = name.to_owned();
        }
        config.command_open = decode_packet(slug, "command_open", self.command_open.as_deref())?;
        config.command_close = decode_packet(slug, "command_close", self.command_close.as_deref())?;
        config.command_stop = decode_packet(slug, "command_stop", self.command_stop.as_deref())?;
        config.trigger_time = Duration::from_secs(self.trigger_time);
        Ok(config)
    }
}

/// Slugs are lowercase ASCII letters, digits and underscores.
fn validate_slug(slug: &str) -> Result<(), ConfigError> {
    let valid = !slug.is_empty()
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');
    if valid {
        Ok(())
    } else {
        Err(ConfigError::invalid(
            format!("covers.{slug}"),
            "cover ids may only contain lowercase letters, digits and underscores",
        ))
    }
}

fn decode_packet(
    slug: &str,
    field: &str,
    encoded: Option<&str>,
) -> Result<Option<CommandPacket>, ConfigError> {
    let Some(encoded) = encoded else {
        return Ok(None);
    };
    CommandPacket::from_base64(encoded)
        .map_err(|e| ConfigError::invalid(format!("covers.{slug}.{field}"), e.to_string()))
}
