//! Command dispatch: bridges CLI args -> config -> cover platform -> output.

pub mod config_cmd;
pub mod cover;
pub mod covers;

use std::path::PathBuf;

use rmcover_api::{BridgeClient, TransportConfig};
use rmcover_config::Config;
use rmcover_core::Platform;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a config-backed command to its handler.
pub async fn dispatch(cmd: Command, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::Covers => covers::handle(global),
        Command::Open(args) => cover::open(args, global).await,
        Command::Close(args) => cover::close(args, global).await,
        Command::Stop(args) => cover::stop(args, global).await,
        Command::Config(args) => config_cmd::handle(args, global),
        // Completions are handled before dispatch
        Command::Completions(_) => Ok(()),
    }
}

// ── Shared helpers ──────────────────────────────────────────────────

/// The config file selected by `--config`, or the platform default.
pub fn resolve_config_path(global: &GlobalOpts) -> PathBuf {
    global
        .config
        .clone()
        .unwrap_or_else(rmcover_config::config_path)
}

pub fn load_config(global: &GlobalOpts) -> Result<Config, CliError> {
    let path = resolve_config_path(global);
    tracing::debug!(path = %path.display(), "loading config");
    Ok(rmcover_config::load_config(&path)?)
}

/// Connect to the bridge and build every configured cover.
pub async fn connect(config: &Config) -> Result<Platform<BridgeClient>, CliError> {
    let device = config.device_config()?;
    let covers = config.cover_configs()?;
    let bridge_url = config.bridge_url()?;

    let transport = TransportConfig {
        timeout: device.timeout,
    };
    let client = BridgeClient::new(bridge_url.clone(), device.address(), &transport)
        .map_err(|e| CliError::connection_failed(bridge_url.as_str(), e))?;

    Ok(Platform::setup(device, client, covers).await)
}
