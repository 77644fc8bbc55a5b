//! Clap derive structures for the `rmcover` CLI.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// rmcover -- drive covers through an RM-style transmitter
#[derive(Debug, Parser)]
#[command(
    name = "rmcover",
    version,
    about = "Open, close and stop garage doors through an RM-style IR/RF transmitter",
    long_about = "Open, close and stop garage doors through an RM-style IR/RF transmitter.\n\n\
        Commands are recorded packets replayed through a device bridge. Cover\n\
        position is never measured: closing sends the close packet, waits the\n\
        configured trigger time, then sends stop.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Config file (defaults to the platform config directory)
    #[arg(long, env = "RMCOVER_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "RMCOVER_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Plain text, one value per line (scripting)
    Plain,
}

// ── Commands ─────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List configured covers
    #[command(alias = "ls")]
    Covers,

    /// Send the open command
    Open(CoverArgs),

    /// Close a cover: close, wait the trigger time, stop
    Close(CloseArgs),

    /// Send the stop command
    Stop(CoverArgs),

    /// Inspect configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Debug, Args)]
pub struct CoverArgs {
    /// Cover id (the `[covers.<id>]` key)
    pub cover: String,
}

#[derive(Debug, Args)]
pub struct CloseArgs {
    /// Cover id (the `[covers.<id>]` key)
    pub cover: String,

    /// Treat the cover as open before closing
    ///
    /// State is not kept between runs, so a fresh process only knows the
    /// cover as unknown and would skip the close.
    #[arg(long, short = 'f')]
    pub assume_open: bool,
}

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the config file path
    Path,

    /// Display the resolved configuration
    Show,
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
