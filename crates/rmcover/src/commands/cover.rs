//! `open` / `close` / `stop`: drive one cover through the bridge.

use chrono::{DateTime, Utc};
use serde::Serialize;

use rmcover_api::BridgeClient;
use rmcover_core::{CommandOutcome, CoverCommand, CoverController, CoverState};

use crate::cli::{CloseArgs, CoverArgs, GlobalOpts};
use crate::error::CliError;
use crate::output;

#[derive(Debug, Serialize)]
struct CommandReport {
    cover: String,
    name: String,
    command: CoverCommand,
    outcome: CommandOutcome,
    state: CoverState,
    available: bool,
    last_changed: Option<DateTime<Utc>>,
}

impl CommandReport {
    fn new(
        cover: &CoverController<BridgeClient>,
        command: CoverCommand,
        outcome: CommandOutcome,
    ) -> Self {
        Self {
            cover: cover.object_id().to_owned(),
            name: cover.name().to_owned(),
            command,
            outcome,
            state: cover.state(),
            available: cover.available(),
            last_changed: cover.last_changed(),
        }
    }
}

fn detail(r: &CommandReport) -> String {
    format!(
        "{}: {} {} (state: {}, available: {})",
        r.name,
        r.command,
        r.outcome,
        r.state,
        if r.available { "yes" } else { "no" }
    )
}

pub async fn open(args: CoverArgs, global: &GlobalOpts) -> Result<(), CliError> {
    run(&args.cover, CoverCommand::Open, false, global).await
}

pub async fn close(args: CloseArgs, global: &GlobalOpts) -> Result<(), CliError> {
    run(&args.cover, CoverCommand::Close, args.assume_open, global).await
}

pub async fn stop(args: CoverArgs, global: &GlobalOpts) -> Result<(), CliError> {
    run(&args.cover, CoverCommand::Stop, false, global).await
}

async fn run(
    object_id: &str,
    command: CoverCommand,
    assume_open: bool,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let config = super::load_config(global)?;
    if !config.covers.contains_key(object_id) {
        return Err(CliError::NotFound {
            resource_type: "cover".into(),
            identifier: object_id.to_owned(),
            list_command: "covers".into(),
        });
    }

    let mut platform = super::connect(&config).await?;
    let cover = platform.cover_mut(object_id)?;
    if assume_open {
        cover.restore_state(CoverState::Open);
    }

    tracing::debug!(cover = object_id, %command, "executing");
    let outcome = cover.execute(command).await;
    let report = CommandReport::new(cover, command, outcome);

    if outcome.is_failed() {
        return Err(CliError::CommandFailed {
            cover: object_id.to_owned(),
            command: command.to_string(),
        });
    }
    if outcome == CommandOutcome::Skipped && !global.quiet {
        eprintln!(
            "Cover '{object_id}' is not known to be open; nothing sent. \
             Use --assume-open to close it anyway."
        );
    }

    let out = output::render_single(global.output, &report, detail, |r| r.outcome.to_string())?;
    output::print_output(&out, global.quiet)
}
