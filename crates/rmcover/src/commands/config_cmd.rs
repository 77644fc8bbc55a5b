//! Config subcommand handlers.

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output;

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Path => {
            let path = super::resolve_config_path(global);
            output::print_output(&path.display().to_string(), global.quiet)
        }

        ConfigCommand::Show => {
            let config = super::load_config(global)?;
            let out = match global.output {
                OutputFormat::Json => output::render_json(&config)?,
                OutputFormat::Table | OutputFormat::Plain => config.to_toml()?,
            };
            output::print_output(out.trim_end(), global.quiet)
        }
    }
}
