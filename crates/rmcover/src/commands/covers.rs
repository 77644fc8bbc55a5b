//! `covers`: list configured covers without contacting the device.

use serde::Serialize;
use tabled::Tabled;

use rmcover_core::{CoverCommand, CoverConfig, DeviceClass};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

#[derive(Debug, Serialize)]
struct CoverView {
    id: String,
    name: String,
    device_class: DeviceClass,
    commands: Vec<CoverCommand>,
    trigger_time_secs: u64,
}

impl From<&CoverConfig> for CoverView {
    fn from(c: &CoverConfig) -> Self {
        let commands = [CoverCommand::Open, CoverCommand::Close, CoverCommand::Stop]
            .into_iter()
            .filter(|cmd| c.packet(*cmd).is_some())
            .collect();
        Self {
            id: c.object_id.clone(),
            name: c.name.clone(),
            device_class: DeviceClass::Garage,
            commands,
            trigger_time_secs: c.trigger_time.as_secs(),
        }
    }
}

#[derive(Tabled)]
struct CoverRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Commands")]
    commands: String,
    #[tabled(rename = "Trigger")]
    trigger: String,
}

impl CoverRow {
    fn from_view(v: &CoverView) -> Self {
        let commands = if v.commands.is_empty() {
            "-".to_owned()
        } else {
            v.commands
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        };
        Self {
            id: v.id.clone(),
            name: v.name.clone(),
            commands,
            trigger: format!("{}s", v.trigger_time_secs),
        }
    }
}

pub fn handle(global: &GlobalOpts) -> Result<(), CliError> {
    let config = super::load_config(global)?;
    let views: Vec<CoverView> = config
        .cover_configs()?
        .iter()
        .map(CoverView::from)
        .collect();

    let out = output::render_list(
        global.output,
        &views,
        CoverRow::from_view,
        |v| v.id.clone(),
    )?;
    output::print_output(&out, global.quiet)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view(commands: Vec<CoverCommand>) -> CoverView {
        CoverView {
            id: "garage".into(),
            name: "Garage".into(),
            device_class: DeviceClass::Garage,
            commands,
            trigger_time_secs: 20,
        }
    }

    #[test]
    fn row_lists_commands() {
        let row = CoverRow::from_view(&view(vec![CoverCommand::Open, CoverCommand::Stop]));

        assert_eq!(row.commands, "open, stop");
        assert_eq!(row.trigger, "20s");
    }

    #[test]
    fn row_without_commands() {
        assert_eq!(CoverRow::from_view(&view(Vec::new())).commands, "-");
    }
}
