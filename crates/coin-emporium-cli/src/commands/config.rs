//! Settings commands.

use crate::common::GlobalOpts;
use crate::config::CliConfig;
use crate::output;
use anyhow::Result;
use clap::Args;

/// Settings commands.
#[derive(clap::Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show every setting and where the file lives
    Show,
    /// Set a value
    Set(SetArgs),
    /// Remove a value
    Unset(KeyArgs),
}

#[derive(Args, Debug)]
pub struct SetArgs {
    /// Setting name (see `config show`)
    key: String,
    /// New value
    value: String,
}

#[derive(Args, Debug)]
pub struct KeyArgs {
    /// Setting name (see `config show`)
    key: String,
}

impl ConfigCommand {
    pub fn run(&self, global: &GlobalOpts) -> Result<()> {
        match self {
            ConfigCommand::Show => cmd_show(global),
            ConfigCommand::Set(args) => {
                let mut settings = CliConfig::load()?;
                settings.set(&args.key, &args.value)?;
                settings.save()?;
                output::print_success(&format!("{} = {}", args.key, args.value));
                Ok(())
            }
            ConfigCommand::Unset(args) => {
                let mut settings = CliConfig::load()?;
                settings.unset(&args.key)?;
                settings.save()?;
                output::print_success(&format!("{} unset", args.key));
                Ok(())
            }
        }
    }
}

fn cmd_show(global: &GlobalOpts) -> Result<()> {
    let path = CliConfig::default_path()?;
    let settings = global.settings_at(&path)?;

    if global.json_output()? {
        output::print_json(&serde_json::to_value(settings)?)?;
        return Ok(());
    }

    output::print_header("Settings");
    output::print_kv("File", &path.display().to_string());
    for (key, description) in CliConfig::known_keys() {
        let value = settings.get(key).unwrap_or_else(|| "(unset)".to_string());
        println!("  {key:<16} {value:<44} # {description}");
    }
    Ok(())
}
