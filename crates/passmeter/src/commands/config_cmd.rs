//! Config subcommand handlers.

use std::fmt::Write as _;

use passmeter_config::{self as config, Config};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

fn format_config(cfg: &Config) -> Result<String, CliError> {
    let mut out = toml::to_string_pretty(cfg).map_err(|e| CliError::Render {
        message: e.to_string(),
    })?;
    let base = cfg.scoring_client()?.base_url().to_string();
    let _ = write!(out, "\n# resolved service base: {base}");
    Ok(out)
}

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Show => {
            let cfg = config::load_config()?;
            output::print_output(&format_config(&cfg)?, global.quiet);
        }
        ConfigCommand::Path => {
            output::print_output(&config::config_path().display().to_string(), global.quiet);
        }
        ConfigCommand::SetUrl { url } => {
            let mut cfg = config::load_config()?;
            cfg.api_url = Some(url);
            // Reject before writing anything
            cfg.origin()?;
            config::save_config(&cfg)?;
            if !global.quiet {
                eprintln!("✓ api_url saved to {}", config::config_path().display());
            }
        }
    }
    Ok(())
}
