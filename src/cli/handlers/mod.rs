use std::path::Path;

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::config_io::{self, ConfigError};
use crate::ops::run_scan_now;

/// Access password for `scan` when `--access-key` is not given
pub const ACCESS_KEY_ENV: &str = "MLF_ACCESS_KEY";

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let json = cli.json;
    let config_path = cli.config.as_deref();

    match cli.command {
        None => crate::tui::run(config_path),
        Some(Commands::Scan(args)) => cmd_scan(args, config_path, json),
        Some(Commands::CheckConfig) => cmd_check_config(config_path, json),
    }
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

fn cmd_scan(
    args: ScanArgs,
    config_path: Option<&Path>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = config_io::load_config(config_path)?;
    // A missing key goes through the gate as an empty password
    let entered = args
        .access_key
        .or_else(|| std::env::var(ACCESS_KEY_ENV).ok())
        .unwrap_or_default();

    let report = run_scan_now(&config, &entered)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for line in format_report(&report) {
            println!("{}", line);
        }
    }
    Ok(())
}

fn cmd_check_config(
    config_path: Option<&Path>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let path = config_io::resolve_config_path(config_path);
    let mut config = config_io::read_config(&path)?;
    config_io::apply_env_overrides(&mut config, |name| std::env::var(name).ok())?;

    if json {
        println!("{}", serde_json::to_string_pretty(&config_to_json(&config))?);
    } else {
        println!("# {}", path.display());
        for line in format_config(&config) {
            println!("{}", line);
        }
    }

    // Printed first so the problem is visible next to the values
    if config.access_key().is_none() {
        return Err(ConfigError::MissingAccessKey.into());
    }
    if config.credentials().is_none() {
        return Err(ConfigError::MissingCredentials.into());
    }
    Ok(())
}
