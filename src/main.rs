use std::fs::OpenOptions;

use clap::Parser;
use mail_link_finder::cli::commands::Cli;
use mail_link_finder::cli::handlers;

/// Log file used while the TUI owns the terminal
const TUI_LOG_FILE: &str = "mlf.log";

fn init_logging(tui: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if tui {
        let path = std::env::temp_dir().join(TUI_LOG_FILE);
        match OpenOptions::new().create(true).append(true).open(&path) {
            Ok(file) => {
                builder.target(env_logger::Target::Pipe(Box::new(file)));
            }
            // Nowhere safe to write
            Err(_) => {
                builder.filter_level(log::LevelFilter::Off);
            }
        }
    }
    builder.init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.command.is_none());

    if let Err(e) = handlers::dispatch(cli) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
