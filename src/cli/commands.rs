use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "mlf", about = concat!("mail-link-finder v", env!("CARGO_PKG_VERSION"), " - verification links from your inbox"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Config file (default: $MLF_CONFIG, then ./mlf.toml)
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch once and print the collected links
    Scan(ScanArgs),
    /// Validate the config and print it with secrets masked
    CheckConfig,
}

// ---------------------------------------------------------------------------
// Scan args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct ScanArgs {
    /// Access password (default: $MLF_ACCESS_KEY)
    #[arg(long)]
    pub access_key: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_means_tui() {
        let cli = Cli::try_parse_from(["mlf"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.config.is_none());
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["mlf", "scan", "--access-key", "k", "--json", "-c", "x.toml"])
            .unwrap();
        assert!(cli.json);
        assert_eq!(cli.config, Some(PathBuf::from("x.toml")));
        match cli.command {
            Some(Commands::Scan(args)) => assert_eq!(args.access_key.as_deref(), Some("k")),
            _ => panic!("expected scan"),
        }
    }

    #[test]
    fn check_config_parses() {
        let cli = Cli::try_parse_from(["mlf", "check-config"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::CheckConfig)));
    }
}
