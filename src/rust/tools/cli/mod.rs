// Parent `tools` module controls `cli` gating; avoid duplicating crate-level cfg here.
mod commands;
pub mod config;
pub mod state;

use anyhow::Result;
use clap::Parser;
use state::CliContext;

#[derive(Parser, Debug)]
#[command(name = "olca-html-sync")]
#[command(
    version,
    about = "Replaces <home>/aicpLCA-data-1.4/html/olca-app with a fresh copy of ./dist"
)]
pub struct Cli {
    /// Log every copied file and directory
    #[arg(short, long)]
    verbose: bool,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let ctx = CliContext::new(cli.verbose);
    commands::sync::execute(&ctx)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runs_without_arguments() {
        let cli = Cli::try_parse_from(["olca-html-sync"]).unwrap();
        assert!(!cli.verbose);
    }

    #[test]
    fn test_rejects_positional_arguments() {
        assert!(Cli::try_parse_from(["olca-html-sync", "dist"]).is_err());
    }

    #[test]
    fn test_verbose_flag() {
        let cli = Cli::try_parse_from(["olca-html-sync", "-v"]).unwrap();
        assert!(cli.verbose);
    }
}
