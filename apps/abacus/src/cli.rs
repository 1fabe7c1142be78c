//! Command-line interface.

use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "abacus")]
#[command(about = "Terminal calculator backed by a remote math evaluation service")]
#[command(version)]
pub struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long = "config", default_value = "config/abacus.yaml")]
    pub config: PathBuf,

    /// Evaluation service base URL (overrides configuration)
    #[arg(long)]
    pub url: Option<String>,

    /// Keep history in memory only, skipping the history file
    #[arg(long)]
    pub ephemeral: bool,

    /// Start in Scientific mode
    #[arg(long)]
    pub scientific: bool,

    /// Start with radians as the trigonometric unit
    #[arg(long)]
    pub radians: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)] // unwrap() is acceptable in tests
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["abacus"]).unwrap();
        assert_eq!(cli.config, PathBuf::from("config/abacus.yaml"));
        assert!(cli.url.is_none());
        assert!(!cli.ephemeral);
        assert!(!cli.scientific);
        assert!(!cli.radians);
        assert!(!cli.verbose);
    }

    #[test]
    fn test_overrides() {
        let cli = Cli::try_parse_from([
            "abacus",
            "-c",
            "/tmp/abacus.yaml",
            "--url",
            "http://calc:9000",
            "--ephemeral",
            "--scientific",
            "--radians",
            "-v",
        ])
        .unwrap();
        assert_eq!(cli.config, PathBuf::from("/tmp/abacus.yaml"));
        assert_eq!(cli.url.as_deref(), Some("http://calc:9000"));
        assert!(cli.ephemeral);
        assert!(cli.scientific);
        assert!(cli.radians);
        assert!(cli.verbose);
    }
}
