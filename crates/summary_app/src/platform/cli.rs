use std::path::PathBuf;

use clap::Parser;

use super::config::{LogSetting, DEFAULT_CONFIG_FILE};

/// Generate a company overview for a website from the summary API.
#[derive(Debug, Parser)]
#[command(name = "website-summary", version)]
pub struct Cli {
    /// RON configuration file. A missing file means built-in defaults.
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Base URL of the summary API.
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Value sent in the Origin header.
    #[arg(long)]
    pub origin: Option<String>,

    /// Summarize this website once, print the result and exit.
    #[arg(long)]
    pub url: Option<String>,

    /// Where log output goes.
    #[arg(long, value_enum)]
    pub log: Option<LogSetting>,

    /// Print the effective configuration as RON and exit.
    #[arg(long)]
    pub print_config: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_interactive_mode() {
        let cli = Cli::parse_from(["website-summary"]);
        assert_eq!(cli.config, PathBuf::from(DEFAULT_CONFIG_FILE));
        assert!(cli.url.is_none());
        assert!(cli.log.is_none());
        assert!(!cli.print_config);
    }

    #[test]
    fn parses_overrides() {
        let cli = Cli::parse_from([
            "website-summary",
            "--endpoint",
            "http://127.0.0.1:8000",
            "--url",
            "gabeecoffee.com",
            "--log",
            "both",
        ]);
        assert_eq!(cli.endpoint.as_deref(), Some("http://127.0.0.1:8000"));
        assert_eq!(cli.url.as_deref(), Some("gabeecoffee.com"));
        assert_eq!(cli.log, Some(LogSetting::Both));
    }
}
