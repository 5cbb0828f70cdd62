//! Command-line interface.

mod commands;
mod icons;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::Config;

#[derive(Parser)]
#[command(name = "cdigest")]
#[command(about = "Summarize contract PDFs with text extraction, OCR and an LLM")]
#[command(version)]
pub struct Cli {
    /// Config file path (overrides auto-discovery)
    #[arg(short, long, global = true, env = "CONTRACT_DIGEST_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Check if verbose mode is enabled (for early logging setup).
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

#[derive(Subcommand)]
enum Commands {
    /// Extract a PDF's text and summarize it
    Summarize {
        /// PDF file to summarize
        file: PathBuf,
        /// Print the summary text without <br> markup
        #[arg(long)]
        raw: bool,
    },

    /// Extract a PDF's text without summarizing
    Extract {
        /// PDF file to read
        file: PathBuf,
    },

    /// Report whether a PDF is treated as scanned or structured
    Classify {
        /// PDF file to classify
        file: PathBuf,
    },

    /// Check that the external tools and API key are available
    Check,

    /// Show the effective configuration
    Config,
}

/// Parse arguments and run the selected command.
pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Summarize { file, raw } => commands::cmd_summarize(&config, &file, raw).await,
        Commands::Extract { file } => commands::cmd_extract(&config, &file),
        Commands::Classify { file } => commands::cmd_classify(&config, &file),
        Commands::Check => commands::cmd_check(&config),
        Commands::Config => commands::cmd_config_show(&config),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_summarize() {
        let cli = Cli::try_parse_from(["cdigest", "-v", "summarize", "nda.pdf", "--raw"]).unwrap();
        assert!(cli.verbose);
        match cli.command {
            Commands::Summarize { file, raw } => {
                assert_eq!(file, PathBuf::from("nda.pdf"));
                assert!(raw);
            }
            _ => panic!("expected summarize"),
        }
    }
}
