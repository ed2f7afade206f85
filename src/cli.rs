//! CLI mode implementation
//!
//! `serve` runs the search endpoint and page, `search` runs one controller
//! cycle against a running endpoint and prints the results view.

use crate::config::{DEFAULT_CORPUS, DEFAULT_ENDPOINT, DEFAULT_PORT, DEFAULT_TIMEOUT_SECS};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// ShakeSearch CLI
#[derive(Parser)]
#[command(name = "shakesearch")]
#[command(about = "Full-text search over a plain-text corpus, with highlighted results", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Serve the search endpoint and the search page
    Serve(ServeArgs),
    /// Submit a query to a running endpoint and print the highlighted results
    Search(SearchArgs),
}

/// Server arguments
#[derive(Parser, Clone, Debug)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(short = 'p', long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Address to bind
    #[arg(short = 'b', long, default_value = "0.0.0.0")]
    pub bind: String,

    /// Plain-text corpus to index
    #[arg(short = 'c', long, env = "SHAKESEARCH_CORPUS", default_value = DEFAULT_CORPUS)]
    pub corpus: PathBuf,

    /// Highlight the query as literal text instead of a regular expression
    #[arg(long)]
    pub literal: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// Plain text, matches as **match**
    Text,
    /// The results container as an HTML fragment
    Html,
}

/// Search arguments
#[derive(Parser, Clone, Debug)]
pub struct SearchArgs {
    /// Search text
    #[arg(short = 'q', long)]
    pub query: String,

    /// Search case-sensitively; the value is forwarded verbatim (e.g. "on")
    #[arg(short = 'c', long, value_name = "VALUE")]
    pub case_sensitive: Option<String>,

    /// Maximum number of results the endpoint returns
    #[arg(short = 'l', long)]
    pub max_results: Option<String>,

    /// Search endpoint base URL
    #[arg(short = 'e', long, env = "SHAKESEARCH_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Highlight the query as literal text instead of a regular expression
    #[arg(long)]
    pub literal: bool,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Seconds before the search is abandoned
    #[arg(short = 't', long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_command_parsing() {
        let cli = Cli::try_parse_from([
            "shakesearch",
            "search",
            "-q",
            "Hamlet",
            "--case-sensitive",
            "on",
            "--format",
            "html",
        ])
        .unwrap();

        match cli.command {
            Some(Commands::Search(args)) => {
                assert_eq!(args.query, "Hamlet");
                assert_eq!(args.case_sensitive.as_deref(), Some("on"));
                assert_eq!(args.format, OutputFormat::Html);
                assert!(!args.literal);
                assert_eq!(args.timeout_secs, DEFAULT_TIMEOUT_SECS);
            }
            _ => panic!("expected search command"),
        }
    }

    #[test]
    fn test_search_requires_query() {
        assert!(Cli::try_parse_from(["shakesearch", "search"]).is_err());
    }

    #[test]
    fn test_serve_command_parsing() {
        let cli = Cli::try_parse_from([
            "shakesearch",
            "--verbose",
            "serve",
            "--port",
            "8080",
            "--corpus",
            "works.txt",
            "--literal",
        ])
        .unwrap();

        assert!(cli.verbose);
        match cli.command {
            Some(Commands::Serve(args)) => {
                assert_eq!(args.port, 8080);
                assert_eq!(args.corpus, PathBuf::from("works.txt"));
                assert!(args.literal);
            }
            _ => panic!("expected serve command"),
        }
    }
}
