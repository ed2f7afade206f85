//! shakesearch server & CLI
//!
//! Dual-mode application:
//! - Server mode (default): loads the corpus and serves `/search` and the search page
//! - CLI mode: `serve` with explicit options, or `search` to run one
//!   search cycle against a running endpoint and print the highlighted results

mod cli;
mod config;
mod controller;
mod error;
mod http;
mod server;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands, OutputFormat};
use config::{ClientConfig, ServerConfig};
use controller::form::{CASE_SENSITIVE_FIELD, MAX_RESULTS_FIELD, QUERY_FIELD};
use controller::{CycleOutcome, FormData, HighlightStatus, HttpBackend, SearchController, SubmitEvent};
use error::AppError;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Detect mode: CLI if args present, server with environment defaults otherwise
    let args: Vec<String> = std::env::args().collect();

    if args.len() > 1 {
        run_cli_mode().await
    } else {
        run_server_mode().await
    }
}

fn init_logging(level: &str) {
    // RUST_LOG wins over the verbosity flags
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr) // Log to stderr to keep stdout clean
        .init();
}

/// Run in CLI mode
async fn run_cli_mode() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "info"
    };
    init_logging(log_level);

    let result = match cli.command {
        Some(Commands::Serve(args)) => execute_serve_cli(args).await,
        Some(Commands::Search(args)) => execute_search_cli(args).await,
        None => {
            eprintln!("Error: No command specified. Use --help for usage information.");
            std::process::exit(1);
        }
    };

    match result {
        Ok(output) => {
            if !output.is_empty() {
                println!("{}", output);
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(get_exit_code(&e));
        }
    }
}

/// Execute serve command in CLI mode
async fn execute_serve_cli(args: cli::ServeArgs) -> Result<String> {
    let config = ServerConfig::from_args(&args)?;
    server::serve(config).await?;
    Ok(String::new())
}

/// Execute search command in CLI mode
async fn execute_search_cli(args: cli::SearchArgs) -> Result<String> {
    use tokio::time::timeout;

    let config = ClientConfig::from_args(&args)?;
    let client = http::client_for_endpoint(&config.endpoint, config.timeout)?;
    let controller = SearchController::new(
        HttpBackend::new(client, config.endpoint.clone()),
        config.highlight_mode,
    );

    let mut data = FormData::new().with(QUERY_FIELD, args.query);
    if let Some(value) = args.case_sensitive {
        data = data.with(CASE_SENSITIVE_FIELD, value);
    }
    if let Some(value) = args.max_results {
        data = data.with(MAX_RESULTS_FIELD, value);
    }
    let mut event = SubmitEvent::new(data);

    let outcome = timeout(config.timeout, controller.handle_submit(&mut event))
        .await
        .map_err(|_| {
            AppError::Timeout(format!(
                "Search exceeded {} second timeout",
                config.timeout.as_secs()
            ))
        })??;

    match outcome {
        CycleOutcome::Completed(report) => match report.highlight {
            HighlightStatus::Applied { marks } => {
                info!("Rendered {} results, {} highlights", report.rendered, marks);
            }
            HighlightStatus::Failed { error } => {
                warn!("Rendered {} results without highlighting: {}", report.rendered, error);
            }
        },
        CycleOutcome::Superseded { generation } => {
            warn!("Search cycle {} was superseded", generation);
        }
    }

    let view = controller.view()?;
    Ok(match args.format {
        OutputFormat::Text => view.to_text().trim_end().to_string(),
        OutputFormat::Html => view.to_html(),
    })
}

/// Map AppError to exit code
fn get_exit_code(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<AppError>() {
        Some(app_error) => app_error.exit_code(),
        None => 5,
    }
}

/// Run in server mode with environment defaults
async fn run_server_mode() -> Result<()> {
    init_logging("info");

    info!("Starting shakesearch server");
    let config = ServerConfig::from_env()?;
    server::serve(config).await
}
