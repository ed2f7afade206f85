//! Runtime configuration for the server and the search client
//!
//! Values come from CLI flags with environment fallbacks (see `cli.rs`) and
//! are validated here once, before anything starts.

use crate::cli::{SearchArgs, ServeArgs};
use crate::controller::HighlightMode;
use crate::error::AppError;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

pub const DEFAULT_PORT: u16 = 3001;
pub const DEFAULT_CORPUS: &str = "completeworks.txt";
pub const DEFAULT_ENDPOINT: &str = "http://localhost:3001";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub corpus_path: PathBuf,
    pub bind_addr: SocketAddr,
    pub highlight_mode: HighlightMode,
}

impl ServerConfig {
    /// Defaults used when the binary runs without arguments: corpus in the
    /// working directory, port from `PORT`
    pub fn from_env() -> Result<Self, AppError> {
        let port = match std::env::var("PORT") {
            Ok(value) if !value.trim().is_empty() => parse_port(&value)?,
            _ => DEFAULT_PORT,
        };
        let corpus_path = std::env::var("SHAKESEARCH_CORPUS")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CORPUS));

        Ok(Self {
            corpus_path,
            bind_addr: SocketAddr::from(([0, 0, 0, 0], port)),
            highlight_mode: HighlightMode::Pattern,
        })
    }

    pub fn from_args(args: &ServeArgs) -> Result<Self, AppError> {
        let ip: IpAddr = args
            .bind
            .parse()
            .map_err(|e| AppError::InvalidInput(format!("Invalid bind address {}: {}", args.bind, e)))?;

        Ok(Self {
            corpus_path: args.corpus.clone(),
            bind_addr: SocketAddr::new(ip, args.port),
            highlight_mode: highlight_mode(args.literal),
        })
    }
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub endpoint: Url,
    pub timeout: Duration,
    pub highlight_mode: HighlightMode,
}

impl ClientConfig {
    pub fn from_args(args: &SearchArgs) -> Result<Self, AppError> {
        let endpoint = parse_endpoint(&args.endpoint)?;
        if args.timeout_secs == 0 {
            return Err(AppError::InvalidInput("Timeout must be at least 1 second".to_string()));
        }

        Ok(Self {
            endpoint,
            timeout: Duration::from_secs(args.timeout_secs),
            highlight_mode: highlight_mode(args.literal),
        })
    }
}

fn highlight_mode(literal: bool) -> HighlightMode {
    if literal {
        HighlightMode::Literal
    } else {
        HighlightMode::Pattern
    }
}

fn parse_port(value: &str) -> Result<u16, AppError> {
    value
        .trim()
        .parse()
        .map_err(|_| AppError::InvalidInput(format!("Invalid port: {}", value)))
}

/// Accepts `host:port` shorthand as well as full http(s) URLs
pub fn parse_endpoint(raw: &str) -> Result<Url, AppError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(AppError::InvalidInput("Endpoint cannot be empty".to_string()));
    }

    let normalized = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("http://{}", trimmed)
    };

    let url = Url::parse(&normalized)
        .map_err(|e| AppError::InvalidInput(format!("Invalid endpoint {}: {}", raw, e)))?;
    if url.host_str().is_none() {
        return Err(AppError::InvalidInput(format!("Endpoint has no host: {}", raw)));
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_endpoint_full_url() {
        let url = parse_endpoint("https://search.example.com/").unwrap();
        assert_eq!(url.as_str(), "https://search.example.com/");
    }

    #[test]
    fn test_parse_endpoint_shorthand() {
        let url = parse_endpoint("localhost:3001").unwrap();
        assert_eq!(url.as_str(), "http://localhost:3001/");
    }

    #[test]
    fn test_parse_endpoint_rejects_garbage() {
        assert!(parse_endpoint("").is_err());
        assert!(parse_endpoint("   ").is_err());
        assert!(parse_endpoint("http://").is_err());
    }

    #[test]
    fn test_parse_port() {
        assert_eq!(parse_port("8080").unwrap(), 8080);
        assert_eq!(parse_port(" 3001 ").unwrap(), 3001);
        assert!(parse_port("eighty").is_err());
        assert!(parse_port("70000").is_err());
    }

    #[test]
    fn test_serve_args_to_config() {
        let args = ServeArgs {
            port: 4000,
            bind: "127.0.0.1".to_string(),
            corpus: PathBuf::from("works.txt"),
            literal: true,
        };
        let config = ServerConfig::from_args(&args).unwrap();
        assert_eq!(config.bind_addr, "127.0.0.1:4000".parse().unwrap());
        assert_eq!(config.highlight_mode, HighlightMode::Literal);
    }

    #[test]
    fn test_search_args_reject_zero_timeout() {
        let args = SearchArgs {
            query: "x".to_string(),
            case_sensitive: None,
            max_results: None,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            literal: false,
            format: crate::cli::OutputFormat::Text,
            timeout_secs: 0,
        };
        assert!(ClientConfig::from_args(&args).is_err());
    }
}
