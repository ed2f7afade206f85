//! Error types and handling for the search controller and server

use std::fmt;

/// Application error types
#[derive(Debug)]
pub enum AppError {
    InvalidInput(String),
    FetchFailed(String),
    Timeout(String),
    BadStatus { status: u16, body: String },
    ParseFailed(String),
    InvalidPattern(String),
    Corpus(String),
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            AppError::FetchFailed(msg) => write!(f, "Search request failed: {}", msg),
            AppError::Timeout(msg) => write!(f, "Timeout: {}", msg),
            AppError::BadStatus { status, body } => {
                if body.is_empty() {
                    write!(f, "Search endpoint returned status {}", status)
                } else {
                    write!(f, "Search endpoint returned status {}: {}", status, body)
                }
            }
            AppError::ParseFailed(msg) => write!(f, "Search response parse failed: {}", msg),
            AppError::InvalidPattern(msg) => write!(f, "Invalid highlight pattern: {}", msg),
            AppError::Corpus(msg) => write!(f, "Corpus error: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl AppError {
    /// Stable machine-readable error code
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::InvalidInput(_) => "invalid_input",
            AppError::FetchFailed(_) => "fetch_failed",
            AppError::Timeout(_) => "timeout",
            AppError::BadStatus { .. } => "bad_status",
            AppError::ParseFailed(_) => "parse_failed",
            AppError::InvalidPattern(_) => "invalid_pattern",
            AppError::Corpus(_) => "corpus_error",
            AppError::Internal(_) => "internal_error",
        }
    }

    /// Process exit code used by the CLI
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::InvalidInput(_) | AppError::InvalidPattern(_) => 1,
            AppError::FetchFailed(_) | AppError::BadStatus { .. } | AppError::ParseFailed(_) => 2,
            AppError::Corpus(_) => 3,
            AppError::Timeout(_) => 4,
            AppError::Internal(_) => 5,
        }
    }
}

/// Convert anyhow::Error to AppError
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

/// Convert reqwest::Error to AppError
impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AppError::Timeout(err.to_string())
        } else if err.is_decode() {
            AppError::ParseFailed(err.to_string())
        } else if err.is_connect() || err.is_request() {
            AppError::FetchFailed(err.to_string())
        } else {
            AppError::Internal(err.to_string())
        }
    }
}

/// Convert serde_json::Error to AppError
impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::ParseFailed(err.to_string())
    }
}

/// Convert regex::Error to AppError
impl From<regex::Error> for AppError {
    fn from(err: regex::Error) -> Self {
        AppError::InvalidPattern(err.to_string())
    }
}

impl From<crate::server::error::CorpusError> for AppError {
    fn from(err: crate::server::error::CorpusError) -> Self {
        AppError::Corpus(err.to_string())
    }
}
