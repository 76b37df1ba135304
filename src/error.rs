//! Error types for package generation and publishing.
//!
//! Resolution errors are raised before any network call is attempted;
//! service failures carry the HTTP status, status text, and raw body so
//! callers can display them.

use std::fmt;

use thiserror::Error;

/// Result type alias for agpack operations
pub type Result<T> = std::result::Result<T, AgpackError>;

/// Main error type for all agpack operations
#[derive(Error, Debug)]
pub enum AgpackError {
    /// CLI argument errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing errors
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// Transport-level HTTP errors (connect failure, timeout, bad TLS)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The manifest is unusable as an input (e.g. carries neither a name
    /// nor a short name).
    #[error("invalid manifest: {0}")]
    Manifest(String),

    /// No manifest icon satisfies the size and format requirements.
    #[error(
        "no suitable icon found; the manifest needs a square PNG icon of 512x512 or larger"
    )]
    NoSuitableIcon,

    /// The package options failed pre-submission validation.
    ///
    /// Generation must not proceed while this list is non-empty.
    #[error("invalid package options: {}", format_validation_errors(.0))]
    Validation(Vec<ValidationError>),

    /// The build service rejected the request, or a retry also failed.
    #[error("build service error\n\nStatus code: {status}\n\nError: {status_text}\n\nDetails: {body}")]
    BuildService {
        /// HTTP status code received
        status: u16,
        /// Canonical status text
        status_text: String,
        /// Raw response body for diagnostics
        body: String,
    },

    /// Generic errors from anyhow
    #[error("{0}")]
    Anyhow(#[from] anyhow::Error),
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid command line arguments
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },

    /// Missing required argument
    #[error("Missing required argument: {argument}")]
    MissingArgument {
        /// Argument name
        argument: String,
    },
}

/// A single pre-submission validation failure.
///
/// `field` names the wire field that failed (e.g. `packageId`), so the
/// message can be mapped back to the input that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Wire-level field name the error applies to
    pub field: String,
    /// Human-readable description of the problem
    pub message: String,
}

impl ValidationError {
    /// Create a validation error for `field`.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
