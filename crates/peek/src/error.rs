//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` variants into user-facing errors with actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use peek_config::ConfigError;
use peek_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not connect to backend at {url}")]
    #[diagnostic(
        code(peek::connection_failed),
        help(
            "Check the server URL and your network connection.\n\
             URL: {url}\n\
             Override with: peek --server <URL> ..."
        )
    )]
    ConnectionFailed {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Request timed out")]
    #[diagnostic(
        code(peek::timeout),
        help("Increase timeout with --timeout or check backend responsiveness.")
    )]
    Timeout,

    // ── Authentication ───────────────────────────────────────────────
    #[error("Not signed in, or the session has expired")]
    #[diagnostic(
        code(peek::session_expired),
        help("Sign in again with: peek auth login")
    )]
    SessionExpired,

    #[error("{message}")]
    #[diagnostic(
        code(peek::auth_failed),
        help("Check the email and password, or register with: peek auth register")
    )]
    AuthFailed { message: String },

    // ── Operations ───────────────────────────────────────────────────
    /// Backend refused the operation; `message` is what a user should read.
    #[error("{message}")]
    #[diagnostic(code(peek::rejected))]
    Rejected { message: String },

    #[error("API error ({status}): {message}")]
    #[diagnostic(code(peek::api_error))]
    ApiError { status: String, message: String },

    #[error("Session storage failed: {message}")]
    #[diagnostic(
        code(peek::storage),
        help("Switch token storage with: peek config set token_store file")
    )]
    Storage { message: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(peek::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(peek::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: peek config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error(transparent)]
    #[diagnostic(code(peek::config))]
    Config(#[from] ConfigError),

    #[error("Internal error: {0}")]
    #[diagnostic(code(peek::internal))]
    Internal(String),

    // ── IO ───────────────────────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::SessionExpired | Self::AuthFailed { .. } => exit_code::AUTH,
            Self::Timeout => exit_code::TIMEOUT,
            Self::Validation { .. } | Self::ProfileNotFound { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }

    /// Translate an error a view has already turned into display text.
    ///
    /// Local validation and rejected operations surface `shown` verbatim;
    /// transport and session failures keep their own diagnostics.
    pub fn from_view(err: CoreError, shown: &str) -> Self {
        match err {
            CoreError::ValidationFailed { .. } => CliError::Validation {
                field: "input".into(),
                reason: shown.to_owned(),
            },
            CoreError::Api { .. } | CoreError::Internal(_) => CliError::Rejected {
                message: shown.to_owned(),
            },
            other => other.into(),
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => CliError::ConnectionFailed {
                url,
                source: reason.into(),
            },

            CoreError::Timeout => CliError::Timeout,

            CoreError::Unauthorized { .. } => CliError::SessionExpired,

            CoreError::Storage { message } => CliError::Storage { message },

            CoreError::ValidationFailed { message } => CliError::Validation {
                field: "input".into(),
                reason: message,
            },

            CoreError::Api {
                message,
                detail: _,
                status,
            } => CliError::ApiError {
                status: status.map_or_else(|| "-".into(), |s| s.to_string()),
                message,
            },

            CoreError::Config { message } => CliError::Validation {
                field: "config".into(),
                reason: message,
            },

            CoreError::Internal(message) => CliError::Internal(message),
        }
    }
}
