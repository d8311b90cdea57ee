// ── Core error types ──
//
// User-facing errors from peek-core. Views and the CLI never see raw HTTP
// plumbing; the `From<peek_api::Error>` impl translates transport-layer
// errors into these variants.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot connect to backend at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Backend request timed out")]
    Timeout,

    // ── Session errors ───────────────────────────────────────────────
    /// The backend rejected the session. The token is already gone and
    /// navigation to the login route already happened.
    #[error("Not authorized: {}", detail.as_deref().unwrap_or("please sign in again"))]
    Unauthorized { detail: Option<String> },

    #[error("Session storage failed: {message}")]
    Storage { message: String },

    // ── Operation errors ─────────────────────────────────────────────
    /// Local precondition failed; nothing was sent.
    #[error("{message}")]
    ValidationFailed { message: String },

    #[error("API error: {message}")]
    Api {
        message: String,
        /// The backend's `detail` text, shown verbatim to users.
        detail: Option<String>,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Text to show a user: validation text or backend `detail` verbatim,
    /// otherwise the supplied localized fallback.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::ValidationFailed { message } => message.clone(),
            Self::Unauthorized {
                detail: Some(detail),
            }
            | Self::Api {
                detail: Some(detail),
                ..
            } => detail.clone(),
            _ => fallback.to_owned(),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<peek_api::Error> for CoreError {
    fn from(err: peek_api::Error) -> Self {
        match err {
            peek_api::Error::Unauthorized { detail } => CoreError::Unauthorized { detail },
            peek_api::Error::Api {
                status,
                detail,
                body: _,
            } => CoreError::Api {
                message: detail
                    .clone()
                    .unwrap_or_else(|| format!("request failed with HTTP {status}")),
                detail,
                status: Some(status),
            },
            peek_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map_or_else(|| "<unknown>".into(), ToString::to_string),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        detail: None,
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            peek_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            peek_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            peek_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Deserialization error: {message}"))
            }
            peek_api::Error::Io { path, source } => CoreError::ValidationFailed {
                message: format!("cannot read {path}: {source}"),
            },
        }
    }
}

impl From<peek_api::SessionStoreError> for CoreError {
    fn from(err: peek_api::SessionStoreError) -> Self {
        CoreError::Storage {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_wins_over_fallback() {
        let err = CoreError::from(peek_api::Error::Api {
            status: 400,
            detail: Some("Email already registered".into()),
            body: String::new(),
        });
        assert_eq!(err.user_message("generic"), "Email already registered");
    }

    #[test]
    fn fallback_without_detail() {
        let err = CoreError::from(peek_api::Error::Api {
            status: 500,
            detail: None,
            body: "boom".into(),
        });
        assert_eq!(err.user_message("generic"), "generic");
        assert!(matches!(err, CoreError::Api { status: Some(500), .. }));
    }

    #[test]
    fn unauthorized_maps_through() {
        let err = CoreError::from(peek_api::Error::Unauthorized { detail: None });
        assert!(err.is_unauthorized());
        assert_eq!(err.user_message("sign in"), "sign in");
    }
}
