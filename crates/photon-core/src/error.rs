// ── Core error types ──
//
// Errors that escape a monitor operation. Recoverable router failures never
// get this far: the monitor folds them into `false` / `Empty` where they
// happen. What remains is translated from `photon_api::Error` here.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot reach router at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Router request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    // ── Router errors ────────────────────────────────────────────────
    #[error("Router error: {message}")]
    Router { message: String },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<photon_api::Error> for CoreError {
    fn from(err: photon_api::Error) -> Self {
        match err {
            photon_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout { timeout_secs: 0 }
                } else {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map(ToString::to_string)
                            .unwrap_or_else(|| "<unknown>".into()),
                        reason: e.to_string(),
                    }
                }
            }
            photon_api::Error::Timeout { timeout_secs } => CoreError::Timeout { timeout_secs },
            photon_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            photon_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            photon_api::Error::AuthExpired { message } => {
                CoreError::AuthenticationFailed { message }
            }
            photon_api::Error::NoTokenAvailable => CoreError::AuthenticationFailed {
                message: "No CSRF token left -- session must be re-initialized".into(),
            },
            photon_api::Error::SessionNotInitialized => CoreError::AuthenticationFailed {
                message: "Session not initialized".into(),
            },
            photon_api::Error::MalformedResponse { message, body: _ } => CoreError::Router {
                message: format!("Malformed response: {message}"),
            },
            photon_api::Error::Xml(msg) => {
                CoreError::Internal(format!("XML serialization error: {msg}"))
            }
        }
    }
}
