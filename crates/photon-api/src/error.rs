use thiserror::Error;

/// Top-level error type for the `photon-api` crate.
///
/// Splits into two families: operational failures the monitor is expected to
/// ride out (transport, malformed bodies, rejected sessions, missing tokens)
/// and faults that no amount of retrying will fix (bad URLs, TLS setup, XML
/// encoding of our own requests). See [`Error::is_recoverable`].
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, reset, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Request timed out.
    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS setup or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Session ─────────────────────────────────────────────────────
    /// The router rejected our cookie or token.
    #[error("Session rejected by router: {message}")]
    AuthExpired { message: String },

    /// An authenticated request was attempted with an empty token stack.
    #[error("No CSRF token available -- session must be re-initialized")]
    NoTokenAvailable,

    /// An authenticated request was attempted before session bootstrap.
    #[error("Session not initialized")]
    SessionNotInitialized,

    // ── Data ────────────────────────────────────────────────────────
    /// Response body could not be decoded, with the raw body for debugging.
    #[error("Malformed response: {message}")]
    MalformedResponse { message: String, body: String },

    /// Failed to encode a request body.
    #[error("XML serialization error: {0}")]
    Xml(String),
}

impl Error {
    /// Returns `true` if this error indicates the router no longer accepts
    /// our session and a fresh bootstrap is required.
    pub fn is_auth_expired(&self) -> bool {
        matches!(
            self,
            Self::AuthExpired { .. } | Self::NoTokenAvailable | Self::SessionNotInitialized
        )
    }

    /// Returns `true` for every failure the monitoring loop handles locally
    /// (by retrying or resetting the session) instead of propagating.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::Transport(_) | Self::Timeout { .. } | Self::MalformedResponse { .. }
        ) || self.is_auth_expired()
    }
}
