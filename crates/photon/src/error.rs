//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text and process exit codes.

use miette::Diagnostic;
use thiserror::Error;

use photon_config::ConfigError;
use photon_core::CoreError;

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

    #[error("Could not reach router at {url}")]
    #[diagnostic(
        code(photon::connection_failed),
        help(
            "Check that the router is powered and reachable from this host.\n\
             URL: {url}"
        )
    )]
    ConnectionFailed {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Router did not finish '{action}'")]
    #[diagnostic(
        code(photon::dial_failed),
        help("Run with -v to follow the status polls, or raise monitor.dial_timeout_ms.")
    )]
    DialFailed { action: String },

    // ── Authentication ───────────────────────────────────────────────

    #[error("Login failed for '{username}'")]
    #[diagnostic(
        code(photon::auth_failed),
        help(
            "Verify the router credentials.\n\
             Run: photon config set-password"
        )
    )]
    AuthFailed { username: String },

    #[error("No password configured for '{username}'")]
    #[diagnostic(
        code(photon::no_credentials),
        help(
            "Store one with: photon config set-password\n\
             Or set the PHOTON_PASSWORD environment variable."
        )
    )]
    NoCredentials { username: String },

    #[error("Router rejected the session: {message}")]
    #[diagnostic(
        code(photon::session_rejected),
        help("Another client may have logged in. Retry, or use `photon run` to re-login automatically.")
    )]
    SessionRejected { message: String },

    // ── Router ───────────────────────────────────────────────────────

    #[error("Router error: {message}")]
    #[diagnostic(code(photon::router))]
    Router { message: String },

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(photon::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error("No router URL configured")]
    #[diagnostic(
        code(photon::no_config),
        help(
            "Pass --router http://192.168.1.1, set PHOTON_ROUTER__URL,\n\
             or add `url` under [router] in {path}"
        )
    )]
    NoConfig { path: String },

    #[error(transparent)]
    #[diagnostic(code(photon::config))]
    Config(Box<figment::Error>),

    #[error("Keyring error: {message}")]
    #[diagnostic(
        code(photon::keyring),
        help("Use PHOTON_PASSWORD or a plaintext `password` under [router] instead.")
    )]
    Keyring { message: String },

    // ── Timeout ──────────────────────────────────────────────────────

    #[error("Request timed out after {seconds}s")]
    #[diagnostic(
        code(photon::timeout),
        help("Increase timeout with --timeout or check router responsiveness.")
    )]
    Timeout { seconds: u64 },

    // ── IO / Serialization ────────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to encode output: {0}")]
    #[diagnostic(code(photon::json))]
    Json(#[from] serde_json::Error),

    #[error("Failed to encode config: {0}")]
    #[diagnostic(code(photon::toml))]
    Toml(#[from] toml::ser::Error),
}

impl From<figment::Error> for CliError {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } | Self::DialFailed { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } | Self::NoCredentials { .. } | Self::SessionRejected { .. } => {
                exit_code::AUTH
            }
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::Validation { .. } | Self::NoConfig { .. } | Self::Config(_) => exit_code::USAGE,
            _ => exit_code::GENERAL,
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
            CoreError::AuthenticationFailed { message } => CliError::SessionRejected { message },
            CoreError::Timeout { timeout_secs } => CliError::Timeout {
                seconds: timeout_secs,
            },
            CoreError::Router { message } | CoreError::Internal(message) => {
                CliError::Router { message }
            }
            CoreError::Config { message } => CliError::Validation {
                field: "config".into(),
                reason: message,
            },
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } if field == "router.url" && reason == "not set" => {
                CliError::NoConfig {
                    path: photon_config::config_path().display().to_string(),
                }
            }
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            ConfigError::NoCredentials { username } => CliError::NoCredentials { username },
            ConfigError::Keyring(message) => CliError::Keyring { message },
            ConfigError::Serialization(e) => CliError::Toml(e),
            ConfigError::Figment(e) => CliError::Config(e),
            ConfigError::Io(e) => CliError::Io(e),
        }
    }
}
