//! Configuration for the photon router monitor.
//!
//! TOML file + `PHOTON_` environment overrides, password resolution
//! (env + keyring + plaintext), and translation to
//! `photon_core::MonitorConfig`. The CLI layers its flag overrides on top.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use photon_core::{Credentials, MonitorConfig, RetryPolicy, Timings, TlsVerification};

/// Keyring service name for stored router passwords.
pub const KEYRING_SERVICE: &str = "photon";

/// Environment variable that overrides every other password source.
pub const PASSWORD_ENV: &str = "PHOTON_PASSWORD";

const REDACTED: &str = "********";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no password configured for router user '{username}'")]
    NoCredentials { username: String },

    #[error("keyring error: {0}")]
    Keyring(String),

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub router: RouterSection,

    #[serde(default)]
    pub monitor: MonitorSection,
}

/// `[router]`: where the router is and how to log in.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RouterSection {
    /// Router base URL (e.g., "http://192.168.1.1").
    pub url: Option<String>,

    #[serde(default = "default_username")]
    pub username: String,

    /// Password (plaintext — prefer keyring or env var).
    pub password: Option<String>,

    /// Environment variable name containing the password.
    pub password_env: Option<String>,

    /// HTTP request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Accept self-signed certificates.
    #[serde(default)]
    pub insecure: bool,
}

impl Default for RouterSection {
    fn default() -> Self {
        Self {
            url: None,
            username: default_username(),
            password: None,
            password_env: None,
            timeout: default_timeout(),
            insecure: false,
        }
    }
}

fn default_username() -> String {
    "admin".into()
}
fn default_timeout() -> u64 {
    30
}

/// `[monitor]`: delays, budgets and retry counts, in milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct MonitorSection {
    pub start_delay_ms: u64,
    pub redial_delay_ms: u64,
    pub relogin_interval_ms: u64,
    pub check_status_interval_ms: u64,
    pub lazy_check_interval_ms: u64,
    pub init_session_retry_interval_ms: u64,
    pub internet_test_retry_interval_ms: u64,
    pub total_fail_interval_ms: u64,
    pub dial_timeout_ms: u64,
    pub internet_test_timeout_ms: u64,
    pub max_connect_retries: u32,
    pub max_internet_test_retries: u32,
    pub max_reconnect_retries: u32,
    pub max_relogin_retries: u32,
    pub max_init_session_retries: u32,
    pub probe_target: String,
}

impl Default for MonitorSection {
    fn default() -> Self {
        Self {
            start_delay_ms: 1000,
            redial_delay_ms: 3000,
            relogin_interval_ms: 3000,
            check_status_interval_ms: 3000,
            lazy_check_interval_ms: 10_000,
            init_session_retry_interval_ms: 3000,
            internet_test_retry_interval_ms: 100,
            total_fail_interval_ms: 15 * 60 * 1000,
            dial_timeout_ms: 20_000,
            internet_test_timeout_ms: 1000,
            max_connect_retries: 5,
            max_internet_test_retries: 3,
            max_reconnect_retries: 5,
            max_relogin_retries: 5,
            max_init_session_retries: 20,
            probe_target: photon_core::DEFAULT_PROBE_TARGET.to_string(),
        }
    }
}

impl MonitorSection {
    /// Timing policy for the monitor.
    pub fn timings(&self) -> Timings {
        Timings {
            start_delay: Duration::from_millis(self.start_delay_ms),
            init_session: RetryPolicy::new(
                self.max_init_session_retries,
                self.init_session_retry_interval_ms,
            ),
            relogin: RetryPolicy::new(self.max_relogin_retries, self.relogin_interval_ms),
            internet_test: RetryPolicy::new(
                self.max_internet_test_retries,
                self.internet_test_retry_interval_ms,
            ),
            reconnect: RetryPolicy::new(self.max_reconnect_retries, 0),
            connect: RetryPolicy::new(self.max_connect_retries, self.redial_delay_ms),
            check_status_interval: Duration::from_millis(self.check_status_interval_ms),
            dial_timeout: Duration::from_millis(self.dial_timeout_ms),
            internet_test_timeout: Duration::from_millis(self.internet_test_timeout_ms),
            lazy_check_interval: Duration::from_millis(self.lazy_check_interval_ms),
            total_fail_interval: Duration::from_millis(self.total_fail_interval_ms),
        }
    }
}

impl Config {
    /// Copy with the plaintext password masked, for display.
    pub fn redacted(&self) -> Self {
        let mut cfg = self.clone();
        if cfg.router.password.is_some() {
            cfg.router.password = Some(REDACTED.into());
        }
        cfg
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "photon", "photon").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("photon");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from defaults, the TOML file and the environment.
///
/// `path` overrides the platform config path. A missing file is not an
/// error: defaults and environment still apply.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let path = path.map_or_else(config_path, Path::to_path_buf);

    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(&path))
        .merge(Env::prefixed("PHOTON_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write it to `path` (or the platform path).
pub fn save_config(cfg: &Config, path: Option<&Path>) -> Result<PathBuf, ConfigError> {
    let path = path.map_or_else(config_path, Path::to_path_buf);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(&path, toml_str)?;
    Ok(path)
}

// ── Credential resolution ───────────────────────────────────────────

fn keyring_user(username: &str) -> String {
    format!("{username}/password")
}

/// Resolve the router password from the credential chain.
pub fn resolve_password(router: &RouterSection) -> Result<SecretString, ConfigError> {
    resolve_password_from(
        router,
        |name| std::env::var(name).ok(),
        |user| {
            keyring::Entry::new(KEYRING_SERVICE, user)
                .and_then(|entry| entry.get_password())
                .ok()
        },
    )
}

/// Chain: `PHOTON_PASSWORD` → `password_env` → keyring → plaintext.
fn resolve_password_from(
    router: &RouterSection,
    env: impl Fn(&str) -> Option<String>,
    keyring: impl Fn(&str) -> Option<String>,
) -> Result<SecretString, ConfigError> {
    // 1. Global env var
    if let Some(pw) = env(PASSWORD_ENV) {
        return Ok(SecretString::from(pw));
    }

    // 2. Router's password_env → env var lookup
    if let Some(pw) = router.password_env.as_deref().and_then(&env) {
        return Ok(SecretString::from(pw));
    }

    // 3. System keyring
    if let Some(pw) = keyring(&keyring_user(&router.username)) {
        return Ok(SecretString::from(pw));
    }

    // 4. Plaintext in config
    if let Some(ref pw) = router.password {
        return Ok(SecretString::from(pw.clone()));
    }

    Err(ConfigError::NoCredentials {
        username: router.username.clone(),
    })
}

/// Store the router password in the system keyring.
pub fn store_password(username: &str, password: &str) -> Result<(), ConfigError> {
    keyring::Entry::new(KEYRING_SERVICE, &keyring_user(username))
        .and_then(|entry| entry.set_password(password))
        .map_err(|e| ConfigError::Keyring(e.to_string()))
}

// ── Translation to MonitorConfig ────────────────────────────────────

/// Build a `MonitorConfig`, validating the URL and probe target before
/// the password is resolved.
pub fn to_monitor_config(cfg: &Config) -> Result<MonitorConfig, ConfigError> {
    build_monitor_config(cfg, resolve_password)
}

fn build_monitor_config(
    cfg: &Config,
    password: impl FnOnce(&RouterSection) -> Result<SecretString, ConfigError>,
) -> Result<MonitorConfig, ConfigError> {
    let raw_url = cfg
        .router
        .url
        .as_deref()
        .ok_or_else(|| ConfigError::Validation {
            field: "router.url".into(),
            reason: "not set".into(),
        })?;
    let url: url::Url = raw_url.parse().map_err(|_| ConfigError::Validation {
        field: "router.url".into(),
        reason: format!("invalid URL: {raw_url}"),
    })?;

    if cfg.router.username.is_empty() {
        return Err(ConfigError::Validation {
            field: "router.username".into(),
            reason: "cannot be empty".into(),
        });
    }

    let probe_target: SocketAddr =
        cfg.monitor
            .probe_target
            .parse()
            .map_err(|_| ConfigError::Validation {
                field: "monitor.probe_target".into(),
                reason: format!("expected ip:port, got '{}'", cfg.monitor.probe_target),
            })?;

    let tls = if cfg.router.insecure {
        TlsVerification::DangerAcceptInvalid
    } else {
        TlsVerification::SystemDefaults
    };

    Ok(MonitorConfig {
        url,
        credentials: Credentials {
            username: cfg.router.username.clone(),
            password: password(&cfg.router)?,
        },
        tls,
        timeout: Duration::from_secs(cfg.router.timeout),
        timings: cfg.monitor.timings(),
        probe_target,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use secrecy::ExposeSecret;

    use super::*;

    fn write_config(dir: &tempfile::TempDir, body: &str) -> PathBuf {
        let path = dir.path().join("config.toml");
        std::fs::write(&path, body).unwrap();
        path
    }

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[allow(clippy::unnecessary_wraps)]
    fn fixed_password(_: &RouterSection) -> Result<SecretString, ConfigError> {
        Ok(SecretString::from("pw".to_string()))
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config(Some(&dir.path().join("absent.toml"))).unwrap();
        assert_eq!(cfg.router.username, "admin");
        assert_eq!(cfg.monitor, MonitorSection::default());
    }

    #[test]
    fn file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            &dir,
            r#"
[router]
url = "http://192.168.8.1"
username = "owner"
password = "hunter2"

[monitor]
dial_timeout_ms = 5000
max_connect_retries = 2
"#,
        );

        let cfg = load_config(Some(&path)).unwrap();
        assert_eq!(cfg.router.url.as_deref(), Some("http://192.168.8.1"));
        assert_eq!(cfg.router.username, "owner");
        assert_eq!(cfg.monitor.dial_timeout_ms, 5000);
        assert_eq!(cfg.monitor.max_connect_retries, 2);
        assert_eq!(cfg.monitor.lazy_check_interval_ms, 10_000);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "[router\nurl = ");
        assert!(matches!(load_config(Some(&path)), Err(ConfigError::Figment(_))));
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut cfg = Config::default();
        cfg.router.url = Some("http://10.0.0.1".into());
        cfg.monitor.redial_delay_ms = 750;

        let written = save_config(&cfg, Some(&path)).unwrap();
        assert_eq!(written, path);
        assert_eq!(load_config(Some(&path)).unwrap(), cfg);
    }

    #[test]
    fn redacted_masks_password_only() {
        let mut cfg = Config::default();
        cfg.router.password = Some("hunter2".into());
        let shown = cfg.redacted();
        assert_eq!(shown.router.password.as_deref(), Some(REDACTED));
        assert_eq!(shown.router.username, cfg.router.username);
        assert_eq!(Config::default().redacted().router.password, None);
    }

    #[test]
    fn password_chain_order() {
        let router = RouterSection {
            password: Some("plain".into()),
            password_env: Some("ROUTER_PW".into()),
            ..RouterSection::default()
        };

        let all_env = |name: &str| Some(format!("env:{name}"));
        let from_global = resolve_password_from(&router, all_env, |_| None).unwrap();
        assert_eq!(from_global.expose_secret(), "env:PHOTON_PASSWORD");

        let named_only = |name: &str| (name == "ROUTER_PW").then(|| "named".to_string());
        let from_named = resolve_password_from(&router, named_only, |_| None).unwrap();
        assert_eq!(from_named.expose_secret(), "named");

        let from_keyring =
            resolve_password_from(&router, no_env, |user| Some(format!("kr:{user}"))).unwrap();
        assert_eq!(from_keyring.expose_secret(), "kr:admin/password");

        let from_plain = resolve_password_from(&router, no_env, |_| None).unwrap();
        assert_eq!(from_plain.expose_secret(), "plain");
    }

    #[test]
    fn missing_password_is_no_credentials() {
        let router = RouterSection::default();
        let err = resolve_password_from(&router, no_env, |_| None).unwrap_err();
        assert!(matches!(err, ConfigError::NoCredentials { ref username } if username == "admin"));
    }

    #[test]
    fn monitor_config_translation() {
        let mut cfg = Config::default();
        cfg.router.url = Some("http://192.168.8.1".into());
        cfg.router.insecure = true;
        cfg.monitor.redial_delay_ms = 1234;

        let mc = build_monitor_config(&cfg, fixed_password).unwrap();
        assert_eq!(mc.url.as_str(), "http://192.168.8.1/");
        assert_eq!(mc.credentials.username, "admin");
        assert_eq!(mc.tls, TlsVerification::DangerAcceptInvalid);
        assert_eq!(mc.timeout, Duration::from_secs(30));
        assert_eq!(mc.timings.connect, RetryPolicy::new(5, 1234));
        assert_eq!(mc.probe_target.to_string(), "8.8.8.8:53");
    }

    #[test]
    fn default_section_matches_core_timings() {
        assert_eq!(MonitorSection::default().timings(), Timings::default());
    }

    #[test]
    fn missing_url_fails_validation() {
        let err = build_monitor_config(&Config::default(), fixed_password)
            .unwrap_err();
        assert!(matches!(err, ConfigError::Validation { ref field, .. } if field == "router.url"));
    }

    #[test]
    fn bad_probe_target_fails_validation() {
        let mut cfg = Config::default();
        cfg.router.url = Some("http://192.168.8.1".into());
        cfg.monitor.probe_target = "dns.google".into();

        let err = build_monitor_config(&cfg, fixed_password).unwrap_err();
        assert!(
            matches!(err, ConfigError::Validation { ref field, .. } if field == "monitor.probe_target")
        );
    }
}
