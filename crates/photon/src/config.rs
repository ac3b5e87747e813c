//! CLI configuration — thin wrapper around `photon_config`.
//!
//! Adds the `GlobalOpts` flag overrides (--router, --username, ...) on top
//! of the file + environment layers.

use std::path::PathBuf;

use photon_core::MonitorConfig;

use crate::cli::GlobalOpts;
use crate::error::CliError;

pub use photon_config::{Config, config_path};

/// Config file in effect: `--config` or the platform default.
pub fn config_file(global: &GlobalOpts) -> PathBuf {
    global.config.clone().unwrap_or_else(config_path)
}

/// Load file + environment, then apply CLI flags.
pub fn load(global: &GlobalOpts) -> Result<Config, CliError> {
    let mut cfg = photon_config::load_config(global.config.as_deref())?;
    apply_overrides(&mut cfg, global);
    Ok(cfg)
}

fn apply_overrides(cfg: &mut Config, global: &GlobalOpts) {
    if let Some(ref url) = global.router {
        cfg.router.url = Some(url.clone());
    }
    if let Some(ref username) = global.username {
        cfg.router.username.clone_from(username);
    }
    if let Some(timeout) = global.timeout {
        cfg.router.timeout = timeout;
    }
    if global.insecure {
        cfg.router.insecure = true;
    }
}

/// Build the `MonitorConfig` for router-bound commands.
pub fn monitor_config(global: &GlobalOpts) -> Result<MonitorConfig, CliError> {
    let cfg = load(global)?;
    Ok(photon_config::to_monitor_config(&cfg)?)
}
