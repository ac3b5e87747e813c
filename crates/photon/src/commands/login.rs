//! `photon login`: one bootstrap and one login attempt.

use photon_core::Monitor;

use crate::cli::GlobalOpts;
use crate::config;
use crate::error::CliError;

pub async fn handle(global: &GlobalOpts) -> Result<(), CliError> {
    let monitor_config = config::monitor_config(global)?;
    let username = monitor_config.credentials.username.clone();
    let mut monitor = Monitor::new(monitor_config)?;

    if !monitor.login().await? {
        return Err(CliError::AuthFailed { username });
    }
    println!("Logged in to {} as {username}", monitor.client().base_url());
    Ok(())
}
