//! `photon connect` / `photon disconnect`: one-shot dial with the
//! configured relogin, redial and polling policies.

use photon_core::{Monitor, TcpProbe};

use crate::cli::GlobalOpts;
use crate::config;
use crate::error::CliError;

async fn logged_in_monitor(global: &GlobalOpts) -> Result<Monitor<TcpProbe>, CliError> {
    let monitor_config = config::monitor_config(global)?;
    let username = monitor_config.credentials.username.clone();
    let mut monitor = Monitor::new(monitor_config)?;

    if !(monitor.login_state().await? || monitor.try_relogin().await?) {
        return Err(CliError::AuthFailed { username });
    }
    Ok(monitor)
}

pub async fn connect(global: &GlobalOpts) -> Result<(), CliError> {
    let mut monitor = logged_in_monitor(global).await?;
    if !monitor.connect().await? {
        return Err(CliError::DialFailed {
            action: "connect".into(),
        });
    }
    println!("Uplink connected");
    Ok(())
}

pub async fn disconnect(global: &GlobalOpts) -> Result<(), CliError> {
    let mut monitor = logged_in_monitor(global).await?;
    if !monitor.disconnect().await? {
        return Err(CliError::DialFailed {
            action: "disconnect".into(),
        });
    }
    println!("Uplink disconnected");
    Ok(())
}
