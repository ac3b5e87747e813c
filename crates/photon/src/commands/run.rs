//! `photon run`: the keep-alive loop.

use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use photon_core::Monitor;

use crate::cli::GlobalOpts;
use crate::config;
use crate::error::CliError;

pub async fn handle(global: &GlobalOpts) -> Result<(), CliError> {
    let monitor_config = config::monitor_config(global)?;
    let start_delay = monitor_config.timings.start_delay;
    let mut monitor = Monitor::new(monitor_config)?;

    let cancel = CancellationToken::new();
    spawn_shutdown_listener(cancel.clone());

    info!(start_delay = ?start_delay, "starting");
    tokio::select! {
        biased;
        () = cancel.cancelled() => return Ok(()),
        () = tokio::time::sleep(start_delay) => {}
    }

    monitor.run(cancel).await;
    Ok(())
}

/// Cancel the monitor on Ctrl-C.
fn spawn_shutdown_listener(cancel: CancellationToken) {
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("shutdown requested");
                cancel.cancel();
            }
            Err(e) => warn!(error = %e, "cannot listen for Ctrl-C"),
        }
    });
}
