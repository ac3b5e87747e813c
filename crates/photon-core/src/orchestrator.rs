// ── Reconnect orchestration ──
//
// One cycle checks the uplink and repairs it if needed; `run` repeats the
// cycle forever, sleeping briefly after a healthy cycle and for a long
// while after a hopeless one.

use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use crate::error::CoreError;
use crate::monitor::Monitor;
use crate::probe::ReachabilityProbe;
use crate::retry::Backoff;

impl<P: ReachabilityProbe> Monitor<P> {
    /// Restore the uplink if it is down.
    ///
    /// Each round logs in again when the router has forgotten the session
    /// and dials when the uplink is still down. A round that fails resets
    /// the session so the next one starts from a fresh bootstrap. Returns
    /// the last connectivity check.
    pub async fn try_reconnect(&mut self) -> Result<bool, CoreError> {
        let mut backoff = Backoff::new(self.timings.reconnect);
        loop {
            if self.is_connected().await? {
                return Ok(true);
            }
            if !backoff.wait().await {
                return Ok(false);
            }

            let logged_in = self.login_state().await? || self.try_relogin().await?;
            let repaired = logged_in && (self.is_connected().await? || self.connect().await?);
            if !repaired {
                self.reset_session();
            }
        }
    }

    /// Bootstrap a session and make sure the uplink is up.
    pub async fn run_cycle(&mut self) -> Result<bool, CoreError> {
        Ok(self.try_init_session().await? && self.try_reconnect().await?)
    }

    /// Run cycles until `cancel` fires.
    ///
    /// Errors escaping a cycle are logged and count as a failed cycle; they
    /// never end the loop.
    pub async fn run(&mut self, cancel: CancellationToken) {
        info!(router = %self.client.base_url(), "monitor started");

        loop {
            let connected = tokio::select! {
                biased;
                () = cancel.cancelled() => break,
                result = self.run_cycle() => match result {
                    Ok(connected) => connected,
                    Err(e) => {
                        error!(error = %e, "monitor cycle failed");
                        false
                    }
                },
            };

            let pause = if connected {
                let pause = self.timings.lazy_check_interval;
                info!(
                    "Internet is connected, checking status after {} ms",
                    pause.as_millis()
                );
                pause
            } else {
                let pause = self.timings.total_fail_interval;
                info!(
                    "Internet connection can not be established, retry after {} ms",
                    pause.as_millis()
                );
                pause
            };

            tokio::select! {
                biased;
                () = cancel.cancelled() => break,
                () = sleep(pause) => {}
            }
        }

        info!("monitor stopped");
    }
}
