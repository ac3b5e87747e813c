// Uplink health: router-reported status plus an independent reachability probe.

use photon_api::ConnectionStatus;
use tracing::debug;

use crate::error::CoreError;
use crate::monitor::{Monitor, MonitorState};
use crate::probe::ReachabilityProbe;
use crate::retry::Backoff;

impl<P: ReachabilityProbe> Monitor<P> {
    /// Router-reported uplink status. `Empty` when there is no session, the
    /// body is unreadable or the request failed.
    pub async fn connection_status(&mut self) -> Result<ConnectionStatus, CoreError> {
        debug!("Checking connection status...");
        let result = self.client.connection_status().await;
        self.recover("connection_status", result, ConnectionStatus::Empty)
    }

    /// One reachability probe bounded by `internet_test_timeout`.
    pub async fn test_internet(&self) -> bool {
        let reachable = match self.probe.probe(self.timings.internet_test_timeout).await {
            Ok(()) => true,
            Err(e) => {
                debug!(error = %e, "reachability probe failed");
                false
            }
        };
        debug!("Internet test: {}", if reachable { "success" } else { "fail" });
        reachable
    }

    /// Probe, retrying at `internet_test.interval` up to `internet_test.max_retries` times.
    pub async fn try_test_internet(&self) -> bool {
        let mut backoff = Backoff::new(self.timings.internet_test);
        loop {
            if self.test_internet().await {
                return true;
            }
            if !backoff.wait().await {
                return false;
            }
        }
    }

    /// The router reports `Connected` and the internet answers.
    ///
    /// The probe only runs when the router status is `Connected`.
    pub async fn is_connected(&mut self) -> Result<bool, CoreError> {
        let connected = self.connection_status().await?.is_connected()
            && self.try_test_internet().await;
        if connected {
            self.set_state(MonitorState::Connected);
        } else if self.state() == MonitorState::Connected {
            self.set_state(MonitorState::LoggedIn);
        }
        Ok(connected)
    }
}
