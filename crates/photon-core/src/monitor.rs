// ── Monitor ──
//
// Owns the router client, the reachability probe and the timing policy.
// The policy operations are split across `session`, `connectivity`, `dial`
// and `orchestrator` as inherent methods on `Monitor`.

use tokio::sync::watch;
use tracing::{debug, warn};

use photon_api::transport::TransportConfig;
use photon_api::{RouterClient, TlsMode};

use crate::config::{MonitorConfig, Timings, TlsVerification};
use crate::error::CoreError;
use crate::probe::{ReachabilityProbe, TcpProbe};

// ── MonitorState ─────────────────────────────────────────────────

/// Progress of the monitor through the reconnect state machine.
///
/// Any failure falls back to `Idle` via [`Monitor::reset_session`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum MonitorState {
    Idle,
    SessionReady,
    LoggedIn,
    Connected,
}

// ── Monitor ──────────────────────────────────────────────────────

/// Keep-alive monitor for one router.
///
/// Every operation takes `&mut self`: the router's token protocol allows a
/// single request in flight, so the monitor is driven by one task.
pub struct Monitor<P = TcpProbe> {
    pub(crate) client: RouterClient,
    pub(crate) probe: P,
    pub(crate) timings: Timings,
    state: watch::Sender<MonitorState>,
}

impl Monitor<TcpProbe> {
    /// Build a monitor with a reqwest transport and a TCP probe.
    pub fn new(config: MonitorConfig) -> Result<Self, CoreError> {
        let transport = TransportConfig {
            tls: match config.tls {
                TlsVerification::SystemDefaults => TlsMode::System,
                TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
            },
            timeout: config.timeout,
        };
        let client = RouterClient::new(config.url, config.credentials, &transport)?;
        Ok(Self::with_probe(
            client,
            TcpProbe::new(config.probe_target),
            config.timings,
        ))
    }
}

impl<P: ReachabilityProbe> Monitor<P> {
    /// Assemble a monitor from parts. Tests inject a scripted probe here.
    pub fn with_probe(client: RouterClient, probe: P, timings: Timings) -> Self {
        let (state, _) = watch::channel(MonitorState::Idle);
        Self {
            client,
            probe,
            timings,
            state,
        }
    }

    pub fn client(&self) -> &RouterClient {
        &self.client
    }

    pub fn timings(&self) -> &Timings {
        &self.timings
    }

    /// Subscribe to state transitions.
    pub fn subscribe(&self) -> watch::Receiver<MonitorState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> MonitorState {
        *self.state.borrow()
    }

    pub(crate) fn set_state(&self, next: MonitorState) {
        let changed = self.state.send_if_modified(|current| {
            if *current == next {
                false
            } else {
                *current = next;
                true
            }
        });
        if changed {
            debug!(state = %next, "monitor state changed");
        }
    }

    /// Fold a wire-level result into the monitor's answer.
    ///
    /// Recoverable failures are logged and replaced by `fallback`; a
    /// rejected session also drops back to `Idle`. Everything else
    /// propagates.
    pub(crate) fn recover<T>(
        &mut self,
        operation: &'static str,
        result: Result<T, photon_api::Error>,
        fallback: T,
    ) -> Result<T, CoreError> {
        match result {
            Ok(value) => Ok(value),
            Err(e) if e.is_recoverable() => {
                warn!(operation, error = %e, "router request failed");
                if e.is_auth_expired() {
                    self.reset_session();
                }
                Ok(fallback)
            }
            Err(e) => Err(e.into()),
        }
    }
}
