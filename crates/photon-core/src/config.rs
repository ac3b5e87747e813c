// ── Runtime monitor configuration ──
//
// These types describe *what* to watch and *how patiently*. They carry
// credential data and timing policy but never touch disk: `photon-config`
// builds a `MonitorConfig` and hands it in.

use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use std::time::Duration;

use photon_api::Credentials;
use url::Url;

/// Default reachability target: a public DNS resolver.
pub const DEFAULT_PROBE_TARGET: SocketAddr =
    SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::new(8, 8, 8, 8), 53));

/// TLS verification strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    SystemDefaults,
    /// Skip verification. Default: routers serve self-signed certs.
    #[default]
    DangerAcceptInvalid,
}

/// A fixed-interval retry policy: one attempt, then up to `max_retries`
/// more, each preceded by a pause of `interval`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub interval: Duration,
}

impl RetryPolicy {
    pub const fn new(max_retries: u32, interval_ms: u64) -> Self {
        Self {
            max_retries,
            interval: Duration::from_millis(interval_ms),
        }
    }
}

/// Every delay, budget and retry count the monitor uses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timings {
    /// Pause before the first cycle.
    pub start_delay: Duration,
    /// Session bootstrap attempts while the session stays empty.
    pub init_session: RetryPolicy,
    /// Login attempts inside a reconnect.
    pub relogin: RetryPolicy,
    /// Reachability probes before the uplink is declared dead.
    pub internet_test: RetryPolicy,
    /// Reconnect rounds per cycle.
    pub reconnect: RetryPolicy,
    /// Redials after a failed connect; `interval` is the redial delay.
    pub connect: RetryPolicy,
    /// Pause between status polls while a dial settles.
    pub check_status_interval: Duration,
    /// Budget for a dial to reach its target status.
    pub dial_timeout: Duration,
    /// Timeout of one reachability probe.
    pub internet_test_timeout: Duration,
    /// Sleep after a healthy cycle.
    pub lazy_check_interval: Duration,
    /// Sleep after a cycle that could not restore the uplink.
    pub total_fail_interval: Duration,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            start_delay: Duration::from_millis(1000),
            init_session: RetryPolicy::new(20, 3000),
            relogin: RetryPolicy::new(5, 3000),
            internet_test: RetryPolicy::new(3, 100),
            reconnect: RetryPolicy::new(5, 0),
            connect: RetryPolicy::new(5, 3000),
            check_status_interval: Duration::from_millis(3000),
            dial_timeout: Duration::from_millis(20_000),
            internet_test_timeout: Duration::from_millis(1000),
            lazy_check_interval: Duration::from_millis(10_000),
            total_fail_interval: Duration::from_secs(15 * 60),
        }
    }
}

/// Configuration for monitoring a single router.
///
/// Built by the CLI, passed to [`Monitor::new`](crate::Monitor::new).
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// Router root URL (e.g., `http://192.168.1.1`).
    pub url: Url,
    pub credentials: Credentials,
    /// TLS verification strategy.
    pub tls: TlsVerification,
    /// HTTP request timeout.
    pub timeout: Duration,
    pub timings: Timings,
    /// Address the reachability probe connects to.
    pub probe_target: SocketAddr,
}
