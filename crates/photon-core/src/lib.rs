//! Keep-alive monitor for a home router's internet uplink.
//!
//! Built on the wire client in `photon-api`, this crate adds the policy that
//! turns single requests into a resilient loop:
//!
//! - **[`Monitor`]** — Owns the [`RouterClient`](photon_api::RouterClient),
//!   a [`ReachabilityProbe`] and the [`Timings`]. Its operations are grouped
//!   by concern: session bootstrap and login, connectivity checks, dial
//!   control, and the [`run`](Monitor::run) loop.
//!
//! - **[`Backoff`]** — Fixed-interval retry budget shared by every retrying
//!   operation.
//!
//! - **[`MonitorState`]** — `Idle → SessionReady → LoggedIn → Connected`,
//!   observable through [`Monitor::subscribe`].
//!
//! Recoverable router failures (transport errors, unreadable bodies,
//! rejected sessions) are absorbed where they happen and show up as `false`
//! or [`ConnectionStatus::Empty`](photon_api::ConnectionStatus::Empty).
//! Only faults that retrying cannot fix surface as [`CoreError`].

pub mod config;
pub mod connectivity;
pub mod dial;
pub mod error;
pub mod monitor;
pub mod orchestrator;
pub mod probe;
pub mod retry;
pub mod session;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{DEFAULT_PROBE_TARGET, MonitorConfig, RetryPolicy, Timings, TlsVerification};
pub use error::CoreError;
pub use monitor::{Monitor, MonitorState};
pub use probe::{ReachabilityProbe, TcpProbe};
pub use retry::Backoff;

pub use photon_api::{ConnectionStatus, Credentials, DialAction};
