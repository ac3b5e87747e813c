// photon-api: Async Rust client for a home router's XML management API.
//
// Covers the wire protocol only: session bootstrap, the two-stage password
// digest, CSRF token rotation, and the login / status / dial endpoints.
// Retry policy and the monitoring loop live in `photon-core`.

pub mod auth;
pub mod client;
pub mod codec;
pub mod dial;
pub mod error;
pub mod hash;
pub mod models;
pub mod monitoring;
pub mod session;
pub mod transport;

pub use client::{Credentials, RawResponse, RouterClient};
pub use error::Error;
pub use models::{ConnectionStatus, DialAction};
pub use session::Session;
pub use transport::{TlsMode, TransportConfig};
