// Router API wire types
//
// XML bodies exchanged with the management API, plus the two enums the rest
// of the workspace reasons about. Element names are the firmware's own and
// must not change.

use std::fmt;

use serde::{Deserialize, Serialize};

/// `password_type` the router expects for the SHA-256 login digest.
pub const DEFAULT_PASSWORD_TYPE: u8 = 4;

// ── Enums ────────────────────────────────────────────────────────────

/// Uplink state as reported by `/api/monitoring/status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionStatus {
    /// Unknown: no session, or the status body could not be read.
    #[default]
    Empty,
    Connected,
    Disconnected,
    /// Any other code (transitional states such as connecting/disconnecting).
    Other(i32),
}

impl ConnectionStatus {
    pub fn from_code(code: i32) -> Self {
        match code {
            0 => Self::Empty,
            901 => Self::Connected,
            902 => Self::Disconnected,
            other => Self::Other(other),
        }
    }

    pub fn code(self) -> i32 {
        match self {
            Self::Empty => 0,
            Self::Connected => 901,
            Self::Disconnected => 902,
            Self::Other(code) => code,
        }
    }

    pub fn is_connected(self) -> bool {
        self == Self::Connected
    }
}

impl fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("empty"),
            Self::Connected => f.write_str("connected"),
            Self::Disconnected => f.write_str("disconnected"),
            Self::Other(code) => write!(f, "other({code})"),
        }
    }
}

/// WAN dial command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialAction {
    Disconnect,
    Connect,
}

impl DialAction {
    pub fn code(self) -> u8 {
        match self {
            Self::Disconnect => 0,
            Self::Connect => 1,
        }
    }

    /// Whether `status` is the state this action drives the router towards.
    ///
    /// A disconnect counts as done for every status except `Connected`.
    pub fn is_reached(self, status: ConnectionStatus) -> bool {
        match self {
            Self::Connect => status.is_connected(),
            Self::Disconnect => !status.is_connected(),
        }
    }
}

impl fmt::Display for DialAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disconnect => f.write_str("disconnect"),
            Self::Connect => f.write_str("connect"),
        }
    }
}

// ── Request bodies ───────────────────────────────────────────────────

/// `POST /api/user/login`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename = "request")]
pub struct LoginRequest {
    #[serde(rename = "Username")]
    pub username: String,
    /// Output of [`crate::hash::password_hash`], never the plaintext.
    #[serde(rename = "Password")]
    pub password: String,
    #[serde(rename = "password_type")]
    pub password_type: u8,
}

/// `POST /api/dialup/dial`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename = "request")]
pub struct DialRequest {
    #[serde(rename = "Action")]
    pub action: u8,
}

impl From<DialAction> for DialRequest {
    fn from(action: DialAction) -> Self {
        Self {
            action: action.code(),
        }
    }
}

// ── Response bodies ──────────────────────────────────────────────────

/// `GET /api/monitoring/status`. The router sends dozens of other
/// elements; only the uplink code is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename = "response")]
pub struct ConnectionStatusResponse {
    #[serde(rename = "ConnectionStatus")]
    pub connection_status: i32,
}

/// Negative reply: `<error><code>125002</code><message/></error>`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename = "error")]
pub struct RouterErrorResponse {
    pub code: u32,
}
