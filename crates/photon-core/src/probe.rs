// Internet reachability probe
//
// ICMP needs raw sockets (root or CAP_NET_RAW), so the production probe
// opens a TCP connection to a well-known public service instead. Anything
// that completes a handshake within the timeout counts as reachable.

use std::future::Future;
use std::io;
use std::net::SocketAddr;
use std::time::Duration;

use tokio::net::TcpStream;

use crate::config::DEFAULT_PROBE_TARGET;

/// One-shot check that the public internet answers.
pub trait ReachabilityProbe: Send + Sync {
    /// Probe once, giving up after `timeout`.
    fn probe(&self, timeout: Duration) -> impl Future<Output = io::Result<()>> + Send;
}

/// TCP connect probe against a fixed address.
#[derive(Debug, Clone, Copy)]
pub struct TcpProbe {
    target: SocketAddr,
}

impl TcpProbe {
    pub fn new(target: SocketAddr) -> Self {
        Self { target }
    }

    pub fn target(&self) -> SocketAddr {
        self.target
    }
}

impl Default for TcpProbe {
    fn default() -> Self {
        Self::new(DEFAULT_PROBE_TARGET)
    }
}

impl ReachabilityProbe for TcpProbe {
    async fn probe(&self, timeout: Duration) -> io::Result<()> {
        match tokio::time::timeout(timeout, TcpStream::connect(self.target)).await {
            Ok(stream) => stream.map(drop),
            Err(_) => Err(io::Error::new(
                io::ErrorKind::TimedOut,
                format!("no answer from {} within {timeout:?}", self.target),
            )),
        }
    }
}
