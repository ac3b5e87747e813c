// Router monitoring endpoint
//
// Uplink status as the router sees it. The body is a large <response>
// document; only <ConnectionStatus> is read.

use tracing::debug;

use crate::client::{RouterClient, paths};
use crate::codec;
use crate::error::Error;
use crate::models::{ConnectionStatus, ConnectionStatusResponse};

impl RouterClient {
    /// Read the router-reported uplink status.
    ///
    /// `GET /api/monitoring/status`
    ///
    /// Returns [`ConnectionStatus::Empty`] without a request when the session
    /// is empty, and also when the body cannot be parsed: an unknown status
    /// is an ordinary answer, not an error. Only transport failures are `Err`.
    pub async fn connection_status(&self) -> Result<ConnectionStatus, Error> {
        if self.session().is_empty() {
            debug!(status = %ConnectionStatus::Empty, "connection status (no session)");
            return Ok(ConnectionStatus::Empty);
        }

        let resp = self.get_with_cookie(paths::STATUS).await?;
        let status = match codec::deserialize_xml::<ConnectionStatusResponse>(&resp.body) {
            Ok(parsed) => ConnectionStatus::from_code(parsed.connection_status),
            Err(e) => {
                debug!(error = %e, "status body unreadable, treating as empty");
                ConnectionStatus::Empty
            }
        };

        debug!(%status, "connection status");
        Ok(status)
    }
}
