// Router dial-up endpoint

use tracing::debug;

use crate::client::{RouterClient, paths};
use crate::codec;
use crate::error::Error;
use crate::models::{DialAction, DialRequest};

impl RouterClient {
    /// Ask the router to bring the WAN link up or down.
    ///
    /// `POST /api/dialup/dial` with a [`DialRequest`] body.
    ///
    /// Returns whether the router acked the command. The link changes state
    /// asynchronously afterwards; poll [`connection_status`](Self::connection_status)
    /// to see the outcome.
    pub async fn dial(&mut self, action: DialAction) -> Result<bool, Error> {
        let token = self.take_token()?;
        let body = codec::serialize_xml(Some(&DialRequest::from(action)))?;
        let resp = self.post_xml(paths::DIAL, &token, body).await?;

        let accepted = resp.is_ok_marker();
        debug!(%action, accepted, "dial request");
        Ok(accepted)
    }
}
