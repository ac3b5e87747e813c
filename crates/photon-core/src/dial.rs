// Dial control
//
// A dial command is only an ack; the link changes state afterwards. `dial`
// therefore polls the status until the target is reached or the budget is
// spent, and `connect` layers redials and an internet test on top.

use photon_api::DialAction;
use tokio::time::{Instant, sleep};
use tracing::{debug, info};

use crate::error::CoreError;
use crate::monitor::Monitor;
use crate::probe::ReachabilityProbe;
use crate::retry::Backoff;

impl<P: ReachabilityProbe> Monitor<P> {
    /// Send a dial command and wait for the router to reach its target.
    ///
    /// No poll is made when the router does not ack the command. Polls are
    /// spaced by `check_status_interval` and no pause is started that would
    /// end at or past the `dial_timeout` deadline. The target only counts
    /// when a poll observes it before the deadline, so a zero budget makes
    /// no poll at all.
    pub async fn dial(&mut self, action: DialAction) -> Result<bool, CoreError> {
        if !self.try_init_session().await? {
            return Ok(false);
        }

        let result = self.client.dial(action).await;
        let accepted = self.recover("dial", result, false)?;
        debug!("Dial ({action}): {}", if accepted { "success" } else { "fail" });
        if !accepted {
            return Ok(false);
        }

        let interval = self.timings.check_status_interval;
        let deadline = Instant::now() + self.timings.dial_timeout;
        let mut polls = 0_u32;
        let reached = loop {
            if Instant::now() >= deadline {
                break false;
            }
            polls += 1;
            let status = self.connection_status().await?;
            if action.is_reached(status) {
                // A slow poll can land past the deadline.
                break Instant::now() <= deadline;
            }
            if Instant::now() + interval >= deadline {
                break false;
            }
            sleep(interval).await;
        };

        debug!(
            polls,
            "Dial result ({action}): {}",
            if reached { "success" } else { "fail" }
        );
        Ok(reached)
    }

    /// Bring the uplink up and confirm the internet answers.
    ///
    /// After a failed attempt the link is torn down and redialed after
    /// `connect.interval`, up to `connect.max_retries` times.
    pub async fn connect(&mut self) -> Result<bool, CoreError> {
        debug!("Trying to connect...");
        let mut backoff = Backoff::new(self.timings.connect);

        let connected = loop {
            if self.dial(DialAction::Connect).await? && self.try_test_internet().await {
                break true;
            }
            if backoff.is_exhausted() {
                break false;
            }
            self.disconnect().await?;
            backoff.wait().await;
        };

        info!("Connection {}", if connected { "was established" } else { "failed" });
        Ok(connected)
    }

    /// Tear the uplink down, trying a second time if the first dial fails.
    pub async fn disconnect(&mut self) -> Result<bool, CoreError> {
        debug!("Trying to disconnect...");
        let disconnected =
            self.dial(DialAction::Disconnect).await? || self.dial(DialAction::Disconnect).await?;
        debug!("Disconnect: {}", if disconnected { "success" } else { "fail" });
        Ok(disconnected)
    }
}
