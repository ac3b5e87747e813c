// Session bootstrap and login policy.

use tracing::{debug, info};

use crate::error::CoreError;
use crate::monitor::{Monitor, MonitorState};
use crate::probe::ReachabilityProbe;
use crate::retry::Backoff;

impl<P: ReachabilityProbe> Monitor<P> {
    /// Bootstrap a session unless one is already held.
    ///
    /// Attempts continue while the session stays empty: one immediate try,
    /// then up to `init_session.max_retries` more after a pause each. A
    /// failed request counts as an empty result.
    pub async fn try_init_session(&mut self) -> Result<bool, CoreError> {
        let mut backoff = Backoff::new(self.timings.init_session);
        let mut attempts = 0_u32;

        while self.client.session().is_empty() {
            if attempts > 0 && !backoff.wait().await {
                break;
            }
            attempts += 1;
            let result = self.client.init_session().await;
            self.recover("init_session", result, ())?;
        }

        let ready = !self.client.session().is_empty();
        if ready {
            if self.state() == MonitorState::Idle {
                self.set_state(MonitorState::SessionReady);
            }
        } else {
            debug!(attempts, "session bootstrap gave up");
        }
        Ok(ready)
    }

    /// Bootstrap if needed, then log in once.
    pub async fn login(&mut self) -> Result<bool, CoreError> {
        if !self.try_init_session().await? {
            info!("Login: fail");
            return Ok(false);
        }
        let result = self.client.login().await;
        let logged_in = self.recover("login", result, false)?;
        if logged_in {
            self.set_state(MonitorState::LoggedIn);
        }
        Ok(logged_in)
    }

    /// Log in, retrying at `relogin.interval` up to `relogin.max_retries` times.
    pub async fn try_relogin(&mut self) -> Result<bool, CoreError> {
        let mut backoff = Backoff::new(self.timings.relogin);
        loop {
            if self.login().await? {
                return Ok(true);
            }
            if !backoff.wait().await {
                return Ok(false);
            }
        }
    }

    /// Whether the router still considers the session logged in.
    pub async fn login_state(&mut self) -> Result<bool, CoreError> {
        let result = self.client.login_state().await;
        let logged_in = self.recover("login_state", result, false)?;
        if logged_in && self.state() < MonitorState::LoggedIn {
            self.set_state(MonitorState::LoggedIn);
        }
        Ok(logged_in)
    }

    /// Drop the cookie and every token; the next operation bootstraps afresh.
    pub fn reset_session(&mut self) {
        self.client.reset_session();
        self.set_state(MonitorState::Idle);
    }
}
