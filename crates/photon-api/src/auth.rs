// Router authentication
//
// Session bootstrap from the home page, the login POST with the hashed
// password, and the state-login probe. The router only trusts a login once
// state-login agrees: under token races it can ack the POST and still report
// the session as logged out.

use reqwest::header::SET_COOKIE;
use secrecy::ExposeSecret;
use tracing::{debug, info};

use crate::client::{CSRF_META_NAME, RouterClient, paths};
use crate::codec;
use crate::error::Error;
use crate::hash::password_hash;
use crate::models::{DEFAULT_PASSWORD_TYPE, LoginRequest};
use crate::session::Session;

impl RouterClient {
    /// Fetch the home page for a fresh cookie and CSRF tokens.
    ///
    /// `GET /html/home.html`
    ///
    /// Replaces whatever session was held before, even when the page yields
    /// no cookie or no tokens (the session is then empty).
    pub async fn init_session(&mut self) -> Result<(), Error> {
        let resp = self.get(paths::HOME).await?;

        let cookie = codec::extract_header(&resp.headers, SET_COOKIE.as_str())
            .map(|raw| codec::cookie_value(&raw).to_owned());
        let tokens = codec::extract_meta_content(&resp.body, CSRF_META_NAME);

        debug!(
            has_cookie = cookie.is_some(),
            tokens = tokens.len(),
            "session was initialized"
        );
        self.replace_session(Session::from_parts(cookie, tokens));
        Ok(())
    }

    /// Ask the router whether the current session is logged in.
    ///
    /// `GET /api/user/state-login`
    ///
    /// An empty session is never logged in and costs no request. Otherwise
    /// the session counts as logged in unless the body says `<State>-1</State>`;
    /// an empty body is taken as logged in.
    pub async fn login_state(&self) -> Result<bool, Error> {
        let logged_in = if self.session().is_empty() {
            false
        } else {
            let resp = self.get_with_cookie(paths::STATE_LOGIN).await?;
            !resp.body.contains(codec::LOGGED_OUT_MARKER)
        };
        debug!(logged_in, "login state");
        Ok(logged_in)
    }

    /// Log in with the configured credentials.
    ///
    /// `POST /api/user/login` with a [`LoginRequest`] body.
    ///
    /// Consumes one CSRF token, which is also mixed into the password digest.
    /// Returns `Ok(false)` without a state check when the router does not
    /// ack with `<response>OK</response>`; otherwise the result of a
    /// follow-up [`login_state`](Self::login_state).
    pub async fn login(&mut self) -> Result<bool, Error> {
        let token = self.take_token()?;
        let username = self.credentials().username.clone();
        let password = password_hash(
            &username,
            self.credentials().password.expose_secret(),
            &token,
        );

        debug!(%username, "logging in");
        let body = codec::serialize_xml(Some(&LoginRequest {
            username,
            password,
            password_type: DEFAULT_PASSWORD_TYPE,
        }))?;
        let resp = self.post_xml(paths::LOGIN, &token, body).await?;

        if let Some(raw) = codec::extract_header(&resp.headers, SET_COOKIE.as_str()) {
            let cookie = codec::cookie_value(&raw).to_owned();
            self.session_mut().set_cookie(Some(cookie));
        }

        let accepted = resp.is_ok_marker();
        info!("Login: {}", if accepted { "success" } else { "fail" });
        if !accepted {
            return Ok(false);
        }
        self.login_state().await
    }
}
