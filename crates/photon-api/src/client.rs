// Router HTTP client
//
// Wraps `reqwest::Client` with endpoint URL construction, cookie and CSRF
// header handling, and token rotation. Endpoint operations (auth, status,
// dial) are implemented as inherent methods in separate files to keep this
// module focused on transport mechanics.

use std::ops::RangeInclusive;
use std::time::Duration;

use reqwest::StatusCode;
use reqwest::header::{CONTENT_TYPE, COOKIE, HeaderMap};
use secrecy::SecretString;
use tracing::{debug, trace, warn};
use url::Url;

use crate::codec;
use crate::error::Error;
use crate::session::Session;
use crate::transport::TransportConfig;

/// Endpoint paths, relative to the router base URL.
pub mod paths {
    pub const HOME: &str = "/html/home.html";
    pub const STATE_LOGIN: &str = "/api/user/state-login";
    pub const LOGIN: &str = "/api/user/login";
    pub const STATUS: &str = "/api/monitoring/status";
    pub const DIAL: &str = "/api/dialup/dial";
}

/// Request and response header carrying the CSRF token.
pub const TOKEN_HEADER: &str = "__RequestVerificationToken";

/// `<meta name=...>` holding CSRF tokens on the home page.
pub const CSRF_META_NAME: &str = "csrf_token";

/// Router error codes for a wrong token, a token/session mismatch and an
/// expired session.
const SESSION_ERROR_CODES: RangeInclusive<u32> = 125_001..=125_003;

/// Login credentials. The password never leaves this struct in plaintext
/// except to be hashed.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: SecretString,
}

/// Status, headers and body of a completed exchange.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl RawResponse {
    /// Whether the body carries the `<response>OK</response>` marker.
    pub fn is_ok_marker(&self) -> bool {
        self.body.contains(codec::OK_MARKER)
    }
}

/// HTTP client for a single router, owning that router's session.
///
/// All methods that touch the session take `&mut self`: the token protocol
/// only works when requests go out strictly one at a time.
pub struct RouterClient {
    http: reqwest::Client,
    base_url: Url,
    credentials: Credentials,
    timeout: Duration,
    session: Session,
}

impl RouterClient {
    /// Create a client from a `TransportConfig`.
    ///
    /// `base_url` is the router root, e.g. `http://192.168.1.1`.
    pub fn new(
        base_url: Url,
        credentials: Credentials,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self {
            http,
            base_url,
            credentials,
            timeout: transport.timeout,
            session: Session::new(),
        })
    }

    /// Create a client around a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url, credentials: Credentials) -> Self {
        Self {
            http,
            base_url,
            credentials,
            timeout: TransportConfig::default().timeout,
            session: Session::new(),
        }
    }

    /// The router base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Current session (cookie + token stack).
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Forget the cookie and every token, forcing a fresh bootstrap.
    pub fn reset_session(&mut self) {
        self.session.reset();
        debug!("session was reset");
    }

    pub(crate) fn replace_session(&mut self, session: Session) {
        self.session = session;
    }

    pub(crate) fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Build a full URL for an endpoint path: `{base}{path}`.
    pub(crate) fn endpoint_url(&self, path: &str) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        Url::parse(&format!("{base}{path}")).map_err(Error::InvalidUrl)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send an unauthenticated GET.
    pub(crate) async fn get(&self, path: &str) -> Result<RawResponse, Error> {
        let url = self.endpoint_url(path)?;
        debug!("GET {}", url);
        self.execute(self.http.get(url)).await
    }

    /// Send a GET carrying the session cookie.
    pub(crate) async fn get_with_cookie(&self, path: &str) -> Result<RawResponse, Error> {
        let cookie = self.session.cookie().ok_or(Error::SessionNotInitialized)?;
        let url = self.endpoint_url(path)?;
        debug!("GET {}", url);
        self.execute(self.http.get(url).header(COOKIE, cookie)).await
    }

    /// Consume the top CSRF token for the next POST.
    pub(crate) fn take_token(&mut self) -> Result<String, Error> {
        if self.session.cookie().is_none() {
            return Err(Error::SessionNotInitialized);
        }
        self.session.pop_token()
    }

    /// POST an XML body with the cookie and an already-taken token.
    ///
    /// Any token the router returns is pushed back, so a successful exchange
    /// leaves the stack at its depth from before [`take_token`](Self::take_token).
    /// A rejected session resets the local session and yields
    /// [`Error::AuthExpired`].
    pub(crate) async fn post_xml(
        &mut self,
        path: &str,
        token: &str,
        body: String,
    ) -> Result<RawResponse, Error> {
        let cookie = self.session.cookie().ok_or(Error::SessionNotInitialized)?;
        let url = self.endpoint_url(path)?;
        debug!("POST {}", url);

        let builder = self
            .http
            .post(url)
            .header(COOKIE, cookie)
            .header(TOKEN_HEADER, token)
            .header(CONTENT_TYPE, "text/xml")
            .body(body);
        let resp = self.execute(builder).await?;

        let rotated = codec::extract_header(&resp.headers, TOKEN_HEADER);
        if rotated.is_some() {
            trace!("CSRF token rotated");
        }
        self.session.push_token(rotated);

        self.check_session_rejected(&resp)?;
        Ok(resp)
    }

    async fn execute(&self, builder: reqwest::RequestBuilder) -> Result<RawResponse, Error> {
        let resp = builder.send().await.map_err(|e| self.transport_error(e))?;
        let status = resp.status();
        let headers = resp.headers().clone();
        let body = resp.text().await.map_err(|e| self.transport_error(e))?;
        trace!(%status, len = body.len(), "response received");
        Ok(RawResponse {
            status,
            headers,
            body,
        })
    }

    fn transport_error(&self, err: reqwest::Error) -> Error {
        if err.is_timeout() {
            Error::Timeout {
                timeout_secs: self.timeout.as_secs(),
            }
        } else {
            Error::Transport(err)
        }
    }

    /// Detect a rejected cookie/token (HTTP 401/403 or a session error code
    /// in an `<error>` body) and drop the session so the caller re-bootstraps.
    fn check_session_rejected(&mut self, resp: &RawResponse) -> Result<(), Error> {
        let message = if matches!(resp.status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) {
            Some(format!("HTTP {}", resp.status))
        } else {
            codec::router_error_code(&resp.body)
                .filter(|code| SESSION_ERROR_CODES.contains(code))
                .map(|code| format!("router error {code}"))
        };

        match message {
            Some(message) => {
                warn!(%message, "router rejected session");
                self.reset_session();
                Err(Error::AuthExpired { message })
            }
            None => Ok(()),
        }
    }
}
