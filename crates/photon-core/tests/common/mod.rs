// Stateful fake router for monitor integration tests.
//
// Mimics the firmware closely enough to drive the monitor end to end: the
// home page hands out cookie `SID=abc` and tokens `[t1, t2]`, every POST
// returns the next token (`t3`, `t4`, ...), a connect dial flips the
// uplink to 901 and a disconnect dial back to 902.

#![allow(dead_code, clippy::unwrap_used)]

use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::time::Duration;

use secrecy::SecretString;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

use photon_api::client::paths;
use photon_api::{Credentials, RouterClient};
use photon_core::{Monitor, ReachabilityProbe, RetryPolicy, Timings};

const HOME_PAGE: &str = r#"<!DOCTYPE html><html><head>
<meta name="csrf_token" content="t1">
<meta name="csrf_token" content="t2">
<title>Home</title></head><body></body></html>"#;

const XML_DECLARATION: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>";

// ── Router state ────────────────────────────────────────────────────

#[derive(Debug)]
pub struct RouterState {
    pub connected: AtomicBool,
    pub logged_in: AtomicBool,
    /// Whether dial commands are acked with `<response>OK</response>`.
    pub dial_acked: AtomicBool,
    /// Whether an acked dial actually changes the uplink.
    pub dial_effective: AtomicBool,
    /// Whether the home page carries CSRF tokens.
    pub serves_tokens: AtomicBool,
    /// Whether an acked login actually logs in; otherwise state-login keeps
    /// answering `-1`.
    pub accepts_login: AtomicBool,
    /// Reachability probes made through [`UplinkProbe`].
    pub probes: AtomicU32,
    next_token: AtomicU32,
}

impl Default for RouterState {
    fn default() -> Self {
        Self {
            connected: AtomicBool::new(false),
            logged_in: AtomicBool::new(false),
            dial_acked: AtomicBool::new(true),
            dial_effective: AtomicBool::new(true),
            serves_tokens: AtomicBool::new(true),
            accepts_login: AtomicBool::new(true),
            probes: AtomicU32::new(0),
            next_token: AtomicU32::new(3),
        }
    }
}

impl RouterState {
    fn rotate_token(&self) -> String {
        format!("t{}", self.next_token.fetch_add(1, Ordering::SeqCst))
    }
}

fn xml(body: &str) -> String {
    format!("{XML_DECLARATION}{body}")
}

// ── Responders ──────────────────────────────────────────────────────

struct Home(Arc<RouterState>);

impl Respond for Home {
    fn respond(&self, _request: &Request) -> ResponseTemplate {
        let body = if self.0.serves_tokens.load(Ordering::SeqCst) {
            HOME_PAGE
        } else {
            "<html><head></head></html>"
        };
        ResponseTemplate::new(200)
            .insert_header("Set-Cookie", "SID=abc; path=/; HttpOnly")
            .set_body_string(body)
    }
}

struct Login(Arc<RouterState>);

impl Respond for Login {
    fn respond(&self, _request: &Request) -> ResponseTemplate {
        if self.0.accepts_login.load(Ordering::SeqCst) {
            self.0.logged_in.store(true, Ordering::SeqCst);
        }
        ResponseTemplate::new(200)
            .insert_header("__RequestVerificationToken", self.0.rotate_token().as_str())
            .set_body_string(xml("<response>OK</response>"))
    }
}

struct StateLogin(Arc<RouterState>);

impl Respond for StateLogin {
    fn respond(&self, _request: &Request) -> ResponseTemplate {
        let state = if self.0.logged_in.load(Ordering::SeqCst) { 0 } else { -1 };
        ResponseTemplate::new(200)
            .set_body_string(xml(&format!("<response><State>{state}</State></response>")))
    }
}

struct Status(Arc<RouterState>);

impl Respond for Status {
    fn respond(&self, _request: &Request) -> ResponseTemplate {
        let code = if self.0.connected.load(Ordering::SeqCst) { 901 } else { 902 };
        ResponseTemplate::new(200).set_body_string(xml(&format!(
            "<response><ConnectionStatus>{code}</ConnectionStatus><SignalIcon>4</SignalIcon></response>"
        )))
    }
}

struct Dial(Arc<RouterState>);

impl Respond for Dial {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let token = self.0.rotate_token();
        if !self.0.dial_acked.load(Ordering::SeqCst) {
            return ResponseTemplate::new(200)
                .insert_header("__RequestVerificationToken", token.as_str())
                .set_body_string(xml("<error><code>100003</code><message></message></error>"));
        }
        if self.0.dial_effective.load(Ordering::SeqCst) {
            let body = String::from_utf8_lossy(&request.body);
            let connect = body.contains("<Action>1</Action>");
            self.0.connected.store(connect, Ordering::SeqCst);
        }
        ResponseTemplate::new(200)
            .insert_header("__RequestVerificationToken", token.as_str())
            .set_body_string(xml("<response>OK</response>"))
    }
}

// ── Fake router ─────────────────────────────────────────────────────

pub struct FakeRouter {
    pub server: MockServer,
    pub state: Arc<RouterState>,
}

impl FakeRouter {
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        let state = Arc::new(RouterState::default());

        Mock::given(method("GET"))
            .and(path(paths::HOME))
            .respond_with(Home(Arc::clone(&state)))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path(paths::LOGIN))
            .respond_with(Login(Arc::clone(&state)))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path(paths::STATE_LOGIN))
            .respond_with(StateLogin(Arc::clone(&state)))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path(paths::STATUS))
            .respond_with(Status(Arc::clone(&state)))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path(paths::DIAL))
            .respond_with(Dial(Arc::clone(&state)))
            .mount(&server)
            .await;

        Self { server, state }
    }

    pub fn client(&self) -> RouterClient {
        self.client_with(reqwest::Client::new())
    }

    /// A router client over a caller-built HTTP client (e.g. with a timeout).
    pub fn client_with(&self, http: reqwest::Client) -> RouterClient {
        RouterClient::with_client(
            http,
            Url::parse(&self.server.uri()).unwrap(),
            Credentials {
                username: "admin".into(),
                password: SecretString::from("admin".to_string()),
            },
        )
    }

    /// A monitor whose probe succeeds exactly when the fake uplink is up.
    pub fn monitor(&self, timings: Timings) -> Monitor<UplinkProbe> {
        Monitor::with_probe(self.client(), UplinkProbe(Arc::clone(&self.state)), timings)
    }

    /// Received requests matching `method` and `path`.
    pub async fn requests(&self, method: &str, path: &str) -> Vec<Request> {
        self.server
            .received_requests()
            .await
            .unwrap()
            .into_iter()
            .filter(|r| r.method.as_str() == method && r.url.path() == path)
            .collect()
    }

    pub fn probes(&self) -> u32 {
        self.state.probes.load(Ordering::SeqCst)
    }

    pub async fn count(&self, method: &str, path: &str) -> usize {
        self.requests(method, path).await.len()
    }

    /// Dial requests carrying `<Action>{action}</Action>`.
    pub async fn dial_count(&self, action: u8) -> usize {
        let needle = format!("<Action>{action}</Action>");
        self.requests("POST", paths::DIAL)
            .await
            .iter()
            .filter(|r| String::from_utf8_lossy(&r.body).contains(&needle))
            .count()
    }
}

// ── Probes ──────────────────────────────────────────────────────────

/// Reachable iff the fake router's uplink is up. Counts every call.
pub struct UplinkProbe(pub Arc<RouterState>);

impl ReachabilityProbe for UplinkProbe {
    async fn probe(&self, _timeout: Duration) -> io::Result<()> {
        self.0.probes.fetch_add(1, Ordering::SeqCst);
        if self.0.connected.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(io::Error::new(io::ErrorKind::TimedOut, "uplink down"))
        }
    }
}

// ── Timings ─────────────────────────────────────────────────────────

/// Default retry counts with every pause shrunk to milliseconds.
pub fn fast_timings() -> Timings {
    Timings {
        start_delay: Duration::ZERO,
        init_session: RetryPolicy::new(20, 5),
        relogin: RetryPolicy::new(5, 5),
        internet_test: RetryPolicy::new(3, 1),
        reconnect: RetryPolicy::new(5, 0),
        connect: RetryPolicy::new(5, 5),
        check_status_interval: Duration::from_millis(10),
        dial_timeout: Duration::from_millis(200),
        internet_test_timeout: Duration::from_millis(50),
        lazy_check_interval: Duration::from_millis(50),
        total_fail_interval: Duration::from_secs(3600),
    }
}
