//! `photon status`: one look at the router, no changes made.

use std::fmt;

use serde::Serialize;

use photon_core::Monitor;

use crate::cli::GlobalOpts;
use crate::config;
use crate::error::CliError;
use crate::output;

#[derive(Debug, Serialize)]
struct StatusReport {
    router: String,
    connection_status: String,
    code: i32,
    logged_in: bool,
    internet: bool,
}

impl fmt::Display for StatusReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let yes_no = |b: bool| if b { "yes" } else { "no" };
        writeln!(f, "Router:     {}", self.router)?;
        writeln!(f, "Uplink:     {} ({})", self.connection_status, self.code)?;
        writeln!(f, "Logged in:  {}", yes_no(self.logged_in))?;
        write!(f, "Internet:   {}", if self.internet { "reachable" } else { "unreachable" })
    }
}

pub async fn handle(global: &GlobalOpts) -> Result<(), CliError> {
    let monitor_config = config::monitor_config(global)?;
    let router = monitor_config.url.to_string();
    let mut monitor = Monitor::new(monitor_config)?;

    if !monitor.try_init_session().await? {
        return Err(CliError::ConnectionFailed {
            url: router,
            source: "router returned no session cookie or CSRF token".into(),
        });
    }

    let status = monitor.connection_status().await?;
    let logged_in = monitor.login_state().await?;
    let internet = monitor.test_internet().await;

    let report = StatusReport {
        router,
        connection_status: status.to_string(),
        code: status.code(),
        logged_in,
        internet,
    };
    output::print(global.output, &report)
}
