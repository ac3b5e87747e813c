//! Clap derive structures for the `photon` CLI.
//!
//! Also compiled by `build.rs` for man pages, so only clap and
//! clap_complete may be used here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// photon -- keep a home router's internet uplink alive
#[derive(Debug, Parser)]
#[command(
    name = "photon",
    version,
    about = "Keep a home router's internet uplink alive",
    long_about = "Watches the WAN link of a home router through its local management API.\n\n\
        Logs in, polls the connection status and redials when the uplink is down\n\
        or the internet stops answering. `photon run` loops until Ctrl-C.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Config file (defaults to the platform config directory)
    #[arg(long, short = 'C', env = "PHOTON_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Router URL (overrides config)
    #[arg(long, short = 'r', global = true)]
    pub router: Option<String>,

    /// Router username (overrides config)
    #[arg(long, short = 'u', global = true)]
    pub username: Option<String>,

    /// HTTP request timeout in seconds (overrides config)
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', global = true)]
    pub insecure: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Log line format
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Output format for command results
    #[arg(long, short = 'o', default_value = "text", global = true)]
    pub output: OutputFormat,
}

// ── Format Enums ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines
    Text,
    /// One JSON object per line
    Json,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Plain text (default)
    Text,
    /// Pretty-printed JSON
    Json,
}

// ── Commands ─────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Monitor the uplink until interrupted
    Run,

    /// Show the router's connection status and login state
    #[command(alias = "st")]
    Status,

    /// Log in once and report the result
    Login,

    /// Bring the uplink up
    Connect,

    /// Tear the uplink down
    Disconnect,

    /// Print the login digest for the configured credentials
    #[command(hide = true)]
    Hash(HashArgs),

    /// Manage configuration
    #[command(alias = "cfg")]
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Debug, Args)]
pub struct HashArgs {
    /// CSRF token mixed into the digest
    #[arg(long, short = 't')]
    pub token: String,
}

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the config file location
    Path,

    /// Show the effective configuration (password masked)
    Show,

    /// Store the router password in the system keyring
    SetPassword,
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
