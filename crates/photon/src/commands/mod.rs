//! Command dispatch: bridges CLI args -> monitor operations -> output.

pub mod config_cmd;
pub mod dial;
pub mod hash;
pub mod login;
pub mod run;
pub mod status;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a router-bound command to its handler.
pub async fn dispatch(cmd: Command, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::Run => run::handle(global).await,
        Command::Status => status::handle(global).await,
        Command::Login => login::handle(global).await,
        Command::Connect => dial::connect(global).await,
        Command::Disconnect => dial::disconnect(global).await,
        // Handled before dispatch
        Command::Config(_) | Command::Completions(_) | Command::Hash(_) => unreachable!(),
    }
}
