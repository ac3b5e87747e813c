//! Config subcommand handlers.

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts, OutputFormat};
use crate::config;
use crate::error::CliError;

/// Map an interactive I/O failure into CliError.
fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Path => {
            println!("{}", config::config_file(global).display());
            Ok(())
        }

        ConfigCommand::Show => {
            let cfg = config::load(global)?.redacted();
            let rendered = match global.output {
                OutputFormat::Text => toml::to_string_pretty(&cfg)?,
                OutputFormat::Json => serde_json::to_string_pretty(&cfg)?,
            };
            println!("{}", rendered.trim_end());
            Ok(())
        }

        ConfigCommand::SetPassword => {
            let cfg = config::load(global)?;
            let username = cfg.router.username;

            let password = rpassword::prompt_password(format!("Password for '{username}': "))
                .map_err(prompt_err)?;
            if password.is_empty() {
                return Err(CliError::Validation {
                    field: "password".into(),
                    reason: "cannot be empty".into(),
                });
            }

            photon_config::store_password(&username, &password)?;
            eprintln!("✓ Password for '{username}' stored in system keyring");
            Ok(())
        }
    }
}
