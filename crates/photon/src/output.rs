//! Output formatting: text or JSON, selected by `--output`.

use std::fmt::Display;

use serde::Serialize;

use crate::cli::OutputFormat;
use crate::error::CliError;

/// Render a command result: `Display` for text, serde for JSON.
pub fn render<T>(format: OutputFormat, data: &T) -> Result<String, CliError>
where
    T: Serialize + Display,
{
    Ok(match format {
        OutputFormat::Text => data.to_string(),
        OutputFormat::Json => serde_json::to_string_pretty(data)?,
    })
}

/// Render and print to stdout.
pub fn print<T>(format: OutputFormat, data: &T) -> Result<(), CliError>
where
    T: Serialize + Display,
{
    println!("{}", render(format, data)?);
    Ok(())
}
