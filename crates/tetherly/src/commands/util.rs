//! Shared helpers for command handlers.

use std::io::{IsTerminal, Read};
use std::path::Path;

use tabled::Tabled;
use tetherly_core::shell::ShellSnippet;
use tetherly_core::{BandwidthLimit, Controller, EntityId};

use crate::cli::{OutputFormat, RateArgs};
use crate::error::CliError;
use crate::output;

/// Resolve a device reference (ID, MAC, hostname or name) to its id.
pub fn resolve_device_id(controller: &Controller, identifier: &str) -> Result<EntityId, CliError> {
    controller
        .store()
        .find_device(identifier)
        .map(|d| d.id.clone())
        .ok_or_else(|| CliError::not_found("device", identifier))
}

/// Resolve a voucher reference (ID or code) to its id.
pub fn resolve_voucher_id(controller: &Controller, identifier: &str) -> Result<EntityId, CliError> {
    controller
        .store()
        .find_voucher(identifier)
        .map(|v| v.id.clone())
        .ok_or_else(|| CliError::not_found("voucher", identifier))
}

pub fn bandwidth_limit(rates: &RateArgs) -> Result<BandwidthLimit, CliError> {
    Ok(BandwidthLimit::new(rates.down, rates.up)?)
}

/// Prompt for confirmation, auto-approving if `--yes` was passed.
///
/// Without a terminal to ask on, the operation is refused rather than
/// assumed.
pub fn confirm(message: &str, action: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    if !std::io::stdin().is_terminal() {
        return Err(CliError::NonInteractiveRequiresYes {
            action: action.into(),
        });
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}

/// Read a whole file, or stdin when no path is given.
pub fn read_input(path: Option<&Path>) -> Result<String, CliError> {
    match path {
        Some(path) => Ok(std::fs::read_to_string(path)?),
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

/// "yes"/"no" for table cells.
pub fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}

#[derive(Tabled)]
struct SnippetRow {
    #[tabled(rename = "Action")]
    title: &'static str,
    #[tabled(rename = "Command")]
    command: String,
}

/// Shell snippets as a two-column table, or the bare commands in plain mode.
pub fn render_snippets(format: OutputFormat, snippets: &[ShellSnippet]) -> String {
    output::render_list(
        format,
        snippets,
        |s| SnippetRow {
            title: s.title,
            command: s.command.clone(),
        },
        |s| s.command.clone(),
    )
}
