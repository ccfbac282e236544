//! Shared helpers for command handlers.

use std::path::Path;

use rust_decimal::Decimal;
use serde::de::DeserializeOwned;

use partshop_core::{Error, Upload};

use crate::error::CliError;

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(message: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    if !std::io::IsTerminal::is_terminal(&std::io::stdin()) {
        return Err(CliError::NonInteractiveRequiresYes {
            action: message.into(),
        });
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}

/// Read and parse a JSON file for `--from-file` flags.
pub fn read_json_file<T: DeserializeOwned>(path: &Path) -> Result<T, CliError> {
    let contents = std::fs::read_to_string(path)?;
    serde_json::from_str(&contents).map_err(|e| CliError::Validation {
        field: "from-file".into(),
        reason: format!("invalid JSON in {}: {e}", path.display()),
    })
}

/// Load a file for a multipart upload. Read failures stay local IO errors.
pub fn load_upload(path: &Path) -> Result<Upload, CliError> {
    Upload::from_path(path).map_err(|err| match err {
        Error::Io(io) => CliError::Io(io),
        other => other.into(),
    })
}

/// Split a `NAME=VALUE` argument.
pub fn split_pair(raw: &str) -> Result<(&str, &str), CliError> {
    raw.split_once('=')
        .map(|(k, v)| (k.trim(), v))
        .filter(|(k, _)| !k.is_empty())
        .ok_or_else(|| CliError::Validation {
            field: "filter".into(),
            reason: format!("expected NAME=VALUE, got '{raw}'"),
        })
}

/// Price with currency, or empty when unknown.
pub fn money(amount: Option<Decimal>, currency: &str) -> String {
    amount
        .map(|a| format!("{:.2} {currency}", a.round_dp(2)))
        .unwrap_or_default()
}

pub fn opt<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}
