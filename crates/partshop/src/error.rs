//! CLI error types with miette diagnostics.
//!
//! Maps storefront and config errors into user-facing errors with
//! actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use partshop_config::ConfigError;
use partshop_core::{Error, FieldErrors};

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const PERMISSION: i32 = 5;
    pub const CONFLICT: i32 = 6;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────

    #[error("Could not reach the storefront backend: {message}")]
    #[diagnostic(
        code(partshop::connection_failed),
        help(
            "Check that the backend is running and the URL is right.\n\
             Override it with --api-url or PARTSHOP_API_URL."
        )
    )]
    ConnectionFailed { message: String },

    // ── Authentication ───────────────────────────────────────────────

    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(partshop::auth_failed),
        help(
            "Verify your email and password.\n\
             Run: partshop config set-password --profile {profile}"
        )
    )]
    AuthFailed { message: String, profile: String },

    #[error("No credentials configured for profile '{profile}'")]
    #[diagnostic(
        code(partshop::no_credentials),
        help(
            "Configure credentials with: partshop config init\n\
             Or set PARTSHOP_EMAIL and PARTSHOP_PASSWORD."
        )
    )]
    NoCredentials { profile: String },

    #[error("This command needs an owner account")]
    #[diagnostic(
        code(partshop::forbidden),
        help("Sign in with the shop owner's email (--email or the profile's email).")
    )]
    Forbidden,

    // ── Resources ────────────────────────────────────────────────────

    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(partshop::not_found),
        help("Run: partshop {list_command} to see available {resource_type}s")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    // ── API ──────────────────────────────────────────────────────────

    #[error("API error ({status}): {message}")]
    #[diagnostic(code(partshop::api_error), help("{details}"))]
    ApiError {
        status: u16,
        message: String,
        details: String,
    },

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(partshop::validation))]
    Validation { field: String, reason: String },

    #[error("{message}")]
    #[diagnostic(code(partshop::rejected), help("{details}"))]
    Rejected { message: String, details: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(partshop::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: partshop config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error(transparent)]
    #[diagnostic(code(partshop::config))]
    Config(ConfigError),

    // ── Interactive ──────────────────────────────────────────────────

    #[error("Destructive operation '{action}' requires confirmation")]
    #[diagnostic(
        code(partshop::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    // ── IO / Serialization ────────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON payload: {0}")]
    #[diagnostic(code(partshop::json), help("Check the JSON file contents and try again."))]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::Forbidden => exit_code::PERMISSION,
            Self::NotFound { .. } | Self::ApiError { status: 404, .. } => exit_code::NOT_FOUND,
            Self::ApiError { status: 409, .. } => exit_code::CONFLICT,
            Self::Validation { .. }
            | Self::Rejected { .. }
            | Self::NonInteractiveRequiresYes { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }

    /// A 404 from `err` reported against a named resource; anything else as usual.
    pub fn not_found_or(
        err: Error,
        resource_type: &str,
        identifier: impl ToString,
        list_command: &str,
    ) -> Self {
        if err.is_not_found() {
            Self::NotFound {
                resource_type: resource_type.into(),
                identifier: identifier.to_string(),
                list_command: list_command.into(),
            }
        } else {
            err.into()
        }
    }
}

fn format_field_errors(fields: Option<&FieldErrors>) -> String {
    fields
        .map(|f| {
            f.iter()
                .map(|(field, msg)| format!("{field}: {msg}"))
                .collect::<Vec<_>>()
                .join("\n")
        })
        .unwrap_or_default()
}

// ── Storefront Error → CliError mapping ─────────────────────────────

impl From<Error> for CliError {
    fn from(err: Error) -> Self {
        let details = format_field_errors(err.field_errors());
        match err.status() {
            0 => Self::ConnectionFailed {
                message: err.message(),
            },
            401 => Self::AuthFailed {
                message: err.message(),
                profile: "current".into(),
            },
            403 => Self::Forbidden,
            400 | 422 => Self::Rejected {
                message: err.message(),
                details,
            },
            status => Self::ApiError {
                status,
                message: err.message(),
                details,
            },
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::NoCredentials { profile } => Self::NoCredentials { profile },
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            other => Self::Config(other),
        }
    }
}
