use std::collections::BTreeMap;

use thiserror::Error;

/// Per-field validation messages, keyed by the backend field name.
pub type FieldErrors = BTreeMap<String, String>;

/// Top-level error type for the `partshop-api` crate.
///
/// Every failure path, HTTP or network, surfaces through this one type.
/// Callers never need to tell transport failures from domain failures
/// structurally: they branch on [`status()`](Self::status), where `0`
/// means no usable response was received.
#[derive(Debug, Error)]
pub enum Error {
    // ── HTTP ────────────────────────────────────────────────────────
    /// 401 on a login-class call (`allow_401`). The session token is untouched.
    #[error("{message}")]
    InvalidCredentials {
        message: String,
        field_errors: Option<FieldErrors>,
    },

    /// 401 on any other call. The session token has already been cleared.
    #[error("Unauthorized")]
    Unauthorized,

    #[error("Forbidden")]
    Forbidden,

    #[error("Not found")]
    NotFound,

    /// Any other non-2xx response, with the best-effort parsed message.
    #[error("{message}")]
    Api {
        message: String,
        status: u16,
        field_errors: Option<FieldErrors>,
    },

    // ── Client-side validation ──────────────────────────────────────
    /// A pre-submit guard rejected the payload before any request was sent.
    /// Reported with status 400 so callers handle it like a backend rejection.
    #[error("{message}")]
    Validation {
        message: String,
        field_errors: FieldErrors,
    },

    // ── Transport ───────────────────────────────────────────────────
    /// Connection refused, DNS failure, TLS failure, timeout, broken body stream.
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// A success response whose body could not be decoded.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },

    /// A request body could not be encoded.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A file meant for upload could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Numeric status of the failure: the HTTP status when a response was
    /// received, `400` for client-side validation, `0` otherwise.
    pub fn status(&self) -> u16 {
        match self {
            Self::InvalidCredentials { .. } | Self::Unauthorized => 401,
            Self::Forbidden => 403,
            Self::NotFound => 404,
            Self::Api { status, .. } => *status,
            Self::Validation { .. } => 400,
            Self::Transport(_)
            | Self::InvalidUrl(_)
            | Self::Deserialization { .. }
            | Self::Serialization(_)
            | Self::Io(_) => 0,
        }
    }

    /// Human-readable message, suitable for showing to the user.
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Field-level validation errors, when the backend (or the local guard) sent any.
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            Self::InvalidCredentials { field_errors, .. } | Self::Api { field_errors, .. } => {
                field_errors.as_ref()
            }
            Self::Validation { field_errors, .. } => Some(field_errors),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == 401
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == 404
    }

    /// Returns `true` if no usable HTTP response was received.
    pub fn is_network(&self) -> bool {
        self.status() == 0
    }
}
