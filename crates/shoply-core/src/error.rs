// ── Core error types ──
//
// User-facing errors from shoply-core. These are NOT API-specific --
// consumers never see reqwest errors or JSON parse failures directly.
// The `From<shoply_api::Error>` impl translates transport-layer errors
// into domain-appropriate variants.

use thiserror::Error;

use crate::session::{AuthError, Role};

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot reach the storefront backend: {reason}")]
    ConnectionFailed { reason: String },

    // ── Data errors ──────────────────────────────────────────────────
    #[error("{entity} not found: {identifier}")]
    NotFound { entity: String, identifier: String },

    /// The backend rejected a mutation (validation, referential
    /// constraints). Local state is left unchanged by the caller.
    #[error("Backend rejected the request: {message}")]
    Rejected {
        message: String,
        status: Option<u16>,
    },

    /// Category deletion failed; the likely cause is products still
    /// assigned to it.
    #[error("Category {id} is still referenced by products -- reassign them first")]
    CategoryInUse { id: i64 },

    // ── Validation errors ────────────────────────────────────────────
    #[error("Invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    // ── Session errors ───────────────────────────────────────────────
    #[error("Not logged in")]
    NotLoggedIn,

    #[error("This view requires {required} access (logged in as {actual})")]
    RoleMismatch { required: Role, actual: Role },

    #[error("Authentication failed: {0}")]
    Authentication(#[from] AuthError),

    #[error("Session store error: {message}")]
    SessionStore { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Returns `true` if this error should send the user back to the
    /// login view rather than being reported as a failure.
    pub fn is_gate_redirect(&self) -> bool {
        matches!(self, Self::NotLoggedIn | Self::RoleMismatch { .. })
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<shoply_api::Error> for CoreError {
    fn from(err: shoply_api::Error) -> Self {
        match err {
            shoply_api::Error::Transport(ref e) => {
                if e.is_connect() || e.is_timeout() {
                    CoreError::ConnectionFailed {
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Rejected {
                        message: e.to_string(),
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            shoply_api::Error::InvalidUrl(e) => CoreError::Validation {
                field: "backend".into(),
                reason: format!("invalid URL: {e}"),
            },
            shoply_api::Error::Api { status, message } => CoreError::Rejected {
                message: if message.is_empty() {
                    format!("HTTP {status}")
                } else {
                    message
                },
                status: Some(status),
            },
            shoply_api::Error::NotFound { path } => CoreError::NotFound {
                entity: "resource".into(),
                identifier: path,
            },
            shoply_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Deserialization error: {message}"))
            }
        }
    }
}
