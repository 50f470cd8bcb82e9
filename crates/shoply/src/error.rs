//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` variants into user-facing errors with actionable
//! help text. A session-gate failure is not a fault: it carries the
//! "log in first" redirect the web app would perform.

use miette::Diagnostic;
use thiserror::Error;

use shoply_core::{CoreError, Role};

/// Exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONFLICT: i32 = 6;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Session gate ─────────────────────────────────────────────────
    #[error("Not logged in")]
    #[diagnostic(code(shoply::not_logged_in), help("Run: shoply login"))]
    NotLoggedIn,

    #[error("This command requires {required} access (logged in as {actual})")]
    #[diagnostic(
        code(shoply::wrong_role),
        help("Log in again with the right credentials: shoply login")
    )]
    WrongRole { required: Role, actual: Role },

    #[error("Login failed: {message}")]
    #[diagnostic(code(shoply::auth_failed))]
    AuthFailed { message: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid {field}: {reason}")]
    #[diagnostic(code(shoply::validation))]
    Validation { field: String, reason: String },

    // ── Resources ────────────────────────────────────────────────────
    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(shoply::not_found),
        help("Run: shoply {list_command} to see what exists")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    #[error("Category {id} is still referenced by products")]
    #[diagnostic(
        code(shoply::category_in_use),
        help("Reassign or delete the products in this category first: shoply products list")
    )]
    CategoryInUse { id: i64 },

    // ── Backend ──────────────────────────────────────────────────────
    #[error("The backend rejected the request: {message}")]
    #[diagnostic(code(shoply::rejected))]
    Rejected { message: String },

    #[error("Cannot reach the storefront backend")]
    #[diagnostic(
        code(shoply::connection_failed),
        help(
            "Check that the backend is running and the URL is right.\n\
             Reason: {reason}\n\
             Configure it with: shoply config init"
        )
    )]
    ConnectionFailed { reason: String },

    // ── Local environment ────────────────────────────────────────────
    #[error("Configuration error")]
    #[diagnostic(code(shoply::config))]
    Config(#[from] shoply_config::ConfigError),

    #[error("Session store error: {message}")]
    #[diagnostic(code(shoply::session_store))]
    SessionStore { message: String },

    #[error("IO error: {0}")]
    #[diagnostic(code(shoply::io))]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    #[diagnostic(code(shoply::internal))]
    Internal(String),
}

impl CliError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NotLoggedIn | Self::WrongRole { .. } | Self::AuthFailed { .. } => exit_code::AUTH,
            Self::Validation { .. } => exit_code::USAGE,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::CategoryInUse { .. } => exit_code::CONFLICT,
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            _ => exit_code::GENERAL,
        }
    }
}

// ── Conversion from core errors ──────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::NotLoggedIn => Self::NotLoggedIn,
            CoreError::RoleMismatch { required, actual } => Self::WrongRole { required, actual },
            CoreError::Authentication(e) => Self::AuthFailed {
                message: e.to_string(),
            },
            CoreError::Validation { field, reason } => Self::Validation { field, reason },
            CoreError::NotFound { entity, identifier } => Self::NotFound {
                list_command: match entity.as_str() {
                    "category" => "categories list".into(),
                    _ => "products list".into(),
                },
                resource_type: entity,
                identifier,
            },
            CoreError::CategoryInUse { id } => Self::CategoryInUse { id },
            CoreError::Rejected { message, .. } => Self::Rejected { message },
            CoreError::ConnectionFailed { reason } => Self::ConnectionFailed { reason },
            CoreError::SessionStore { message } => Self::SessionStore { message },
            CoreError::Internal(message) => Self::Internal(message),
        }
    }
}
