use thiserror::Error;

/// Top-level error type for the `shoply-api` crate.
///
/// Covers every failure mode of the storefront REST API: transport,
/// URL construction, non-2xx responses, and body decoding.
/// `shoply-core` maps these into user-facing diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ── API ─────────────────────────────────────────────────────────
    /// Non-2xx response from the backend, with a body preview.
    ///
    /// The backend validates mutations server-side (missing category,
    /// referential constraints on delete) and reports them this way.
    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// The requested entity does not exist (HTTP 404).
    #[error("Not found: {path}")]
    NotFound { path: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::NotFound { .. } => true,
            Self::Transport(e) => e.status() == Some(reqwest::StatusCode::NOT_FOUND),
            _ => false,
        }
    }

    /// Returns `true` if the backend rejected a mutation
    /// (as opposed to the request never reaching it).
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::Api { .. })
    }

    /// HTTP status code carried by this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
