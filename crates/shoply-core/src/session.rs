// ── Session gate and authentication ──
//
// The session is an explicit typed object with an explicit login/logout
// lifecycle, persisted through the `SessionStore` seam (a local
// key-value file in production, memory in tests). There is no expiry,
// renewal, or server-side session object: a persisted session remains
// valid until explicitly cleared.
//
// Authentication is a pluggable capability. The bundled implementation
// is the storefront's hardcoded credential rule; a real credential
// store can replace it without touching calling code.

use std::fmt;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::error::CoreError;

// ── Role & Session ──────────────────────────────────────────────────

/// Who the logged-in user is allowed to act as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Shopper: catalog, cart, checkout.
    User,
    /// Administrator: product/category management, dashboard.
    Admin,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User => write!(f, "user"),
            Self::Admin => write!(f, "admin"),
        }
    }
}

/// A logged-in session. Presence means logged in; there is no separate
/// boolean flag to drift out of sync with the role.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub role: Role,
    pub logged_in_at: DateTime<Utc>,
}

impl Session {
    pub fn new(role: Role) -> Self {
        Self {
            role,
            logged_in_at: Utc::now(),
        }
    }
}

// ── Authenticator capability ────────────────────────────────────────

/// Login form input.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    /// An empty username or password: validation error, no navigation,
    /// no persistence write.
    #[error("please enter both username and password")]
    MissingCredentials,

    /// Rejected by the credential store. The bundled static rule never
    /// produces this; real implementations do.
    #[error("invalid username or password")]
    InvalidCredentials,
}

/// Credential verification, swappable at the seam.
pub trait Authenticator {
    fn authenticate(&self, credentials: &Credentials) -> Result<Role, AuthError>;
}

/// The storefront's hardcoded rule: one fixed admin pair routes to the
/// admin console, any other non-empty pair shops as a regular user.
#[derive(Debug, Clone)]
pub struct StaticAuthenticator {
    admin_username: String,
    admin_password: String,
}

impl StaticAuthenticator {
    pub fn new(admin_username: impl Into<String>, admin_password: impl Into<String>) -> Self {
        Self {
            admin_username: admin_username.into(),
            admin_password: admin_password.into(),
        }
    }
}

impl Default for StaticAuthenticator {
    fn default() -> Self {
        Self::new("admin@123", "12345")
    }
}

impl Authenticator for StaticAuthenticator {
    fn authenticate(&self, credentials: &Credentials) -> Result<Role, AuthError> {
        if credentials.username.is_empty() || credentials.password.is_empty() {
            return Err(AuthError::MissingCredentials);
        }
        if credentials.username == self.admin_username
            && credentials.password == self.admin_password
        {
            Ok(Role::Admin)
        } else {
            Ok(Role::User)
        }
    }
}

// ── SessionStore seam ───────────────────────────────────────────────

/// Persistence for the session flags. The file-backed implementation
/// lives in `shoply-config`; [`MemorySessionStore`] backs tests.
pub trait SessionStore {
    fn load(&self) -> Result<Option<Session>, CoreError>;
    fn save(&self, session: &Session) -> Result<(), CoreError>;
    fn clear(&self) -> Result<(), CoreError>;
}

/// In-memory store for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    inner: Mutex<Option<Session>>,
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<Option<Session>, CoreError> {
        Ok(self.lock().clone())
    }

    fn save(&self, session: &Session) -> Result<(), CoreError> {
        *self.lock() = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), CoreError> {
        *self.lock() = None;
        Ok(())
    }
}

impl MemorySessionStore {
    fn lock(&self) -> std::sync::MutexGuard<'_, Option<Session>> {
        self.inner.lock().expect("session lock poisoned")
    }
}

// ── Lifecycle & gate ────────────────────────────────────────────────

/// Authenticate and persist a session. Nothing is written when the
/// credentials are refused.
pub fn login(
    store: &dyn SessionStore,
    authenticator: &dyn Authenticator,
    credentials: &Credentials,
) -> Result<Session, CoreError> {
    let role = authenticator.authenticate(credentials)?;
    let session = Session::new(role);
    store.save(&session)?;
    info!(%role, "logged in");
    Ok(session)
}

/// Clear the persisted session. In-memory cart and form state dies
/// with the process; nothing survives a logout.
pub fn logout(store: &dyn SessionStore) -> Result<(), CoreError> {
    store.clear()?;
    info!("logged out");
    Ok(())
}

/// Gate a protected view: load the persisted session and check the
/// role BEFORE any data fetch. Failure means "redirect to login", not
/// a fault (see [`CoreError::is_gate_redirect`]).
pub fn require_role(store: &dyn SessionStore, required: Role) -> Result<Session, CoreError> {
    match store.load()? {
        None => Err(CoreError::NotLoggedIn),
        Some(session) if session.role != required => Err(CoreError::RoleMismatch {
            required,
            actual: session.role,
        }),
        Some(session) => Ok(session),
    }
}
