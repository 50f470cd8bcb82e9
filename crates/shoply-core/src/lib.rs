//! Domain layer between `shoply-api` and UI consumers (the CLI shell).
//!
//! This crate owns the business logic of the storefront client:
//!
//! - **[`CatalogFilter`]** — Pure product filtering by case-insensitive
//!   search substring and selected category, plus derivation of the
//!   category choices offered to the shopper.
//!
//! - **[`Cart`]** — In-memory cart with stock-capped increments, a
//!   pending-flag add operation with an injectable latency, running
//!   totals, and a simulated checkout.
//!
//! - **[`AdminConsole`]** — Product and category CRUD reconciliation:
//!   form state keyed by an editing target, two-step deletes, and the
//!   resynchronization policy (the server is the single source of
//!   truth; every successful mutation triggers a full refetch).
//!
//! - **[`session`]** — Typed session object, the [`SessionStore`]
//!   persistence seam, the [`Authenticator`] capability, and the
//!   role gate run before any protected view fetches data.
//!
//! All engine state is plain owned data. Execution is single-flow and
//! event-driven; mutations round-trip through [`shoply_api::StoreClient`]
//! and never patch local state optimistically.

pub mod admin;
pub mod cart;
pub mod catalog;
pub mod error;
pub mod session;
pub mod shop;

// ── Primary re-exports ──────────────────────────────────────────────
pub use admin::{AdminConsole, CategoryForm, ProductForm};
pub use cart::{Cart, CartError, CartLine, CheckoutOutcome};
pub use catalog::{CatalogFilter, CategoryChoice, category_names};
pub use error::CoreError;
pub use session::{
    AuthError, Authenticator, Credentials, MemorySessionStore, Role, Session, SessionStore,
    StaticAuthenticator, login, logout, require_role,
};
pub use shop::ShopSession;

// Re-export the wire model at the crate root for ergonomics; the
// backend's JSON shape is already the domain shape.
pub use shoply_api::{Category, CategoryPayload, DashboardStats, Product, ProductPayload};
