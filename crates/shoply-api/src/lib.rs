// shoply-api: Async Rust client for the Shoply storefront REST API

pub mod client;
pub mod error;
pub mod models;
pub mod transport;

mod categories;
mod dashboard;
mod products;

pub use client::StoreClient;
pub use error::Error;
pub use models::{Category, CategoryPayload, DashboardStats, Product, ProductPayload};
pub use transport::TransportConfig;
