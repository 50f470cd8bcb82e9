// Wire types for the storefront REST API.
//
// Field names follow the backend's camelCase JSON. Server-assigned ids
// are plain integers; `#[serde(default)]` covers fields the backend
// omits rather than nulls.

use serde::{Deserialize, Serialize};

// ── Catalog entities ─────────────────────────────────────────────────

/// A product as returned by `GET /api/products`.
///
/// Owned by the backend; clients hold a read-through cache that is
/// repopulated by fetch after any mutating action.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub total_items_in_stock: u32,
    #[serde(default)]
    pub image_url: Option<String>,
    /// A product references at most one category.
    #[serde(default)]
    pub category: Option<Category>,
}

impl Product {
    /// Display name of the category, if the product has one.
    pub fn category_name(&self) -> Option<&str> {
        self.category.as_ref().map(|c| c.name.as_str())
    }

    /// Whether the product can currently be added to a cart.
    pub fn in_stock(&self) -> bool {
        self.total_items_in_stock > 0
    }
}

/// A product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
}

// ── Mutation payloads ────────────────────────────────────────────────

/// Request body for product create/update.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPayload {
    pub name: String,
    pub price: f64,
    pub total_items_in_stock: u32,
    pub category_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// Request body for category create/update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryPayload {
    pub name: String,
}

// ── Dashboard ────────────────────────────────────────────────────────

/// Read-only inventory aggregate from `GET /api/dashboard`.
///
/// Computed entirely by the backend; refetched on each dashboard visit.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_products: u64,
    pub total_value: f64,
    pub total_items_in_stock: u64,
    #[serde(default)]
    pub categories: Vec<Category>,
}
