// Product endpoints

use tracing::debug;

use crate::client::StoreClient;
use crate::error::Error;
use crate::models::{Product, ProductPayload};

impl StoreClient {
    /// List the full product catalog.
    ///
    /// `GET /api/products`
    pub async fn list_products(&self) -> Result<Vec<Product>, Error> {
        let url = self.api_url("products");
        debug!("listing products");
        self.get(url).await
    }

    /// Fetch a single product by id.
    ///
    /// `GET /api/products/{id}`
    pub async fn get_product(&self, id: i64) -> Result<Product, Error> {
        let url = self.api_url(&format!("products/{id}"));
        debug!(id, "fetching product");
        self.get(url).await
    }

    /// Create a product. The backend assigns the id and resolves
    /// `category_id` to a category reference.
    ///
    /// `POST /api/products`
    pub async fn create_product(&self, payload: &ProductPayload) -> Result<Product, Error> {
        let url = self.api_url("products");
        debug!(name = %payload.name, "creating product");
        self.post(url, payload).await
    }

    /// Update an existing product, replacing all fields.
    ///
    /// `PUT /api/products/{id}`
    pub async fn update_product(&self, id: i64, payload: &ProductPayload) -> Result<Product, Error> {
        let url = self.api_url(&format!("products/{id}"));
        debug!(id, name = %payload.name, "updating product");
        self.put(url, payload).await
    }

    /// Delete a product.
    ///
    /// `DELETE /api/products/{id}`
    pub async fn delete_product(&self, id: i64) -> Result<(), Error> {
        let url = self.api_url(&format!("products/{id}"));
        debug!(id, "deleting product");
        self.delete(url).await
    }
}
