// Category endpoints

use tracing::debug;

use crate::client::StoreClient;
use crate::error::Error;
use crate::models::{Category, CategoryPayload};

impl StoreClient {
    /// List all categories.
    ///
    /// `GET /api/categories`
    pub async fn list_categories(&self) -> Result<Vec<Category>, Error> {
        let url = self.api_url("categories");
        debug!("listing categories");
        self.get(url).await
    }

    /// Create a category.
    ///
    /// `POST /api/categories`
    pub async fn create_category(&self, payload: &CategoryPayload) -> Result<Category, Error> {
        let url = self.api_url("categories");
        debug!(name = %payload.name, "creating category");
        self.post(url, payload).await
    }

    /// Rename an existing category.
    ///
    /// `PUT /api/categories/{id}`
    pub async fn update_category(
        &self,
        id: i64,
        payload: &CategoryPayload,
    ) -> Result<Category, Error> {
        let url = self.api_url(&format!("categories/{id}"));
        debug!(id, name = %payload.name, "updating category");
        self.put(url, payload).await
    }

    /// Delete a category.
    ///
    /// `DELETE /api/categories/{id}` -- rejected by the backend while
    /// any product still references the category.
    pub async fn delete_category(&self, id: i64) -> Result<(), Error> {
        let url = self.api_url(&format!("categories/{id}"));
        debug!(id, "deleting category");
        self.delete(url).await
    }
}
