// ── Shopping view state ──
//
// Composes the fetched catalog, the derived category choices, the
// filter, and the cart for one shopping session. The product list is a
// read-through cache: `load` repopulates it from the server, and the
// category choices are derived from it rather than the category API.

use std::time::Duration;

use shoply_api::{Product, StoreClient};

use crate::cart::Cart;
use crate::catalog::{CatalogFilter, category_names};
use crate::error::CoreError;

/// State for the shopping page: catalog + filter + cart.
#[derive(Debug)]
pub struct ShopSession {
    products: Vec<Product>,
    categories: Vec<String>,
    pub filter: CatalogFilter,
    pub cart: Cart,
}

impl ShopSession {
    pub fn new(add_delay: Duration) -> Self {
        Self {
            products: Vec::new(),
            categories: Vec::new(),
            filter: CatalogFilter::default(),
            cart: Cart::new(add_delay),
        }
    }

    /// Fetch the catalog and derive the category choices. A failure is
    /// page-level: the caller shows an error view instead of the shop.
    pub async fn load(&mut self, client: &StoreClient) -> Result<(), CoreError> {
        self.products = client.list_products().await?;
        self.categories = category_names(&self.products);
        Ok(())
    }

    /// The full fetched catalog.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Category choices offered next to the search box, first-seen
    /// order.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// The catalog as currently filtered.
    pub fn visible(&self) -> Vec<&Product> {
        self.filter.apply(&self.products)
    }

    pub fn product(&self, id: i64) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::catalog::CategoryChoice;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn load_populates_catalog_and_categories() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/products"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {
                    "id": 1,
                    "name": "Keyboard",
                    "price": 89.99,
                    "totalItemsInStock": 12,
                    "category": { "id": 1, "name": "Electronics" }
                },
                {
                    "id": 2,
                    "name": "Scarf",
                    "price": 15.0,
                    "totalItemsInStock": 3,
                    "category": { "id": 2, "name": "Fashion" }
                }
            ])))
            .mount(&server)
            .await;

        let base = url::Url::parse(&server.uri()).unwrap();
        let client = StoreClient::with_client(reqwest::Client::new(), base);

        let mut shop = ShopSession::new(Duration::ZERO);
        shop.load(&client).await.unwrap();

        assert_eq!(shop.products().len(), 2);
        assert_eq!(shop.categories(), ["Electronics", "Fashion"]);

        shop.filter.category = CategoryChoice::Named("Fashion".into());
        let visible: Vec<i64> = shop.visible().iter().map(|p| p.id).collect();
        assert_eq!(visible, vec![2]);
    }

    #[tokio::test]
    async fn load_failure_is_page_level() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/products"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let base = url::Url::parse(&server.uri()).unwrap();
        let client = StoreClient::with_client(reqwest::Client::new(), base);

        let mut shop = ShopSession::new(Duration::ZERO);
        let err = shop.load(&client).await.unwrap_err();
        assert!(matches!(err, CoreError::Rejected { .. }));
        assert!(shop.products().is_empty());
    }
}
