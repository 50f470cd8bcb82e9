// ── Admin reconciliation engine ──
//
// Two CRUD flows (products, categories), each with an edit/create form
// keyed by an "editing target or none" pointer and a two-step delete.
// The consistency policy is explicit: the server is the single source
// of truth, and every successful mutation triggers a full
// resynchronization read. Local lists are never patched optimistically.

use tracing::{debug, warn};

use shoply_api::{Category, CategoryPayload, Product, ProductPayload, StoreClient};

use crate::error::CoreError;

// ── Forms ───────────────────────────────────────────────────────────

/// Product form state. Fields hold raw text as entered; parsing and
/// validation happen at submit time so a failed submit leaves the
/// entered values intact.
#[derive(Debug, Clone)]
pub struct ProductForm {
    /// `None` means create mode, `Some(id)` means update mode.
    pub editing: Option<i64>,
    pub name: String,
    pub price: String,
    pub stock: String,
    pub category_id: String,
    pub image_url: String,
}

impl ProductForm {
    /// A blank create-mode form. The category defaults to the first
    /// available category, if any exist.
    pub fn create(categories: &[Category]) -> Self {
        Self {
            editing: None,
            name: String::new(),
            price: String::new(),
            stock: String::new(),
            category_id: categories
                .first()
                .map(|c| c.id.to_string())
                .unwrap_or_default(),
            image_url: String::new(),
        }
    }

    /// An update-mode form pre-populated from the product's current
    /// field values.
    pub fn edit(product: &Product, categories: &[Category]) -> Self {
        Self {
            editing: Some(product.id),
            name: product.name.clone(),
            price: product.price.to_string(),
            stock: product.total_items_in_stock.to_string(),
            category_id: product
                .category
                .as_ref()
                .map(|c| c.id)
                .or_else(|| categories.first().map(|c| c.id))
                .map(|id| id.to_string())
                .unwrap_or_default(),
            image_url: product.image_url.clone().unwrap_or_default(),
        }
    }

    /// Parse the text fields into a typed payload. Non-numeric price,
    /// stock, or category id is rejected here rather than forwarded to
    /// the backend.
    pub fn parse(&self) -> Result<ProductPayload, CoreError> {
        if self.name.trim().is_empty() {
            return Err(CoreError::Validation {
                field: "name".into(),
                reason: "must not be empty".into(),
            });
        }

        let price: f64 = self.price.trim().parse().map_err(|_| CoreError::Validation {
            field: "price".into(),
            reason: format!("'{}' is not a number", self.price),
        })?;
        if !price.is_finite() || price < 0.0 {
            return Err(CoreError::Validation {
                field: "price".into(),
                reason: "must be a non-negative number".into(),
            });
        }

        let total_items_in_stock: u32 =
            self.stock.trim().parse().map_err(|_| CoreError::Validation {
                field: "stock".into(),
                reason: format!("'{}' is not a whole number", self.stock),
            })?;

        let category_id: i64 =
            self.category_id
                .trim()
                .parse()
                .map_err(|_| CoreError::Validation {
                    field: "category".into(),
                    reason: format!("'{}' is not a category id", self.category_id),
                })?;

        let image_url = self.image_url.trim();
        Ok(ProductPayload {
            name: self.name.trim().to_owned(),
            price,
            total_items_in_stock,
            category_id,
            image_url: (!image_url.is_empty()).then(|| image_url.to_owned()),
        })
    }
}

/// Category form state; same create/update convention as
/// [`ProductForm`].
#[derive(Debug, Clone)]
pub struct CategoryForm {
    pub editing: Option<i64>,
    pub name: String,
}

impl CategoryForm {
    pub fn create() -> Self {
        Self {
            editing: None,
            name: String::new(),
        }
    }

    pub fn edit(category: &Category) -> Self {
        Self {
            editing: Some(category.id),
            name: category.name.clone(),
        }
    }

    pub fn parse(&self) -> Result<CategoryPayload, CoreError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(CoreError::Validation {
                field: "name".into(),
                reason: "must not be empty".into(),
            });
        }
        Ok(CategoryPayload {
            name: name.to_owned(),
        })
    }
}

// ── Console ─────────────────────────────────────────────────────────

/// State for the admin console: authoritative entity lists plus form
/// and delete-dialog state for both CRUD flows.
#[derive(Debug, Default)]
pub struct AdminConsole {
    products: Vec<Product>,
    categories: Vec<Category>,
    pub product_form: Option<ProductForm>,
    pub category_form: Option<CategoryForm>,
    pending_product_delete: Option<i64>,
    pending_category_delete: Option<i64>,
}

impl AdminConsole {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn product(&self, id: i64) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn category(&self, id: i64) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn pending_product_delete(&self) -> Option<i64> {
        self.pending_product_delete
    }

    pub fn pending_category_delete(&self) -> Option<i64> {
        self.pending_category_delete
    }

    // ── Loading ──────────────────────────────────────────────────────

    /// Fetch both lists. A failure here is page-level: the caller
    /// replaces the view with an error state and fetches nothing else.
    pub async fn load(&mut self, client: &StoreClient) -> Result<(), CoreError> {
        self.refetch_products(client).await?;
        self.refetch_categories(client).await?;
        Ok(())
    }

    async fn refetch_products(&mut self, client: &StoreClient) -> Result<(), CoreError> {
        self.products = client.list_products().await?;
        debug!(count = self.products.len(), "products resynchronized");
        Ok(())
    }

    async fn refetch_categories(&mut self, client: &StoreClient) -> Result<(), CoreError> {
        self.categories = client.list_categories().await?;
        debug!(count = self.categories.len(), "categories resynchronized");
        Ok(())
    }

    // ── Product flow ─────────────────────────────────────────────────

    /// Open the product form: create mode when `editing` is `None`,
    /// otherwise pre-populated from the target product.
    pub fn open_product_form(&mut self, editing: Option<i64>) -> Result<(), CoreError> {
        let form = match editing {
            None => ProductForm::create(&self.categories),
            Some(id) => {
                let product = self.product(id).ok_or_else(|| CoreError::NotFound {
                    entity: "product".into(),
                    identifier: id.to_string(),
                })?;
                ProductForm::edit(product, &self.categories)
            }
        };
        self.product_form = Some(form);
        Ok(())
    }

    /// Submit the open product form. On success the product list is
    /// refetched and the form closes; on failure the form stays open
    /// with the entered values intact.
    pub async fn submit_product_form(&mut self, client: &StoreClient) -> Result<(), CoreError> {
        let form = self
            .product_form
            .as_ref()
            .ok_or_else(|| CoreError::Internal("no product form open".into()))?;
        let payload = form.parse()?;

        match form.editing {
            Some(id) => {
                client.update_product(id, &payload).await?;
            }
            None => {
                client.create_product(&payload).await?;
            }
        }

        self.refetch_products(client).await?;
        self.product_form = None;
        Ok(())
    }

    /// First delete step: remember the target and wait for
    /// confirmation.
    pub fn request_delete_product(&mut self, id: i64) {
        self.pending_product_delete = Some(id);
    }

    /// Second delete step. The dialog closes either way; on failure the
    /// entity remains and the error is surfaced as an alert.
    pub async fn confirm_delete_product(&mut self, client: &StoreClient) -> Result<(), CoreError> {
        let Some(id) = self.pending_product_delete.take() else {
            return Ok(());
        };

        if let Err(err) = client.delete_product(id).await {
            warn!(id, error = %err, "product delete rejected");
            return Err(err.into());
        }

        self.refetch_products(client).await
    }

    pub fn cancel_delete_product(&mut self) {
        self.pending_product_delete = None;
    }

    // ── Category flow ────────────────────────────────────────────────

    pub fn open_category_form(&mut self, editing: Option<i64>) -> Result<(), CoreError> {
        let form = match editing {
            None => CategoryForm::create(),
            Some(id) => {
                let category = self.category(id).ok_or_else(|| CoreError::NotFound {
                    entity: "category".into(),
                    identifier: id.to_string(),
                })?;
                CategoryForm::edit(category)
            }
        };
        self.category_form = Some(form);
        Ok(())
    }

    pub async fn submit_category_form(&mut self, client: &StoreClient) -> Result<(), CoreError> {
        let form = self
            .category_form
            .as_ref()
            .ok_or_else(|| CoreError::Internal("no category form open".into()))?;
        let payload = form.parse()?;

        match form.editing {
            Some(id) => {
                client.update_category(id, &payload).await?;
            }
            None => {
                client.create_category(&payload).await?;
            }
        }

        self.refetch_categories(client).await?;
        self.category_form = None;
        Ok(())
    }

    pub fn request_delete_category(&mut self, id: i64) {
        self.pending_category_delete = Some(id);
    }

    /// Confirm a category deletion. On success both lists are
    /// refetched -- removing a category changes which category its
    /// products display. A backend rejection almost always means the
    /// category is still referenced.
    pub async fn confirm_delete_category(&mut self, client: &StoreClient) -> Result<(), CoreError> {
        let Some(id) = self.pending_category_delete.take() else {
            return Ok(());
        };

        if let Err(err) = client.delete_category(id).await {
            warn!(id, error = %err, "category delete rejected");
            return Err(if err.is_rejection() {
                CoreError::CategoryInUse { id }
            } else {
                err.into()
            });
        }

        self.refetch_categories(client).await?;
        self.refetch_products(client).await
    }

    pub fn cancel_delete_category(&mut self) {
        self.pending_category_delete = None;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn category(id: i64, name: &str) -> Category {
        Category {
            id,
            name: name.into(),
        }
    }

    fn product(id: i64, name: &str) -> Product {
        Product {
            id,
            name: name.into(),
            price: 10.0,
            total_items_in_stock: 5,
            image_url: None,
            category: Some(category(1, "Electronics")),
        }
    }

    // ── Form tests ───────────────────────────────────────────────────

    #[test]
    fn create_form_defaults_category_to_first_available() {
        let categories = vec![category(7, "Books"), category(9, "Fashion")];
        let form = ProductForm::create(&categories);

        assert_eq!(form.editing, None);
        assert_eq!(form.category_id, "7");
        assert!(form.name.is_empty());
    }

    #[test]
    fn edit_form_prepopulates_current_values() {
        let p = Product {
            image_url: Some("https://img.example/kb.jpg".into()),
            ..product(42, "Keyboard")
        };
        let form = ProductForm::edit(&p, &[]);

        assert_eq!(form.editing, Some(42));
        assert_eq!(form.name, "Keyboard");
        assert_eq!(form.price, "10");
        assert_eq!(form.stock, "5");
        assert_eq!(form.category_id, "1");
        assert_eq!(form.image_url, "https://img.example/kb.jpg");
    }

    #[test]
    fn parse_rejects_non_numeric_price() {
        let mut form = ProductForm::create(&[category(1, "Electronics")]);
        form.name = "Keyboard".into();
        form.price = "ten".into();
        form.stock = "5".into();

        let err = form.parse().unwrap_err();
        assert!(matches!(err, CoreError::Validation { ref field, .. } if field == "price"));
    }

    #[test]
    fn parse_rejects_negative_price_and_empty_name() {
        let mut form = ProductForm::create(&[category(1, "Electronics")]);
        form.name = "Keyboard".into();
        form.price = "-3".into();
        form.stock = "5".into();
        assert!(matches!(
            form.parse().unwrap_err(),
            CoreError::Validation { ref field, .. } if field == "price"
        ));

        form.price = "3".into();
        form.name = "   ".into();
        assert!(matches!(
            form.parse().unwrap_err(),
            CoreError::Validation { ref field, .. } if field == "name"
        ));
    }

    #[test]
    fn parse_builds_payload_and_drops_blank_image_url() {
        let mut form = ProductForm::create(&[category(1, "Electronics")]);
        form.name = " Keyboard ".into();
        form.price = "89.99".into();
        form.stock = "12".into();
        form.image_url = "  ".into();

        let payload = form.parse().unwrap();
        assert_eq!(payload.name, "Keyboard");
        assert_eq!(payload.price, 89.99);
        assert_eq!(payload.total_items_in_stock, 12);
        assert_eq!(payload.category_id, 1);
        assert_eq!(payload.image_url, None);
    }

    #[test]
    fn category_form_requires_a_name() {
        let form = CategoryForm::create();
        assert!(matches!(
            form.parse().unwrap_err(),
            CoreError::Validation { ref field, .. } if field == "name"
        ));
    }

    // ── Flow tests (wiremock backend) ────────────────────────────────

    mod flows {
        use super::*;
        use serde_json::json;
        use wiremock::matchers::{method, path};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        async fn setup(products: serde_json::Value, categories: serde_json::Value) -> (MockServer, StoreClient) {
            let server = MockServer::start().await;
            Mock::given(method("GET"))
                .and(path("/api/products"))
                .respond_with(ResponseTemplate::new(200).set_body_json(products))
                .mount(&server)
                .await;
            Mock::given(method("GET"))
                .and(path("/api/categories"))
                .respond_with(ResponseTemplate::new(200).set_body_json(categories))
                .mount(&server)
                .await;

            let base = url::Url::parse(&server.uri()).unwrap();
            let client = StoreClient::with_client(reqwest::Client::new(), base);
            (server, client)
        }

        fn product_json(id: i64, name: &str) -> serde_json::Value {
            json!({
                "id": id,
                "name": name,
                "price": 10.0,
                "totalItemsInStock": 5,
                "category": { "id": 1, "name": "Electronics" }
            })
        }

        #[tokio::test]
        async fn load_fetches_both_lists() {
            let (_server, client) = setup(
                json!([product_json(1, "Keyboard")]),
                json!([{ "id": 1, "name": "Electronics" }]),
            )
            .await;

            let mut console = AdminConsole::new();
            console.load(&client).await.unwrap();

            assert_eq!(console.products().len(), 1);
            assert_eq!(console.categories().len(), 1);
        }

        #[tokio::test]
        async fn successful_create_refetches_and_closes_form() {
            let (server, client) = setup(
                json!([product_json(1, "Keyboard"), product_json(2, "Lamp")]),
                json!([{ "id": 1, "name": "Electronics" }]),
            )
            .await;

            Mock::given(method("POST"))
                .and(path("/api/products"))
                .respond_with(ResponseTemplate::new(201).set_body_json(product_json(2, "Lamp")))
                .mount(&server)
                .await;

            let mut console = AdminConsole::new();
            console.load(&client).await.unwrap();
            console.open_product_form(None).unwrap();
            {
                let form = console.product_form.as_mut().unwrap();
                form.name = "Lamp".into();
                form.price = "24".into();
                form.stock = "5".into();
            }

            console.submit_product_form(&client).await.unwrap();

            assert!(console.product_form.is_none(), "form closes on success");
            // The list reflects the refetched server state, not a local patch.
            assert_eq!(console.products().len(), 2);
        }

        #[tokio::test]
        async fn failed_create_leaves_form_open_with_values() {
            let (server, client) = setup(
                json!([product_json(1, "Keyboard")]),
                json!([{ "id": 1, "name": "Electronics" }]),
            )
            .await;

            Mock::given(method("POST"))
                .and(path("/api/products"))
                .respond_with(ResponseTemplate::new(400).set_body_string("category missing"))
                .mount(&server)
                .await;

            let mut console = AdminConsole::new();
            console.load(&client).await.unwrap();
            console.open_product_form(None).unwrap();
            {
                let form = console.product_form.as_mut().unwrap();
                form.name = "Lamp".into();
                form.price = "24".into();
                form.stock = "5".into();
            }

            let err = console.submit_product_form(&client).await.unwrap_err();
            assert!(matches!(err, CoreError::Rejected { .. }));

            let form = console.product_form.as_ref().expect("form stays open");
            assert_eq!(form.name, "Lamp");
            assert_eq!(form.price, "24");
            assert_eq!(console.products().len(), 1, "list unchanged");
        }

        #[tokio::test]
        async fn validation_failure_makes_no_request() {
            let (_server, client) = setup(
                json!([product_json(1, "Keyboard")]),
                json!([{ "id": 1, "name": "Electronics" }]),
            )
            .await;
            // No POST mock mounted: a request would 404 and fail differently.

            let mut console = AdminConsole::new();
            console.load(&client).await.unwrap();
            console.open_product_form(None).unwrap();
            {
                let form = console.product_form.as_mut().unwrap();
                form.name = "Lamp".into();
                form.price = "not-a-price".into();
                form.stock = "5".into();
            }

            let err = console.submit_product_form(&client).await.unwrap_err();
            assert!(matches!(err, CoreError::Validation { .. }));
            assert!(console.product_form.is_some());
        }

        #[tokio::test]
        async fn delete_product_two_step() {
            let (server, client) = setup(
                json!([]),
                json!([{ "id": 1, "name": "Electronics" }]),
            )
            .await;

            Mock::given(method("DELETE"))
                .and(path("/api/products/1"))
                .respond_with(ResponseTemplate::new(200))
                .mount(&server)
                .await;

            let mut console = AdminConsole::new();
            console.load(&client).await.unwrap();

            console.request_delete_product(1);
            assert_eq!(console.pending_product_delete(), Some(1));

            console.confirm_delete_product(&client).await.unwrap();
            assert_eq!(console.pending_product_delete(), None);
        }

        #[tokio::test]
        async fn cancel_delete_leaves_everything_alone() {
            let (_server, client) = setup(
                json!([product_json(1, "Keyboard")]),
                json!([{ "id": 1, "name": "Electronics" }]),
            )
            .await;

            let mut console = AdminConsole::new();
            console.load(&client).await.unwrap();

            console.request_delete_product(1);
            console.cancel_delete_product();
            assert_eq!(console.pending_product_delete(), None);
            assert_eq!(console.products().len(), 1);
        }

        #[tokio::test]
        async fn category_delete_rejection_names_the_likely_cause() {
            let (server, client) = setup(
                json!([product_json(1, "Keyboard")]),
                json!([{ "id": 1, "name": "Electronics" }]),
            )
            .await;

            Mock::given(method("DELETE"))
                .and(path("/api/categories/1"))
                .respond_with(ResponseTemplate::new(409).set_body_string("in use"))
                .mount(&server)
                .await;

            let mut console = AdminConsole::new();
            console.load(&client).await.unwrap();

            console.request_delete_category(1);
            let err = console.confirm_delete_category(&client).await.unwrap_err();

            assert!(matches!(err, CoreError::CategoryInUse { id: 1 }));
            // Dialog closed, category still present.
            assert_eq!(console.pending_category_delete(), None);
            assert_eq!(console.categories().len(), 1);
        }

        #[tokio::test]
        async fn category_delete_success_refetches_products_too() {
            let (server, client) = setup(
                json!([product_json(1, "Keyboard")]),
                json!([{ "id": 1, "name": "Electronics" }]),
            )
            .await;

            Mock::given(method("DELETE"))
                .and(path("/api/categories/1"))
                .respond_with(ResponseTemplate::new(200))
                .mount(&server)
                .await;

            let mut console = AdminConsole::new();
            console.load(&client).await.unwrap();
            console.request_delete_category(1);
            console.confirm_delete_category(&client).await.unwrap();

            // 2 loads of the product list: initial + post-delete resync.
            let product_fetches = server
                .received_requests()
                .await
                .unwrap()
                .iter()
                .filter(|r| r.url.path() == "/api/products")
                .count();
            assert_eq!(product_fetches, 2);
        }
    }
}
