// ── Catalog filter engine ──
//
// Pure filtering of the fetched product list by search term and
// selected category. Recomputed on demand whenever an input changes;
// no incremental update, no resort -- source order is preserved.

use indexmap::IndexSet;

use shoply_api::Product;

/// The category selection offered alongside the search box.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryChoice {
    /// No category restriction.
    #[default]
    All,
    /// Restrict to products whose category name equals this value.
    Named(String),
}

/// Filter inputs for the shopping view.
///
/// `apply` is pure: same inputs, same output, stable order.
#[derive(Debug, Clone, Default)]
pub struct CatalogFilter {
    /// Case-insensitive substring matched against product names.
    /// Empty matches everything.
    pub search: String,
    pub category: CategoryChoice,
}

impl CatalogFilter {
    /// Whether a single product passes both filter clauses.
    pub fn matches(&self, product: &Product) -> bool {
        if let CategoryChoice::Named(ref name) = self.category {
            if product.category_name() != Some(name.as_str()) {
                return false;
            }
        }

        if self.search.is_empty() {
            return true;
        }
        product
            .name
            .to_lowercase()
            .contains(&self.search.to_lowercase())
    }

    /// The subset of `products` passing the filter, in source order.
    ///
    /// A category with zero matching products yields an empty result,
    /// not an error.
    pub fn apply<'a>(&self, products: &'a [Product]) -> Vec<&'a Product> {
        products.iter().filter(|p| self.matches(p)).collect()
    }
}

/// Distinct category names present in a product list, first-seen order.
///
/// The shopping view derives its category choices from the fetched
/// products rather than the category API; uncategorized products
/// contribute nothing.
pub fn category_names(products: &[Product]) -> Vec<String> {
    let set: IndexSet<&str> = products.iter().filter_map(Product::category_name).collect();
    set.into_iter().map(str::to_owned).collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use shoply_api::Category;

    fn product(id: i64, name: &str, category: Option<&str>) -> Product {
        Product {
            id,
            name: name.into(),
            price: 10.0,
            total_items_in_stock: 5,
            image_url: None,
            category: category.map(|name| Category {
                id,
                name: name.into(),
            }),
        }
    }

    fn sample() -> Vec<Product> {
        vec![
            product(1, "Mechanical Keyboard", Some("Electronics")),
            product(2, "Leather Keyboard Sleeve", Some("Fashion")),
            product(3, "Notebook", None),
            product(4, "USB Cable", Some("Electronics")),
        ]
    }

    #[test]
    fn empty_search_matches_everything() {
        let products = sample();
        let filter = CatalogFilter::default();
        assert_eq!(filter.apply(&products).len(), products.len());
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let products = sample();
        let filter = CatalogFilter {
            search: "KEYBOARD".into(),
            category: CategoryChoice::All,
        };
        let hits = filter.apply(&products);
        assert_eq!(hits.iter().map(|p| p.id).collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn category_filter_matches_exact_name() {
        let products = sample();
        let filter = CatalogFilter {
            search: String::new(),
            category: CategoryChoice::Named("Electronics".into()),
        };
        let hits = filter.apply(&products);
        assert_eq!(hits.iter().map(|p| p.id).collect::<Vec<_>>(), vec![1, 4]);
    }

    #[test]
    fn search_and_category_combine() {
        let products = sample();
        let filter = CatalogFilter {
            search: "keyboard".into(),
            category: CategoryChoice::Named("Electronics".into()),
        };
        let hits = filter.apply(&products);
        assert_eq!(hits.iter().map(|p| p.id).collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn empty_category_yields_empty_result() {
        let products = sample();
        let filter = CatalogFilter {
            search: String::new(),
            category: CategoryChoice::Named("Books".into()),
        };
        assert!(filter.apply(&products).is_empty());
    }

    #[test]
    fn order_is_preserved_from_source() {
        let products = sample();
        let filter = CatalogFilter {
            search: "e".into(),
            category: CategoryChoice::All,
        };
        let ids: Vec<i64> = filter.apply(&products).iter().map(|p| p.id).collect();
        let mut sorted = ids.clone();
        sorted.sort_unstable();
        assert_eq!(ids, sorted, "stable filter must not reorder");
    }

    #[test]
    fn category_names_first_seen_order_distinct() {
        let products = sample();
        assert_eq!(category_names(&products), vec!["Electronics", "Fashion"]);
    }

    #[test]
    fn category_names_skips_uncategorized() {
        let products = vec![product(1, "Notebook", None)];
        assert!(category_names(&products).is_empty());
    }
}
