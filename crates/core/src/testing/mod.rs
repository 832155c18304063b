//! Testing utilities and mock implementations.
//!
//! [`MockCatalogProvider`] stands in for the upstream admin API so browse and
//! save flows can be exercised without a network.
//!
//! # Example
//!
//! ```rust,ignore
//! use tradeshelf_core::testing::{fixtures, MockCatalogProvider};
//!
//! let provider = MockCatalogProvider::new();
//! provider.set_products(fixtures::product_records(30, 1, "Tea")).await;
//!
//! // Use in a BrowseFacade or AppState...
//! ```

mod mock_provider;

pub use mock_provider::{MockCatalogProvider, RecordedProviderCall};

/// Test fixtures and helper functions.
pub mod fixtures {
    use rust_decimal::Decimal;

    use crate::provider::{CategoryRef, ProductRecord, UpstreamCredentials};

    /// Create a product record with reasonable defaults.
    ///
    /// Titles are zero-padded so they sort in source id order.
    pub fn product_record(source_id: i64, category_source_id: i64, category_name: &str) -> ProductRecord {
        ProductRecord {
            source_id,
            title: format!("Product {:03}", source_id),
            price: Decimal::new(source_id * 100 + 99, 2),
            central_stock: 10,
            category: CategoryRef {
                source_id: category_source_id,
                name: category_name.to_string(),
            },
            version: "v1".to_string(),
        }
    }

    /// Create `count` products with source ids `1..=count`, all in one category.
    pub fn product_records(count: i64, category_source_id: i64, category_name: &str) -> Vec<ProductRecord> {
        (1..=count)
            .map(|id| product_record(id, category_source_id, category_name))
            .collect()
    }

    /// Upstream credentials accepted by the mock provider.
    pub fn credentials() -> UpstreamCredentials {
        UpstreamCredentials {
            access_token: "test-token".to_string(),
            api_key: "test-key".to_string(),
        }
    }
}
