//! Mock catalog provider for testing.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::provider::{
    CatalogProvider, CategoryRef, ProductPage, ProductRecord, ProviderError, ProviderQuery,
    UpstreamCredentials,
};

/// A recorded provider call for test assertions.
#[derive(Debug, Clone)]
pub enum RecordedProviderCall {
    BrowseProducts { query: ProviderQuery },
    BrowseCategories,
}

/// Mock implementation of the CatalogProvider trait.
///
/// Provides controllable behavior for testing:
/// - Serve a configurable product list, filtered and paged like the real API
/// - Track calls for assertions
/// - Simulate failures
#[derive(Debug)]
pub struct MockCatalogProvider {
    products: Arc<RwLock<Vec<ProductRecord>>>,
    /// Explicit category list; derived from products when unset.
    categories: Arc<RwLock<Option<Vec<CategoryRef>>>>,
    calls: Arc<RwLock<Vec<RecordedProviderCall>>>,
    /// If set, the next call will fail with this error.
    next_error: Arc<RwLock<Option<ProviderError>>>,
}

impl Default for MockCatalogProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockCatalogProvider {
    pub fn new() -> Self {
        Self {
            products: Arc::new(RwLock::new(Vec::new())),
            categories: Arc::new(RwLock::new(None)),
            calls: Arc::new(RwLock::new(Vec::new())),
            next_error: Arc::new(RwLock::new(None)),
        }
    }

    /// Replace the product list.
    pub async fn set_products(&self, products: Vec<ProductRecord>) {
        *self.products.write().await = products;
    }

    /// Replace one product by source id, or append it.
    pub async fn upsert_product(&self, product: ProductRecord) {
        let mut products = self.products.write().await;
        match products.iter_mut().find(|p| p.source_id == product.source_id) {
            Some(existing) => *existing = product,
            None => products.push(product),
        }
    }

    pub async fn set_categories(&self, categories: Vec<CategoryRef>) {
        *self.categories.write().await = Some(categories);
    }

    /// Get all recorded calls.
    pub async fn calls(&self) -> Vec<RecordedProviderCall> {
        self.calls.read().await.clone()
    }

    pub async fn clear_calls(&self) {
        self.calls.write().await.clear();
    }

    /// Make the next call fail with the given error.
    pub async fn set_next_error(&self, error: ProviderError) {
        *self.next_error.write().await = Some(error);
    }

    async fn take_error(&self) -> Option<ProviderError> {
        self.next_error.write().await.take()
    }

    async fn record(&self, call: RecordedProviderCall) {
        self.calls.write().await.push(call);
    }
}

#[async_trait]
impl CatalogProvider for MockCatalogProvider {
    async fn browse_products(
        &self,
        _credentials: &UpstreamCredentials,
        query: &ProviderQuery,
    ) -> Result<ProductPage, ProviderError> {
        self.record(RecordedProviderCall::BrowseProducts {
            query: query.clone(),
        })
        .await;

        if let Some(error) = self.take_error().await {
            return Err(error);
        }

        let search = query.search.as_ref().map(|s| s.to_lowercase());
        let products = self.products.read().await;
        let matching: Vec<&ProductRecord> = products
            .iter()
            .filter(|p| query.category_id.is_none_or(|id| p.category.source_id == id))
            .filter(|p| {
                search
                    .as_ref()
                    .is_none_or(|s| p.title.to_lowercase().contains(s))
            })
            .collect();

        let start = query.page as usize * query.limit as usize;
        let page = matching
            .iter()
            .skip(start)
            .take(query.limit as usize)
            .map(|p| (*p).clone())
            .collect();

        Ok(ProductPage {
            products: page,
            total: matching.len() as u64,
            page: Some(query.page),
            total_pages: None,
        })
    }

    async fn browse_categories(
        &self,
        _credentials: &UpstreamCredentials,
    ) -> Result<Vec<CategoryRef>, ProviderError> {
        self.record(RecordedProviderCall::BrowseCategories).await;

        if let Some(error) = self.take_error().await {
            return Err(error);
        }

        if let Some(categories) = self.categories.read().await.as_ref() {
            return Ok(categories.clone());
        }

        let mut categories: Vec<CategoryRef> = Vec::new();
        for product in self.products.read().await.iter() {
            if !categories.iter().any(|c| c.source_id == product.category.source_id) {
                categories.push(product.category.clone());
            }
        }
        Ok(categories)
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}
