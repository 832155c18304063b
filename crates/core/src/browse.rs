//! Browse façade over the catalog provider.
//!
//! Callers page from 1; the provider pages from 0. The façade does the
//! translation, applies the configured page-size bounds and folds provider
//! failures into the three outcomes the HTTP layer distinguishes. It never
//! touches the session: storing the returned products as the browse cache is
//! the caller's job.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::BrowseConfig;
use crate::provider::{
    CatalogProvider, CategoryRef, ProductRecord, ProviderError, ProviderQuery,
    UpstreamCredentials,
};

#[derive(Debug, Error)]
pub enum BrowseError {
    /// No usable upstream credentials.
    #[error("Upstream authentication required")]
    AuthenticationRequired,

    /// The provider cannot serve this request yet.
    #[error("Catalog provider not ready: {0}")]
    UpstreamNotImplemented(String),

    /// Any other provider failure.
    #[error("Catalog provider error: {0}")]
    Upstream(ProviderError),
}

impl From<ProviderError> for BrowseError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::Unauthorized => BrowseError::AuthenticationRequired,
            ProviderError::NotImplemented(msg) | ProviderError::NotConfigured(msg) => {
                BrowseError::UpstreamNotImplemented(msg)
            }
            other => BrowseError::Upstream(other),
        }
    }
}

/// Inbound browse parameters. `page` is 1-indexed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BrowseParams {
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub limit: Option<u32>,
    #[serde(default)]
    pub category_id: Option<i64>,
    #[serde(default)]
    pub search: Option<String>,
}

/// One page of browse results, as relayed to the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowseResult {
    pub products: Vec<ProductRecord>,
    pub total: u64,
    /// 1-indexed page that was requested.
    pub page: u32,
    pub total_pages: u32,
}

pub struct BrowseFacade {
    provider: Arc<dyn CatalogProvider>,
    config: BrowseConfig,
}

impl BrowseFacade {
    pub fn new(provider: Arc<dyn CatalogProvider>, config: BrowseConfig) -> Self {
        Self { provider, config }
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    /// Fetch one page of products from the provider.
    pub async fn browse_products(
        &self,
        credentials: Option<&UpstreamCredentials>,
        params: &BrowseParams,
    ) -> Result<BrowseResult, BrowseError> {
        let credentials = require_credentials(credentials)?;
        let page = params.page.unwrap_or(1).max(1);
        let query = self.provider_query(page, params);

        debug!(
            "Browsing {} products: page={} limit={}",
            self.provider.name(),
            page,
            query.limit
        );

        let result = self
            .provider
            .browse_products(credentials, &query)
            .await
            .map_err(|e| log_failure("browse_products", e))?;

        let total_pages = result
            .total_pages
            .unwrap_or_else(|| pages_for(result.total, query.limit));

        Ok(BrowseResult {
            products: result.products,
            total: result.total,
            page,
            total_pages,
        })
    }

    /// Fetch the provider's category list.
    pub async fn browse_categories(
        &self,
        credentials: Option<&UpstreamCredentials>,
    ) -> Result<Vec<CategoryRef>, BrowseError> {
        let credentials = require_credentials(credentials)?;

        self.provider
            .browse_categories(credentials)
            .await
            .map_err(|e| log_failure("browse_categories", e))
    }

    fn provider_query(&self, page: u32, params: &BrowseParams) -> ProviderQuery {
        let limit = params
            .limit
            .unwrap_or(self.config.default_limit)
            .clamp(1, self.config.max_limit.max(1));

        ProviderQuery {
            page: page - 1,
            limit,
            category_id: params.category_id,
            search: params
                .search
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
        }
    }
}

fn require_credentials(
    credentials: Option<&UpstreamCredentials>,
) -> Result<&UpstreamCredentials, BrowseError> {
    match credentials {
        Some(c) if !c.access_token.is_empty() => Ok(c),
        _ => Err(BrowseError::AuthenticationRequired),
    }
}

fn log_failure(operation: &str, err: ProviderError) -> BrowseError {
    warn!("Provider {} failed: {}", operation, err);
    BrowseError::from(err)
}

fn pages_for(total: u64, limit: u32) -> u32 {
    let limit = u64::from(limit.max(1));
    total.div_ceil(limit).min(u64::from(u32::MAX)) as u32
}
