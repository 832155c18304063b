//! Upstream admin catalog provider.
//!
//! The provider is the system of record for products and categories. We only
//! read from it: paged product browsing and the category listing.

mod admin;
mod types;

pub use admin::{AdminApiClient, AdminApiConfig};
pub use types::*;

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur when talking to the catalog provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// The provider does not offer this capability yet.
    #[error("Not implemented by provider: {0}")]
    NotImplemented(String),

    /// The provider rejected our credentials.
    #[error("Provider rejected credentials")]
    Unauthorized,

    /// Rate limit exceeded.
    #[error("Rate limit exceeded, please wait before retrying")]
    RateLimitExceeded,

    /// API returned an error.
    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    /// Failed to parse response.
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Client not configured.
    #[error("Client not configured: {0}")]
    NotConfigured(String),
}

impl ProviderError {
    /// Short label for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::HttpError(_) => "http_error",
            Self::NotImplemented(_) => "not_implemented",
            Self::Unauthorized => "unauthorized",
            Self::RateLimitExceeded => "rate_limited",
            Self::ApiError { .. } => "api_error",
            Self::ParseError(_) => "parse_error",
            Self::NotConfigured(_) => "not_configured",
        }
    }
}

/// Read access to the upstream catalog.
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Fetch one page of products. `query.page` is zero-indexed.
    async fn browse_products(
        &self,
        credentials: &UpstreamCredentials,
        query: &ProviderQuery,
    ) -> Result<ProductPage, ProviderError>;

    /// Fetch every category.
    async fn browse_categories(
        &self,
        credentials: &UpstreamCredentials,
    ) -> Result<Vec<CategoryRef>, ProviderError>;

    /// Name used in logs and metrics.
    fn name(&self) -> &'static str;
}
