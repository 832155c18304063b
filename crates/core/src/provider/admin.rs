//! HTTP client for the upstream admin catalog API.
//!
//! Every call carries the trader's bearer token and API key. A 404 or 501
//! from the browse endpoints means the admin API has not shipped them yet,
//! which is reported as [`ProviderError::NotImplemented`].

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::{
    CatalogProvider, CategoryList, CategoryRef, ProductPage, ProviderError, ProviderQuery,
    UpstreamCredentials,
};
use crate::config::ProviderConfig;
use crate::metrics::{PROVIDER_REQUESTS, PROVIDER_REQUEST_DURATION};

/// Admin API client configuration.
#[derive(Debug, Clone)]
pub struct AdminApiConfig {
    /// Base URL, without trailing slash.
    pub base_url: String,
    pub timeout: Duration,
}

impl From<&ProviderConfig> for AdminApiConfig {
    fn from(config: &ProviderConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            timeout: Duration::from_secs(config.timeout_secs as u64),
        }
    }
}

/// Admin API client.
pub struct AdminApiClient {
    client: Client,
    base_url: String,
}

impl AdminApiClient {
    pub fn new(config: AdminApiConfig) -> Result<Self, ProviderError> {
        if config.base_url.trim().is_empty() {
            return Err(ProviderError::NotConfigured(
                "admin API base URL is required".to_string(),
            ));
        }

        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn authorized(&self, path: &str, credentials: &UpstreamCredentials) -> RequestBuilder {
        self.client
            .get(format!("{}{}", self.base_url, path))
            .bearer_auth(&credentials.access_token)
            .header("X-API-Key", &credentials.api_key)
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        request: RequestBuilder,
    ) -> Result<T, ProviderError> {
        let start = Instant::now();
        let result = Self::execute(operation, request).await;

        PROVIDER_REQUEST_DURATION
            .with_label_values(&[operation])
            .observe(start.elapsed().as_secs_f64());
        let outcome = match &result {
            Ok(_) => "success",
            Err(e) => e.kind(),
        };
        PROVIDER_REQUESTS
            .with_label_values(&[operation, outcome])
            .inc();

        result
    }

    async fn execute<T: DeserializeOwned>(
        operation: &'static str,
        request: RequestBuilder,
    ) -> Result<T, ProviderError> {
        let response = request.send().await?;

        let status = response.status();
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                warn!("Admin API rejected credentials for {}", operation);
                return Err(ProviderError::Unauthorized);
            }
            StatusCode::NOT_FOUND | StatusCode::NOT_IMPLEMENTED => {
                return Err(ProviderError::NotImplemented(format!(
                    "{} endpoint not available",
                    operation
                )));
            }
            StatusCode::TOO_MANY_REQUESTS => return Err(ProviderError::RateLimitExceeded),
            _ => {}
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }

        response.json().await.map_err(|e| {
            ProviderError::ParseError(format!("Failed to parse {} response: {}", operation, e))
        })
    }
}

#[async_trait]
impl CatalogProvider for AdminApiClient {
    async fn browse_products(
        &self,
        credentials: &UpstreamCredentials,
        query: &ProviderQuery,
    ) -> Result<ProductPage, ProviderError> {
        debug!(
            "Admin API browse products: page={}, limit={}, category={:?}, search={:?}",
            query.page, query.limit, query.category_id, query.search
        );

        let mut request = self
            .authorized("/products/browse", credentials)
            .query(&[("page", query.page), ("limit", query.limit)]);
        if let Some(category_id) = query.category_id {
            request = request.query(&[("category_id", category_id)]);
        }
        if let Some(search) = &query.search {
            request = request.query(&[("search", search)]);
        }

        self.send_json("browse_products", request).await
    }

    async fn browse_categories(
        &self,
        credentials: &UpstreamCredentials,
    ) -> Result<Vec<CategoryRef>, ProviderError> {
        debug!("Admin API browse categories");

        let request = self.authorized("/categories/browse", credentials);
        let list: CategoryList = self.send_json("browse_categories", request).await?;
        Ok(list.categories)
    }

    fn name(&self) -> &'static str {
        "admin_api"
    }
}
