//! Wire types shared with the upstream admin catalog API.
//!
//! Field names are camelCase on the wire (`sourceId`, `centralStock`,
//! `totalPages`) and the same shapes are relayed to our own clients.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Category reference embedded in a product record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRef {
    /// Provider-assigned category id.
    pub source_id: i64,
    /// Display name.
    pub name: String,
}

/// One product as returned by the provider.
///
/// This is the candidate record the selection engine persists.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    /// Provider-assigned product id (the upsert key).
    pub source_id: i64,
    pub title: String,
    /// Exact price; never round-tripped through floating point.
    pub price: Decimal,
    /// Stock held centrally by the provider.
    pub central_stock: i64,
    pub category: CategoryRef,
    /// Provider's version tag for this record.
    pub version: String,
}

/// Query sent to the provider. `page` is zero-indexed here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProviderQuery {
    pub page: u32,
    pub limit: u32,
    pub category_id: Option<i64>,
    pub search: Option<String>,
}

/// A page of products from the provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPage {
    #[serde(default)]
    pub products: Vec<ProductRecord>,
    #[serde(default)]
    pub total: u64,
    /// Page as reported by the provider (zero-indexed), if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_pages: Option<u32>,
}

/// Category listing envelope returned by the provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryList {
    #[serde(default)]
    pub categories: Vec<CategoryRef>,
}

/// Credentials for calling the provider on behalf of a trader.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpstreamCredentials {
    /// Bearer token obtained from the admin API.
    pub access_token: String,
    /// Trader's API key at the admin API (may be empty).
    #[serde(default)]
    pub api_key: String,
}
