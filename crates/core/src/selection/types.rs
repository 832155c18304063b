//! Types for the selection store.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::provider::CategoryRef;

/// Errors from saving or managing a trader's selection.
#[derive(Debug, Error)]
pub enum SelectionError {
    /// The request cannot proceed; the message tells the trader what to do.
    #[error("{0}")]
    PreconditionFailed(String),

    /// The trader has no such saved product.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Storage failed; the transaction was rolled back.
    #[error("Persistence error: {0}")]
    Persistence(String),
}

/// Outcome of one save.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveSummary {
    /// `created + updated`.
    pub saved: u64,
    /// Products inserted for the first time.
    pub created: u64,
    /// Products that already existed and were overwritten.
    pub updated: u64,
}

/// A product in a trader's saved list, joined with its category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TraderProductView {
    /// Local product id.
    pub product_id: i64,
    pub source_id: i64,
    pub title: String,
    pub price: Decimal,
    pub central_stock: i64,
    pub category: CategoryRef,
    pub version: String,
    pub visibility: bool,
    pub display_order: i64,
    /// When the product was first linked to the trader.
    pub created_at: DateTime<Utc>,
    /// When the product row was last written from provider data.
    pub synced_at: DateTime<Utc>,
}

/// Changes to a trader's link to one product. Absent fields are left alone.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TraderProductUpdate {
    #[serde(default)]
    pub visibility: Option<bool>,
    #[serde(default)]
    pub display_order: Option<i64>,
}

impl TraderProductUpdate {
    pub fn is_empty(&self) -> bool {
        self.visibility.is_none() && self.display_order.is_none()
    }
}

/// Row counts across the selection tables.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SelectionStats {
    pub categories: u64,
    pub products: u64,
    pub trader_products: u64,
}
