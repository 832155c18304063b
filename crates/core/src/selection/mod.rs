//! Catalog upsert engine.
//!
//! Saving a cart materializes the selected products, and their categories,
//! from the session's browse cache into local storage and links them to the
//! trader. Categories and products are keyed by the provider's source id, so
//! saving the same products again updates rows instead of adding new ones.
//! Every save appends one audit row in the same transaction.

mod sqlite;
mod types;

pub use sqlite::SqliteSelectionStore;
pub use types::*;

use tracing::{error, info};

use crate::metrics::SELECTION_SAVES;
use crate::provider::ProductRecord;
use crate::session::SessionData;

/// Trait for the trader's product selection storage.
pub trait SelectionStore: Send + Sync {
    /// Upsert every candidate whose source id is in `selected` and link it
    /// to the trader, then append one audit row. All or nothing.
    ///
    /// Selected ids with no matching candidate are ignored. The audit row
    /// records `selected.len()` regardless.
    fn save_selection(
        &self,
        trader_id: &str,
        selected: &[i64],
        candidates: &[ProductRecord],
    ) -> Result<SaveSummary, SelectionError>;

    /// The trader's saved products, by display order then title.
    fn list_trader_products(&self, trader_id: &str)
        -> Result<Vec<TraderProductView>, SelectionError>;

    /// Change visibility or display order of one saved product.
    ///
    /// `product_id` is the local product id. Audited like a save.
    fn update_trader_product(
        &self,
        trader_id: &str,
        product_id: i64,
        update: &TraderProductUpdate,
    ) -> Result<TraderProductView, SelectionError>;

    /// Row counts.
    fn stats(&self) -> Result<SelectionStats, SelectionError>;
}

/// Save the session's cart against its browse cache.
///
/// Fails before touching storage when either is empty. The caller clears the
/// cart only once this returns `Ok`.
pub fn save_cart(
    store: &dyn SelectionStore,
    trader_id: &str,
    session: &SessionData,
) -> Result<SaveSummary, SelectionError> {
    if session.cart.is_empty() {
        SELECTION_SAVES
            .with_label_values(&["precondition_failed"])
            .inc();
        return Err(SelectionError::PreconditionFailed(
            "Cart is empty".to_string(),
        ));
    }
    if session.browse_cache.is_empty() {
        SELECTION_SAVES
            .with_label_values(&["precondition_failed"])
            .inc();
        return Err(SelectionError::PreconditionFailed(
            "No cached data. Browse products again.".to_string(),
        ));
    }

    let selected: Vec<i64> = session.cart.iter().copied().collect();

    match store.save_selection(trader_id, &selected, &session.browse_cache) {
        Ok(summary) => {
            SELECTION_SAVES.with_label_values(&["committed"]).inc();
            info!(
                "Saved selection for trader {}: {} selected, {} created, {} updated",
                trader_id,
                selected.len(),
                summary.created,
                summary.updated
            );
            Ok(summary)
        }
        Err(e) => {
            SELECTION_SAVES
                .with_label_values(&["persistence_error"])
                .inc();
            error!("Failed to save selection for trader {}: {}", trader_id, e);
            Err(e)
        }
    }
}
