use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Actions recorded in the audit log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditAction {
    /// A cart was saved into the trader's product list.
    SaveSelection,
    /// A trader changed visibility or ordering of a saved product.
    UpdateTraderProduct,
}

impl AuditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SaveSelection => "SAVE_SELECTION",
            Self::UpdateTraderProduct => "UPDATE_TRADER_PRODUCT",
        }
    }

    /// Entity the action touches.
    pub fn entity(&self) -> &'static str {
        match self {
            Self::SaveSelection => "product",
            Self::UpdateTraderProduct => "trader_product",
        }
    }
}

impl std::fmt::Display for AuditAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stored audit row
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuditRecord {
    pub id: i64,
    pub timestamp: DateTime<Utc>,
    pub trader_id: String,
    pub action: String,
    pub entity: String,
    pub data: serde_json::Value,
}

impl AuditRecord {
    /// New record stamped now; `id` is assigned on insert.
    pub fn new(trader_id: impl Into<String>, action: AuditAction, data: serde_json::Value) -> Self {
        Self {
            id: 0,
            timestamp: Utc::now(),
            trader_id: trader_id.into(),
            action: action.as_str().to_string(),
            entity: action.entity().to_string(),
            data,
        }
    }

    /// `selected` is the raw number of ids the trader asked for, which can
    /// exceed `created + updated` when some ids were not in the browse cache.
    pub fn selection_saved(trader_id: &str, selected: usize, created: u64, updated: u64) -> Self {
        Self::new(
            trader_id,
            AuditAction::SaveSelection,
            json!({
                "selected": selected,
                "created": created,
                "updated": updated,
            }),
        )
    }

    pub fn trader_product_updated(
        trader_id: &str,
        product_id: i64,
        visibility: bool,
        display_order: i64,
    ) -> Self {
        Self::new(
            trader_id,
            AuditAction::UpdateTraderProduct,
            json!({
                "product_id": product_id,
                "visibility": visibility,
                "display_order": display_order,
            }),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_saved_payload() {
        let record = AuditRecord::selection_saved("trader-1", 5, 2, 1);

        assert_eq!(record.action, "SAVE_SELECTION");
        assert_eq!(record.entity, "product");
        assert_eq!(record.trader_id, "trader-1");
        assert_eq!(record.data, json!({"selected": 5, "created": 2, "updated": 1}));
    }

    #[test]
    fn test_trader_product_updated_payload() {
        let record = AuditRecord::trader_product_updated("trader-1", 12, false, 3);

        assert_eq!(record.action, "UPDATE_TRADER_PRODUCT");
        assert_eq!(record.entity, "trader_product");
        assert_eq!(record.data["display_order"], 3);
        assert_eq!(record.data["visibility"], false);
    }
}
