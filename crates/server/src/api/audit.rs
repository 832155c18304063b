use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tradeshelf_core::{AuditFilter, AuditRecord};

use super::error::{audit_error, ApiError};
use super::middleware::AuthTrader;
use crate::state::AppState;

/// Maximum allowed limit for audit queries
const MAX_LIMIT: i64 = 1000;

/// Default limit for audit queries
const DEFAULT_LIMIT: i64 = 100;

/// Query parameters for audit endpoint
#[derive(Debug, Deserialize)]
pub struct AuditQueryParams {
    /// Filter by action (e.g. SAVE_SELECTION)
    pub action: Option<String>,
    /// Filter rows after this timestamp (ISO 8601)
    pub from: Option<DateTime<Utc>>,
    /// Filter rows before this timestamp (ISO 8601)
    pub to: Option<DateTime<Utc>>,
    /// Maximum number of rows to return (default 100, max 1000)
    pub limit: Option<i64>,
    /// Pagination offset (default 0)
    pub offset: Option<i64>,
}

/// Response for audit query endpoint
#[derive(Debug, Serialize)]
pub struct AuditQueryResponse {
    pub events: Vec<AuditRecord>,
    /// Total number of matching rows
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
}

/// Query the calling trader's audit rows, newest first
pub async fn query_audit(
    State(state): State<Arc<AppState>>,
    AuthTrader(trader_id): AuthTrader,
    Query(params): Query<AuditQueryParams>,
) -> Result<Json<AuditQueryResponse>, ApiError> {
    let limit = params.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
    let offset = params.offset.unwrap_or(0).max(0);

    let mut base_filter = AuditFilter::new().with_trader_id(trader_id);

    if let Some(ref action) = params.action {
        base_filter = base_filter.with_action(action);
    }

    if params.from.is_some() || params.to.is_some() {
        base_filter = base_filter.with_time_range(params.from, params.to);
    }

    let query_filter = AuditFilter {
        limit,
        offset,
        ..base_filter.clone()
    };

    let events = state
        .audit_store()
        .query(&query_filter)
        .map_err(audit_error)?;

    // Count ignores limit/offset
    let total = state
        .audit_store()
        .count(&base_filter)
        .map_err(audit_error)?;

    Ok(Json(AuditQueryResponse {
        events,
        total,
        limit,
        offset,
    }))
}
