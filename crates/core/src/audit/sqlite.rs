use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};

use super::{AuditError, AuditFilter, AuditRecord, AuditStore};

const AUDIT_SCHEMA: &str = r#"
    CREATE TABLE IF NOT EXISTS audit_log (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        timestamp TEXT NOT NULL,
        trader_id TEXT NOT NULL,
        action TEXT NOT NULL,
        entity TEXT NOT NULL,
        data TEXT NOT NULL
    );

    CREATE INDEX IF NOT EXISTS idx_audit_log_timestamp ON audit_log(timestamp);
    CREATE INDEX IF NOT EXISTS idx_audit_log_trader_id ON audit_log(trader_id);
    CREATE INDEX IF NOT EXISTS idx_audit_log_action ON audit_log(action);
"#;

/// Create the `audit_log` table if it does not exist.
pub fn initialize_audit_schema(conn: &Connection) -> Result<(), AuditError> {
    conn.execute_batch(AUDIT_SCHEMA)
        .map_err(|e| AuditError::Database(e.to_string()))
}

/// Append one row on `conn`, returning the assigned id.
///
/// Pass the open transaction of the change being audited so the row commits
/// or rolls back with it.
pub fn append(conn: &Connection, record: &AuditRecord) -> Result<i64, AuditError> {
    let data_json = serde_json::to_string(&record.data)
        .map_err(|e| AuditError::Serialization(e.to_string()))?;

    conn.execute(
        "INSERT INTO audit_log (timestamp, trader_id, action, entity, data) VALUES (?, ?, ?, ?, ?)",
        params![
            record.timestamp.to_rfc3339(),
            record.trader_id,
            record.action,
            record.entity,
            data_json,
        ],
    )
    .map_err(|e| AuditError::Database(e.to_string()))?;

    Ok(conn.last_insert_rowid())
}

/// SQLite-backed audit reader
pub struct SqliteAuditStore {
    conn: Mutex<Connection>,
}

impl SqliteAuditStore {
    /// Open the database file, creating the audit table if needed
    pub fn new(path: &Path) -> Result<Self, AuditError> {
        let conn = Connection::open(path).map_err(|e| AuditError::Database(e.to_string()))?;
        conn.busy_timeout(Duration::from_secs(5))
            .map_err(|e| AuditError::Database(e.to_string()))?;
        initialize_audit_schema(&conn)?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create an in-memory SQLite audit store (useful for testing)
    pub fn in_memory() -> Result<Self, AuditError> {
        let conn = Connection::open_in_memory().map_err(|e| AuditError::Database(e.to_string()))?;
        initialize_audit_schema(&conn)?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>, AuditError> {
        self.conn
            .lock()
            .map_err(|_| AuditError::Database("connection lock poisoned".to_string()))
    }

    fn build_where_clause(filter: &AuditFilter) -> (String, Vec<Box<dyn rusqlite::ToSql>>) {
        let mut conditions = Vec::new();
        let mut params: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(ref trader_id) = filter.trader_id {
            conditions.push("trader_id = ?");
            params.push(Box::new(trader_id.clone()));
        }

        if let Some(ref action) = filter.action {
            conditions.push("action = ?");
            params.push(Box::new(action.clone()));
        }

        if let Some(ref from) = filter.from {
            conditions.push("timestamp >= ?");
            params.push(Box::new(from.to_rfc3339()));
        }

        if let Some(ref to) = filter.to {
            conditions.push("timestamp <= ?");
            params.push(Box::new(to.to_rfc3339()));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        (where_clause, params)
    }
}

impl AuditStore for SqliteAuditStore {
    fn query(&self, filter: &AuditFilter) -> Result<Vec<AuditRecord>, AuditError> {
        let conn = self.conn()?;

        let (where_clause, params) = Self::build_where_clause(filter);

        let sql = format!(
            "SELECT id, timestamp, trader_id, action, entity, data FROM audit_log {} ORDER BY timestamp DESC, id DESC LIMIT ? OFFSET ?",
            where_clause
        );

        let mut stmt = conn
            .prepare(&sql)
            .map_err(|e| AuditError::Database(e.to_string()))?;

        let mut all_params: Vec<Box<dyn rusqlite::ToSql>> = params;
        all_params.push(Box::new(filter.limit));
        all_params.push(Box::new(filter.offset));

        let param_refs: Vec<&dyn rusqlite::ToSql> = all_params.iter().map(|p| p.as_ref()).collect();

        let rows = stmt
            .query_map(param_refs.as_slice(), |row| {
                let id: i64 = row.get(0)?;
                let timestamp_str: String = row.get(1)?;
                let trader_id: String = row.get(2)?;
                let action: String = row.get(3)?;
                let entity: String = row.get(4)?;
                let data_json: String = row.get(5)?;

                Ok((id, timestamp_str, trader_id, action, entity, data_json))
            })
            .map_err(|e| AuditError::Database(e.to_string()))?;

        let mut records = Vec::new();
        for row_result in rows {
            let (id, timestamp_str, trader_id, action, entity, data_json) =
                row_result.map_err(|e| AuditError::Database(e.to_string()))?;

            let timestamp: DateTime<Utc> = DateTime::parse_from_rfc3339(&timestamp_str)
                .map_err(|e| AuditError::Database(format!("Invalid timestamp: {}", e)))?
                .into();

            let data: serde_json::Value = serde_json::from_str(&data_json)
                .map_err(|e| AuditError::Serialization(e.to_string()))?;

            records.push(AuditRecord {
                id,
                timestamp,
                trader_id,
                action,
                entity,
                data,
            });
        }

        Ok(records)
    }

    fn count(&self, filter: &AuditFilter) -> Result<i64, AuditError> {
        let conn = self.conn()?;

        let (where_clause, params) = Self::build_where_clause(filter);

        let sql = format!("SELECT COUNT(*) FROM audit_log {}", where_clause);

        let param_refs: Vec<&dyn rusqlite::ToSql> = params.iter().map(|p| p.as_ref()).collect();

        let count: i64 = conn
            .query_row(&sql, param_refs.as_slice(), |row| row.get(0))
            .map_err(|e| AuditError::Database(e.to_string()))?;

        Ok(count)
    }
}
