//! SQLite-backed selection store.

use std::collections::HashSet;
use std::path::Path;
use std::str::FromStr;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row, TransactionBehavior};
use rust_decimal::Decimal;

use super::{
    SaveSummary, SelectionError, SelectionStats, SelectionStore, TraderProductUpdate,
    TraderProductView,
};
use crate::audit::{self, AuditRecord};
use crate::metrics::SELECTION_ROWS;
use crate::provider::{CategoryRef, ProductRecord};

/// Version tag given to categories created by a save.
const NEW_CATEGORY_VERSION: &str = "v1";

const TRADER_PRODUCT_COLUMNS: &str = "p.id, p.source_id, p.title, p.price, p.central_stock, \
     c.source_id, c.name, p.version, tp.visibility, tp.display_order, tp.created_at, p.synced_at";

const TRADER_PRODUCT_JOIN: &str = "FROM trader_products tp \
     JOIN products p ON p.id = tp.product_id \
     JOIN categories c ON c.id = p.category_id";

fn db_err(e: rusqlite::Error) -> SelectionError {
    SelectionError::Persistence(e.to_string())
}

/// SQLite-backed selection store.
pub struct SqliteSelectionStore {
    conn: Mutex<Connection>,
}

impl SqliteSelectionStore {
    /// Open the database file, creating tables if needed.
    pub fn new(path: &Path) -> Result<Self, SelectionError> {
        let conn = Connection::open(path).map_err(db_err)?;
        conn.busy_timeout(Duration::from_secs(5)).map_err(db_err)?;
        Self::initialize_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create an in-memory store (useful for testing).
    pub fn in_memory() -> Result<Self, SelectionError> {
        let conn = Connection::open_in_memory().map_err(db_err)?;
        Self::initialize_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn initialize_schema(conn: &Connection) -> Result<(), SelectionError> {
        conn.execute_batch(
            r#"
            PRAGMA foreign_keys = ON;

            CREATE TABLE IF NOT EXISTS categories (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                source_id INTEGER NOT NULL UNIQUE,
                name TEXT NOT NULL,
                version TEXT NOT NULL,
                synced_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS products (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                source_id INTEGER NOT NULL UNIQUE,
                title TEXT NOT NULL,
                price TEXT NOT NULL,
                central_stock INTEGER NOT NULL,
                category_id INTEGER NOT NULL REFERENCES categories(id),
                version TEXT NOT NULL,
                synced_at TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_products_category_id ON products(category_id);

            -- One row per (trader, product); never overwritten by a save
            CREATE TABLE IF NOT EXISTS trader_products (
                trader_id TEXT NOT NULL,
                product_id INTEGER NOT NULL REFERENCES products(id),
                visibility INTEGER NOT NULL DEFAULT 1,
                display_order INTEGER NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL,
                PRIMARY KEY (trader_id, product_id)
            );
            "#,
        )
        .map_err(db_err)?;

        audit::initialize_audit_schema(conn)
            .map_err(|e| SelectionError::Persistence(e.to_string()))
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>, SelectionError> {
        self.conn
            .lock()
            .map_err(|_| SelectionError::Persistence("connection lock poisoned".to_string()))
    }

    /// Insert the category if its source id is new; return its local id.
    ///
    /// Existing categories keep their name and version.
    fn upsert_category(
        conn: &Connection,
        category: &CategoryRef,
        now: &str,
    ) -> Result<(i64, bool), SelectionError> {
        let inserted = conn
            .execute(
                "INSERT INTO categories (source_id, name, version, synced_at) VALUES (?, ?, ?, ?)
                 ON CONFLICT(source_id) DO NOTHING",
                params![category.source_id, category.name, NEW_CATEGORY_VERSION, now],
            )
            .map_err(db_err)?;

        let id: i64 = conn
            .query_row(
                "SELECT id FROM categories WHERE source_id = ?",
                params![category.source_id],
                |row| row.get(0),
            )
            .map_err(db_err)?;

        Ok((id, inserted == 1))
    }

    /// Insert or overwrite the product; return its local id and whether it
    /// was created.
    fn upsert_product(
        conn: &Connection,
        product: &ProductRecord,
        category_id: i64,
        now: &str,
    ) -> Result<(i64, bool), SelectionError> {
        let price = product.price.to_string();

        let inserted = conn
            .execute(
                "INSERT INTO products (source_id, title, price, central_stock, category_id, version, synced_at)
                 VALUES (?, ?, ?, ?, ?, ?, ?)
                 ON CONFLICT(source_id) DO NOTHING",
                params![
                    product.source_id,
                    product.title,
                    price,
                    product.central_stock,
                    category_id,
                    product.version,
                    now
                ],
            )
            .map_err(db_err)?;

        if inserted == 0 {
            conn.execute(
                "UPDATE products
                 SET title = ?, price = ?, central_stock = ?, category_id = ?, version = ?, synced_at = ?
                 WHERE source_id = ?",
                params![
                    product.title,
                    price,
                    product.central_stock,
                    category_id,
                    product.version,
                    now,
                    product.source_id
                ],
            )
            .map_err(db_err)?;
        }

        let id: i64 = conn
            .query_row(
                "SELECT id FROM products WHERE source_id = ?",
                params![product.source_id],
                |row| row.get(0),
            )
            .map_err(db_err)?;

        Ok((id, inserted == 1))
    }

    /// Link the product to the trader unless already linked.
    fn link_trader_product(
        conn: &Connection,
        trader_id: &str,
        product_id: i64,
        now: &str,
    ) -> Result<bool, SelectionError> {
        let inserted = conn
            .execute(
                "INSERT INTO trader_products (trader_id, product_id, created_at) VALUES (?, ?, ?)
                 ON CONFLICT(trader_id, product_id) DO NOTHING",
                params![trader_id, product_id, now],
            )
            .map_err(db_err)?;
        Ok(inserted == 1)
    }

    fn load_trader_product(
        conn: &Connection,
        trader_id: &str,
        product_id: i64,
    ) -> Result<Option<TraderProductView>, SelectionError> {
        let sql = format!(
            "SELECT {} {} WHERE tp.trader_id = ? AND tp.product_id = ?",
            TRADER_PRODUCT_COLUMNS, TRADER_PRODUCT_JOIN
        );
        conn.query_row(&sql, params![trader_id, product_id], row_to_view)
            .optional()
            .map_err(db_err)
    }

    #[cfg(test)]
    pub(crate) fn audit_row_count(&self) -> Result<i64, SelectionError> {
        let conn = self.conn()?;
        conn.query_row("SELECT COUNT(*) FROM audit_log", [], |row| row.get(0))
            .map_err(db_err)
    }
}

fn parse_timestamp(idx: usize, value: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn row_to_view(row: &Row<'_>) -> rusqlite::Result<TraderProductView> {
    let price_str: String = row.get(3)?;
    let price = Decimal::from_str(&price_str)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(3, Type::Text, Box::new(e)))?;
    let created_at: String = row.get(10)?;
    let synced_at: String = row.get(11)?;

    Ok(TraderProductView {
        product_id: row.get(0)?,
        source_id: row.get(1)?,
        title: row.get(2)?,
        price,
        central_stock: row.get(4)?,
        category: CategoryRef {
            source_id: row.get(5)?,
            name: row.get(6)?,
        },
        version: row.get(7)?,
        visibility: row.get(8)?,
        display_order: row.get(9)?,
        created_at: parse_timestamp(10, &created_at)?,
        synced_at: parse_timestamp(11, &synced_at)?,
    })
}

impl SelectionStore for SqliteSelectionStore {
    fn save_selection(
        &self,
        trader_id: &str,
        selected: &[i64],
        candidates: &[ProductRecord],
    ) -> Result<SaveSummary, SelectionError> {
        let mut conn = self.conn()?;
        let now = Utc::now().to_rfc3339();
        let wanted: HashSet<i64> = selected.iter().copied().collect();

        // Dropping the transaction without commit rolls it back.
        let tx = conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(db_err)?;

        let mut created = 0u64;
        let mut updated = 0u64;
        let mut categories_created = 0u64;
        let mut links_created = 0u64;

        for candidate in candidates.iter().filter(|c| wanted.contains(&c.source_id)) {
            let (category_id, new_category) =
                Self::upsert_category(&tx, &candidate.category, &now)?;
            if new_category {
                categories_created += 1;
            }

            let (product_id, new_product) =
                Self::upsert_product(&tx, candidate, category_id, &now)?;
            if new_product {
                created += 1;
            } else {
                updated += 1;
            }

            if Self::link_trader_product(&tx, trader_id, product_id, &now)? {
                links_created += 1;
            }
        }

        audit::append(
            &tx,
            &AuditRecord::selection_saved(trader_id, selected.len(), created, updated),
        )
        .map_err(|e| SelectionError::Persistence(e.to_string()))?;

        tx.commit().map_err(db_err)?;

        SELECTION_ROWS
            .with_label_values(&["product", "created"])
            .inc_by(created);
        SELECTION_ROWS
            .with_label_values(&["product", "updated"])
            .inc_by(updated);
        SELECTION_ROWS
            .with_label_values(&["category", "created"])
            .inc_by(categories_created);
        SELECTION_ROWS
            .with_label_values(&["trader_product", "created"])
            .inc_by(links_created);

        Ok(SaveSummary {
            saved: created + updated,
            created,
            updated,
        })
    }

    fn list_trader_products(
        &self,
        trader_id: &str,
    ) -> Result<Vec<TraderProductView>, SelectionError> {
        let conn = self.conn()?;

        let sql = format!(
            "SELECT {} {} WHERE tp.trader_id = ? ORDER BY tp.display_order ASC, p.title ASC",
            TRADER_PRODUCT_COLUMNS, TRADER_PRODUCT_JOIN
        );
        let mut stmt = conn.prepare(&sql).map_err(db_err)?;
        let rows = stmt
            .query_map(params![trader_id], row_to_view)
            .map_err(db_err)?;

        let mut products = Vec::new();
        for row in rows {
            products.push(row.map_err(db_err)?);
        }
        Ok(products)
    }

    fn update_trader_product(
        &self,
        trader_id: &str,
        product_id: i64,
        update: &TraderProductUpdate,
    ) -> Result<TraderProductView, SelectionError> {
        let mut conn = self.conn()?;
        let tx = conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(db_err)?;

        let changed = tx
            .execute(
                "UPDATE trader_products
                 SET visibility = COALESCE(?, visibility), display_order = COALESCE(?, display_order)
                 WHERE trader_id = ? AND product_id = ?",
                params![update.visibility, update.display_order, trader_id, product_id],
            )
            .map_err(db_err)?;
        if changed == 0 {
            return Err(SelectionError::NotFound(format!(
                "product {} is not in the trader's list",
                product_id
            )));
        }

        let view = Self::load_trader_product(&tx, trader_id, product_id)?.ok_or_else(|| {
            SelectionError::NotFound(format!("product {} is not in the trader's list", product_id))
        })?;

        audit::append(
            &tx,
            &AuditRecord::trader_product_updated(
                trader_id,
                product_id,
                view.visibility,
                view.display_order,
            ),
        )
        .map_err(|e| SelectionError::Persistence(e.to_string()))?;

        tx.commit().map_err(db_err)?;
        Ok(view)
    }

    fn stats(&self) -> Result<SelectionStats, SelectionError> {
        let conn = self.conn()?;

        let categories: u64 = conn
            .query_row("SELECT COUNT(*) FROM categories", [], |row| row.get(0))
            .map_err(db_err)?;
        let products: u64 = conn
            .query_row("SELECT COUNT(*) FROM products", [], |row| row.get(0))
            .map_err(db_err)?;
        let trader_products: u64 = conn
            .query_row("SELECT COUNT(*) FROM trader_products", [], |row| row.get(0))
            .map_err(db_err)?;

        Ok(SelectionStats {
            categories,
            products,
            trader_products,
        })
    }
}
