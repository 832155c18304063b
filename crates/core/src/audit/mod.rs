//! Append-only audit log.
//!
//! Each row records one change made on behalf of a trader. Rows are appended
//! with [`append`] on the same connection and transaction as the change, and
//! read back through [`SqliteAuditStore`].

mod events;
mod sqlite;
mod store;

pub use events::*;
pub use sqlite::*;
pub use store::*;
