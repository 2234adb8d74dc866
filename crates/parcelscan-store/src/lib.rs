//! Parcelscan Storage Layer
//!
//! Implements the `RecordStore` trait over SQLite.
//!
//! One logical table, `delivery_details`, holds the pipeline's work product.
//! The (source_message_id, owner_identity) pair carries a unique index - the
//! dedup key that makes reruns idempotent. Records are insert-only; the only
//! deletes are the bulk administrative operations.
//!
//! # Examples
//!
//! ```
//! use parcelscan_store::SqliteStore;
//! use parcelscan_domain::RecordStore;
//!
//! let store = SqliteStore::new(":memory:").unwrap();
//! assert_eq!(store.statistics(None).unwrap().total_records, 0);
//! ```
//!
//! # Thread Safety
//!
//! SQLite connections are not thread-safe. Each thread should have its own
//! `SqliteStore` instance.

#![warn(missing_docs)]

use chrono::Utc;
use parcelscan_domain::record::parse_delivery_date;
use parcelscan_domain::{DeliveryRecord, RecordDraft, RecordStore, StoreStatistics};
use rusqlite::{params, params_from_iter, Connection};
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database error
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A record for this (message, owner) pair already exists
    #[error("duplicate record for message '{0}'")]
    Duplicate(String),

    /// Invalid data format
    #[error("invalid data: {0}")]
    InvalidData(String),
}

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS delivery_details (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    delivery_confirmed INTEGER NOT NULL DEFAULT 0,
    price REAL NOT NULL DEFAULT 0.0,
    description TEXT NOT NULL DEFAULT '',
    store TEXT NOT NULL DEFAULT '',
    carrier TEXT NOT NULL DEFAULT '',
    tracking_number TEXT NOT NULL DEFAULT '',
    order_id TEXT NOT NULL DEFAULT '',
    delivery_date TEXT,
    source_message_id TEXT NOT NULL,
    owner_identity TEXT,
    created_at INTEGER NOT NULL
);

CREATE UNIQUE INDEX IF NOT EXISTS idx_delivery_dedup
    ON delivery_details (source_message_id, IFNULL(owner_identity, ''));

CREATE INDEX IF NOT EXISTS idx_delivery_created_at
    ON delivery_details (created_at);
"#;

const SELECT_COLUMNS: &str = "delivery_confirmed, price, description, store, carrier, \
     tracking_number, order_id, delivery_date, source_message_id, owner_identity, created_at";

/// SQLite-based implementation of `RecordStore`.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (or create) a store at the given path.
    ///
    /// Use `:memory:` for an in-memory database (useful for testing).
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }

    fn row_to_record(row: &rusqlite::Row<'_>) -> rusqlite::Result<DeliveryRecord> {
        let delivery_date: Option<String> = row.get(7)?;
        Ok(DeliveryRecord {
            delivery_confirmed: row.get::<_, i64>(0)? != 0,
            price: row.get(1)?,
            description: row.get(2)?,
            store: row.get(3)?,
            carrier: row.get(4)?,
            tracking_number: row.get(5)?,
            order_id: row.get(6)?,
            delivery_date: delivery_date.as_deref().and_then(parse_delivery_date),
            source_message_id: row.get(8)?,
            owner_identity: row.get(9)?,
            created_at: row.get(10)?,
        })
    }

    fn is_unique_violation(err: &rusqlite::Error) -> bool {
        matches!(
            err,
            rusqlite::Error::SqliteFailure(e, _)
                if e.code == rusqlite::ErrorCode::ConstraintViolation
        )
    }
}

impl RecordStore for SqliteStore {
    type Error = StoreError;

    fn insert_record(
        &mut self,
        draft: &RecordDraft,
        source_message_id: &str,
        owner_identity: Option<&str>,
    ) -> Result<DeliveryRecord, Self::Error> {
        let created_at = Utc::now().timestamp();
        let delivery_date = draft.delivery_date.map(|d| d.format("%Y-%m-%d").to_string());

        let result = self.conn.execute(
            "INSERT INTO delivery_details
             (delivery_confirmed, price, description, store, carrier, tracking_number,
              order_id, delivery_date, source_message_id, owner_identity, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            params![
                draft.delivery_confirmed as i64,
                draft.price,
                draft.description,
                draft.store,
                draft.carrier,
                draft.tracking_number,
                draft.order_id,
                delivery_date,
                source_message_id,
                owner_identity,
                created_at,
            ],
        );

        match result {
            Ok(_) => Ok(draft.clone().into_record(
                source_message_id,
                owner_identity.map(|s| s.to_string()),
                created_at,
            )),
            Err(e) if Self::is_unique_violation(&e) => {
                Err(StoreError::Duplicate(source_message_id.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    fn already_processed(
        &self,
        message_ids: &[String],
        owner_identity: Option<&str>,
    ) -> Result<HashSet<String>, Self::Error> {
        if message_ids.is_empty() {
            return Ok(HashSet::new());
        }

        let placeholders = vec!["?"; message_ids.len()].join(", ");
        let mut sql = format!(
            "SELECT source_message_id FROM delivery_details
             WHERE source_message_id IN ({})",
            placeholders
        );

        // Unscoped rows predate multi-tenancy and count for every owner
        let mut bind: Vec<String> = message_ids.to_vec();
        if let Some(owner) = owner_identity {
            sql.push_str(" AND (owner_identity = ? OR owner_identity IS NULL)");
            bind.push(owner.to_string());
        }

        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params_from_iter(bind.iter()), |row| row.get::<_, String>(0))?;

        let mut seen = HashSet::new();
        for row in rows {
            seen.insert(row?);
        }
        Ok(seen)
    }

    fn list_records(
        &self,
        owner_identity: Option<&str>,
    ) -> Result<Vec<DeliveryRecord>, Self::Error> {
        let (sql, bind) = match owner_identity {
            Some(owner) => (
                format!(
                    "SELECT {} FROM delivery_details
                     WHERE owner_identity = ? OR owner_identity IS NULL
                     ORDER BY created_at DESC, id DESC",
                    SELECT_COLUMNS
                ),
                vec![owner.to_string()],
            ),
            None => (
                format!(
                    "SELECT {} FROM delivery_details ORDER BY created_at DESC, id DESC",
                    SELECT_COLUMNS
                ),
                Vec::new(),
            ),
        };

        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params_from_iter(bind.iter()), Self::row_to_record)?;

        let mut records = Vec::new();
        for row in rows {
            records.push(row?);
        }
        Ok(records)
    }

    fn delete_all(&mut self) -> Result<usize, Self::Error> {
        Ok(self.conn.execute("DELETE FROM delivery_details", [])?)
    }

    fn delete_by_owner(&mut self, owner_identity: &str) -> Result<usize, Self::Error> {
        Ok(self.conn.execute(
            "DELETE FROM delivery_details WHERE owner_identity = ?1",
            params![owner_identity],
        )?)
    }

    fn delete_older_than(&mut self, days: u32) -> Result<usize, Self::Error> {
        let cutoff = Utc::now().timestamp() - i64::from(days) * 86_400;
        Ok(self.conn.execute(
            "DELETE FROM delivery_details WHERE created_at < ?1",
            params![cutoff],
        )?)
    }

    fn statistics(&self, owner_identity: Option<&str>) -> Result<StoreStatistics, Self::Error> {
        let (sql, bind) = match owner_identity {
            Some(owner) => (
                "SELECT COUNT(*),
                        SUM(CASE WHEN delivery_confirmed != 0 THEN 1 ELSE 0 END),
                        IFNULL(SUM(price), 0.0)
                 FROM delivery_details
                 WHERE owner_identity = ? OR owner_identity IS NULL"
                    .to_string(),
                vec![owner.to_string()],
            ),
            None => (
                "SELECT COUNT(*),
                        SUM(CASE WHEN delivery_confirmed != 0 THEN 1 ELSE 0 END),
                        IFNULL(SUM(price), 0.0)
                 FROM delivery_details"
                    .to_string(),
                Vec::new(),
            ),
        };

        let (total, confirmed, value): (i64, Option<i64>, f64) = self.conn.query_row(
            &sql,
            params_from_iter(bind.iter()),
            |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
        )?;

        Ok(StoreStatistics {
            total_records: total.max(0) as u64,
            confirmed_deliveries: confirmed.unwrap_or(0).max(0) as u64,
            total_value: value,
        })
    }
}
