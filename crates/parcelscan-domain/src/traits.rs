//! Trait definitions for external interactions
//!
//! These traits define the boundaries between pipeline logic and
//! infrastructure. Implementations live in other crates.

use crate::message::{MessagePage, RawMessage};
use crate::record::{DeliveryRecord, RecordDraft};
use serde::Serialize;
use std::collections::HashSet;

/// Aggregate statistics over the record store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct StoreStatistics {
    /// Total records persisted
    pub total_records: u64,

    /// Records with `delivery_confirmed = true`
    pub confirmed_deliveries: u64,

    /// Sum of all record prices
    pub total_value: f64,
}

/// Trait for persisting and querying delivery records
///
/// Implemented by the infrastructure layer (parcelscan-store)
pub trait RecordStore {
    /// Error type for store operations
    type Error;

    /// Persist a draft under the given identity. The store assigns the
    /// insert timestamp and returns the finished record.
    fn insert_record(
        &mut self,
        draft: &RecordDraft,
        source_message_id: &str,
        owner_identity: Option<&str>,
    ) -> Result<DeliveryRecord, Self::Error>;

    /// Return the subset of `message_ids` already recorded, optionally
    /// scoped to an owner. This is the pipeline's dedup check.
    fn already_processed(
        &self,
        message_ids: &[String],
        owner_identity: Option<&str>,
    ) -> Result<HashSet<String>, Self::Error>;

    /// List records newest-first, optionally scoped to an owner.
    fn list_records(&self, owner_identity: Option<&str>)
        -> Result<Vec<DeliveryRecord>, Self::Error>;

    /// Delete every record. Returns the number of rows removed.
    fn delete_all(&mut self) -> Result<usize, Self::Error>;

    /// Delete every record belonging to an owner. Returns the number of rows
    /// removed.
    fn delete_by_owner(&mut self, owner_identity: &str) -> Result<usize, Self::Error>;

    /// Delete records inserted more than `days` days ago. Returns the number
    /// of rows removed.
    fn delete_older_than(&mut self, days: u32) -> Result<usize, Self::Error>;

    /// Aggregate statistics, optionally scoped to an owner.
    fn statistics(&self, owner_identity: Option<&str>) -> Result<StoreStatistics, Self::Error>;
}

/// Trait for the hosted extraction service
///
/// Implemented by the infrastructure layer (parcelscan-llm). A completer
/// performs exactly one attempt; retry policy belongs to the caller.
pub trait ChatCompleter {
    /// Error type for completion operations
    type Error;

    /// Send a prompt and return the model's text content.
    fn complete(&self, prompt: &str) -> Result<String, Self::Error>;
}

/// Trait for mail access
///
/// The pipeline depends only on this shape, not on any specific provider
/// wire protocol.
pub trait MailProvider {
    /// Error type for provider operations
    type Error;

    /// List message ids, newest-first, with an optional continuation token.
    fn list_messages(
        &self,
        max_results: usize,
        page_token: Option<&str>,
    ) -> Result<MessagePage, Self::Error>;

    /// Fetch a single message by id.
    fn get_message(&self, id: &str) -> Result<RawMessage, Self::Error>;
}
