//! Delivery records - the persisted unit of work product

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A validated delivery record as persisted in the store.
///
/// Records are immutable once inserted; deletion is a bulk administrative
/// operation only. The pair (`source_message_id`, `owner_identity`) is the
/// natural key preventing reprocessing of the same message for the same
/// owner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryRecord {
    /// True only if the extraction explicitly confirmed the delivery
    pub delivery_confirmed: bool,

    /// Extracted price; never negative, 0.00 when absent
    pub price: f64,

    /// Short description of the product, empty when absent
    pub description: String,

    /// Store or sender name, empty when absent
    pub store: String,

    /// Carrier name (FedEx, UPS, ...), empty when absent
    pub carrier: String,

    /// Tracking number, empty when absent
    pub tracking_number: String,

    /// Order identifier, empty when absent
    pub order_id: String,

    /// Delivery date; unparseable source strings degrade to `None`
    pub delivery_date: Option<NaiveDate>,

    /// Identifier of the originating provider message (dedup key)
    pub source_message_id: String,

    /// Authenticated account the record belongs to, for multi-tenant scoping
    pub owner_identity: Option<String>,

    /// Unix timestamp assigned by the store at insert time
    pub created_at: i64,
}

/// Extraction output after defaulting and coercion, before identity is
/// attached.
///
/// A draft carries the eight extracted fields of a [`DeliveryRecord`]. The
/// parser at the extraction boundary constructs drafts so that downstream
/// code never handles untyped JSON maps; the store attaches identity and the
/// insert timestamp when the draft is persisted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordDraft {
    /// Whether the extraction confirmed the delivery
    pub delivery_confirmed: bool,

    /// Extracted price, already clamped non-negative
    pub price: f64,

    /// Product description
    pub description: String,

    /// Store or sender name
    pub store: String,

    /// Carrier name
    pub carrier: String,

    /// Tracking number
    pub tracking_number: String,

    /// Order identifier
    pub order_id: String,

    /// Delivery date, if one parsed cleanly
    pub delivery_date: Option<NaiveDate>,
}

impl RecordDraft {
    /// Attach identity and an insert timestamp, producing the final record.
    pub fn into_record(
        self,
        source_message_id: impl Into<String>,
        owner_identity: Option<String>,
        created_at: i64,
    ) -> DeliveryRecord {
        DeliveryRecord {
            delivery_confirmed: self.delivery_confirmed,
            price: self.price,
            description: self.description,
            store: self.store,
            carrier: self.carrier,
            tracking_number: self.tracking_number,
            order_id: self.order_id,
            delivery_date: self.delivery_date,
            source_message_id: source_message_id.into(),
            owner_identity,
            created_at,
        }
    }
}

/// Parse a `YYYY-MM-DD` delivery date, degrading to `None` on any malformed
/// input rather than raising.
pub fn parse_delivery_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}

/// Coerce an extracted price to the record invariant: absent or unparseable
/// values become 0.00, and the result is never negative.
pub fn normalize_price(raw: Option<f64>) -> f64 {
    match raw {
        Some(value) if value.is_finite() => value.max(0.0),
        _ => 0.0,
    }
}
