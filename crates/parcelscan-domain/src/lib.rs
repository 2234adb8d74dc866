//! Parcelscan Domain Layer
//!
//! Core types and trait seams for the delivery-email extraction pipeline.
//! This crate defines the fundamental concepts that all other layers depend
//! upon:
//!
//! - **CandidateMessage**: a provider message under consideration, before
//!   relevance filtering
//! - **DeliveryRecord**: the persisted work product, validated and normalized
//! - **RecordDraft**: the defaulting/coercion boundary between raw extraction
//!   output and a record
//! - Trait seams for the external collaborators: mail provider, extraction
//!   service, and relational store
//!
//! ## Architecture
//!
//! Infrastructure implementations live in other crates:
//! - `parcelscan-store` implements [`traits::RecordStore`]
//! - `parcelscan-llm` implements [`traits::ChatCompleter`]
//! - mail providers implement [`traits::MailProvider`]

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod message;
pub mod record;
pub mod traits;

// Re-exports for convenience
pub use message::{BodyPayload, CandidateMessage, MessagePage, MessagePart, RawMessage};
pub use record::{DeliveryRecord, RecordDraft};
pub use traits::{ChatCompleter, MailProvider, RecordStore, StoreStatistics};
