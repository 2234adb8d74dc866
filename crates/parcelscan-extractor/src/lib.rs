//! Parcelscan Extractor
//!
//! Converts delivery-related email text into a validated [`RecordDraft`]
//! via the hosted extraction service.
//!
//! # Architecture
//!
//! ```text
//! subject + body → prompt → ChatCompleter (with retry/backoff) → JSON → RecordDraft
//! ```
//!
//! The client owns the retry policy for transport failures; a response that
//! arrives but fails to parse is never retried, since parse failures are
//! deterministic for the same input. Every successful call is followed by a
//! fixed rate-limit delay.
//!
//! # Example
//!
//! ```no_run
//! use parcelscan_extractor::{ExtractionClient, ExtractionConfig};
//! use parcelscan_llm::MockCompleter;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let completer = MockCompleter::new(r#"{"delivery": "yes", "price_num": 24.99}"#);
//! let client = ExtractionClient::new(completer, ExtractionConfig::default());
//!
//! let draft = client.extract("Your order shipped", "Arriving Thursday.").await?;
//! assert!(draft.delivery_confirmed);
//! # Ok(())
//! # }
//! ```
//!
//! [`RecordDraft`]: parcelscan_domain::RecordDraft

#![warn(missing_docs)]

mod client;
mod config;
mod error;
mod parser;
mod prompt;

pub use client::ExtractionClient;
pub use config::ExtractionConfig;
pub use error::ExtractError;
pub use parser::parse_extraction_response;
pub use prompt::build_prompt;
