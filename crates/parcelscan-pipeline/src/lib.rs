//! Parcelscan Pipeline
//!
//! The orchestrator that turns an inbox into delivery records.
//!
//! # Control flow
//!
//! ```text
//! MailProvider → dedup (RecordStore) → Classifier → body decode
//!              → batches → ExtractionClient → validate → persist → RunReport
//! ```
//!
//! Processing is sequential and single-threaded by design: the extraction
//! service is rate limited, and the fixed post-call delay is the
//! backpressure mechanism. Every per-item failure is isolated -
//! recorded in the report and skipped - so one bad message never aborts a
//! batch or the run. Partial progress is durable; the dedup check on the
//! next run prevents reprocessing.
//!
//! Only two situations abort a run: a collaborator that cannot be reached
//! at all (provider listing or store access fails up front), and total
//! extraction-service unavailability across every item.

#![warn(missing_docs)]

mod body;
mod config;
mod error;
mod mock;
mod pipeline;
mod progress;
mod report;

pub use body::decode_message_body;
pub use config::PipelineConfig;
pub use error::PipelineError;
pub use mock::{MockMailError, MockMailProvider};
pub use pipeline::Pipeline;
pub use progress::{NullProgress, ProgressSink};
pub use report::{ItemFailure, RunReport};
