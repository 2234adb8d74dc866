//! Parcelscan Classifier
//!
//! Decides whether a message is delivery-related from its subject and
//! snippet alone, before any extraction call is spent on it.
//!
//! The classifier is a pure function over a versioned rule vocabulary
//! ([`ClassifierRules`]): exclusion words, courier names, anchor/related
//! co-occurrence pairs, and fixed phrases. Gates apply in that order and the
//! order is load-bearing - the exclusion gate trades recall for precision
//! and must run first.
//!
//! # Examples
//!
//! ```
//! use parcelscan_classifier::Classifier;
//!
//! let classifier = Classifier::with_default_rules();
//! assert!(classifier.is_delivery_related("Your FedEx shipment", ""));
//! assert!(!classifier.is_delivery_related("Training delivery confirmation", ""));
//! ```

#![warn(missing_docs)]

mod classifier;
mod error;
mod rules;

pub use classifier::Classifier;
pub use error::RulesError;
pub use rules::{AnchorRule, ClassifierRules};
