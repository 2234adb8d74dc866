//! The classifier rule vocabulary
//!
//! One consolidated, versioned configuration structure replaces keyword
//! lists scattered across call sites. All terms are stored lowercase because
//! matching lowercases the input text once and then does plain substring
//! containment.

use crate::error::RulesError;
use serde::{Deserialize, Serialize};

/// A co-occurrence pattern: the anchor word must appear together with at
/// least one related word.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnchorRule {
    /// The anchor word (e.g. "order")
    pub anchor: String,

    /// Words that make the anchor delivery-related (e.g. "shipped")
    pub related: Vec<String>,
}

/// The complete rule vocabulary consumed by the classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierRules {
    /// Known false-positive contexts; any hit short-circuits to "not
    /// delivery-related" even when shipping words co-occur
    #[serde(default)]
    pub exclusions: Vec<String>,

    /// Courier-service names; any hit is decisive
    #[serde(default)]
    pub couriers: Vec<String>,

    /// Anchor + related co-occurrence pairs
    #[serde(default)]
    pub cooccurrence: Vec<AnchorRule>,

    /// Fixed multi-word phrases; any hit is decisive
    #[serde(default)]
    pub phrases: Vec<String>,
}

impl Default for ClassifierRules {
    fn default() -> Self {
        Self {
            exclusions: to_strings(&[
                "certificate",
                "training",
                "course",
                "class",
                "workshop",
                "webinar",
                "seminar",
                "curriculum",
            ]),
            couriers: to_strings(&[
                "fedex",
                "ups",
                "usps",
                "dhl",
                "ontrac",
                "lasership",
                "amazon delivery",
                "priority mail",
                "royal mail",
            ]),
            cooccurrence: vec![
                AnchorRule {
                    anchor: "order".to_string(),
                    related: to_strings(&[
                        "shipped",
                        "delivered",
                        "delivery",
                        "arriving",
                        "tracking",
                        "dispatched",
                    ]),
                },
                AnchorRule {
                    anchor: "package".to_string(),
                    related: to_strings(&[
                        "shipped",
                        "delivered",
                        "arriving",
                        "transit",
                        "tracking",
                    ]),
                },
                AnchorRule {
                    // "shipment" alone is too weak: newsletters mention it
                    anchor: "shipment".to_string(),
                    related: to_strings(&["arriving", "transit", "delivered", "confirmed"]),
                },
            ],
            phrases: to_strings(&[
                "out for delivery",
                "has been delivered",
                "was delivered",
                "delivery notification",
                "shipping confirmation",
                "order confirmation",
                "estimated delivery",
                "tracking number",
                "arriving today",
            ]),
        }
    }
}

fn to_strings(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

impl ClassifierRules {
    /// Load rules from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, RulesError> {
        let rules: Self =
            toml::from_str(toml_str).map_err(|e| RulesError::Parse(e.to_string()))?;
        rules.validate()?;
        Ok(rules)
    }

    /// Serialize rules to a TOML string.
    pub fn to_toml(&self) -> Result<String, RulesError> {
        toml::to_string_pretty(self).map_err(|e| RulesError::Parse(e.to_string()))
    }

    /// Validate the vocabulary: every term must be non-empty and lowercase,
    /// and every anchor must carry at least one related word.
    pub fn validate(&self) -> Result<(), RulesError> {
        let flat = self
            .exclusions
            .iter()
            .chain(self.couriers.iter())
            .chain(self.phrases.iter())
            .chain(self.cooccurrence.iter().map(|r| &r.anchor))
            .chain(self.cooccurrence.iter().flat_map(|r| r.related.iter()));

        for term in flat {
            if term.trim().is_empty() {
                return Err(RulesError::Invalid("empty term in vocabulary".to_string()));
            }
            if term.chars().any(|c| c.is_uppercase()) {
                return Err(RulesError::Invalid(format!(
                    "term '{}' must be lowercase",
                    term
                )));
            }
        }

        for rule in &self.cooccurrence {
            if rule.related.is_empty() {
                return Err(RulesError::Invalid(format!(
                    "anchor '{}' has no related words",
                    rule.anchor
                )));
            }
        }

        Ok(())
    }
}
