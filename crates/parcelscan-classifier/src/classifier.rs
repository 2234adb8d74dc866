//! Relevance classification logic

use crate::rules::ClassifierRules;

/// Classifies messages as delivery-related from subject and snippet.
///
/// Pure and deterministic: no I/O, case-insensitive substring matching over
/// a fixed vocabulary.
#[derive(Debug, Clone)]
pub struct Classifier {
    rules: ClassifierRules,
}

impl Classifier {
    /// Create a classifier over the given rule vocabulary.
    pub fn new(rules: ClassifierRules) -> Self {
        Self { rules }
    }

    /// Create a classifier with the built-in default vocabulary.
    pub fn with_default_rules() -> Self {
        Self::new(ClassifierRules::default())
    }

    /// Access the rule vocabulary.
    pub fn rules(&self) -> &ClassifierRules {
        &self.rules
    }

    /// Decide whether a message is delivery-related.
    ///
    /// Gate order is fixed: exclusions veto everything, then couriers,
    /// co-occurrence pairs, and phrases each decide positively. Empty
    /// subject and snippet fall through to `false`.
    pub fn is_delivery_related(&self, subject: &str, snippet: &str) -> bool {
        let text = format!("{} {}", subject, snippet).to_lowercase();

        // Exclusion gate takes strict precedence: known false-positive
        // contexts win even when shipping words co-occur.
        if self.rules.exclusions.iter().any(|w| text.contains(w.as_str())) {
            return false;
        }

        if self.rules.couriers.iter().any(|w| text.contains(w.as_str())) {
            return true;
        }

        if self.rules.cooccurrence.iter().any(|rule| {
            text.contains(rule.anchor.as_str())
                && rule.related.iter().any(|w| text.contains(w.as_str()))
        }) {
            return true;
        }

        if self.rules.phrases.iter().any(|p| text.contains(p.as_str())) {
            return true;
        }

        false
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::with_default_rules()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::AnchorRule;

    #[test]
    fn test_courier_name_is_decisive() {
        let c = Classifier::with_default_rules();
        assert!(c.is_delivery_related("Your FedEx shipment", ""));
        assert!(c.is_delivery_related("", "handed to USPS this morning"));
        assert!(c.is_delivery_related("DHL Express", "on its way"));
    }

    #[test]
    fn test_exclusion_beats_courier_and_phrase() {
        let c = Classifier::with_default_rules();
        assert!(!c.is_delivery_related(
            "Training delivery confirmation",
            "your package has been delivered"
        ));
        assert!(!c.is_delivery_related("FedEx workshop invitation", "tracking number inside"));
        assert!(!c.is_delivery_related("Course certificate", "shipped to your inbox"));
    }

    #[test]
    fn test_cooccurrence_requires_both_words() {
        let c = Classifier::with_default_rules();
        assert!(c.is_delivery_related("order", "shipped today"));
        assert!(c.is_delivery_related("Your order is arriving", ""));
        assert!(!c.is_delivery_related("order update", "nothing relevant here"));
    }

    #[test]
    fn test_phrase_match() {
        let c = Classifier::with_default_rules();
        assert!(c.is_delivery_related("Out for delivery", ""));
        assert!(c.is_delivery_related("", "your item has been delivered"));
        assert!(c.is_delivery_related("Shipping confirmation", ""));
    }

    #[test]
    fn test_case_insensitive() {
        let c = Classifier::with_default_rules();
        assert!(c.is_delivery_related("YOUR FEDEX SHIPMENT", ""));
        assert!(c.is_delivery_related("OrDeR", "ShIpPeD"));
    }

    #[test]
    fn test_empty_inputs_fall_through_to_false() {
        let c = Classifier::with_default_rules();
        assert!(!c.is_delivery_related("", ""));
        assert!(!c.is_delivery_related("Lunch on Friday?", "see you then"));
    }

    #[test]
    fn test_custom_rules() {
        let rules = ClassifierRules {
            exclusions: vec!["newsletter".to_string()],
            couriers: vec!["pigeon post".to_string()],
            cooccurrence: vec![AnchorRule {
                anchor: "crate".to_string(),
                related: vec!["shipped".to_string()],
            }],
            phrases: vec![],
        };
        let c = Classifier::new(rules);

        assert!(c.is_delivery_related("Pigeon Post update", ""));
        assert!(c.is_delivery_related("crate shipped", ""));
        assert!(!c.is_delivery_related("crate newsletter shipped", ""));
        // Default vocabulary is not consulted
        assert!(!c.is_delivery_related("Your FedEx shipment", ""));
    }
}
