//! Parse extraction-service output into a validated draft

use crate::error::ExtractError;
use parcelscan_domain::record::{normalize_price, parse_delivery_date};
use parcelscan_domain::RecordDraft;
use serde_json::Value;
use tracing::warn;

/// Parse the model's response content into a [`RecordDraft`].
///
/// Markdown code fences are stripped first, since models sometimes wrap the
/// JSON despite instructions. Field coercion is defensive throughout: a
/// missing or malformed field degrades to its default rather than failing
/// the item. Only unparseable JSON (or a non-object) is an error.
pub fn parse_extraction_response(response: &str) -> Result<RecordDraft, ExtractError> {
    let json_str = strip_code_fence(response);

    let value: Value = serde_json::from_str(json_str.trim())
        .map_err(|e| ExtractError::InvalidJson(format!("JSON parse error: {}", e)))?;

    let obj = value
        .as_object()
        .ok_or_else(|| ExtractError::InvalidJson("expected a JSON object".to_string()))?;

    let delivery_confirmed = obj
        .get("delivery")
        .and_then(|v| v.as_str())
        .map(|s| s.trim().eq_ignore_ascii_case("yes"))
        .unwrap_or(false);

    let price = normalize_price(extract_number(obj.get("price_num")));

    let delivery_date = obj
        .get("delivery_date")
        .and_then(|v| v.as_str())
        .and_then(parse_delivery_date);

    if obj.contains_key("delivery_date") && delivery_date.is_none() {
        warn!("unparseable delivery_date in extraction output, dropping");
    }

    Ok(RecordDraft {
        delivery_confirmed,
        price,
        description: string_field(obj, "description"),
        store: string_field(obj, "store"),
        carrier: string_field(obj, "carrier"),
        tracking_number: string_field(obj, "tracking_number"),
        order_id: string_field(obj, "order_id"),
        delivery_date,
    })
}

/// Strip a Markdown code fence if the model wrapped its JSON in one.
fn strip_code_fence(response: &str) -> String {
    let trimmed = response.trim();

    if trimmed.starts_with("```") {
        let lines: Vec<&str> = trimmed.lines().collect();
        if lines.len() < 2 {
            return String::new();
        }
        // Drop the opening ```json (or ```) line and the closing ``` line
        let end = if lines[lines.len() - 1].trim() == "```" {
            lines.len() - 1
        } else {
            lines.len()
        };
        lines[1..end].join("\n")
    } else {
        trimmed.to_string()
    }
}

fn string_field(obj: &serde_json::Map<String, Value>, key: &str) -> String {
    obj.get(key)
        .and_then(|v| v.as_str())
        .unwrap_or("")
        .trim()
        .to_string()
}

/// Accept numbers or numeric strings; anything else is absent.
fn extract_number(value: Option<&Value>) -> Option<f64> {
    match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().trim_start_matches('$').parse::<f64>().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_parse_full_response() {
        let response = r#"{
            "delivery": "yes",
            "price_num": 24.99,
            "description": "Wireless mouse",
            "order_id": "112-889",
            "delivery_date": "2025-04-02",
            "store": "Acme",
            "tracking_number": "1Z999",
            "carrier": "UPS"
        }"#;

        let draft = parse_extraction_response(response).unwrap();
        assert!(draft.delivery_confirmed);
        assert_eq!(draft.price, 24.99);
        assert_eq!(draft.description, "Wireless mouse");
        assert_eq!(draft.order_id, "112-889");
        assert_eq!(
            draft.delivery_date,
            Some(NaiveDate::from_ymd_opt(2025, 4, 2).unwrap())
        );
        assert_eq!(draft.store, "Acme");
        assert_eq!(draft.tracking_number, "1Z999");
        assert_eq!(draft.carrier, "UPS");
    }

    #[test]
    fn test_fenced_json_parses_identically() {
        let bare = r#"{"delivery": "yes", "price_num": 10.0}"#;
        let fenced = format!("```json\n{}\n```", bare);

        assert_eq!(
            parse_extraction_response(bare).unwrap(),
            parse_extraction_response(&fenced).unwrap()
        );
    }

    #[test]
    fn test_fence_without_language_tag() {
        let fenced = "```\n{\"delivery\": \"no\"}\n```";
        let draft = parse_extraction_response(fenced).unwrap();
        assert!(!draft.delivery_confirmed);
    }

    #[test]
    fn test_missing_fields_default() {
        let draft = parse_extraction_response("{}").unwrap();
        assert!(!draft.delivery_confirmed);
        assert_eq!(draft.price, 0.0);
        assert_eq!(draft.description, "");
        assert_eq!(draft.store, "");
        assert!(draft.delivery_date.is_none());
    }

    #[test]
    fn test_price_coercion() {
        let cases = [
            (r#"{"price_num": "N/A"}"#, 0.0),
            (r#"{"price_num": "19.99"}"#, 19.99),
            (r#"{"price_num": "$7.50"}"#, 7.5),
            (r#"{"price_num": -3.0}"#, 0.0),
            (r#"{"price_num": null}"#, 0.0),
            (r#"{}"#, 0.0),
        ];

        for (input, expected) in cases {
            let draft = parse_extraction_response(input).unwrap();
            assert_eq!(draft.price, expected, "input: {}", input);
        }
    }

    #[test]
    fn test_ambiguous_delivery_flag_defaults_to_false() {
        for input in [
            r#"{"delivery": "maybe"}"#,
            r#"{"delivery": 1}"#,
            r#"{"delivery": null}"#,
            r#"{}"#,
        ] {
            let draft = parse_extraction_response(input).unwrap();
            assert!(!draft.delivery_confirmed, "input: {}", input);
        }

        let draft = parse_extraction_response(r#"{"delivery": "Yes"}"#).unwrap();
        assert!(draft.delivery_confirmed);
    }

    #[test]
    fn test_bad_date_degrades_to_none() {
        let draft =
            parse_extraction_response(r#"{"delivery_date": "next Tuesday"}"#).unwrap();
        assert!(draft.delivery_date.is_none());
    }

    #[test]
    fn test_invalid_json_is_error() {
        let result = parse_extraction_response("I could not find any delivery details.");
        assert!(matches!(result, Err(ExtractError::InvalidJson(_))));
    }

    #[test]
    fn test_json_array_is_error() {
        let result = parse_extraction_response(r#"[{"delivery": "yes"}]"#);
        assert!(matches!(result, Err(ExtractError::InvalidJson(_))));
    }

    #[test]
    fn test_empty_fence_is_error() {
        let result = parse_extraction_response("```");
        assert!(matches!(result, Err(ExtractError::InvalidJson(_))));
    }
}
