//! Integration tests for the pipeline orchestrator
//!
//! These exercise the full flow against an in-memory SQLite store, the mock
//! mail provider, and a scripted completer.

use base64::engine::general_purpose::URL_SAFE;
use base64::Engine;
use parcelscan_classifier::Classifier;
use parcelscan_domain::{BodyPayload, RawMessage, RecordStore};
use parcelscan_extractor::{ExtractionClient, ExtractionConfig};
use parcelscan_llm::MockCompleter;
use parcelscan_pipeline::{MockMailProvider, NullProgress, Pipeline, PipelineConfig, PipelineError};
use parcelscan_store::SqliteStore;

const GOOD_JSON: &str = r#"{
    "delivery": "yes",
    "price_num": 24.99,
    "description": "Wireless mouse",
    "order_id": "112-889",
    "delivery_date": "2025-04-02",
    "store": "Acme",
    "tracking_number": "1Z999",
    "carrier": "UPS"
}"#;

fn message(id: &str, subject: &str, snippet: &str, body_text: &str) -> RawMessage {
    RawMessage {
        id: id.to_string(),
        subject: subject.to_string(),
        sender: "shop@example.com".to_string(),
        snippet: snippet.to_string(),
        internal_timestamp: 1_700_000_000,
        body: BodyPayload {
            data: Some(URL_SAFE.encode(body_text.as_bytes())),
            parts: vec![],
        },
    }
}

fn inbox() -> Vec<RawMessage> {
    vec![
        message(
            "m1",
            "Your FedEx shipment",
            "is on its way",
            "Tracking 1Z999, arriving Thursday.",
        ),
        message(
            "m2",
            "Your order shipped",
            "",
            "Order 112-889 shipped via UPS.",
        ),
        message("m3", "Lunch tomorrow?", "see you at noon", "Usual place."),
    ]
}

fn fast_extraction(completer: MockCompleter) -> ExtractionClient<MockCompleter> {
    ExtractionClient::new(
        completer,
        ExtractionConfig {
            retry_limit: 2,
            retry_base_delay_s: 0.001,
            post_call_delay_s: 0.0,
            ..ExtractionConfig::default()
        },
    )
}

fn pipeline(
    messages: Vec<RawMessage>,
    completer: MockCompleter,
) -> Pipeline<MockMailProvider, MockCompleter, SqliteStore> {
    Pipeline::new(
        MockMailProvider::new(messages),
        fast_extraction(completer),
        SqliteStore::new(":memory:").unwrap(),
        Classifier::with_default_rules(),
        PipelineConfig::default(),
    )
}

#[tokio::test]
async fn test_run_persists_delivery_related_messages() {
    let pipeline = pipeline(inbox(), MockCompleter::new(GOOD_JSON));

    let report = pipeline.run(Some("alice"), &NullProgress).await.unwrap();

    assert_eq!(report.scanned, 3);
    assert_eq!(report.matched, 2);
    assert_eq!(report.records.len(), 2);
    assert!(report.failures.is_empty());

    let record = &report.records[0];
    assert!(record.delivery_confirmed);
    assert_eq!(record.price, 24.99);
    assert_eq!(record.carrier, "UPS");
    assert_eq!(record.owner_identity.as_deref(), Some("alice"));

    let store = pipeline.store_handle();
    let stats = store.lock().unwrap().statistics(Some("alice")).unwrap();
    assert_eq!(stats.total_records, 2);
    assert_eq!(stats.confirmed_deliveries, 2);
}

#[tokio::test]
async fn test_second_run_is_idempotent() {
    let first = pipeline(inbox(), MockCompleter::new(GOOD_JSON));
    let report1 = first.run(Some("alice"), &NullProgress).await.unwrap();
    assert_eq!(report1.records.len(), 2);

    let second = Pipeline::with_shared_store(
        MockMailProvider::new(inbox()),
        fast_extraction(MockCompleter::new(GOOD_JSON)),
        first.store_handle(),
        Classifier::with_default_rules(),
        PipelineConfig::default(),
    );

    let report2 = second.run(Some("alice"), &NullProgress).await.unwrap();
    assert_eq!(report2.records.len(), 0);
    assert_eq!(report2.skipped_processed, 2);

    let store = second.store_handle();
    let stats = store.lock().unwrap().statistics(Some("alice")).unwrap();
    assert_eq!(stats.total_records, 2);
}

#[tokio::test]
async fn test_batch_continues_past_isolated_failure() {
    let messages: Vec<RawMessage> = (0..5)
        .map(|i| {
            message(
                &format!("m{}", i),
                "Your order shipped",
                "",
                "Order shipped via UPS.",
            )
        })
        .collect();

    let completer = MockCompleter::new(GOOD_JSON);
    // Third item answers with prose instead of JSON
    completer.push_ok(GOOD_JSON);
    completer.push_ok(GOOD_JSON);
    completer.push_ok("Sorry, I could not find delivery details.");

    let pipeline = pipeline(messages, completer);
    let report = pipeline.run(None, &NullProgress).await.unwrap();

    assert_eq!(report.matched, 5);
    assert_eq!(report.records.len(), 4);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].reason, "invalid_json");
    assert_eq!(report.failures[0].message_id, "m2");
}

#[tokio::test]
async fn test_total_service_unavailability_is_fatal() {
    let pipeline = pipeline(inbox(), MockCompleter::unavailable("connection refused"));

    let err = pipeline.run(None, &NullProgress).await.unwrap_err();
    assert!(matches!(err, PipelineError::ServiceUnavailable(2)));

    // No partial state was written
    let store = pipeline.store_handle();
    let stats = store.lock().unwrap().statistics(None).unwrap();
    assert_eq!(stats.total_records, 0);
}

#[tokio::test]
async fn test_mixed_failures_are_not_fatal() {
    let completer = MockCompleter::new(GOOD_JSON);
    // First delivery item exhausts its retry budget, second succeeds
    completer.push_err("connection reset");
    completer.push_err("connection reset");

    let pipeline = pipeline(inbox(), completer);
    let report = pipeline.run(None, &NullProgress).await.unwrap();

    assert_eq!(report.records.len(), 1);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].reason, "service_unavailable");
}

#[tokio::test]
async fn test_unreachable_provider_is_fatal() {
    let pipeline = Pipeline::new(
        MockMailProvider::failing(),
        fast_extraction(MockCompleter::new(GOOD_JSON)),
        SqliteStore::new(":memory:").unwrap(),
        Classifier::with_default_rules(),
        PipelineConfig::default(),
    );

    let err = pipeline.run(None, &NullProgress).await.unwrap_err();
    assert!(matches!(err, PipelineError::Provider(_)));
}

#[tokio::test]
async fn test_empty_inbox_produces_empty_report() {
    let pipeline = pipeline(vec![], MockCompleter::new(GOOD_JSON));
    let report = pipeline.run(None, &NullProgress).await.unwrap();

    assert_eq!(report.scanned, 0);
    assert_eq!(report.records.len(), 0);
    assert!(report.failures.is_empty());
}

#[tokio::test]
async fn test_max_results_bounds_the_scan() {
    let messages: Vec<RawMessage> = (0..30)
        .map(|i| message(&format!("m{}", i), "Lunch?", "", "hi"))
        .collect();

    let pipeline = Pipeline::new(
        MockMailProvider::new(messages).with_page_size(7),
        fast_extraction(MockCompleter::new(GOOD_JSON)),
        SqliteStore::new(":memory:").unwrap(),
        Classifier::with_default_rules(),
        PipelineConfig {
            max_results: 10,
            ..PipelineConfig::default()
        },
    );

    let report = pipeline.run(None, &NullProgress).await.unwrap();
    assert_eq!(report.scanned, 10);
}

#[tokio::test]
async fn test_undecodable_body_still_extracts_from_subject() {
    let mut msg = message("m1", "Your FedEx shipment", "", "");
    msg.body.data = Some("!!! not base64 !!!".to_string());

    let pipeline = pipeline(vec![msg], MockCompleter::new(GOOD_JSON));
    let report = pipeline.run(None, &NullProgress).await.unwrap();

    assert_eq!(report.records.len(), 1);
}
