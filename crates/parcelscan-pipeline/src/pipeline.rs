//! The pipeline orchestrator

use crate::body::decode_message_body;
use crate::config::PipelineConfig;
use crate::error::PipelineError;
use crate::progress::ProgressSink;
use crate::report::{ItemFailure, RunReport};
use parcelscan_classifier::Classifier;
use parcelscan_domain::{CandidateMessage, ChatCompleter, MailProvider, RecordStore};
use parcelscan_extractor::{ExtractError, ExtractionClient};
use std::sync::{Arc, Mutex};
use tracing::{debug, info, warn};

/// Composes the provider, classifier, extraction client, and record store
/// into one run.
///
/// The caller owns the pipeline and its collaborators; there is no
/// process-wide session state. One run at a time, sequential within the
/// run.
pub struct Pipeline<M, C, S>
where
    M: MailProvider,
    C: ChatCompleter,
    S: RecordStore,
{
    provider: M,
    extraction: ExtractionClient<C>,
    store: Arc<Mutex<S>>,
    classifier: Classifier,
    config: PipelineConfig,
}

impl<M, C, S> Pipeline<M, C, S>
where
    M: MailProvider,
    M::Error: std::fmt::Display,
    C: ChatCompleter + Send + Sync + 'static,
    C::Error: std::fmt::Display,
    S: RecordStore,
    S::Error: std::fmt::Display,
{
    /// Create a pipeline owning its store.
    pub fn new(
        provider: M,
        extraction: ExtractionClient<C>,
        store: S,
        classifier: Classifier,
        config: PipelineConfig,
    ) -> Self {
        Self::with_shared_store(provider, extraction, Arc::new(Mutex::new(store)), classifier, config)
    }

    /// Create a pipeline over a shared store handle.
    pub fn with_shared_store(
        provider: M,
        extraction: ExtractionClient<C>,
        store: Arc<Mutex<S>>,
        classifier: Classifier,
        config: PipelineConfig,
    ) -> Self {
        Self {
            provider,
            extraction,
            store,
            classifier,
            config,
        }
    }

    /// Handle to the underlying store.
    pub fn store_handle(&self) -> Arc<Mutex<S>> {
        Arc::clone(&self.store)
    }

    /// Run the full pipeline: list, dedup, classify, extract, persist.
    pub async fn run(
        &self,
        owner_identity: Option<&str>,
        progress: &dyn ProgressSink,
    ) -> Result<RunReport, PipelineError> {
        progress.update(0, 0, "fetching message listing");
        let ids = self.list_candidate_ids()?;

        if ids.is_empty() {
            info!("no messages in listing");
            return Ok(RunReport::default());
        }

        let already = {
            let store = self
                .store
                .lock()
                .map_err(|_| PipelineError::Store("store lock poisoned".to_string()))?;
            store
                .already_processed(&ids, owner_identity)
                .map_err(|e| PipelineError::Store(e.to_string()))?
        };

        let total = ids.len();
        let mut skipped_processed = 0;
        let mut scan_failures = Vec::new();
        let mut candidates = Vec::new();

        for (idx, id) in ids.iter().enumerate() {
            progress.update(idx + 1, total, "scanning messages");

            if already.contains(id) {
                skipped_processed += 1;
                continue;
            }

            let msg = match self.provider.get_message(id) {
                Ok(msg) => msg,
                Err(e) => {
                    warn!("failed to fetch message {}: {}", id, e);
                    scan_failures.push(ItemFailure {
                        message_id: id.clone(),
                        subject: String::new(),
                        reason: "provider_error".to_string(),
                        detail: e.to_string(),
                    });
                    continue;
                }
            };

            if !self
                .classifier
                .is_delivery_related(&msg.subject, &msg.snippet)
            {
                continue;
            }

            debug!("delivery-related: {}", msg.subject);
            let body = decode_message_body(&msg.body);
            candidates.push(CandidateMessage {
                id: msg.id,
                subject: msg.subject,
                sender: msg.sender,
                snippet: msg.snippet,
                body,
                received_at: msg.internal_timestamp,
            });
        }

        info!(
            "scanned {} messages: {} delivery-related, {} already processed",
            total,
            candidates.len(),
            skipped_processed
        );

        let mut report = self
            .process_candidates(candidates, owner_identity, progress)
            .await?;
        report.scanned = total;
        report.skipped_processed = skipped_processed;
        report.failures.extend(scan_failures);

        info!("{}", report.summary());
        Ok(report)
    }

    /// Process an already-collected candidate set in batches.
    ///
    /// `run` wraps this with listing, dedup, and classification; callers
    /// with their own candidate source can invoke it directly.
    pub async fn process_candidates(
        &self,
        candidates: Vec<CandidateMessage>,
        owner_identity: Option<&str>,
        progress: &dyn ProgressSink,
    ) -> Result<RunReport, PipelineError> {
        let mut report = RunReport {
            matched: candidates.len(),
            ..RunReport::default()
        };

        if candidates.is_empty() {
            return Ok(report);
        }

        let total_batches = candidates.len().div_ceil(self.config.batch_size);
        let mut service_unavailable = 0usize;

        for (batch_idx, batch) in candidates.chunks(self.config.batch_size).enumerate() {
            progress.update(batch_idx + 1, total_batches, "processing batch");

            for candidate in batch {
                match self
                    .extraction
                    .extract(&candidate.subject, &candidate.body)
                    .await
                {
                    Ok(draft) => {
                        let inserted = {
                            let mut store = self.store.lock().map_err(|_| {
                                PipelineError::Store("store lock poisoned".to_string())
                            })?;
                            store.insert_record(&draft, &candidate.id, owner_identity)
                        };

                        match inserted {
                            Ok(record) => report.records.push(record),
                            Err(e) => {
                                warn!("failed to persist '{}': {}", candidate.subject, e);
                                report.failures.push(ItemFailure {
                                    message_id: candidate.id.clone(),
                                    subject: candidate.subject.clone(),
                                    reason: "store_error".to_string(),
                                    detail: e.to_string(),
                                });
                            }
                        }
                    }
                    Err(e) => {
                        if matches!(e, ExtractError::ServiceUnavailable(_)) {
                            service_unavailable += 1;
                        }
                        warn!("extraction failed for '{}': {}", candidate.subject, e);
                        report.failures.push(ItemFailure {
                            message_id: candidate.id.clone(),
                            subject: candidate.subject.clone(),
                            reason: e.reason().to_string(),
                            detail: e.to_string(),
                        });
                    }
                }
            }
        }

        // Isolated failures are tolerated; a service that answered nothing
        // at all is not.
        if report.records.is_empty()
            && service_unavailable == report.matched
            && service_unavailable > 0
        {
            return Err(PipelineError::ServiceUnavailable(service_unavailable));
        }

        Ok(report)
    }

    fn list_candidate_ids(&self) -> Result<Vec<String>, PipelineError> {
        let mut ids: Vec<String> = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let remaining = self.config.max_results.saturating_sub(ids.len());
            if remaining == 0 {
                break;
            }

            let page = self
                .provider
                .list_messages(remaining, page_token.as_deref())
                .map_err(|e| PipelineError::Provider(e.to_string()))?;

            let empty_page = page.ids.is_empty();
            ids.extend(page.ids);

            match page.next_page_token {
                Some(token) if !empty_page => page_token = Some(token),
                _ => break,
            }
        }

        ids.truncate(self.config.max_results);
        Ok(ids)
    }
}
