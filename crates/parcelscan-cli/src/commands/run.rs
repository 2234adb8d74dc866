//! Run command implementation.

use crate::cli::RunArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use crate::progress::StderrProgress;
use crate::provider::JsonExportProvider;
use parcelscan_classifier::{Classifier, ClassifierRules};
use parcelscan_extractor::ExtractionClient;
use parcelscan_llm::ChatEndpoint;
use parcelscan_pipeline::Pipeline;
use parcelscan_store::SqliteStore;
use std::fs;

/// Execute the run command: scan an export, extract, persist, report.
pub async fn execute_run(args: RunArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let endpoint = config.extraction.endpoint.clone();
    let api_key = args
        .api_key
        .clone()
        .unwrap_or_else(|| config.extraction.api_key.clone());

    if endpoint.is_empty() {
        return Err(CliError::Config(
            "extraction.endpoint is not set; edit the config file".to_string(),
        ));
    }
    if api_key.is_empty() {
        return Err(CliError::Config(
            "no API key; set extraction.api_key or PARCELSCAN_API_KEY".to_string(),
        ));
    }

    let tuning = config.tuning.clone();
    tuning.validate().map_err(CliError::Config)?;

    let mut pipeline_config = config.pipeline.clone();
    if let Some(max_results) = args.max_results {
        pipeline_config.max_results = max_results;
    }
    pipeline_config.validate().map_err(CliError::Config)?;

    let provider = JsonExportProvider::from_file(&args.input)?;
    let classifier = load_classifier(config)?;
    let store = SqliteStore::new(config.database_path()?)?;

    let completer = ChatEndpoint::new(endpoint, api_key)
        .map_err(|e| CliError::Config(e.to_string()))?
        .with_max_tokens(tuning.max_tokens)
        .with_temperature(tuning.temperature);
    let extraction = ExtractionClient::new(completer, tuning);

    let pipeline = Pipeline::new(provider, extraction, store, classifier, pipeline_config);

    let progress = StderrProgress::new();
    let result = pipeline.run(args.owner.as_deref(), &progress).await;
    // Clear the in-place progress line before results or an error print
    progress.finish();
    let report = result?;

    if !report.records.is_empty() {
        println!("{}", formatter.format_records(&report.records)?);
    }

    for failure in &report.failures {
        println!(
            "{}",
            formatter.warning(&format!(
                "{} ({}): {}",
                failure.message_id, failure.reason, failure.detail
            ))
        );
    }

    println!("{}", formatter.success(&report.summary()));
    Ok(())
}

/// Build the classifier from the configured vocabulary, or built-in rules.
fn load_classifier(config: &Config) -> Result<Classifier> {
    match &config.classifier.rules_path {
        Some(path) => {
            let contents = fs::read_to_string(path)?;
            let rules = ClassifierRules::from_toml(&contents)?;
            Ok(Classifier::new(rules))
        }
        None => Ok(Classifier::with_default_rules()),
    }
}
