//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use parcelscan_domain::{DeliveryRecord, StoreStatistics};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format delivery records.
    pub fn format_records(&self, records: &[DeliveryRecord]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(records)?),
            OutputFormat::Table => Ok(self.format_records_table(records)),
            OutputFormat::Quiet => Ok(self.format_records_quiet(records)),
        }
    }

    /// Format records as a table.
    fn format_records_table(&self, records: &[DeliveryRecord]) -> String {
        if records.is_empty() {
            return self.colorize("No delivery records found.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record([
            "Date", "Store", "Description", "Price", "Carrier", "Tracking", "Delivered",
        ]);

        for record in records {
            let date = record
                .delivery_date
                .map(|d| d.to_string())
                .unwrap_or_else(|| "-".to_string());
            let price = format!("{:.2}", record.price);
            let delivered = if record.delivery_confirmed { "yes" } else { "no" };
            builder.push_record([
                &date,
                &record.store,
                &record.description,
                &price,
                &record.carrier,
                &record.tracking_number,
                delivered,
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        table.to_string()
    }

    /// Format records in quiet mode (source message IDs only).
    fn format_records_quiet(&self, records: &[DeliveryRecord]) -> String {
        let ids: Vec<&str> = records
            .iter()
            .map(|r| r.source_message_id.as_str())
            .collect();
        ids.join("\n")
    }

    /// Format store statistics.
    pub fn format_statistics(&self, stats: &StoreStatistics) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(stats)?),
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["Metric", "Value"]);
                builder.push_record(["Total records", &stats.total_records.to_string()]);
                builder.push_record([
                    "Confirmed deliveries",
                    &stats.confirmed_deliveries.to_string(),
                ]);
                builder.push_record(["Total value", &format!("{:.2}", stats.total_value)]);

                let mut table = builder.build();
                table
                    .with(Style::rounded())
                    .with(Modify::new(Rows::first()).with(Alignment::center()));
                Ok(table.to_string())
            }
            OutputFormat::Quiet => Ok(format!(
                "{} {} {:.2}",
                stats.total_records, stats.confirmed_deliveries, stats.total_value
            )),
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Format bulk operation result.
    pub fn bulk_result(&self, operation: &str, count: usize) -> String {
        self.success(&format!("{} {} record(s)", operation, count))
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}
