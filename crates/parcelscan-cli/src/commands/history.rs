//! History command implementation.

use crate::cli::HistoryArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use parcelscan_domain::RecordStore;
use parcelscan_store::SqliteStore;

/// Execute the history command.
pub fn execute_history(args: HistoryArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let store = SqliteStore::new(config.database_path()?)?;

    let mut records = store.list_records(args.owner.as_deref())?;
    if let Some(limit) = args.limit {
        records.truncate(limit);
    }

    println!("{}", formatter.format_records(&records)?);
    Ok(())
}
