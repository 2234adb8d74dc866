//! Stats command implementation.

use crate::cli::StatsArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use parcelscan_domain::RecordStore;
use parcelscan_store::SqliteStore;

/// Execute the stats command.
pub fn execute_stats(args: StatsArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let store = SqliteStore::new(config.database_path()?)?;
    let stats = store.statistics(args.owner.as_deref())?;

    println!("{}", formatter.format_statistics(&stats)?);
    Ok(())
}
