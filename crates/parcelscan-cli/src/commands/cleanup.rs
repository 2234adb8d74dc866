//! Cleanup command implementation.

use crate::cli::CleanupArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use parcelscan_domain::RecordStore;
use parcelscan_store::SqliteStore;
use std::io;

/// Execute the cleanup command.
pub fn execute_cleanup(args: CleanupArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    if !args.yes && !confirm(args.days)? {
        println!("{}", formatter.info("Operation cancelled"));
        return Ok(());
    }

    let mut store = SqliteStore::new(config.database_path()?)?;
    let removed = store.delete_older_than(args.days)?;

    println!("{}", formatter.bulk_result("Deleted", removed));
    Ok(())
}

fn confirm(days: u32) -> Result<bool> {
    println!("About to delete records older than {} day(s).", days);
    print!("Continue? [y/N] ");
    use std::io::Write;
    io::stdout().flush()?;

    let mut response = String::new();
    io::stdin().read_line(&mut response)?;
    Ok(response.trim().eq_ignore_ascii_case("y"))
}
