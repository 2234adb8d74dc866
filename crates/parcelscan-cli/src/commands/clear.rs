//! Clear command implementation.

use crate::cli::ClearArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use parcelscan_domain::RecordStore;
use parcelscan_store::SqliteStore;
use std::io;

/// Execute the clear command.
pub fn execute_clear(args: ClearArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let scope = match (&args.owner, args.all) {
        (Some(owner), false) => format!("records owned by '{}'", owner),
        (None, true) => "ALL records".to_string(),
        _ => {
            return Err(CliError::InvalidInput(
                "pass either --all or --owner <identity>".to_string(),
            ))
        }
    };

    if !args.yes && !confirm(&scope)? {
        println!("{}", formatter.info("Operation cancelled"));
        return Ok(());
    }

    let mut store = SqliteStore::new(config.database_path()?)?;
    let removed = match &args.owner {
        Some(owner) => store.delete_by_owner(owner)?,
        None => store.delete_all()?,
    };

    println!("{}", formatter.bulk_result("Deleted", removed));
    Ok(())
}

fn confirm(scope: &str) -> Result<bool> {
    println!("About to delete {}.", scope);
    print!("Continue? [y/N] ");
    use std::io::Write;
    io::stdout().flush()?;

    let mut response = String::new();
    io::stdin().read_line(&mut response)?;
    Ok(response.trim().eq_ignore_ascii_case("y"))
}
