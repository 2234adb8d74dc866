//! Command implementations.

pub mod cleanup;
pub mod clear;
pub mod history;
pub mod run;
pub mod stats;

pub use self::cleanup::execute_cleanup;
pub use self::clear::execute_clear;
pub use self::history::execute_history;
pub use self::run::execute_run;
pub use self::stats::execute_stats;
