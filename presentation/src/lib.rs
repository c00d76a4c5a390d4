//! Presentation layer for werewolf-council
//!
//! This crate contains CLI definitions, console narration, report
//! formatters and progress reporters.

pub mod cli;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use cli::commands::{Cli, OracleChoice};
pub use output::console::{ConsoleAnnouncer, ConsoleFormatter};
pub use output::formatter::ReportFormatter;
pub use progress::reporter::{ProgressReporter, SimpleProgress};
