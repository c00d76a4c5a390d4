//! Output formatter trait

use council_domain::GameReport;

/// Trait for formatting finished games
pub trait ReportFormatter {
    /// Format the complete report: revealed table, outcome and public log
    fn format(&self, report: &GameReport) -> String;

    /// Format as JSON
    fn format_json(&self, report: &GameReport) -> String;

    /// Format the outcome and revealed table only
    fn format_summary(&self, report: &GameReport) -> String;
}
