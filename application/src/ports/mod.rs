//! Port definitions for the application layer
//!
//! Ports define interfaces that infrastructure and presentation adapters implement.

pub mod announcement_sink;
pub mod oracle;
pub mod progress;
