//! Logging infrastructure: structured game transcripts.
//!
//! Provides [`JsonlAnnouncementLogger`], a JSONL file writer that implements
//! the [`AnnouncementSink`](council_application::AnnouncementSink) port.

mod jsonl_logger;

pub use jsonl_logger::JsonlAnnouncementLogger;
