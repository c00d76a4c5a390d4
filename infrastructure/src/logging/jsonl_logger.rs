//! JSONL file writer for game announcements.
//!
//! Each [`Announcement`] is serialized as a single JSON line with a `type`
//! field and `timestamp`, appended to the file via a buffered writer. The
//! final [`GameReport`] is written as a last `game_report` line.

use council_application::AnnouncementSink;
use council_domain::{Announcement, GameReport};
use serde_json::{Value, json};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

/// JSONL announcement logger that writes one JSON object per line.
///
/// Thread-safe via `Mutex<BufWriter<File>>`. Flushes after every line and on `Drop`.
pub struct JsonlAnnouncementLogger {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl JsonlAnnouncementLogger {
    /// Create a new logger writing to the given path.
    ///
    /// Creates the file (and parent directories) if they don't exist.
    /// Returns `None` if the file cannot be created.
    pub fn new(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!(
                "Could not create game log directory {}: {}",
                parent.display(),
                e
            );
            return None;
        }

        let file = match File::create(path) {
            Ok(f) => f,
            Err(e) => {
                warn!("Could not create game log file {}: {}", path.display(), e);
                return None;
            }
        };

        Some(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
        })
    }

    /// Get the path to the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append the final report as a `game_report` line
    pub fn write_report(&self, report: &GameReport) {
        match serde_json::to_value(report) {
            Ok(payload) => self.write_record("game_report", payload),
            Err(e) => warn!("Could not serialize game report: {}", e),
        }
    }

    fn write_record(&self, record_type: &str, payload: Value) {
        let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);

        // Merge payload with type + timestamp
        let record = if let Value::Object(mut map) = payload {
            map.insert("type".to_string(), Value::String(record_type.to_string()));
            map.insert("timestamp".to_string(), Value::String(timestamp));
            Value::Object(map)
        } else {
            json!({
                "type": record_type,
                "timestamp": timestamp,
                "data": payload,
            })
        };

        let Ok(line) = serde_json::to_string(&record) else {
            return;
        };

        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", line);
            let _ = writer.flush();
        }
    }
}

impl AnnouncementSink for JsonlAnnouncementLogger {
    fn announce(&self, announcement: &Announcement) {
        let payload = json!({
            "round": announcement.round,
            "text": announcement.text,
            "visible_to": announcement.visible_to,
        });
        self.write_record(announcement.kind.as_str(), payload);
    }
}

impl Drop for JsonlAnnouncementLogger {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use council_domain::{
        AnnouncementKind, GameState, Model, Outcome, ParticipantRegistry, Role, Team, Visibility,
    };
    use std::fs;

    fn lines(path: &Path) -> Vec<Value> {
        fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn test_writes_one_line_per_announcement() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("game.jsonl");
        let logger = JsonlAnnouncementLogger::new(&path).unwrap();

        logger.announce(&Announcement::public(
            AnnouncementKind::Death,
            2,
            "Zhao Yun was found dead at dawn.",
        ));
        logger.announce(&Announcement::scoped(
            AnnouncementKind::Inspection,
            2,
            "Cao Cao is a werewolf.",
            Visibility::only(&"Zhuge Liang".into()),
        ));

        // Lines are flushed as they are written
        let records = lines(&path);
        assert_eq!(records.len(), 2);
        for record in &records {
            assert!(record.get("timestamp").is_some());
            assert_eq!(record["round"], 2);
        }
        assert_eq!(records[0]["type"], "death");
        assert_eq!(records[0]["text"], "Zhao Yun was found dead at dawn.");
        assert_eq!(records[0]["visible_to"]["scope"], "everyone");
        assert_eq!(records[1]["type"], "inspection");
        assert_eq!(records[1]["visible_to"]["members"][0], "Zhuge Liang");
    }

    #[test]
    fn test_writes_report_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("game.jsonl");
        let logger = JsonlAnnouncementLogger::new(&path).unwrap();

        let mut registry = ParticipantRegistry::new();
        registry.create("A", Role::Werewolf, Model::default()).unwrap();
        registry.create("B", Role::Villager, Model::default()).unwrap();
        let mut state = GameState::default();
        state.conclude(Outcome::Winner(Team::Werewolves)).unwrap();
        logger.write_report(&GameReport::new(&registry, &state));
        drop(logger);

        let records = lines(&path);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["type"], "game_report");
        assert_eq!(records[0]["participants"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_returns_none_for_unwritable_path() {
        let dir = tempfile::tempdir().unwrap();
        // A directory cannot be opened as a file
        assert!(JsonlAnnouncementLogger::new(dir.path()).is_none());
    }
}
