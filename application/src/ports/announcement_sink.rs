//! Port for receiving moderator announcements.
//!
//! Every announcement recorded in the game log is also handed to the sink:
//! phase starts, deaths, vote results, private inspections and the outcome.
//! Sinks filter by [`Visibility`](council_domain::Visibility) themselves.

use council_domain::Announcement;

/// Port for publishing announcements.
///
/// `announce` is synchronous and non-fallible so a failing sink never
/// disrupts the game; implementations swallow their own I/O errors.
pub trait AnnouncementSink: Send + Sync {
    fn announce(&self, announcement: &Announcement);
}

/// No-op implementation for tests and when nobody is listening.
pub struct NoAnnouncementSink;

impl AnnouncementSink for NoAnnouncementSink {
    fn announce(&self, _announcement: &Announcement) {}
}

/// A sink that delegates to multiple inner sinks (console + JSONL log).
pub struct CompositeAnnouncementSink<'a> {
    delegates: Vec<&'a dyn AnnouncementSink>,
}

impl<'a> CompositeAnnouncementSink<'a> {
    pub fn new(delegates: Vec<&'a dyn AnnouncementSink>) -> Self {
        Self { delegates }
    }
}

impl AnnouncementSink for CompositeAnnouncementSink<'_> {
    fn announce(&self, announcement: &Announcement) {
        for d in &self.delegates {
            d.announce(announcement);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use council_domain::AnnouncementKind;
    use std::sync::Mutex;

    struct Recording(Mutex<Vec<String>>);

    impl AnnouncementSink for Recording {
        fn announce(&self, announcement: &Announcement) {
            self.0.lock().unwrap().push(announcement.text.clone());
        }
    }

    #[test]
    fn test_composite_fans_out() {
        let first = Recording(Mutex::new(Vec::new()));
        let second = Recording(Mutex::new(Vec::new()));
        let composite = CompositeAnnouncementSink::new(vec![&first, &second, &NoAnnouncementSink]);

        composite.announce(&Announcement::public(
            AnnouncementKind::PeacefulNight,
            1,
            "The night was peaceful.",
        ));

        assert_eq!(first.0.lock().unwrap().len(), 1);
        assert_eq!(second.0.lock().unwrap()[0], "The night was peaceful.");
    }
}
