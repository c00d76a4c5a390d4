//! Announcements emitted by the moderator
//!
//! Every phase transition, death, vote result and the final outcome becomes
//! an [`Announcement`]. Sinks decide how to render or persist them.

use super::participant::ParticipantId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnnouncementKind {
    GameStarted,
    PhaseStarted,
    Speech,
    Death,
    PeacefulNight,
    VoteResult,
    Inspection,
    AbilityUsed,
    GameOver,
}

impl AnnouncementKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnnouncementKind::GameStarted => "game_started",
            AnnouncementKind::PhaseStarted => "phase_started",
            AnnouncementKind::Speech => "speech",
            AnnouncementKind::Death => "death",
            AnnouncementKind::PeacefulNight => "peaceful_night",
            AnnouncementKind::VoteResult => "vote_result",
            AnnouncementKind::Inspection => "inspection",
            AnnouncementKind::AbilityUsed => "ability_used",
            AnnouncementKind::GameOver => "game_over",
        }
    }
}

/// Who may see an announcement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "scope", content = "members")]
pub enum Visibility {
    Everyone,
    Members(Vec<ParticipantId>),
}

impl Visibility {
    pub fn only(id: &ParticipantId) -> Self {
        Visibility::Members(vec![id.clone()])
    }

    pub fn is_public(&self) -> bool {
        matches!(self, Visibility::Everyone)
    }

    pub fn includes(&self, id: &ParticipantId) -> bool {
        match self {
            Visibility::Everyone => true,
            Visibility::Members(members) => members.contains(id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Announcement {
    pub kind: AnnouncementKind,
    pub text: String,
    pub round: u32,
    pub visible_to: Visibility,
}

impl Announcement {
    pub fn public(kind: AnnouncementKind, round: u32, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            round,
            visible_to: Visibility::Everyone,
        }
    }

    pub fn scoped(
        kind: AnnouncementKind,
        round: u32,
        text: impl Into<String>,
        visible_to: Visibility,
    ) -> Self {
        Self {
            kind,
            text: text.into(),
            round,
            visible_to,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visibility_includes() {
        let seer = ParticipantId::new("Zhuge Liang");
        let private = Visibility::only(&seer);
        assert!(private.includes(&seer));
        assert!(!private.includes(&ParticipantId::new("Cao Cao")));
        assert!(Visibility::Everyone.includes(&seer));
    }

    #[test]
    fn test_serialize_shape() {
        let announcement = Announcement::scoped(
            AnnouncementKind::Inspection,
            2,
            "Cao Cao is a werewolf",
            Visibility::only(&ParticipantId::new("Zhuge Liang")),
        );
        let value = serde_json::to_value(&announcement).unwrap();
        assert_eq!(value["kind"], "inspection");
        assert_eq!(value["round"], 2);
        assert_eq!(value["visible_to"]["scope"], "members");
        assert_eq!(value["visible_to"]["members"][0], "Zhuge Liang");
    }
}
