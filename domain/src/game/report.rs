//! Final report of a finished game

use super::announcement::Announcement;
use super::participant::ParticipantId;
use super::registry::ParticipantRegistry;
use super::role::{Role, Team};
use super::state::{GameState, Outcome};
use crate::core::model::Model;
use serde::{Deserialize, Serialize};

/// A participant as revealed after the game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantSummary {
    pub id: ParticipantId,
    pub role: Role,
    pub team: Team,
    pub alive: bool,
    pub model: Model,
}

/// Outcome, round count, the revealed table and the full announcement log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameReport {
    pub outcome: Outcome,
    pub rounds: u32,
    pub participants: Vec<ParticipantSummary>,
    pub log: Vec<Announcement>,
}

impl GameReport {
    pub fn new(registry: &ParticipantRegistry, state: &GameState) -> Self {
        Self {
            outcome: state.outcome(),
            rounds: state.round(),
            participants: registry
                .all()
                .iter()
                .map(|p| ParticipantSummary {
                    id: p.id().clone(),
                    role: p.role(),
                    team: p.team(),
                    alive: p.is_alive(),
                    model: p.model().clone(),
                })
                .collect(),
            log: state.log().to_vec(),
        }
    }

    pub fn winner(&self) -> Option<Team> {
        self.outcome.winner()
    }

    pub fn survivors(&self) -> Vec<&ParticipantSummary> {
        self.participants.iter().filter(|p| p.alive).collect()
    }

    /// Announcements anyone could see
    pub fn public_log(&self) -> impl Iterator<Item = &Announcement> {
        self.log.iter().filter(|a| a.visible_to.is_public())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::announcement::{AnnouncementKind, Visibility};

    #[test]
    fn test_report_reveals_table() {
        let mut registry = ParticipantRegistry::new();
        registry
            .create("Cao Cao", Role::Werewolf, Model::default())
            .unwrap();
        registry
            .create("Liu Bei", Role::Villager, Model::new("gpt-4o-mini"))
            .unwrap();
        registry.mark_dead(&"Liu Bei".into()).unwrap();

        let mut state = GameState::new();
        state.record(Announcement::public(AnnouncementKind::Death, 1, "Liu Bei died"));
        state.record(Announcement::scoped(
            AnnouncementKind::Inspection,
            1,
            "secret",
            Visibility::only(&"Cao Cao".into()),
        ));
        state.conclude(Outcome::Winner(Team::Werewolves)).unwrap();

        let report = GameReport::new(&registry, &state);
        assert_eq!(report.winner(), Some(Team::Werewolves));
        assert_eq!(report.rounds, 1);
        assert_eq!(report.participants[1].model, Model::new("gpt-4o-mini"));
        assert_eq!(report.survivors().len(), 1);
        assert_eq!(report.public_log().count(), 1);
    }
}
