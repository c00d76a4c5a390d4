//! Participant entity

use super::role::{Ability, Role, Team};
use crate::core::model::Model;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Stable participant identity (the name other players address them by)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantId(String);

impl ParticipantId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ParticipantId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for ParticipantId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A seat in the game (Entity)
///
/// Only [`ParticipantRegistry`](super::registry::ParticipantRegistry) mutates
/// participants; everyone else sees them by shared reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Participant {
    id: ParticipantId,
    role: Role,
    alive: bool,
    /// Ability -> still available
    abilities: BTreeMap<Ability, bool>,
    model: Model,
}

impl Participant {
    pub(crate) fn new(id: ParticipantId, role: Role, model: Model) -> Self {
        Self {
            id,
            role,
            alive: true,
            abilities: role
                .starting_abilities()
                .iter()
                .map(|ability| (*ability, true))
                .collect(),
            model,
        }
    }

    pub fn id(&self) -> &ParticipantId {
        &self.id
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn team(&self) -> Team {
        self.role.team()
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    /// Whether the ability was granted and has not been used yet
    pub fn has_ability(&self, ability: Ability) -> bool {
        self.abilities.get(&ability).copied().unwrap_or(false)
    }

    /// Abilities still available, in catalog order
    pub fn available_abilities(&self) -> Vec<Ability> {
        self.abilities
            .iter()
            .filter(|(_, available)| **available)
            .map(|(ability, _)| *ability)
            .collect()
    }

    pub(crate) fn kill(&mut self) {
        self.alive = false;
    }

    /// Flip the flag to used; false when it was never granted or already spent
    pub(crate) fn consume(&mut self, ability: Ability) -> bool {
        match self.abilities.get_mut(&ability) {
            Some(available) if *available => {
                *available = false;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_participant_is_alive_with_role_abilities() {
        let witch = Participant::new("Zhuge Liang".into(), Role::Witch, Model::default());
        assert!(witch.is_alive());
        assert!(witch.has_ability(Ability::Antidote));
        assert!(witch.has_ability(Ability::Poison));
        assert!(!witch.has_ability(Ability::HunterShot));
        assert_eq!(witch.team(), Team::Villagers);
    }

    #[test]
    fn test_consume_once() {
        let mut hunter = Participant::new("Zhao Yun".into(), Role::Hunter, Model::default());
        assert!(hunter.consume(Ability::HunterShot));
        assert!(!hunter.consume(Ability::HunterShot));
        assert!(hunter.available_abilities().is_empty());
    }

    #[test]
    fn test_consume_ungranted_ability() {
        let mut villager = Participant::new("Sun Quan".into(), Role::Villager, Model::default());
        assert!(!villager.consume(Ability::Poison));
    }
}
