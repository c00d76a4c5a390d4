//! Participant registry
//!
//! Holds every participant in seating order. Nobody is ever removed: dead
//! participants stay in place so ordering (and therefore tie-breaks and logs)
//! is reproducible, and "alive" filtering is the only visibility mechanism.

use super::participant::{Participant, ParticipantId};
use super::role::{Ability, Role, Team};
use crate::core::error::DomainError;
use crate::core::model::Model;

#[derive(Debug, Clone, Default)]
pub struct ParticipantRegistry {
    participants: Vec<Participant>,
}

impl ParticipantRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new participant at the end of the seating order
    pub fn create(
        &mut self,
        id: impl Into<ParticipantId>,
        role: Role,
        model: Model,
    ) -> Result<&Participant, DomainError> {
        let id = id.into();
        if self.get(&id).is_some() {
            return Err(DomainError::DuplicateParticipant(id));
        }
        self.participants.push(Participant::new(id, role, model));
        Ok(&self.participants[self.participants.len() - 1])
    }

    pub fn get(&self, id: &ParticipantId) -> Option<&Participant> {
        self.participants.iter().find(|p| p.id() == id)
    }

    pub fn all(&self) -> &[Participant] {
        &self.participants
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    pub fn is_alive(&self, id: &ParticipantId) -> bool {
        self.get(id).is_some_and(Participant::is_alive)
    }

    /// Mark a living participant dead.
    ///
    /// Killing an unknown or already-dead participant is an invariant
    /// violation: resolution logic must never produce one.
    pub fn mark_dead(&mut self, id: &ParticipantId) -> Result<(), DomainError> {
        let participant = self
            .participants
            .iter_mut()
            .find(|p| p.id() == id)
            .ok_or_else(|| DomainError::UnknownParticipant(id.clone()))?;

        if !participant.is_alive() {
            return Err(DomainError::AlreadyDead(id.clone()));
        }
        participant.kill();
        Ok(())
    }

    /// Spend a consumable ability.
    ///
    /// Returns false when the participant is missing or dead, never had the
    /// ability, or already used it. Callers branch on the result.
    pub fn consume_ability(&mut self, id: &ParticipantId, ability: Ability) -> bool {
        match self.participants.iter_mut().find(|p| p.id() == id) {
            Some(participant) if participant.is_alive() => participant.consume(ability),
            _ => false,
        }
    }

    /// Living participants matching `predicate`, in seating order
    pub fn alive_of<F>(&self, predicate: F) -> Vec<&Participant>
    where
        F: Fn(&Participant) -> bool,
    {
        self.participants
            .iter()
            .filter(|p| p.is_alive() && predicate(p))
            .collect()
    }

    pub fn alive(&self) -> Vec<&Participant> {
        self.alive_of(|_| true)
    }

    pub fn alive_ids(&self) -> Vec<ParticipantId> {
        self.alive().into_iter().map(|p| p.id().clone()).collect()
    }

    pub fn alive_count(&self) -> usize {
        self.participants.iter().filter(|p| p.is_alive()).count()
    }

    /// Living participants holding `role`
    pub fn alive_with_role(&self, role: Role) -> Vec<&Participant> {
        self.alive_of(|p| p.role() == role)
    }

    /// Number of living participants on `team`
    pub fn alive_on_team(&self, team: Team) -> usize {
        self.alive_of(|p| p.team() == team).len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> ParticipantRegistry {
        let mut registry = ParticipantRegistry::new();
        for (name, role) in [
            ("A", Role::Werewolf),
            ("B", Role::Seer),
            ("C", Role::Witch),
            ("D", Role::Villager),
        ] {
            registry.create(name, role, Model::default()).unwrap();
        }
        registry
    }

    #[test]
    fn test_create_rejects_duplicates() {
        let mut registry = registry();
        let err = registry
            .create("A", Role::Villager, Model::default())
            .unwrap_err();
        assert_eq!(err, DomainError::DuplicateParticipant("A".into()));
        assert_eq!(registry.len(), 4);
    }

    #[test]
    fn test_mark_dead_keeps_participant() {
        let mut registry = registry();
        registry.mark_dead(&"B".into()).unwrap();

        assert_eq!(registry.len(), 4);
        assert_eq!(registry.alive_count(), 3);
        assert!(!registry.is_alive(&"B".into()));
        assert!(registry.get(&"B".into()).is_some());
    }

    #[test]
    fn test_double_mark_dead_is_violation() {
        let mut registry = registry();
        registry.mark_dead(&"D".into()).unwrap();
        assert_eq!(
            registry.mark_dead(&"D".into()),
            Err(DomainError::AlreadyDead("D".into()))
        );
    }

    #[test]
    fn test_mark_dead_unknown_is_violation() {
        let mut registry = registry();
        assert_eq!(
            registry.mark_dead(&"Z".into()),
            Err(DomainError::UnknownParticipant("Z".into()))
        );
    }

    #[test]
    fn test_consume_ability_once() {
        let mut registry = registry();
        let witch: ParticipantId = "C".into();

        assert!(registry.consume_ability(&witch, Ability::Antidote));
        assert!(!registry.consume_ability(&witch, Ability::Antidote));
        // Poison is independent of the antidote
        assert!(registry.consume_ability(&witch, Ability::Poison));
    }

    #[test]
    fn test_consume_ability_dead_or_missing() {
        let mut registry = registry();
        let witch: ParticipantId = "C".into();
        registry.mark_dead(&witch).unwrap();

        assert!(!registry.consume_ability(&witch, Ability::Poison));
        assert!(!registry.consume_ability(&"Z".into(), Ability::Poison));
        assert!(!registry.consume_ability(&"D".into(), Ability::Poison));
    }

    #[test]
    fn test_alive_of_keeps_seating_order() {
        let mut registry = registry();
        registry.mark_dead(&"B".into()).unwrap();

        let villagers: Vec<_> = registry
            .alive_of(|p| p.team() == Team::Villagers)
            .into_iter()
            .map(|p| p.id().as_str())
            .collect();
        assert_eq!(villagers, vec!["C", "D"]);
        assert_eq!(registry.alive_on_team(Team::Werewolves), 1);
        assert_eq!(registry.alive_with_role(Role::Witch).len(), 1);
    }
}
