//! Win evaluation
//!
//! Pure function over the living participants' teams. It is evaluated after
//! every step that can kill someone, not just once per round.

use super::registry::ParticipantRegistry;
use super::role::Team;

/// Winning team for the current state, or `None` while the game goes on.
///
/// - no werewolves alive: the village wins
/// - werewolves alive >= villagers alive: the werewolves win
pub fn check_winner(registry: &ParticipantRegistry) -> Option<Team> {
    let werewolves = registry.alive_on_team(Team::Werewolves);
    let villagers = registry.alive_on_team(Team::Villagers);

    if werewolves == 0 {
        Some(Team::Villagers)
    } else if werewolves >= villagers {
        Some(Team::Werewolves)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::Model;
    use crate::game::role::Role;

    fn registry(roles: &[Role]) -> ParticipantRegistry {
        let mut registry = ParticipantRegistry::new();
        for (i, role) in roles.iter().enumerate() {
            registry
                .create(format!("P{}", i + 1), *role, Model::default())
                .unwrap();
        }
        registry
    }

    #[test]
    fn test_no_winner_while_village_outnumbers() {
        let registry = registry(&[Role::Werewolf, Role::Seer, Role::Villager]);
        assert_eq!(check_winner(&registry), None);
    }

    #[test]
    fn test_village_wins_without_werewolves() {
        let mut registry = registry(&[Role::Werewolf, Role::Seer, Role::Villager]);
        registry.mark_dead(&"P1".into()).unwrap();
        assert_eq!(check_winner(&registry), Some(Team::Villagers));
    }

    #[test]
    fn test_werewolves_win_at_parity() {
        let mut registry = registry(&[Role::Werewolf, Role::Seer, Role::Villager]);
        registry.mark_dead(&"P3".into()).unwrap();
        assert_eq!(check_winner(&registry), Some(Team::Werewolves));
    }

    #[test]
    fn test_idempotent() {
        let mut registry = registry(&[
            Role::Werewolf,
            Role::Werewolf,
            Role::Seer,
            Role::Witch,
            Role::Villager,
            Role::Villager,
        ]);
        registry.mark_dead(&"P6".into()).unwrap();
        let first = check_winner(&registry);
        assert_eq!(check_winner(&registry), first);
        assert_eq!(first, None);
    }
}
