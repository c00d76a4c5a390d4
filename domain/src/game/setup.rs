//! Role distribution and setup validation
//!
//! A game refuses to start on an ill-formed table: every check here runs
//! before any participant is created.

use super::role::{Role, Team};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Smallest table that still leaves the village a chance
pub const MIN_PLAYERS: usize = 4;

/// Setup-time configuration errors. Fatal: the game does not start.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SetupError {
    #[error("At least {min} players are required, got {count}")]
    TooFewPlayers { count: usize, min: usize },

    #[error("The role table has no werewolves")]
    NoWerewolves,

    #[error("Werewolves ({werewolves}) must be outnumbered by the village ({villagers}) at start")]
    WerewolvesNotOutnumbered { werewolves: usize, villagers: usize },

    #[error("Role table deals {actual} roles for {expected} players")]
    CountMismatch { expected: usize, actual: usize },

    #[error("Role '{0}' may appear at most once")]
    DuplicateUniqueRole(Role),

    #[error("Unknown role in role table: {0}")]
    UnknownRole(String),

    #[error("Participant name '{0}' is used twice")]
    DuplicateName(String),

    #[error("Need {needed} participant names, only {available} available")]
    NotEnoughNames { needed: usize, available: usize },

    #[error("max_rounds must be at least 1")]
    ZeroMaxRounds,
}

/// How many participants receive each role
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RoleDistribution {
    counts: BTreeMap<Role, usize>,
}

impl RoleDistribution {
    pub fn from_counts(counts: impl IntoIterator<Item = (Role, usize)>) -> Self {
        let mut distribution = Self::default();
        for (role, count) in counts {
            *distribution.counts.entry(role).or_insert(0) += count;
        }
        distribution
    }

    /// Standard table for `player_count` players.
    ///
    /// Fixed tables for 6, 8 and 9 players. Otherwise roughly a third of the
    /// table are werewolves (at least one), then seer, witch and hunter as
    /// long as seats remain, and villagers for the rest.
    pub fn standard(player_count: usize) -> Self {
        let roles: Vec<(Role, usize)> = match player_count {
            6 => vec![
                (Role::Werewolf, 2),
                (Role::Seer, 1),
                (Role::Witch, 1),
                (Role::Villager, 2),
            ],
            8 => vec![
                (Role::Werewolf, 3),
                (Role::Seer, 1),
                (Role::Witch, 1),
                (Role::Hunter, 1),
                (Role::Villager, 2),
            ],
            9 => vec![
                (Role::Werewolf, 3),
                (Role::Seer, 1),
                (Role::Witch, 1),
                (Role::Hunter, 1),
                (Role::Guardian, 1),
                (Role::Villager, 2),
            ],
            n => {
                let werewolves = (n / 3).max(1);
                let mut remaining = n.saturating_sub(werewolves);
                let mut roles = vec![(Role::Werewolf, werewolves)];
                for special in [Role::Seer, Role::Witch, Role::Hunter] {
                    if remaining == 0 {
                        break;
                    }
                    roles.push((special, 1));
                    remaining -= 1;
                }
                roles.push((Role::Villager, remaining));
                roles
            }
        };
        Self::from_counts(roles)
    }

    /// Parse a `role name -> count` table (as found in config files)
    pub fn parse_table<'a>(
        table: impl IntoIterator<Item = (&'a str, usize)>,
    ) -> Result<Self, SetupError> {
        let mut counts = Vec::new();
        for (name, count) in table {
            let role: Role = name
                .parse()
                .map_err(|_| SetupError::UnknownRole(name.to_string()))?;
            counts.push((role, count));
        }
        Ok(Self::from_counts(counts))
    }

    pub fn count(&self, role: Role) -> usize {
        self.counts.get(&role).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn team_count(&self, team: Team) -> usize {
        self.counts
            .iter()
            .filter(|(role, _)| role.team() == team)
            .map(|(_, count)| count)
            .sum()
    }

    /// Check the table against the player count
    pub fn validate(&self, player_count: usize) -> Result<(), SetupError> {
        if player_count < MIN_PLAYERS {
            return Err(SetupError::TooFewPlayers {
                count: player_count,
                min: MIN_PLAYERS,
            });
        }
        if self.total() != player_count {
            return Err(SetupError::CountMismatch {
                expected: player_count,
                actual: self.total(),
            });
        }

        let werewolves = self.team_count(Team::Werewolves);
        let villagers = self.team_count(Team::Villagers);
        if werewolves == 0 {
            return Err(SetupError::NoWerewolves);
        }
        if werewolves >= villagers {
            return Err(SetupError::WerewolvesNotOutnumbered {
                werewolves,
                villagers,
            });
        }

        if let Some(role) = self
            .counts
            .iter()
            .find(|(role, count)| role.is_unique() && **count > 1)
            .map(|(role, _)| *role)
        {
            return Err(SetupError::DuplicateUniqueRole(role));
        }
        Ok(())
    }

    /// The roles as a flat deck, werewolves first
    pub fn deck(&self) -> Vec<Role> {
        self.counts
            .iter()
            .flat_map(|(role, count)| std::iter::repeat_n(*role, *count))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_six() {
        let table = RoleDistribution::standard(6);
        assert_eq!(table.count(Role::Werewolf), 2);
        assert_eq!(table.count(Role::Seer), 1);
        assert_eq!(table.count(Role::Witch), 1);
        assert_eq!(table.count(Role::Villager), 2);
        assert_eq!(table.total(), 6);
        assert!(table.validate(6).is_ok());
    }

    #[test]
    fn test_standard_nine_has_guardian() {
        let table = RoleDistribution::standard(9);
        assert_eq!(table.count(Role::Werewolf), 3);
        assert_eq!(table.count(Role::Guardian), 1);
        assert_eq!(table.count(Role::Hunter), 1);
        assert!(table.validate(9).is_ok());
    }

    #[test]
    fn test_proportional_default() {
        let table = RoleDistribution::standard(12);
        assert_eq!(table.count(Role::Werewolf), 4);
        assert_eq!(table.count(Role::Seer), 1);
        assert_eq!(table.count(Role::Witch), 1);
        assert_eq!(table.count(Role::Hunter), 1);
        assert_eq!(table.count(Role::Villager), 5);
        assert!(table.validate(12).is_ok());

        let small = RoleDistribution::standard(4);
        assert_eq!(small.count(Role::Werewolf), 1);
        assert_eq!(small.count(Role::Hunter), 1);
        assert_eq!(small.count(Role::Villager), 0);
        assert!(small.validate(4).is_ok());
    }

    #[test]
    fn test_too_few_players() {
        let table = RoleDistribution::standard(3);
        assert_eq!(
            table.validate(3),
            Err(SetupError::TooFewPlayers { count: 3, min: 4 })
        );
    }

    #[test]
    fn test_no_werewolves() {
        let table = RoleDistribution::from_counts([(Role::Seer, 1), (Role::Villager, 4)]);
        assert_eq!(table.validate(5), Err(SetupError::NoWerewolves));
    }

    #[test]
    fn test_werewolves_must_be_outnumbered() {
        let table = RoleDistribution::from_counts([(Role::Werewolf, 2), (Role::Villager, 2)]);
        assert_eq!(
            table.validate(4),
            Err(SetupError::WerewolvesNotOutnumbered {
                werewolves: 2,
                villagers: 2
            })
        );
    }

    #[test]
    fn test_count_mismatch() {
        let table = RoleDistribution::standard(6);
        assert_eq!(
            table.validate(7),
            Err(SetupError::CountMismatch {
                expected: 7,
                actual: 6
            })
        );
    }

    #[test]
    fn test_duplicate_unique_role() {
        let table = RoleDistribution::from_counts([
            (Role::Werewolf, 1),
            (Role::Witch, 2),
            (Role::Villager, 2),
        ]);
        assert_eq!(
            table.validate(5),
            Err(SetupError::DuplicateUniqueRole(Role::Witch))
        );
    }

    #[test]
    fn test_parse_table() {
        let table =
            RoleDistribution::parse_table([("werewolf", 2), ("seer", 1), ("villager", 3)]).unwrap();
        assert_eq!(table.total(), 6);
        assert_eq!(
            RoleDistribution::parse_table([("mayor", 1)]),
            Err(SetupError::UnknownRole("mayor".to_string()))
        );
    }

    #[test]
    fn test_deck_puts_werewolves_first() {
        let deck = RoleDistribution::standard(6).deck();
        assert_eq!(deck.len(), 6);
        assert_eq!(&deck[..2], &[Role::Werewolf, Role::Werewolf]);
    }
}
