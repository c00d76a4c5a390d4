//! Role catalog
//!
//! Roles form a closed enumeration. Each variant carries its static catalog
//! entry ([`RoleDefinition`]) and the consumable [`Ability`] flags it starts
//! with, so phase logic can dispatch with exhaustive matches.

use serde::{Deserialize, Serialize};

/// The two opposing win-condition groups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Team {
    /// Wins by reaching parity with the village
    Werewolves,
    /// Wins by eliminating every werewolf
    Villagers,
}

impl Team {
    pub fn as_str(&self) -> &'static str {
        match self {
            Team::Werewolves => "werewolves",
            Team::Villagers => "villagers",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Team::Werewolves => "Werewolf team",
            Team::Villagers => "Village team",
        }
    }
}

impl std::fmt::Display for Team {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// A single-use ability a participant may hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ability {
    /// Witch: revive tonight's werewolf victim
    Antidote,
    /// Witch: kill any living participant
    Poison,
    /// Hunter: take one participant along when voted out
    HunterShot,
}

impl Ability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Ability::Antidote => "antidote",
            Ability::Poison => "poison",
            Ability::HunterShot => "hunter_shot",
        }
    }
}

impl std::fmt::Display for Ability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Static catalog entry for a role
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub ability: &'static str,
    pub win_condition: &'static str,
    pub team: Team,
}

const VILLAGE_WIN: &str = "Eliminate every werewolf";

const WEREWOLF: RoleDefinition = RoleDefinition {
    name: "Werewolf",
    description: "A wolf hiding among the villagers",
    ability: "Chooses one participant to kill each night together with the pack",
    win_condition: "Eliminate the village or match its numbers",
    team: Team::Werewolves,
};

const SEER: RoleDefinition = RoleDefinition {
    name: "Seer",
    description: "A villager gifted with sight",
    ability: "Inspects one participant each night and learns their team",
    win_condition: VILLAGE_WIN,
    team: Team::Villagers,
};

const WITCH: RoleDefinition = RoleDefinition {
    name: "Witch",
    description: "A villager holding two potions",
    ability: "Owns one antidote to revive the night's victim and one poison to kill",
    win_condition: VILLAGE_WIN,
    team: Team::Villagers,
};

const HUNTER: RoleDefinition = RoleDefinition {
    name: "Hunter",
    description: "A villager with a loaded gun",
    ability: "When voted out, may shoot one participant",
    win_condition: VILLAGE_WIN,
    team: Team::Villagers,
};

const GUARDIAN: RoleDefinition = RoleDefinition {
    name: "Guardian",
    description: "A villager standing watch",
    ability: "Protects one participant from the werewolves each night",
    win_condition: VILLAGE_WIN,
    team: Team::Villagers,
};

const VILLAGER: RoleDefinition = RoleDefinition {
    name: "Villager",
    description: "An ordinary villager",
    ability: "No special ability; relies on reasoning and voting",
    win_condition: VILLAGE_WIN,
    team: Team::Villagers,
};

/// Roles a participant can be dealt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Werewolf,
    Seer,
    Witch,
    Hunter,
    Guardian,
    Villager,
}

impl Role {
    /// Every role, in night-order of their sub-phases
    pub const ALL: [Role; 6] = [
        Role::Werewolf,
        Role::Guardian,
        Role::Seer,
        Role::Witch,
        Role::Hunter,
        Role::Villager,
    ];

    pub fn definition(&self) -> &'static RoleDefinition {
        match self {
            Role::Werewolf => &WEREWOLF,
            Role::Seer => &SEER,
            Role::Witch => &WITCH,
            Role::Hunter => &HUNTER,
            Role::Guardian => &GUARDIAN,
            Role::Villager => &VILLAGER,
        }
    }

    pub fn team(&self) -> Team {
        self.definition().team
    }

    pub fn is_werewolf(&self) -> bool {
        matches!(self, Role::Werewolf)
    }

    /// Roles that may be dealt at most once per game
    pub fn is_unique(&self) -> bool {
        match self {
            Role::Seer | Role::Witch | Role::Hunter | Role::Guardian => true,
            Role::Werewolf | Role::Villager => false,
        }
    }

    /// Consumable abilities granted at setup
    pub fn starting_abilities(&self) -> &'static [Ability] {
        match self {
            Role::Witch => &[Ability::Antidote, Ability::Poison],
            Role::Hunter => &[Ability::HunterShot],
            Role::Werewolf | Role::Seer | Role::Guardian | Role::Villager => &[],
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Werewolf => "werewolf",
            Role::Seer => "seer",
            Role::Witch => "witch",
            Role::Hunter => "hunter",
            Role::Guardian => "guardian",
            Role::Villager => "villager",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.definition().name)
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "werewolf" | "wolf" => Ok(Role::Werewolf),
            "seer" => Ok(Role::Seer),
            "witch" => Ok(Role::Witch),
            "hunter" => Ok(Role::Hunter),
            "guardian" | "guard" => Ok(Role::Guardian),
            "villager" => Ok(Role::Villager),
            other => Err(format!(
                "Unknown role: {}. Valid: werewolf, seer, witch, hunter, guardian, villager",
                other
            )),
        }
    }
}
