//! Game configuration: table size, role table and loop control.
//!
//! [`GameConfig`] is everything [`RunGameUseCase`](crate::use_cases::run_game::RunGameUseCase)
//! needs before the first night. [`GameConfig::validate`] resolves the role
//! table and rejects tables that cannot produce a fair game.

use crate::use_cases::collect_decisions::CollectionMode;
use council_domain::{Model, RoleDistribution, SetupError};
use std::collections::HashSet;
use std::time::Duration;

/// Seat names used when none are configured
pub const DEFAULT_NAMES: [&str; 20] = [
    "Liu Bei",
    "Guan Yu",
    "Zhang Fei",
    "Zhuge Liang",
    "Zhao Yun",
    "Cao Cao",
    "Sima Yi",
    "Dian Wei",
    "Xu Chu",
    "Xiahou Dun",
    "Sun Quan",
    "Zhou Yu",
    "Lu Xun",
    "Gan Ning",
    "Taishi Ci",
    "Lu Bu",
    "Diao Chan",
    "Dong Zhuo",
    "Yuan Shao",
    "Yuan Shu",
];

/// Game setup and loop control parameters.
#[derive(Debug, Clone)]
pub struct GameConfig {
    pub player_count: usize,
    /// Explicit role table; the standard table for `player_count` when `None`
    pub roles: Option<RoleDistribution>,
    /// Seat names, in seating order; [`DEFAULT_NAMES`] when empty
    pub names: Vec<String>,
    /// Oracle bindings assigned round-robin by seat; [`Model::default`] when empty
    pub models: Vec<Model>,
    /// Round ceiling; reaching it without a winner aborts the game
    pub max_rounds: u32,
    /// Werewolf discussion turns per night
    pub max_discussion_rounds: usize,
    /// How kill votes and day votes are collected
    pub vote_mode: CollectionMode,
    /// Seed for role shuffling and random fallbacks; drawn from entropy when `None`
    pub seed: Option<u64>,
    /// Per-request oracle timeout
    pub decision_timeout: Option<Duration>,
    /// Deal the role deck in seating order instead of shuffling it
    pub shuffle_roles: bool,
    /// Number of observed messages included in each prompt
    pub transcript_limit: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            player_count: 6,
            roles: None,
            names: Vec::new(),
            models: Vec::new(),
            max_rounds: 10,
            max_discussion_rounds: 3,
            vote_mode: CollectionMode::Concurrent,
            seed: None,
            decision_timeout: Some(Duration::from_secs(120)),
            shuffle_roles: true,
            transcript_limit: 40,
        }
    }
}

impl GameConfig {
    // ==================== Builder Methods ====================

    pub fn with_player_count(mut self, count: usize) -> Self {
        self.player_count = count;
        self
    }

    pub fn with_roles(mut self, roles: RoleDistribution) -> Self {
        self.roles = Some(roles);
        self
    }

    pub fn with_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.names = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_models(mut self, models: Vec<Model>) -> Self {
        self.models = models;
        self
    }

    pub fn with_max_rounds(mut self, max: u32) -> Self {
        self.max_rounds = max;
        self
    }

    pub fn with_max_discussion_rounds(mut self, max: usize) -> Self {
        self.max_discussion_rounds = max;
        self
    }

    pub fn with_vote_mode(mut self, mode: CollectionMode) -> Self {
        self.vote_mode = mode;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_decision_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.decision_timeout = timeout;
        self
    }

    pub fn with_shuffle_roles(mut self, shuffle: bool) -> Self {
        self.shuffle_roles = shuffle;
        self
    }

    // ==================== Resolution ====================

    /// The role table in effect
    pub fn distribution(&self) -> RoleDistribution {
        self.roles
            .clone()
            .unwrap_or_else(|| RoleDistribution::standard(self.player_count))
    }

    /// Seat names in seating order, `player_count` of them at most
    pub fn seat_names(&self) -> Vec<String> {
        if self.names.is_empty() {
            DEFAULT_NAMES
                .iter()
                .take(self.player_count)
                .map(|n| n.to_string())
                .collect()
        } else {
            self.names.iter().take(self.player_count).cloned().collect()
        }
    }

    /// Oracle binding for the seat at `index`
    pub fn model_for(&self, index: usize) -> Model {
        if self.models.is_empty() {
            Model::default()
        } else {
            self.models[index % self.models.len()].clone()
        }
    }

    /// Validate the configuration and return the role table to deal.
    pub fn validate(&self) -> Result<RoleDistribution, SetupError> {
        if self.max_rounds == 0 {
            return Err(SetupError::ZeroMaxRounds);
        }

        let distribution = self.distribution();
        distribution.validate(self.player_count)?;

        let names = self.seat_names();
        if names.len() < self.player_count {
            return Err(SetupError::NotEnoughNames {
                needed: self.player_count,
                available: names.len(),
            });
        }
        let mut seen = HashSet::new();
        if let Some(duplicate) = names.iter().find(|n| !seen.insert(n.as_str())) {
            return Err(SetupError::DuplicateName(duplicate.clone()));
        }

        Ok(distribution)
    }
}
