//! Game state owned by the phase state machine

use super::announcement::Announcement;
use super::role::Team;
use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Night sub-phases, in the order they run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NightStep {
    Werewolves,
    Guardian,
    Seer,
    Witch,
}

/// Day sub-phases, in the order they run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayStep {
    Discussion,
    Vote,
    HunterShot,
}

/// Phase of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "phase", content = "step")]
pub enum Phase {
    Setup,
    Night(NightStep),
    NightResolution,
    Day(DayStep),
    DayResolution,
    Terminal,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Setup => "setup",
            Phase::Night(NightStep::Werewolves) => "night.werewolves",
            Phase::Night(NightStep::Guardian) => "night.guardian",
            Phase::Night(NightStep::Seer) => "night.seer",
            Phase::Night(NightStep::Witch) => "night.witch",
            Phase::NightResolution => "night.resolution",
            Phase::Day(DayStep::Discussion) => "day.discussion",
            Phase::Day(DayStep::Vote) => "day.vote",
            Phase::Day(DayStep::HunterShot) => "day.hunter_shot",
            Phase::DayResolution => "day.resolution",
            Phase::Terminal => "terminal",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Phase::Setup => "Setup",
            Phase::Night(NightStep::Werewolves) => "Night: Werewolves",
            Phase::Night(NightStep::Guardian) => "Night: Guardian",
            Phase::Night(NightStep::Seer) => "Night: Seer",
            Phase::Night(NightStep::Witch) => "Night: Witch",
            Phase::NightResolution => "Dawn",
            Phase::Day(DayStep::Discussion) => "Day: Discussion",
            Phase::Day(DayStep::Vote) => "Day: Vote",
            Phase::Day(DayStep::HunterShot) => "Day: Hunter",
            Phase::DayResolution => "Dusk",
            Phase::Terminal => "Game Over",
        }
    }

    pub fn is_night(&self) -> bool {
        matches!(self, Phase::Night(_) | Phase::NightResolution)
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Final result of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "status", content = "team")]
pub enum Outcome {
    Pending,
    Winner(Team),
    /// Round ceiling reached or the run was cancelled
    Aborted,
}

impl Outcome {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Outcome::Pending)
    }

    pub fn winner(&self) -> Option<Team> {
        match self {
            Outcome::Winner(team) => Some(*team),
            Outcome::Pending | Outcome::Aborted => None,
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Pending => write!(f, "pending"),
            Outcome::Winner(team) => write!(f, "{} wins", team),
            Outcome::Aborted => write!(f, "aborted"),
        }
    }
}

/// Round counter, current phase, append-only log and outcome (Entity)
#[derive(Debug, Clone)]
pub struct GameState {
    round: u32,
    phase: Phase,
    outcome: Outcome,
    log: Vec<Announcement>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    pub fn new() -> Self {
        Self {
            round: 1,
            phase: Phase::Setup,
            outcome: Outcome::Pending,
            log: Vec::new(),
        }
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn log(&self) -> &[Announcement] {
        &self.log
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_terminal()
    }

    pub fn set_phase(&mut self, phase: Phase) {
        self.phase = phase;
    }

    pub fn next_round(&mut self) {
        self.round += 1;
    }

    pub fn record(&mut self, announcement: Announcement) {
        self.log.push(announcement);
    }

    /// Settle the outcome. Allowed exactly once.
    pub fn conclude(&mut self, outcome: Outcome) -> Result<(), DomainError> {
        if self.outcome.is_terminal() {
            return Err(DomainError::OutcomeAlreadySet(self.outcome.to_string()));
        }
        self.outcome = outcome;
        if outcome.is_terminal() {
            self.phase = Phase::Terminal;
        }
        Ok(())
    }
}
