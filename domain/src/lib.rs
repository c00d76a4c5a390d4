//! Domain layer for werewolf-council
//!
//! This crate contains the rules of the game: roles, participants, channels,
//! decisions and votes. It has no dependencies on infrastructure or
//! presentation concerns and performs no I/O.
//!
//! # Core Concepts
//!
//! ## Participants
//!
//! Every seat is a [`Participant`] with a fixed [`Role`], played by a decision
//! oracle named by its [`Model`]. The [`ParticipantRegistry`] is the single
//! place where participants die or spend abilities.
//!
//! ## Channels
//!
//! A [`ChannelScope`] limits who hears a message. The werewolves talk in a
//! private channel at night; the whole village talks during the day. Turning
//! auto-broadcast off makes submissions simultaneous.
//!
//! ## Decisions
//!
//! Oracles answer with JSON. Each [`DecisionKind`] deserializes and validates
//! it into a [`StructuredDecision`]; invalid answers never crash a phase, the
//! call site's [`FallbackPolicy`] replaces them.

pub mod channel;
pub mod config;
pub mod core;
pub mod decision;
pub mod game;
pub mod prompt;
pub mod vote;

// Re-export commonly used types
pub use channel::{ChannelId, ChannelManager, ChannelMessage, ChannelScope, Sender};
pub use config::OutputFormat;
pub use core::{error::DomainError, model::Model};
pub use decision::{
    CollectedDecision, DecisionKind, DecisionOutcome, DiscussionTurn, FallbackAction,
    FallbackPolicy, GuardDecision, InspectDecision, InvalidReason, KillDecision, ShootDecision,
    StructuredDecision, ValidationContext, VoteDecision, WitchDecision, extract_json_object,
    interpret,
};
pub use game::{
    Ability, Announcement, AnnouncementKind, DayStep, GameReport, GameState, MIN_PLAYERS,
    NightStep, Outcome, Participant, ParticipantId, ParticipantRegistry, ParticipantSummary,
    Phase, Role, RoleDefinition, RoleDistribution, SetupError, Team, Visibility, check_winner,
};
pub use prompt::PromptTemplate;
pub use vote::{Ballot, VoteTally, tally};
