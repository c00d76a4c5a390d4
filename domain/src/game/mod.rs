//! Game domain
//!
//! Participants, their roles and the state the phase state machine drives.
//!
//! ```text
//! Setup ─▶ Night (werewolves ─▶ guardian ─▶ seer ─▶ witch) ─▶ Dawn ─▶ win check
//!            ▲                                                          │
//!            │                                                          ▼
//!          loop ◀── win check ◀── Dusk ◀── Day (discussion ─▶ vote ─▶ hunter)
//! ```

pub mod announcement;
pub mod participant;
pub mod registry;
pub mod report;
pub mod role;
pub mod setup;
pub mod state;
pub mod win;

pub use announcement::{Announcement, AnnouncementKind, Visibility};
pub use participant::{Participant, ParticipantId};
pub use registry::ParticipantRegistry;
pub use report::{GameReport, ParticipantSummary};
pub use role::{Ability, Role, RoleDefinition, Team};
pub use setup::{MIN_PLAYERS, RoleDistribution, SetupError};
pub use state::{DayStep, GameState, NightStep, Outcome, Phase};
pub use win::check_winner;
