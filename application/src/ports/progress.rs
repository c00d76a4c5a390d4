//! Progress notification port
//!
//! Defines the interface for reporting progress while a game runs.

use council_domain::{ParticipantId, Phase};

/// Callback for progress updates during a game
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (spinners, plain log lines, ...).
pub trait GameProgressNotifier: Send + Sync {
    /// Called when a sub-phase starts; `pending` is the number of decisions it will request
    fn on_phase_start(&self, phase: &Phase, round: u32, pending: usize);

    /// Called when a participant's decision has been collected
    fn on_decision(&self, phase: &Phase, participant: &ParticipantId, valid: bool);

    /// Called when a sub-phase completes
    fn on_phase_complete(&self, phase: &Phase);
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl GameProgressNotifier for NoProgress {
    fn on_phase_start(&self, _phase: &Phase, _round: u32, _pending: usize) {}
    fn on_decision(&self, _phase: &Phase, _participant: &ParticipantId, _valid: bool) {}
    fn on_phase_complete(&self, _phase: &Phase) {}
}
