//! Progress reporting for game execution

use colored::Colorize;
use council_application::GameProgressNotifier;
use council_domain::{ParticipantId, Phase};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::{Mutex, PoisonError};

/// Reports progress during a game with one progress bar per sub-phase
pub struct ProgressReporter {
    phase_bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            phase_bar: Mutex::new(None),
        }
    }

    fn phase_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }

    fn prefix(phase: &Phase, round: u32) -> String {
        format!("Round {} {}", round, phase.display_name())
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl GameProgressNotifier for ProgressReporter {
    fn on_phase_start(&self, phase: &Phase, round: u32, pending: usize) {
        // Resolution steps ask nobody
        if pending == 0 {
            return;
        }

        let pb = ProgressBar::new(pending as u64);
        pb.set_style(Self::phase_style());
        pb.set_prefix(Self::prefix(phase, round));
        pb.set_message("Waiting...");

        let previous = self
            .phase_bar
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(pb);
        if let Some(previous) = previous {
            previous.finish_and_clear();
        }
    }

    fn on_decision(&self, _phase: &Phase, participant: &ParticipantId, valid: bool) {
        let guard = self.phase_bar.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(pb) = guard.as_ref() {
            let status = if valid {
                format!("{} {}", "v".green(), participant)
            } else {
                format!("{} {} (fallback)", "x".red(), participant)
            };
            pb.set_message(status);
            pb.inc(1);
        }
    }

    fn on_phase_complete(&self, _phase: &Phase) {
        // Clear so narration printed afterwards is not interleaved with bars
        if let Some(pb) = self
            .phase_bar
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        {
            pb.finish_and_clear();
        }
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl GameProgressNotifier for SimpleProgress {
    fn on_phase_start(&self, phase: &Phase, round: u32, pending: usize) {
        if pending > 0 {
            eprintln!(
                "{} {} ({} to decide)",
                "->".cyan(),
                ProgressReporter::prefix(phase, round).bold(),
                pending
            );
        }
    }

    fn on_decision(&self, _phase: &Phase, participant: &ParticipantId, valid: bool) {
        if valid {
            eprintln!("  {} {}", "v".green(), participant);
        } else {
            eprintln!("  {} {} (fallback)", "x".red(), participant);
        }
    }

    fn on_phase_complete(&self, _phase: &Phase) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use council_domain::{DayStep, NightStep};

    #[test]
    fn test_prefix_names_round_and_step() {
        assert_eq!(
            ProgressReporter::prefix(&Phase::Night(NightStep::Seer), 3),
            "Round 3 Night: Seer"
        );
    }

    #[test]
    fn test_bar_lifecycle() {
        let reporter = ProgressReporter::new();
        let phase = Phase::Day(DayStep::Vote);
        reporter.on_phase_start(&phase, 1, 2);
        reporter.on_decision(&phase, &"Liu Bei".into(), true);
        reporter.on_decision(&phase, &"Cao Cao".into(), false);
        {
            let guard = reporter.phase_bar.lock().unwrap();
            assert_eq!(guard.as_ref().unwrap().position(), 2);
        }
        reporter.on_phase_complete(&phase);
        assert!(reporter.phase_bar.lock().unwrap().is_none());
    }

    #[test]
    fn test_simple_progress_lifecycle() {
        let notifier: &dyn GameProgressNotifier = &SimpleProgress;
        let phase = Phase::Night(NightStep::Witch);
        notifier.on_phase_start(&phase, 2, 1);
        notifier.on_decision(&phase, &"Liu Bei".into(), false);
        notifier.on_phase_complete(&phase);
        notifier.on_phase_start(&Phase::DayResolution, 2, 0);
    }

    #[test]
    fn test_resolution_steps_draw_nothing() {
        let reporter = ProgressReporter::new();
        reporter.on_phase_start(&Phase::NightResolution, 1, 0);
        assert!(reporter.phase_bar.lock().unwrap().is_none());
    }
}
