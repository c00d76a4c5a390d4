//! Run Game use case
//!
//! Drives one game from setup to a terminal outcome:
//!
//! ```text
//! Setup ─▶ Night ─▶ Dawn ─▶ win? ─▶ Day ─▶ Dusk ─▶ win? ─▶ round ceiling? ─▶ next round
//! ```
//!
//! The game session owns the registry, the game state and the channels.
//! Nothing else mutates them; the decision collector only returns values.

mod day;
mod night;

use crate::config::GameConfig;
use crate::ports::announcement_sink::{AnnouncementSink, NoAnnouncementSink};
use crate::ports::oracle::DecisionOracle;
use crate::ports::progress::{GameProgressNotifier, NoProgress};
use crate::use_cases::collect_decisions::{DecisionCollector, DecisionRequest};
use council_domain::{
    Announcement, AnnouncementKind, ChannelManager, CollectedDecision, DayStep, DecisionKind,
    DomainError, FallbackPolicy, GameReport, GameState, NightStep, Outcome, Participant,
    ParticipantId, ParticipantRegistry, Phase, PromptTemplate, RoleDistribution, SetupError, ValidationContext,
    Visibility, check_winner,
};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Errors that can end a game early
#[derive(Error, Debug)]
pub enum RunGameError {
    #[error("Invariant violated: {0}")]
    Invariant(#[from] DomainError),
}

/// Use case for running a game
pub struct RunGameUseCase {
    oracle: Arc<dyn DecisionOracle>,
    config: GameConfig,
    distribution: RoleDistribution,
}

impl RunGameUseCase {
    /// Validate the configuration; an invalid table never starts.
    pub fn new(oracle: Arc<dyn DecisionOracle>, config: GameConfig) -> Result<Self, SetupError> {
        let distribution = config.validate()?;
        Ok(Self {
            oracle,
            config,
            distribution,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn distribution(&self) -> &RoleDistribution {
        &self.distribution
    }

    /// Run a game with no listeners
    pub async fn execute(&self) -> Result<GameReport, RunGameError> {
        self.execute_with(&NoAnnouncementSink, &NoProgress, CancellationToken::new())
            .await
    }

    /// Run a game, publishing announcements and progress.
    ///
    /// `cancel` is checked between sub-phases. A cancelled game finishes the
    /// resolution in progress and ends as [`Outcome::Aborted`]. A night cut
    /// short still reaches dawn: the werewolves' kill is applied, and the
    /// guardian or witch steps that were skipped cannot prevent it.
    pub async fn execute_with(
        &self,
        sink: &dyn AnnouncementSink,
        progress: &dyn GameProgressNotifier,
        cancel: CancellationToken,
    ) -> Result<GameReport, RunGameError> {
        let mut game = Game::setup(
            &self.config,
            &self.distribution,
            Arc::clone(&self.oracle),
            sink,
            progress,
            cancel,
        )?;
        game.play().await?;
        Ok(game.report())
    }
}

fn ids(participants: Vec<&Participant>) -> Vec<ParticipantId> {
    participants.into_iter().map(|p| p.id().clone()).collect()
}

fn banner(phase: &Phase, round: u32) -> String {
    match phase {
        Phase::Night(NightStep::Werewolves) => "The werewolves wake up.".to_string(),
        Phase::Night(NightStep::Guardian) => "The guardian wakes up.".to_string(),
        Phase::Night(NightStep::Seer) => "The seer wakes up.".to_string(),
        Phase::Night(NightStep::Witch) => "The witch wakes up.".to_string(),
        Phase::NightResolution => "Dawn breaks.".to_string(),
        Phase::Day(DayStep::Discussion) => format!("Day {} begins.", round),
        Phase::Day(DayStep::Vote) => "The village votes.".to_string(),
        Phase::Day(DayStep::HunterShot) => "The hunter takes a last shot.".to_string(),
        Phase::DayResolution => "Dusk falls.".to_string(),
        Phase::Setup | Phase::Terminal => phase.to_string(),
    }
}

/// State of one running game
struct Game<'a> {
    config: &'a GameConfig,
    collector: DecisionCollector,
    registry: ParticipantRegistry,
    state: GameState,
    channels: ChannelManager,
    system_prompts: HashMap<ParticipantId, String>,
    /// Whoever the guardian protected last night
    last_protected: Option<ParticipantId>,
    sink: &'a dyn AnnouncementSink,
    progress: &'a dyn GameProgressNotifier,
    cancel: CancellationToken,
}

impl<'a> Game<'a> {
    fn setup(
        config: &'a GameConfig,
        distribution: &RoleDistribution,
        oracle: Arc<dyn DecisionOracle>,
        sink: &'a dyn AnnouncementSink,
        progress: &'a dyn GameProgressNotifier,
        cancel: CancellationToken,
    ) -> Result<Self, RunGameError> {
        let seed = config.seed.unwrap_or_else(rand::random);
        let mut rng = StdRng::seed_from_u64(seed);

        let mut deck = distribution.deck();
        if config.shuffle_roles {
            deck.shuffle(&mut rng);
        }

        let mut registry = ParticipantRegistry::new();
        for (index, (name, role)) in config.seat_names().into_iter().zip(deck).enumerate() {
            registry.create(name, role, config.model_for(index))?;
        }

        let collector = DecisionCollector::new(oracle, rng.random())
            .with_timeout(config.decision_timeout);

        let mut game = Self {
            config,
            collector,
            registry,
            state: GameState::new(),
            channels: ChannelManager::new(),
            system_prompts: HashMap::new(),
            last_protected: None,
            sink,
            progress,
            cancel,
        };
        game.deal();
        info!(
            "Game set up with {} participants (seed {})",
            game.registry.len(),
            seed
        );
        Ok(game)
    }

    /// Brief every participant on their role
    fn deal(&mut self) {
        let werewolves = ids(self.registry.alive_of(|p| p.role().is_werewolf()));
        let table = ids(self.registry.alive());

        let mut cards = Vec::with_capacity(table.len());
        for participant in self.registry.all() {
            let id = participant.id();
            let role = participant.role();
            let teammates: Vec<ParticipantId> =
                werewolves.iter().filter(|w| *w != id).cloned().collect();
            self.system_prompts.insert(
                id.clone(),
                PromptTemplate::participant_system(id, role, &teammates),
            );
            self.channels
                .notify(id, format!("You are {}. Your role is {}.", id, role));
            cards.push((id.clone(), role));
        }

        let names = table
            .iter()
            .map(ParticipantId::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        self.broadcast(
            AnnouncementKind::GameStarted,
            format!(
                "The game begins with {} participants: {}.",
                table.len(),
                names
            ),
        );
        for (id, role) in cards {
            self.announce(Announcement::scoped(
                AnnouncementKind::GameStarted,
                self.state.round(),
                format!("{} is the {}.", id, role),
                Visibility::only(&id),
            ));
        }
    }

    async fn play(&mut self) -> Result<(), RunGameError> {
        loop {
            if self.cancelled() {
                return self.finish(Outcome::Aborted);
            }

            self.night().await?;
            if let Some(team) = check_winner(&self.registry) {
                return self.finish(Outcome::Winner(team));
            }
            if self.cancelled() {
                return self.finish(Outcome::Aborted);
            }

            self.day().await?;
            if let Some(team) = check_winner(&self.registry) {
                return self.finish(Outcome::Winner(team));
            }

            if self.state.round() >= self.config.max_rounds {
                info!(
                    "No winner after {} rounds, aborting",
                    self.config.max_rounds
                );
                return self.finish(Outcome::Aborted);
            }
            self.state.next_round();
        }
    }

    fn finish(&mut self, outcome: Outcome) -> Result<(), RunGameError> {
        self.state.conclude(outcome)?;
        let text = match outcome {
            Outcome::Winner(team) => format!("Game over: {} wins.", team),
            Outcome::Aborted if self.cancelled() => "Game over: the game was cancelled.".to_string(),
            Outcome::Aborted | Outcome::Pending => format!(
                "Game over: no winner after {} rounds.",
                self.state.round()
            ),
        };
        info!("{}", text);
        self.broadcast(AnnouncementKind::GameOver, text);
        Ok(())
    }

    fn report(&self) -> GameReport {
        GameReport::new(&self.registry, &self.state)
    }

    fn cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    // ==================== Phase bookkeeping ====================

    /// Move to `phase` and announce it to whoever takes part in it
    fn enter(&mut self, phase: Phase, pending: usize, visible_to: Visibility) {
        let round = self.state.round();
        info!("Round {}: {}", round, phase);
        self.state.set_phase(phase);
        self.announce(Announcement::scoped(
            AnnouncementKind::PhaseStarted,
            round,
            banner(&phase, round),
            visible_to,
        ));
        self.progress.on_phase_start(&phase, round, pending);
    }

    fn leave(&self) {
        self.progress.on_phase_complete(&self.state.phase());
    }

    /// Record an announcement and hand it to the sink
    fn announce(&mut self, announcement: Announcement) {
        self.sink.announce(&announcement);
        self.state.record(announcement);
    }

    /// Public moderator announcement, also delivered to every transcript
    fn broadcast(&mut self, kind: AnnouncementKind, text: String) {
        let everyone = ids(self.registry.all().iter().collect());
        self.channels.notify_all(&everyone, &text);
        self.announce(Announcement::public(kind, self.state.round(), text));
    }

    // ==================== Decisions ====================

    fn request(&self, id: &ParticipantId, instruction: String) -> DecisionRequest {
        DecisionRequest {
            participant: id.clone(),
            model: self
                .registry
                .get(id)
                .map(|p| p.model().clone())
                .unwrap_or_default(),
            system_prompt: self.system_prompts.get(id).cloned().unwrap_or_default(),
            instruction,
            transcript: self.channels.transcript(id, self.config.transcript_limit),
        }
    }

    async fn ask_one<T: DecisionKind>(
        &self,
        id: &ParticipantId,
        instruction: String,
        eligible: Vec<ParticipantId>,
        fallback: FallbackPolicy,
    ) -> CollectedDecision<T> {
        let request = self.request(id, instruction);
        let decision = self
            .collector
            .collect_one::<T>(request, &ValidationContext::new(eligible), &fallback)
            .await;
        self.progress
            .on_decision(&self.state.phase(), id, decision.outcome.is_valid());
        decision
    }

    /// Ask everyone in `participants` the same question, in the configured vote mode
    async fn ask_many<T: DecisionKind>(
        &self,
        participants: &[ParticipantId],
        instruction: String,
        eligible: Vec<ParticipantId>,
        fallback: FallbackPolicy,
    ) -> Vec<CollectedDecision<T>> {
        let requests = participants
            .iter()
            .map(|id| self.request(id, instruction.clone()))
            .collect();
        let decisions = self
            .collector
            .collect::<T>(
                requests,
                self.config.vote_mode,
                &ValidationContext::new(eligible),
                &fallback,
            )
            .await;
        for decision in &decisions {
            self.progress.on_decision(
                &self.state.phase(),
                &decision.participant,
                decision.outcome.is_valid(),
            );
        }
        decisions
    }
}
