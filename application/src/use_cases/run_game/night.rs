//! Night: werewolves, guardian, seer, witch, then dawn

use super::{Game, RunGameError, ids};
use council_domain::{
    Ability, Announcement, AnnouncementKind, Ballot, DiscussionTurn, FallbackPolicy,
    GuardDecision, InspectDecision, KillDecision, NightStep, ParticipantId, Phase, PromptTemplate,
    Role, Visibility, WitchDecision, tally,
};
use tracing::{debug, info};

/// What the witch decided to do tonight
#[derive(Debug, Default)]
struct WitchAction {
    witch: Option<ParticipantId>,
    revive: bool,
    poison: Option<ParticipantId>,
}

/// Decisions gathered during the night, applied together at dawn
#[derive(Debug, Default)]
struct NightPlan {
    kill: Option<ParticipantId>,
    protected: Option<ParticipantId>,
    witch: WitchAction,
}

impl Game<'_> {
    /// Run every night sub-phase, then resolve. Returns who died.
    pub(super) async fn night(&mut self) -> Result<Vec<ParticipantId>, RunGameError> {
        let round = self.state.round();
        self.announce(Announcement::public(
            AnnouncementKind::PhaseStarted,
            round,
            format!("Night {} falls.", round),
        ));

        let mut plan = NightPlan {
            kill: self.werewolf_step().await?,
            ..NightPlan::default()
        };
        if !self.cancelled() {
            plan.protected = self.guardian_step().await;
        }
        if !self.cancelled() {
            self.seer_step().await;
        }
        if !self.cancelled() {
            plan.witch = self.witch_step(plan.kill.as_ref()).await;
        }

        self.resolve_night(plan)
    }

    /// Pack discussion in a private channel, then a simultaneous kill vote
    async fn werewolf_step(&mut self) -> Result<Option<ParticipantId>, RunGameError> {
        let werewolves = ids(self.registry.alive_with_role(Role::Werewolf));
        if werewolves.is_empty() {
            return Ok(None);
        }
        let alive = self.registry.alive_ids();
        let candidates = ids(self.registry.alive_of(|p| !p.role().is_werewolf()));
        let round = self.state.round();
        self.enter(
            Phase::Night(NightStep::Werewolves),
            werewolves.len(),
            Visibility::Members(werewolves.clone()),
        );

        let channel = self.channels.open(
            "werewolves",
            werewolves.clone(),
            true,
            Some(PromptTemplate::werewolf_briefing(&alive).as_str()),
        );

        let max_turns = self.config.max_discussion_rounds;
        for turn in 1..=max_turns {
            let mut agreed = 0;
            for werewolf in &werewolves {
                let said = self
                    .ask_one::<DiscussionTurn>(
                        werewolf,
                        PromptTemplate::werewolf_discussion(turn, max_turns),
                        alive.clone(),
                        FallbackPolicy::Abstain,
                    )
                    .await;
                if let Some(said) = said.outcome.valid() {
                    channel.submit(werewolf, said.statement.as_str())?;
                    if said.reach_agreement {
                        agreed += 1;
                    }
                }
            }
            if agreed == werewolves.len() {
                debug!("Werewolves agreed after {} turn(s)", turn);
                break;
            }
        }

        channel.set_auto_broadcast(false);
        channel.announce("Submit your kill decision.");
        let kills = self
            .ask_many::<KillDecision>(
                &werewolves,
                PromptTemplate::kill_request(&candidates),
                candidates.clone(),
                FallbackPolicy::RandomValidTarget(candidates),
            )
            .await;

        let mut ballots = Vec::with_capacity(kills.len());
        for kill in &kills {
            if let Some(decision) = kill.outcome.valid() {
                channel.submit(
                    &kill.participant,
                    format!("I choose {}: {}", decision.target, decision.kill_strategy),
                )?;
            }
            ballots.push(Ballot {
                voter: kill.participant.clone(),
                target: kill.target().cloned(),
            });
        }
        let result = tally(ballots);

        let text = match &result.winner {
            Some(target) => format!("The werewolves chose {} ({}).", target, result.summary()),
            None => "The werewolves could not agree on a victim.".to_string(),
        };
        channel.announce(&text);
        channel.close();
        self.announce(Announcement::scoped(
            AnnouncementKind::VoteResult,
            round,
            text,
            Visibility::Members(werewolves),
        ));
        self.leave();
        Ok(result.winner)
    }

    /// The guardian shields one participant, never the same one twice in a row
    async fn guardian_step(&mut self) -> Option<ParticipantId> {
        let guardian = ids(self.registry.alive_with_role(Role::Guardian))
            .into_iter()
            .next()?;
        self.enter(Phase::Night(NightStep::Guardian), 1, Visibility::only(&guardian));

        let candidates: Vec<ParticipantId> = self
            .registry
            .alive_ids()
            .into_iter()
            .filter(|id| Some(id) != self.last_protected.as_ref())
            .collect();
        let instruction = PromptTemplate::guard_request(&candidates, self.last_protected.as_ref());
        let decision = self
            .ask_one::<GuardDecision>(&guardian, instruction, candidates, FallbackPolicy::Abstain)
            .await;

        let protected = decision.target().cloned();
        if let Some(target) = &protected {
            self.announce(Announcement::scoped(
                AnnouncementKind::AbilityUsed,
                self.state.round(),
                format!("{} protects {} tonight.", guardian, target),
                Visibility::only(&guardian),
            ));
        }
        self.last_protected = protected.clone();
        self.leave();
        protected
    }

    /// The seer privately learns one participant's team
    async fn seer_step(&mut self) {
        let Some(seer) = ids(self.registry.alive_with_role(Role::Seer))
            .into_iter()
            .next()
        else {
            return;
        };
        self.enter(Phase::Night(NightStep::Seer), 1, Visibility::only(&seer));

        let candidates: Vec<ParticipantId> = self
            .registry
            .alive_ids()
            .into_iter()
            .filter(|id| *id != seer)
            .collect();
        let decision = self
            .ask_one::<InspectDecision>(
                &seer,
                PromptTemplate::inspect_request(&candidates),
                candidates,
                FallbackPolicy::Abstain,
            )
            .await;

        if let Some(target) = decision.target() {
            let is_werewolf = self
                .registry
                .get(target)
                .is_some_and(|p| p.role().is_werewolf());
            let text = if is_werewolf {
                format!("{} is a werewolf.", target)
            } else {
                format!("{} is not a werewolf.", target)
            };
            self.channels.notify(&seer, text.clone());
            self.announce(Announcement::scoped(
                AnnouncementKind::Inspection,
                self.state.round(),
                text,
                Visibility::only(&seer),
            ));
        }
        self.leave();
    }

    /// The witch hears tonight's victim and may use her remaining potions
    async fn witch_step(&mut self, victim: Option<&ParticipantId>) -> WitchAction {
        let Some(witch) = self.registry.alive_with_role(Role::Witch).first().copied() else {
            return WitchAction::default();
        };
        let witch_id = witch.id().clone();
        let has_antidote = witch.has_ability(Ability::Antidote);
        let has_poison = witch.has_ability(Ability::Poison);
        if !has_antidote && !has_poison {
            return WitchAction::default();
        }
        self.enter(Phase::Night(NightStep::Witch), 1, Visibility::only(&witch_id));

        let candidates: Vec<ParticipantId> = self
            .registry
            .alive_ids()
            .into_iter()
            .filter(|id| *id != witch_id)
            .collect();
        if let Some(victim) = victim {
            self.channels.notify(
                &witch_id,
                format!("Tonight the werewolves attacked {}.", victim),
            );
        }
        let instruction =
            PromptTemplate::witch_request(victim, has_antidote, has_poison, &candidates);
        let decision = self
            .ask_one::<WitchDecision>(&witch_id, instruction, candidates, FallbackPolicy::SkipAbility)
            .await;

        let mut action = WitchAction {
            witch: Some(witch_id),
            ..WitchAction::default()
        };
        if let Some(choice) = decision.outcome.valid() {
            action.revive = choice.use_antidote && has_antidote && victim.is_some();
            if !action.revive && has_poison {
                action.poison = choice.poison_target().cloned();
            }
        }
        self.leave();
        action
    }

    /// Dawn: apply the kill, protection, antidote and poison together
    fn resolve_night(&mut self, plan: NightPlan) -> Result<Vec<ParticipantId>, RunGameError> {
        self.enter(Phase::NightResolution, 0, Visibility::Everyone);
        let round = self.state.round();
        let mut deaths = Vec::new();

        let witch = plan.witch.witch.clone();
        if let Some(victim) = plan.kill {
            let guarded = plan.protected.as_ref() == Some(&victim);
            let revived = plan.witch.revive
                && witch
                    .as_ref()
                    .is_some_and(|w| self.registry.consume_ability(w, Ability::Antidote));

            if let (true, Some(witch)) = (revived, &witch) {
                self.announce(Announcement::scoped(
                    AnnouncementKind::AbilityUsed,
                    round,
                    format!("You used the antidote on {}.", victim),
                    Visibility::only(witch),
                ));
            }
            if guarded {
                info!("{} was protected from the werewolves", victim);
            } else if revived {
                info!("{} was revived by the witch", victim);
            } else {
                deaths.push(victim);
            }
        }

        if let (Some(witch), Some(target)) = (&witch, plan.witch.poison)
            && self.registry.consume_ability(witch, Ability::Poison)
        {
            self.announce(Announcement::scoped(
                AnnouncementKind::AbilityUsed,
                round,
                format!("You poisoned {}.", target),
                Visibility::only(witch),
            ));
            if !deaths.contains(&target) {
                deaths.push(target);
            }
        }

        for id in &deaths {
            self.registry.mark_dead(id)?;
            self.broadcast(
                AnnouncementKind::Death,
                format!("{} was found dead at dawn.", id),
            );
        }
        if deaths.is_empty() {
            self.broadcast(
                AnnouncementKind::PeacefulNight,
                "The night was peaceful. Nobody died.".to_string(),
            );
        }
        self.leave();
        Ok(deaths)
    }
}
