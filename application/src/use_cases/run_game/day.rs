//! Day: open discussion, simultaneous vote, hunter shots, then dusk

use super::{Game, RunGameError};
use council_domain::{
    Ability, Announcement, AnnouncementKind, Ballot, DayStep, DiscussionTurn, FallbackPolicy,
    ParticipantId, Phase, PromptTemplate, ShootDecision, Visibility, VoteDecision, check_winner,
    tally,
};
use tracing::info;

impl Game<'_> {
    pub(super) async fn day(&mut self) -> Result<(), RunGameError> {
        let round = self.state.round();
        let alive = self.registry.alive_ids();
        self.enter(
            Phase::Day(DayStep::Discussion),
            alive.len(),
            Visibility::Everyone,
        );

        let channel = self.channels.open(
            "village",
            alive.clone(),
            true,
            Some(PromptTemplate::day_briefing(round, &alive).as_str()),
        );

        for id in &alive {
            let turn = self
                .ask_one::<DiscussionTurn>(
                    id,
                    PromptTemplate::day_discussion().to_string(),
                    alive.clone(),
                    FallbackPolicy::Abstain,
                )
                .await;
            if let Some(turn) = turn.outcome.valid() {
                channel.submit(id, turn.statement.as_str())?;
                self.announce(Announcement::public(
                    AnnouncementKind::Speech,
                    round,
                    format!("{}: {}", id, turn.statement),
                ));
            }
        }
        self.leave();
        if self.cancelled() {
            return Ok(());
        }

        self.enter(Phase::Day(DayStep::Vote), alive.len(), Visibility::Everyone);
        channel.set_auto_broadcast(false);
        channel.announce("Cast your vote.");
        let votes = self
            .ask_many::<VoteDecision>(
                &alive,
                PromptTemplate::vote_request(&alive),
                alive.clone(),
                FallbackPolicy::Abstain,
            )
            .await;

        let mut ballots = Vec::with_capacity(votes.len());
        for vote in &votes {
            if let Some(decision) = vote.outcome.valid() {
                channel.submit(
                    &vote.participant,
                    format!("I vote for {}: {}", decision.vote, decision.reason),
                )?;
            }
            ballots.push(Ballot {
                voter: vote.participant.clone(),
                target: vote.target().cloned(),
            });
        }
        let result = tally(ballots);
        channel.close();

        let text = match &result.winner {
            Some(id) => format!("Vote result: {}. {} is eliminated.", result.summary(), id),
            None => format!("Vote result: {}. Nobody is eliminated.", result.summary()),
        };
        self.broadcast(AnnouncementKind::VoteResult, text);
        self.leave();

        if let Some(eliminated) = result.winner {
            self.eliminate(eliminated).await?;
        }

        self.enter(Phase::DayResolution, 0, Visibility::Everyone);
        info!(
            "Day {} ends with {} participants alive",
            round,
            self.registry.alive_count()
        );
        self.leave();
        Ok(())
    }

    /// Apply a vote elimination, following hunter shots until one misses,
    /// declines, or a team has won
    async fn eliminate(&mut self, voted_out: ParticipantId) -> Result<(), RunGameError> {
        let mut next = Some((voted_out, None::<ParticipantId>));

        while let Some((target, shooter)) = next.take() {
            let armed = self.registry.consume_ability(&target, Ability::HunterShot);
            self.registry.mark_dead(&target)?;
            let text = match &shooter {
                None => format!("{} was voted out.", target),
                Some(hunter) => format!("{} was shot by {}.", target, hunter),
            };
            self.broadcast(AnnouncementKind::Death, text);

            if !armed || check_winner(&self.registry).is_some() {
                break;
            }

            self.enter(Phase::Day(DayStep::HunterShot), 1, Visibility::only(&target));
            let candidates = self.registry.alive_ids();
            let shot = self
                .ask_one::<ShootDecision>(
                    &target,
                    PromptTemplate::shoot_request(&candidates),
                    candidates,
                    FallbackPolicy::SkipAbility,
                )
                .await;
            self.leave();

            if let Some(victim) = shot.target().cloned() {
                info!("Hunter {} shoots {}", target, victim);
                next = Some((victim, Some(target)));
            }
        }
        Ok(())
    }
}
