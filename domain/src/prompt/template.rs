//! Prompt templates for each decision point of a game

use crate::channel::ChannelMessage;
use crate::game::participant::ParticipantId;
use crate::game::role::Role;
use serde_json::Value;

/// Templates for generating prompts at each sub-phase
pub struct PromptTemplate;

fn name_list(ids: &[ParticipantId]) -> String {
    if ids.is_empty() {
        return "nobody".to_string();
    }
    ids.iter()
        .map(ParticipantId::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

impl PromptTemplate {
    /// System prompt describing the participant's role card.
    ///
    /// `teammates` is only shown to werewolves; everyone else plays blind.
    pub fn participant_system(id: &ParticipantId, role: Role, teammates: &[ParticipantId]) -> String {
        let definition = role.definition();
        let mut prompt = format!(
            r#"You are {id}, playing a game of Werewolf. Your secret role is {name}.

Role: {description}
Ability: {ability}
Goal: {goal}

Traits:
"#,
            id = id,
            name = definition.name,
            description = definition.description,
            ability = definition.ability,
            goal = definition.win_condition,
        );

        let traits: &[&str] = match role {
            Role::Werewolf => &[
                "You belong to the werewolf team; eliminate the village",
                "At night, agree on a victim with the rest of the pack",
                "During the day, hide your identity and mislead the village",
            ],
            Role::Seer => &[
                "You belong to the village team; find every werewolf",
                "Each night you learn whether one participant is a werewolf",
                "Reveal what you learned carefully and steer the vote",
            ],
            Role::Witch => &[
                "You belong to the village team",
                "Your antidote revives the werewolves' victim, your poison kills anyone",
                "Each potion works once; save them for the moment that matters",
            ],
            Role::Hunter => &[
                "You belong to the village team",
                "If the village votes you out, you may shoot one participant",
                "Make sure the shot takes a werewolf with you",
            ],
            Role::Guardian => &[
                "You belong to the village team",
                "Each night you shield one participant from the werewolves",
                "You cannot shield the same participant two nights in a row",
            ],
            Role::Villager => &[
                "You belong to the village team and have no special ability",
                "Watch the discussion closely and vote out the werewolves",
            ],
        };
        for line in traits {
            prompt.push_str(&format!("- {}\n", line));
        }

        if role.is_werewolf() && !teammates.is_empty() {
            prompt.push_str(&format!("\nYour fellow werewolves: {}\n", name_list(teammates)));
        }

        prompt.push_str(
            "\nAlways answer with a single JSON object matching the requested schema and nothing else.",
        );
        prompt
    }

    /// Moderator announcement opening the werewolves' night channel
    pub fn werewolf_briefing(alive: &[ParticipantId]) -> String {
        format!(
            "Werewolves, discuss tonight's victim. Participants still alive: {}.",
            name_list(alive)
        )
    }

    /// One turn of the werewolves' night discussion
    pub fn werewolf_discussion(round: usize, max_rounds: usize) -> String {
        format!(
            r#"Pack discussion, turn {} of {}.
Share who you want to kill tonight and why. Set "reach_agreement" to true once the pack agrees."#,
            round, max_rounds
        )
    }

    pub fn kill_request(candidates: &[ParticipantId]) -> String {
        format!(
            "Choose tonight's victim. Candidates: {}.",
            name_list(candidates)
        )
    }

    pub fn guard_request(candidates: &[ParticipantId], last_protected: Option<&ParticipantId>) -> String {
        let mut prompt = format!(
            "Guardian, choose one participant to protect from the werewolves tonight. Candidates: {}.",
            name_list(candidates)
        );
        if let Some(last) = last_protected {
            prompt.push_str(&format!(" You protected {} last night and cannot protect them again.", last));
        }
        prompt
    }

    pub fn inspect_request(candidates: &[ParticipantId]) -> String {
        format!(
            "Seer, choose one participant to inspect. You will learn whether they are a werewolf. Candidates: {}.",
            name_list(candidates)
        )
    }

    /// Private briefing for the witch
    pub fn witch_request(
        victim: Option<&ParticipantId>,
        has_antidote: bool,
        has_poison: bool,
        candidates: &[ParticipantId],
    ) -> String {
        let victim_line = match victim {
            Some(id) => format!("The werewolves attacked {} tonight.", id),
            None => "Nobody was attacked tonight.".to_string(),
        };
        let potions = match (has_antidote, has_poison) {
            (true, true) => "You still hold the antidote and the poison.",
            (true, false) => "You still hold the antidote; the poison is used.",
            (false, true) => "You still hold the poison; the antidote is used.",
            (false, false) => "Both potions are used.",
        };
        format!(
            r#"Witch, {victim_line}
{potions}
Set "use_antidote" to revive the victim. Set "use_poison" with "target_name" to poison someone.
Poison candidates: {}."#,
            name_list(candidates)
        )
    }

    /// Moderator announcement opening the day
    pub fn day_briefing(round: u32, alive: &[ParticipantId]) -> String {
        format!(
            "Day {} begins. Participants still alive: {}. Discuss who the werewolves are.",
            round,
            name_list(alive)
        )
    }

    pub fn day_discussion() -> &'static str {
        r#"It is your turn to speak. Put what you say to the village in "statement"."#
    }

    pub fn vote_request(candidates: &[ParticipantId]) -> String {
        format!(
            "Vote for the participant to eliminate. Candidates: {}.",
            name_list(candidates)
        )
    }

    pub fn shoot_request(candidates: &[ParticipantId]) -> String {
        format!(
            r#"You have been voted out. You may shoot one participant before leaving. Set "shoot" and "target", or decline. Candidates: {}."#,
            name_list(candidates)
        )
    }

    /// Full user prompt: recent observations, the request, and the schema
    pub fn decision(request: &str, transcript: &[ChannelMessage], schema: &Value) -> String {
        let mut prompt = String::new();
        if !transcript.is_empty() {
            prompt.push_str("What you have observed so far:\n");
            for message in transcript {
                prompt.push_str(&message.render());
                prompt.push('\n');
            }
            prompt.push('\n');
        }
        prompt.push_str(request);
        prompt.push_str("\n\nRespond with a JSON object matching this schema:\n");
        prompt.push_str(&serde_json::to_string_pretty(schema).unwrap_or_else(|_| schema.to_string()));
        prompt
    }
}
