//! Channel entities

use crate::game::participant::ParticipantId;
use serde::{Deserialize, Serialize};

/// Handle identifying an open channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChannelId(pub u64);

impl std::fmt::Display for ChannelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Author of a channel message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    Moderator,
    Participant(ParticipantId),
}

impl std::fmt::Display for Sender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Sender::Moderator => write!(f, "Moderator"),
            Sender::Participant(id) => write!(f, "{}", id),
        }
    }
}

/// A message as observed by a participant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelMessage {
    /// Name of the channel it was delivered through (`"private"` for direct notes)
    pub channel: String,
    pub sender: Sender,
    pub content: String,
}

impl ChannelMessage {
    pub fn new(channel: impl Into<String>, sender: Sender, content: impl Into<String>) -> Self {
        Self {
            channel: channel.into(),
            sender,
            content: content.into(),
        }
    }

    /// Single-line rendering used in prompt transcripts
    pub fn render(&self) -> String {
        format!("[{}] {}: {}", self.channel, self.sender, self.content)
    }
}

/// An open communication scope
#[derive(Debug, Clone)]
pub struct Channel {
    pub id: ChannelId,
    pub name: String,
    pub members: Vec<ParticipantId>,
    pub auto_broadcast: bool,
    /// Messages submitted while auto-broadcast was off
    pub withheld: Vec<ChannelMessage>,
}

impl Channel {
    pub fn is_member(&self, id: &ParticipantId) -> bool {
        self.members.contains(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render() {
        let message = ChannelMessage::new(
            "werewolves",
            Sender::Participant(ParticipantId::new("Cao Cao")),
            "Take the seer tonight.",
        );
        assert_eq!(message.render(), "[werewolves] Cao Cao: Take the seer tonight.");

        let note = ChannelMessage::new("private", Sender::Moderator, "You are the witch.");
        assert_eq!(note.render(), "[private] Moderator: You are the witch.");
    }
}
