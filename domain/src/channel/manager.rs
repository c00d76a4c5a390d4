//! Channel manager
//!
//! Decides who can see what. Each participant has a transcript of everything
//! they observed; channels route messages into those transcripts.
//!
//! Channels are scoped resources: [`ChannelManager::open`] returns a
//! [`ChannelScope`] that closes its channel when dropped, so a channel never
//! outlives the sub-phase that opened it, whatever exit path the phase takes.

use super::entities::{Channel, ChannelId, ChannelMessage, Sender};
use crate::core::error::DomainError;
use crate::game::participant::ParticipantId;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::debug;

/// Channel name used for direct moderator notes
pub const PRIVATE_CHANNEL: &str = "private";

#[derive(Debug, Default)]
struct Inner {
    next_id: u64,
    open: HashMap<ChannelId, Channel>,
    transcripts: HashMap<ParticipantId, Vec<ChannelMessage>>,
}

impl Inner {
    fn deliver(&mut self, to: &ParticipantId, message: ChannelMessage) {
        self.transcripts.entry(to.clone()).or_default().push(message);
    }
}

/// Shared handle to channel state. Cloning is cheap and shares state.
#[derive(Debug, Clone, Default)]
pub struct ChannelManager {
    inner: Arc<Mutex<Inner>>,
}

impl ChannelManager {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Open a channel over `members`.
    ///
    /// `announcement`, when given, is delivered to every member from the
    /// moderator before the handle is returned.
    pub fn open(
        &self,
        name: impl Into<String>,
        members: Vec<ParticipantId>,
        auto_broadcast: bool,
        announcement: Option<&str>,
    ) -> ChannelScope {
        let name = name.into();
        let mut inner = self.lock();
        let id = ChannelId(inner.next_id);
        inner.next_id += 1;

        if let Some(text) = announcement {
            let message = ChannelMessage::new(name.clone(), Sender::Moderator, text);
            for member in &members {
                inner.deliver(member, message.clone());
            }
        }

        debug!(
            "Opened channel {} '{}' with {} members (auto_broadcast={})",
            id,
            name,
            members.len(),
            auto_broadcast
        );
        inner.open.insert(
            id,
            Channel {
                id,
                name: name.clone(),
                members,
                auto_broadcast,
                withheld: Vec::new(),
            },
        );

        ChannelScope {
            manager: self.clone(),
            id,
            name,
            closed: false,
        }
    }

    /// Deliver a private moderator note to a single participant
    pub fn notify(&self, to: &ParticipantId, text: impl Into<String>) {
        let message = ChannelMessage::new(PRIVATE_CHANNEL, Sender::Moderator, text);
        self.lock().deliver(to, message);
    }

    /// Deliver a public moderator note to every listed participant
    pub fn notify_all(&self, recipients: &[ParticipantId], text: &str) {
        let mut inner = self.lock();
        for to in recipients {
            inner.deliver(
                to,
                ChannelMessage::new("public", Sender::Moderator, text),
            );
        }
    }

    /// The `limit` most recent messages `participant` observed, oldest first
    pub fn transcript(&self, participant: &ParticipantId, limit: usize) -> Vec<ChannelMessage> {
        let inner = self.lock();
        let Some(messages) = inner.transcripts.get(participant) else {
            return Vec::new();
        };
        let start = messages.len().saturating_sub(limit);
        messages[start..].to_vec()
    }

    /// Number of channels currently open
    pub fn open_count(&self) -> usize {
        self.lock().open.len()
    }

    fn close(&self, id: ChannelId) {
        if let Some(channel) = self.lock().open.remove(&id) {
            debug!(
                "Closed channel {} '{}' ({} withheld messages)",
                id,
                channel.name,
                channel.withheld.len()
            );
        }
    }
}

/// An open channel. Dropping the scope closes the channel.
#[derive(Debug)]
pub struct ChannelScope {
    manager: ChannelManager,
    id: ChannelId,
    name: String,
    closed: bool,
}

impl ChannelScope {
    pub fn id(&self) -> ChannelId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn members(&self) -> Vec<ParticipantId> {
        self.manager
            .lock()
            .open
            .get(&self.id)
            .map(|c| c.members.clone())
            .unwrap_or_default()
    }

    pub fn is_auto_broadcast(&self) -> bool {
        self.manager
            .lock()
            .open
            .get(&self.id)
            .is_some_and(|c| c.auto_broadcast)
    }

    pub fn set_auto_broadcast(&self, enabled: bool) {
        if let Some(channel) = self.manager.lock().open.get_mut(&self.id) {
            channel.auto_broadcast = enabled;
        }
    }

    /// Submit a member's message.
    ///
    /// With auto-broadcast on, every member's transcript (the sender's
    /// included) receives it before this returns. With auto-broadcast off it
    /// is kept in the channel and nobody else sees it.
    pub fn submit(
        &self,
        sender: &ParticipantId,
        content: impl Into<String>,
    ) -> Result<(), DomainError> {
        let mut inner = self.manager.lock();
        let channel = inner
            .open
            .get_mut(&self.id)
            .ok_or_else(|| DomainError::ChannelClosed(self.name.clone()))?;

        if !channel.is_member(sender) {
            return Err(DomainError::NotAMember {
                participant: sender.clone(),
                channel: self.name.clone(),
            });
        }

        let message = ChannelMessage::new(
            self.name.clone(),
            Sender::Participant(sender.clone()),
            content,
        );

        if channel.auto_broadcast {
            let members = channel.members.clone();
            for member in &members {
                inner.deliver(member, message.clone());
            }
        } else {
            channel.withheld.push(message);
        }
        Ok(())
    }

    /// Moderator message to every member, regardless of auto-broadcast
    pub fn announce(&self, text: &str) {
        let mut inner = self.manager.lock();
        let Some(members) = inner.open.get(&self.id).map(|c| c.members.clone()) else {
            return;
        };
        let message = ChannelMessage::new(self.name.clone(), Sender::Moderator, text);
        for member in &members {
            inner.deliver(member, message.clone());
        }
    }

    /// Messages collected while auto-broadcast was off
    pub fn withheld(&self) -> Vec<ChannelMessage> {
        self.manager
            .lock()
            .open
            .get(&self.id)
            .map(|c| c.withheld.clone())
            .unwrap_or_default()
    }

    pub fn close(mut self) {
        self.closed = true;
        self.manager.close(self.id);
    }
}

impl Drop for ChannelScope {
    fn drop(&mut self) {
        if !self.closed {
            self.manager.close(self.id);
        }
    }
}
