//! Scoped communication channels
//!
//! A channel is a named subset of participants plus an auto-broadcast flag.
//! With auto-broadcast on, a member's message reaches every member; with it
//! off, messages are collected silently (simultaneous ballots).

pub mod entities;
pub mod manager;

pub use entities::{Channel, ChannelId, ChannelMessage, Sender};
pub use manager::{ChannelManager, ChannelScope, PRIVATE_CHANNEL};
