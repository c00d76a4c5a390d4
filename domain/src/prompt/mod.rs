//! Prompt domain
//!
//! Templates for the role card and every decision request of a game.

mod template;

pub use template::PromptTemplate;
