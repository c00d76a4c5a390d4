//! Core domain concepts shared across all subdomains.
//!
//! - [`model::Model`]: the oracle binding a participant is played by
//! - [`error::DomainError`]: invariant violations raised by domain operations

pub mod error;
pub mod model;
