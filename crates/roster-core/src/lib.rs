//! ROSTER Core — domain models, error taxonomy, and repository
//! contracts shared across all crates.

pub mod error;
pub mod models;
pub mod repository;

pub use error::{RosterError, RosterResult};
