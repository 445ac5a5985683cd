//! Deck SAS - KeyForge deck scoring engine
//!
//! Rates a 36-card deck on the ten AERC axes, resolves card-to-card,
//! card-to-house and card-to-deck synergies, and rolls everything up into
//! a single SAS rating with a percentile against the deck population.

pub mod batch;
pub mod core;
pub mod error;
pub mod loader;
pub mod scoring;

pub use error::{Result, SasError};
