//! Error types for deck scoring

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SasError {
    #[error("Invalid card format: {0}")]
    InvalidCardFormat(String),

    #[error("Unknown trait '{name}' on card '{card}'")]
    UnknownTrait { card: String, name: String },

    #[error("Invalid rating {rating} on card '{card}' (expected -4..=4, non-zero)")]
    InvalidRating { card: String, rating: i8 },

    #[error("Duplicate card id: {0}")]
    DuplicateCard(String),

    #[error("Invalid deck format: {0}")]
    InvalidDeckFormat(String),

    #[error("Deck must contain exactly {expected} cards, found {actual}")]
    DeckSize { expected: usize, actual: usize },

    #[error("Card not found in catalog: {0}")]
    UnknownCard(String),

    #[error("Invalid scoring config: {0}")]
    InvalidConfig(String),

    #[error("Invalid population table: {0}")]
    InvalidPopulation(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SasError>;
