//! Catalog and deck loaders
//!
//! Parsers for the JSON card catalog and the deck list format (.dck)

pub mod card;
pub mod catalog;
pub mod deck;

pub use card::CardLoader;
pub use catalog::CardCatalog;
pub use deck::{DeckEntry, DeckList, DeckLoader};
