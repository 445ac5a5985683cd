//! Domain types: cards, ratings, traits and decks

pub mod aerc;
pub mod card;
pub mod deck;
pub mod extra_info;
pub mod traits;
pub mod types;

pub use aerc::{Aerc, AercAxis, AercMax, AercScores};
pub use card::{Card, CardType, Enhancements, Rarity};
pub use deck::{houses_of, Deck, DeckCard, DECK_SIZE};
pub use extra_info::ExtraCardInfo;
pub use traits::{
    Rating, SynTraitHouse, SynTraitPlayer, SynergyRule, SynergyTarget, SynergyTrait, TraitRule,
};
pub use types::{CardId, CardName, House};
