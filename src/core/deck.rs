//! Decks as scored: card placements with their deck house

use crate::core::{Card, House};
use crate::{Result, SasError};
use smallvec::SmallVec;
use std::sync::Arc;

/// Number of cards in a legal deck
pub const DECK_SIZE: usize = 36;

/// One card in a deck, placed under the house it plays for in that deck
#[derive(Debug, Clone)]
pub struct DeckCard {
    pub card: Arc<Card>,
    pub house: House,
}

impl DeckCard {
    pub fn new(card: Arc<Card>, house: House) -> Self {
        DeckCard { card, house }
    }

    /// Place a card under its printed house
    pub fn native(card: Arc<Card>) -> Self {
        let house = card.house;
        DeckCard { card, house }
    }
}

/// A validated deck of exactly [`DECK_SIZE`] placements
#[derive(Debug, Clone)]
pub struct Deck {
    pub name: Option<String>,
    cards: Vec<DeckCard>,
}

impl Deck {
    pub fn new(cards: Vec<DeckCard>) -> Result<Self> {
        if cards.len() != DECK_SIZE {
            return Err(SasError::DeckSize {
                expected: DECK_SIZE,
                actual: cards.len(),
            });
        }
        Ok(Deck { name: None, cards })
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn cards(&self) -> &[DeckCard] {
        &self.cards
    }
}

/// Distinct houses among `cards` in canonical order
pub fn houses_of(cards: &[DeckCard]) -> SmallVec<[House; 3]> {
    let mut houses: SmallVec<[House; 3]> = SmallVec::new();
    for placement in cards {
        if !houses.contains(&placement.house) {
            houses.push(placement.house);
        }
    }
    houses.sort();
    houses
}
