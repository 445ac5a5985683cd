//! Card catalog for looking up card printings
//!
//! Provides lookup by card id and by (case and accent insensitive) name.
//! A name may map to several printings: the same title exists in more
//! than one house once mavericks, anomalies and reprints are involved.

use crate::core::{Card, CardId, CardName, House, SynergyTarget};
use crate::loader::CardLoader;
use crate::{Result, SasError};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// Catalog of all card printings, shared read-only by every scoring pass
#[derive(Debug, Default)]
pub struct CardCatalog {
    by_id: FxHashMap<CardId, Arc<Card>>,
    by_name: FxHashMap<String, SmallVec<[CardId; 2]>>,
}

impl CardCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Load and validate a catalog JSON file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(SasError::IoError(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Catalog not found: {path:?}"),
            )));
        }
        let content = fs::read_to_string(path)?;
        let catalog = Self::parse(&content)?;
        log::info!("loaded {} cards from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    /// Parse and validate catalog JSON text
    pub fn parse(content: &str) -> Result<Self> {
        Self::from_cards(CardLoader::parse_catalog(content)?)
    }

    /// Build a validated catalog from cards
    pub fn from_cards(cards: impl IntoIterator<Item = Card>) -> Result<Self> {
        let mut catalog = CardCatalog::new();
        for card in cards {
            catalog.add_card(card)?;
        }
        catalog.validate()?;
        Ok(catalog)
    }

    /// Add a single card, rejecting duplicate ids
    pub fn add_card(&mut self, card: Card) -> Result<()> {
        if self.by_id.contains_key(&card.id) {
            return Err(SasError::DuplicateCard(card.id.to_string()));
        }
        let ids = self.by_name.entry(card.name.lookup_key()).or_default();
        ids.push(card.id.clone());
        ids.sort();
        self.by_id.insert(card.id.clone(), Arc::new(card));
        Ok(())
    }

    /// Check that every card-targeted synergy names a card in the catalog
    pub fn validate(&self) -> Result<()> {
        for card in self.by_id.values() {
            for rule in &card.extra_info.synergies {
                if let SynergyTarget::Card(name) = &rule.target {
                    if !self.contains_name(name.as_str()) {
                        return Err(SasError::InvalidCardFormat(format!(
                            "'{}' has a synergy with unknown card '{}'",
                            card.name, name
                        )));
                    }
                }
            }
        }
        Ok(())
    }

    pub fn get(&self, id: &CardId) -> Option<&Arc<Card>> {
        self.by_id.get(id)
    }

    /// All printings with this name, ordered by id
    pub fn find_by_name(&self, name: &str) -> Vec<&Arc<Card>> {
        self.by_name
            .get(&CardName::normalize(name))
            .map(|ids| ids.iter().filter_map(|id| self.by_id.get(id)).collect())
            .unwrap_or_default()
    }

    /// Pick the printing of `name` for a deck placed in `house`
    ///
    /// Prefers a printing native to `house`, then the only printing, then
    /// the lowest id.
    pub fn resolve_name(&self, name: &str, house: House) -> Option<&Arc<Card>> {
        let printings = self.find_by_name(name);
        printings
            .iter()
            .find(|card| card.house == house)
            .or_else(|| printings.first())
            .copied()
    }

    pub fn contains_name(&self, name: &str) -> bool {
        self.by_name.contains_key(&CardName::normalize(name))
    }

    pub fn cards(&self) -> impl Iterator<Item = &Arc<Card>> {
        self.by_id.values()
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}
