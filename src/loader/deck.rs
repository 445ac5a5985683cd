//! Deck list loader (.dck format)
//!
//! ```text
//! [metadata]
//! Name=Example Deck
//! [Logos]
//! 1 Timetraveller
//! 2 Library Access
//! [Shadows]
//! 1 Ember Imp|341-999
//! ```
//!
//! House sections assign the deck house of every line that follows them.

use crate::core::{CardId, CardName, Deck, DeckCard, House};
use crate::loader::CardCatalog;
use crate::{Result, SasError};
use std::fs;
use std::path::Path;

/// Deck loader for .dck files
pub struct DeckLoader;

impl DeckLoader {
    /// Load a deck list from a .dck file
    pub fn load_from_file(path: &Path) -> Result<DeckList> {
        let content = fs::read_to_string(path)?;
        let mut list = Self::parse(&content)?;
        if list.name.is_none() {
            list.name = path.file_stem().map(|s| s.to_string_lossy().into_owned());
        }
        Ok(list)
    }

    /// Parse a deck list from its text content
    pub fn parse(content: &str) -> Result<DeckList> {
        let mut name = None;
        let mut entries = Vec::new();
        let mut section: Option<Section> = None;

        for (line_no, raw) in content.lines().enumerate() {
            let line = match raw.split_once('#') {
                Some((before, _comment)) => before.trim(),
                None => raw.trim(),
            };
            if line.is_empty() {
                continue;
            }

            if let Some(header) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
                section = Some(if header.eq_ignore_ascii_case("metadata") {
                    Section::Metadata
                } else {
                    let house = header.parse::<House>().map_err(|e| {
                        SasError::InvalidDeckFormat(format!("line {}: {e}", line_no + 1))
                    })?;
                    Section::House(house)
                });
                continue;
            }

            match section {
                Some(Section::Metadata) => {
                    if let Some((key, value)) = line.split_once('=') {
                        if key.trim().eq_ignore_ascii_case("name") {
                            name = Some(value.trim().to_string());
                        }
                    }
                }
                Some(Section::House(house)) => {
                    entries.push(Self::parse_entry(line, house, line_no + 1)?);
                }
                None => {
                    return Err(SasError::InvalidDeckFormat(format!(
                        "line {}: card listed before any [House] section",
                        line_no + 1
                    )));
                }
            }
        }

        if entries.is_empty() {
            return Err(SasError::InvalidDeckFormat("Empty deck".to_string()));
        }

        Ok(DeckList { name, entries })
    }

    // Format: "1 Card Name" or "1 Card Name|341-153"
    fn parse_entry(line: &str, house: House, line_no: usize) -> Result<DeckEntry> {
        let malformed = || SasError::InvalidDeckFormat(format!("line {line_no}: '{line}'"));

        let (count_str, rest) = line.split_once(' ').ok_or_else(malformed)?;
        let count = count_str.parse::<u8>().map_err(|_| malformed())?;
        let (card_name, card_id) = match rest.split_once('|') {
            Some((name, id)) => (name.trim().to_string(), Some(CardId::new(id.trim()))),
            None => (rest.trim().to_string(), None),
        };
        if count == 0 || card_name.is_empty() {
            return Err(malformed());
        }

        Ok(DeckEntry {
            card_name,
            card_id,
            count,
            house,
        })
    }
}

#[derive(Debug, Clone, Copy)]
enum Section {
    Metadata,
    House(House),
}

/// A deck list line: count, card name, optional pinned printing, deck house
#[derive(Debug, Clone, PartialEq)]
pub struct DeckEntry {
    pub card_name: String,
    pub card_id: Option<CardId>,
    pub count: u8,
    pub house: House,
}

/// Represents a complete deck list, before catalog resolution
#[derive(Debug, Clone)]
pub struct DeckList {
    pub name: Option<String>,
    pub entries: Vec<DeckEntry>,
}

impl DeckList {
    /// Total cards listed
    pub fn total_cards(&self) -> usize {
        self.entries.iter().map(|e| e.count as usize).sum()
    }

    /// Resolve every line against the catalog into a 36-card deck
    pub fn resolve(&self, catalog: &CardCatalog) -> Result<Deck> {
        let mut cards = Vec::with_capacity(self.total_cards());
        for entry in &self.entries {
            let card = match &entry.card_id {
                Some(id) => catalog.get(id),
                None => catalog.resolve_name(&entry.card_name, entry.house),
            }
            .ok_or_else(|| SasError::UnknownCard(entry.card_name.clone()))?;

            if card.name.lookup_key() != CardName::normalize(&entry.card_name) {
                return Err(SasError::InvalidDeckFormat(format!(
                    "'{}' is pinned to {}, which is '{}'",
                    entry.card_name, card.id, card.name
                )));
            }

            for _ in 0..entry.count {
                cards.push(DeckCard::new(card.clone(), entry.house));
            }
        }

        let deck = Deck::new(cards)?;
        Ok(match &self.name {
            Some(name) => deck.with_name(name.clone()),
            None => deck,
        })
    }
}
