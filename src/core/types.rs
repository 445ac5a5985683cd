//! Strongly-typed wrappers for catalog concepts
//!
//! Card names, card ids and houses are all strings at the edges of the
//! system. Wrapping them keeps a card id from being looked up as a name.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Card name (distinct from other string types)
///
/// Equality is on the printed name. Use [`CardName::lookup_key`] when
/// matching names typed by a user or written in a deck list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardName(String);

impl CardName {
    pub fn new(s: impl Into<String>) -> Self {
        CardName(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case and accent insensitive key: "Æmber Imp" -> "aember imp"
    pub fn lookup_key(&self) -> String {
        Self::normalize(&self.0)
    }

    /// Normalize an arbitrary string the same way as [`CardName::lookup_key`]
    pub fn normalize(s: &str) -> String {
        deunicode::deunicode(s)
            .to_lowercase()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for CardName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for CardName {
    fn from(s: String) -> Self {
        CardName(s)
    }
}

impl From<&str> for CardName {
    fn from(s: &str) -> Self {
        CardName(s.to_string())
    }
}

/// Stable catalog identifier of one printing of a card (e.g. "341-153")
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(String);

impl CardId {
    pub fn new(s: impl Into<String>) -> Self {
        CardId(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for CardId {
    fn from(s: String) -> Self {
        CardId(s)
    }
}

impl From<&str> for CardId {
    fn from(s: &str) -> Self {
        CardId(s.to_string())
    }
}

/// The houses a card can belong to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum House {
    Brobnar,
    Dis,
    Logos,
    Mars,
    Sanctum,
    Shadows,
    Untamed,
    StarAlliance,
    Saurian,
}

impl House {
    pub const ALL: [House; 9] = [
        House::Brobnar,
        House::Dis,
        House::Logos,
        House::Mars,
        House::Sanctum,
        House::Shadows,
        House::Untamed,
        House::StarAlliance,
        House::Saurian,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            House::Brobnar => "Brobnar",
            House::Dis => "Dis",
            House::Logos => "Logos",
            House::Mars => "Mars",
            House::Sanctum => "Sanctum",
            House::Shadows => "Shadows",
            House::Untamed => "Untamed",
            House::StarAlliance => "StarAlliance",
            House::Saurian => "Saurian",
        }
    }
}

impl fmt::Display for House {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for House {
    type Err = String;

    /// Accepts the canonical name in any case, plus the spaced forms
    /// "Star Alliance" and "Saurian Republic"
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_lowercase();
        match key.as_str() {
            "brobnar" => Ok(House::Brobnar),
            "dis" => Ok(House::Dis),
            "logos" => Ok(House::Logos),
            "mars" => Ok(House::Mars),
            "sanctum" => Ok(House::Sanctum),
            "shadows" => Ok(House::Shadows),
            "untamed" => Ok(House::Untamed),
            "staralliance" => Ok(House::StarAlliance),
            "saurian" | "saurianrepublic" => Ok(House::Saurian),
            _ => Err(format!("unknown house '{s}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_name() {
        let name = CardName::new("Ember Imp");
        assert_eq!(name.as_str(), "Ember Imp");
        assert_eq!(name.to_string(), "Ember Imp");
    }

    #[test]
    fn test_lookup_key_folds_case_and_accents() {
        let name = CardName::new("Æmber  Imp");
        assert_eq!(name.lookup_key(), "aember imp");
        assert_eq!(CardName::normalize("AEMBER IMP"), "aember imp");
    }

    #[test]
    fn test_card_id() {
        let id = CardId::new("341-153");
        assert_eq!(id.as_str(), "341-153");
        assert_eq!(format!("{id}"), "341-153");
    }

    #[test]
    fn test_house_parse() {
        assert_eq!("logos".parse::<House>(), Ok(House::Logos));
        assert_eq!("Star Alliance".parse::<House>(), Ok(House::StarAlliance));
        assert_eq!("Saurian Republic".parse::<House>(), Ok(House::Saurian));
        assert!("Atlantis".parse::<House>().is_err());
    }

    #[test]
    fn test_house_display_round_trips() {
        for house in House::ALL {
            assert_eq!(house.to_string().parse::<House>(), Ok(house));
        }
    }
}
