//! Card types and catalog entries

use crate::core::{CardId, CardName, ExtraCardInfo, House};
use serde::{Deserialize, Serialize};

/// Card types in KeyForge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardType {
    Creature,
    Action,
    Artifact,
    Upgrade,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Special,
    Variant,
    #[serde(rename = "FIXED")]
    Fixed,
}

impl Rarity {
    /// Special, variant and fixed printings are counted together
    pub fn is_special(&self) -> bool {
        matches!(self, Rarity::Special | Rarity::Variant | Rarity::Fixed)
    }
}

/// Bonus icons printed on an enhanced card
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Enhancements {
    pub amber: u8,
    pub capture: u8,
    pub draw: u8,
    pub damage: u8,
}

impl Enhancements {
    pub fn is_empty(&self) -> bool {
        self.amber == 0 && self.capture == 0 && self.draw == 0 && self.damage == 0
    }
}

/// A printing of a card in the catalog
///
/// Cards are immutable reference data. The same printing may appear
/// several times in one deck, and a maverick or anomaly printing may be
/// placed in a deck under a house other than `house`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    /// Stable catalog id of this printing
    pub id: CardId,

    /// Card title (e.g., "Ember Imp")
    pub name: CardName,

    /// House the card is printed in
    pub house: House,

    /// Expansion number
    pub expansion: u16,

    pub card_type: CardType,

    pub rarity: Rarity,

    /// Aember bonus icons
    pub amber: u8,

    /// Power (0 for non-creatures)
    pub power: u8,

    /// Printed armor
    pub armor: u8,

    pub maverick: bool,
    pub anomaly: bool,
    pub enhanced: bool,
    pub legacy: bool,

    /// Enhancement pips, when `enhanced`
    pub enhancements: Enhancements,

    /// Editorial AERC ratings, traits and synergies
    pub extra_info: ExtraCardInfo,
}

impl Card {
    pub fn new(id: impl Into<CardId>, name: impl Into<CardName>, house: House, card_type: CardType) -> Self {
        Card {
            id: id.into(),
            name: name.into(),
            house,
            expansion: 0,
            card_type,
            rarity: Rarity::Common,
            amber: 0,
            power: 0,
            armor: 0,
            maverick: false,
            anomaly: false,
            enhanced: false,
            legacy: false,
            enhancements: Enhancements::default(),
            extra_info: ExtraCardInfo::default(),
        }
    }

    /// Printed aember plus any enhancement aember
    pub fn total_amber(&self) -> u32 {
        self.amber as u32 + self.enhancements.amber as u32
    }

    pub fn with_stats(mut self, amber: u8, power: u8, armor: u8) -> Self {
        self.amber = amber;
        self.power = power;
        self.armor = armor;
        self
    }

    pub fn with_rarity(mut self, rarity: Rarity) -> Self {
        self.rarity = rarity;
        self
    }

    pub fn with_extra_info(mut self, extra_info: ExtraCardInfo) -> Self {
        self.extra_info = extra_info;
        self
    }

    pub fn with_enhancements(mut self, enhancements: Enhancements) -> Self {
        self.enhanced = !enhancements.is_empty();
        self.enhancements = enhancements;
        self
    }

    pub fn maverick(mut self) -> Self {
        self.maverick = true;
        self
    }
}
