//! Deck statistics
//!
//! Counts and sums over a deck's placements. They are reported to the
//! caller and feed the deck-wide aggregate traits during synergy
//! resolution.

use crate::core::{houses_of, Card, CardType, DeckCard, House, Rarity, SynergyTrait, DECK_SIZE};
use crate::{Result, SasError};
use serde::Serialize;
use smallvec::SmallVec;

/// Counts for one house of a deck (or any other subset of its cards)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HouseStatistics {
    pub card_count: u32,
    pub creature_count: u32,
    pub action_count: u32,
    pub artifact_count: u32,
    pub upgrade_count: u32,
    pub total_power: u32,
    pub total_armor: u32,
    pub raw_amber: u32,
}

impl HouseStatistics {
    pub fn add(&mut self, card: &Card) {
        self.card_count += 1;
        match card.card_type {
            CardType::Creature => {
                self.creature_count += 1;
                self.total_power += card.power as u32;
            }
            CardType::Action => self.action_count += 1,
            CardType::Artifact => self.artifact_count += 1,
            CardType::Upgrade => self.upgrade_count += 1,
        }
        self.total_armor += card.armor as u32;
        self.raw_amber += card.total_amber();
    }

    /// The statistic an aggregate trait measures, if `trait_` is one
    pub fn aggregate_value(&self, trait_: SynergyTrait) -> Option<f64> {
        let value = match trait_ {
            SynergyTrait::HighCreatureCount | SynergyTrait::LowCreatureCount => self.creature_count,
            SynergyTrait::HighActionCount => self.action_count,
            SynergyTrait::HighArtifactCount => self.artifact_count,
            SynergyTrait::HighUpgradeCount => self.upgrade_count,
            SynergyTrait::HighTotalCreaturePower | SynergyTrait::LowTotalCreaturePower => {
                self.total_power
            }
            SynergyTrait::HighTotalArmor => self.total_armor,
            SynergyTrait::HighRawAmber => self.raw_amber,
            _ => return None,
        };
        Some(value as f64)
    }
}

/// Whole-deck statistics for one scoring pass
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckStatistics {
    pub houses: SmallVec<[House; 3]>,
    pub totals: HouseStatistics,
    pub by_house: SmallVec<[(House, HouseStatistics); 3]>,

    pub bonus_amber: u32,
    pub bonus_capture: u32,
    pub bonus_draw: u32,
    pub bonus_damage: u32,

    pub maverick_count: u32,
    pub anomaly_count: u32,
    pub legacy_count: u32,
    pub enhanced_count: u32,

    pub rare_count: u32,
    pub uncommon_count: u32,
    pub special_count: u32,
}

impl DeckStatistics {
    pub fn house(&self, house: House) -> Option<&HouseStatistics> {
        self.by_house.iter().find(|(h, _)| *h == house).map(|(_, s)| s)
    }

    pub fn creature_count(&self) -> u32 {
        self.totals.creature_count
    }

    pub fn total_power(&self) -> u32 {
        self.totals.total_power
    }

    pub fn total_armor(&self) -> u32 {
        self.totals.total_armor
    }

    /// Printed aember plus enhancement aember
    pub fn raw_amber(&self) -> u32 {
        self.totals.raw_amber
    }
}

/// Compute statistics for a deck's placements
///
/// Fails with [`SasError::DeckSize`] unless there are exactly
/// [`DECK_SIZE`] placements.
pub fn compute_statistics(cards: &[DeckCard]) -> Result<DeckStatistics> {
    if cards.len() != DECK_SIZE {
        return Err(SasError::DeckSize {
            expected: DECK_SIZE,
            actual: cards.len(),
        });
    }

    let houses = houses_of(cards);
    let mut stats = DeckStatistics {
        by_house: houses.iter().map(|h| (*h, HouseStatistics::default())).collect(),
        houses,
        ..DeckStatistics::default()
    };

    for placement in cards {
        let card = &placement.card;
        stats.totals.add(card);
        if let Some((_, house_stats)) = stats.by_house.iter_mut().find(|(h, _)| *h == placement.house) {
            house_stats.add(card);
        }

        stats.bonus_amber += card.enhancements.amber as u32;
        stats.bonus_capture += card.enhancements.capture as u32;
        stats.bonus_draw += card.enhancements.draw as u32;
        stats.bonus_damage += card.enhancements.damage as u32;

        stats.maverick_count += card.maverick as u32;
        stats.anomaly_count += card.anomaly as u32;
        stats.legacy_count += card.legacy as u32;
        stats.enhanced_count += card.enhanced as u32;

        match card.rarity {
            Rarity::Rare => stats.rare_count += 1,
            Rarity::Uncommon => stats.uncommon_count += 1,
            r if r.is_special() => stats.special_count += 1,
            _ => {}
        }
    }

    Ok(stats)
}
