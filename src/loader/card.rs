//! Catalog card records (JSON)
//!
//! Records are deserialized as loosely typed data and then validated into
//! [`Card`]s. Trait names, ratings and rule shapes are all checked here so
//! scoring never sees a malformed rule.

use crate::core::{
    AercMax, AercScores, Card, CardType, Enhancements, ExtraCardInfo, House, Rarity, Rating,
    SynTraitHouse, SynTraitPlayer, SynergyRule, SynergyTarget, SynergyTrait, TraitRule,
};
use crate::{Result, SasError};
use serde::Deserialize;

/// Card loader for JSON card records
pub struct CardLoader;

impl CardLoader {
    /// Parse and validate a single card record
    pub fn parse(content: &str) -> Result<Card> {
        let record: CardRecord = serde_json::from_str(content)?;
        record.into_card()
    }

    /// Parse and validate every record of a `{"cards": [...]}` catalog file
    pub fn parse_catalog(content: &str) -> Result<Vec<Card>> {
        let file: CatalogFile = serde_json::from_str(content)?;
        file.cards.into_iter().map(CardRecord::into_card).collect()
    }
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    cards: Vec<CardRecord>,
}

/// A card as written in a catalog file
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardRecord {
    pub id: String,
    pub name: String,
    pub house: String,
    #[serde(default)]
    pub expansion: u16,
    pub card_type: CardType,
    #[serde(default = "default_rarity")]
    pub rarity: Rarity,
    #[serde(default)]
    pub amber: u8,
    #[serde(default)]
    pub power: u8,
    #[serde(default)]
    pub armor: u8,
    #[serde(default)]
    pub maverick: bool,
    #[serde(default)]
    pub anomaly: bool,
    #[serde(default)]
    pub enhanced: bool,
    #[serde(default)]
    pub legacy: bool,
    #[serde(default)]
    pub enhancements: Enhancements,
    #[serde(default)]
    pub extra_card_info: ExtraCardInfoRecord,
}

fn default_rarity() -> Rarity {
    Rarity::Common
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtraCardInfoRecord {
    #[serde(flatten)]
    pub aerc: AercScores,
    #[serde(flatten)]
    pub max: AercMaxRecord,
    #[serde(default)]
    pub traits: Vec<RuleRecord>,
    #[serde(default)]
    pub synergies: Vec<RuleRecord>,
}

/// The optional `<axis>Max` fields
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AercMaxRecord {
    pub amber_control_max: Option<f64>,
    pub expected_amber_max: Option<f64>,
    pub artifact_control_max: Option<f64>,
    pub creature_control_max: Option<f64>,
    pub efficiency_max: Option<f64>,
    pub disruption_max: Option<f64>,
    pub effective_power_max: Option<f64>,
    #[serde(alias = "amberProtectionMax")]
    pub steal_prevention_max: Option<f64>,
    pub house_cheating_max: Option<f64>,
    pub other_max: Option<f64>,
}

impl From<AercMaxRecord> for AercMax {
    fn from(r: AercMaxRecord) -> AercMax {
        AercMax {
            amber_control: r.amber_control_max,
            expected_amber: r.expected_amber_max,
            artifact_control: r.artifact_control_max,
            creature_control: r.creature_control_max,
            efficiency: r.efficiency_max,
            disruption: r.disruption_max,
            effective_power: r.effective_power_max,
            steal_prevention: r.steal_prevention_max,
            house_cheating: r.house_cheating_max,
            other: r.other_max,
        }
    }
}

/// A trait or synergy entry as written in a catalog file
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleRecord {
    #[serde(rename = "trait")]
    pub trait_: String,
    pub rating: i8,
    #[serde(default)]
    pub house: SynTraitHouse,
    #[serde(default)]
    pub player: SynTraitPlayer,
    #[serde(default)]
    pub card_name: Option<String>,
}

impl RuleRecord {
    fn rating(&self, card: &str) -> Result<Rating> {
        Rating::new(self.rating).ok_or_else(|| SasError::InvalidRating {
            card: card.to_string(),
            rating: self.rating,
        })
    }

    fn synergy_trait(&self, card: &str) -> Result<SynergyTrait> {
        self.trait_.parse().map_err(|_| SasError::UnknownTrait {
            card: card.to_string(),
            name: self.trait_.clone(),
        })
    }

    fn into_trait_rule(self, card: &str) -> Result<TraitRule> {
        let trait_ = self.synergy_trait(card)?;
        if !trait_.can_be_declared() {
            return Err(SasError::InvalidCardFormat(format!(
                "'{card}' declares '{trait_}', which cannot be a card trait"
            )));
        }
        Ok(TraitRule::new(trait_, self.rating(card)?)
            .with_house(self.house)
            .with_player(self.player))
    }

    fn into_synergy_rule(self, card: &str) -> Result<SynergyRule> {
        let trait_ = self.synergy_trait(card)?;
        let rating = self.rating(card)?;
        let target = match (trait_, self.card_name) {
            (SynergyTrait::Card, Some(name)) if !name.trim().is_empty() => {
                SynergyTarget::Card(name.trim().into())
            }
            (SynergyTrait::Card, _) => {
                return Err(SasError::InvalidCardFormat(format!(
                    "'{card}' has a card synergy without a cardName"
                )))
            }
            (t, _) => SynergyTarget::Trait(t),
        };
        Ok(SynergyRule::new(target, rating)
            .with_house(self.house)
            .with_player(self.player))
    }
}

impl CardRecord {
    /// Validate the record into a catalog card
    pub fn into_card(self) -> Result<Card> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(SasError::InvalidCardFormat(format!(
                "card '{}' has an empty name",
                self.id
            )));
        }
        if self.id.trim().is_empty() {
            return Err(SasError::InvalidCardFormat(format!("'{name}' has an empty id")));
        }
        let house: House = self
            .house
            .parse()
            .map_err(|e| SasError::InvalidCardFormat(format!("'{name}': {e}")))?;

        let extra = self.extra_card_info;
        if !extra.aerc.all_finite() {
            return Err(SasError::InvalidCardFormat(format!(
                "'{name}' has a non-finite AERC rating"
            )));
        }
        let traits = extra
            .traits
            .into_iter()
            .map(|r| r.into_trait_rule(&name))
            .collect::<Result<Vec<_>>>()?;
        let synergies = extra
            .synergies
            .into_iter()
            .map(|r| r.into_synergy_rule(&name))
            .collect::<Result<Vec<_>>>()?;

        let mut card = Card::new(self.id.trim(), name, house, self.card_type)
            .with_stats(self.amber, self.power, self.armor)
            .with_rarity(self.rarity)
            .with_enhancements(self.enhancements)
            .with_extra_info(ExtraCardInfo {
                aerc: extra.aerc,
                aerc_max: extra.max.into(),
                traits,
                synergies,
            });
        card.expansion = self.expansion;
        card.maverick = self.maverick;
        card.anomaly = self.anomaly;
        card.legacy = self.legacy;
        card.enhanced |= self.enhanced;
        Ok(card)
    }
}
