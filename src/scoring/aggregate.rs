//! Score aggregation: combos to a whole-deck rating

use crate::core::{AercScores, CardName, House};
use crate::scoring::config::ScoringConfig;
use crate::scoring::percentile::{PopulationStats, SaStars};
use crate::scoring::statistics::DeckStatistics;
use crate::scoring::synergy::SynergyCombo;
use serde::Serialize;
use smallvec::SmallVec;

/// Whole-deck scoring result
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckSynergyInfo {
    /// AERC totals per axis over all copies
    pub aerc: AercScores,
    pub raw_aerc: f64,
    pub synergy_rating: f64,

    /// Magnitude of the negative synergy (non-negative)
    pub antisynergy_rating: f64,
    pub efficiency_bonus: f64,
    pub sas_rating: i32,
    pub sas_percentile: Option<f64>,
    pub sa_stars: Option<SaStars>,
    pub house_scores: SmallVec<[HouseScore; 3]>,
    pub statistics: DeckStatistics,
    pub synergy_combos: Vec<SynergyCombo>,
}

/// One house's share of the deck rating
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HouseScore {
    pub house: House,
    pub aerc: AercScores,
    pub raw_aerc: f64,
    pub synergy_rating: f64,
    pub antisynergy_rating: f64,

    /// Unrounded, without the deck-level offset and efficiency bonus
    pub sas: f64,
}

/// Two cards that synergize (or antisynergize) in this deck
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SynergyPair {
    pub first: CardName,
    pub second: CardName,
    pub positive: bool,
}

impl DeckSynergyInfo {
    /// Symmetric set of card pairs linked by a card or trait rule
    pub fn synergy_pairs(&self) -> Vec<SynergyPair> {
        let mut pairs: Vec<SynergyPair> = self
            .synergy_combos
            .iter()
            .flat_map(|combo| {
                combo
                    .matches
                    .iter()
                    .filter(|m| m.contribution != 0.0)
                    .flat_map(move |m| {
                        m.partners.iter().map(move |partner| {
                            let (first, second) = if combo.card_name <= *partner {
                                (combo.card_name.clone(), partner.clone())
                            } else {
                                (partner.clone(), combo.card_name.clone())
                            };
                            SynergyPair {
                                first,
                                second,
                                positive: m.contribution > 0.0,
                            }
                        })
                    })
            })
            .collect();
        pairs.sort();
        pairs.dedup();
        pairs
    }

    pub fn combo(&self, name: &str, house: House) -> Option<&SynergyCombo> {
        let key = CardName::normalize(name);
        self.synergy_combos
            .iter()
            .find(|c| c.house == house && c.card_name.lookup_key() == key)
    }
}

#[derive(Default)]
struct Totals {
    aerc: AercScores,
    synergy: f64,
    antisynergy: f64,
}

impl Totals {
    fn add(&mut self, combo: &SynergyCombo) {
        let copies = combo.copies as f64;
        self.aerc += combo.aerc * copies;
        if combo.net_synergy > 0.0 {
            self.synergy += combo.net_synergy * copies;
        } else {
            self.antisynergy -= combo.net_synergy * copies;
        }
    }
}

/// Roll combos up into the deck rating
pub fn aggregate(
    combos: &[SynergyCombo],
    statistics: &DeckStatistics,
    population: Option<&PopulationStats>,
    config: &ScoringConfig,
) -> DeckSynergyInfo {
    let mut deck = Totals::default();
    for combo in combos {
        deck.add(combo);
    }

    let house_scores = statistics
        .houses
        .iter()
        .map(|house| {
            let mut totals = Totals::default();
            for combo in combos.iter().filter(|c| c.house == *house) {
                totals.add(combo);
            }
            let raw_aerc = totals.aerc.rating(config.effective_power_divisor);
            HouseScore {
                house: *house,
                aerc: totals.aerc,
                raw_aerc,
                synergy_rating: totals.synergy,
                antisynergy_rating: totals.antisynergy,
                sas: config.aerc_scale * raw_aerc + totals.synergy - totals.antisynergy,
            }
        })
        .collect();

    let raw_aerc = deck.aerc.rating(config.effective_power_divisor);
    let efficiency_bonus =
        (deck.aerc.efficiency - config.efficiency_baseline).max(0.0) * config.efficiency_bonus_rate;
    let sas_rating = (config.aerc_scale * raw_aerc + deck.synergy - deck.antisynergy
        + efficiency_bonus
        + config.sas_offset)
        .round() as i32;

    let sas_percentile = population.map(|p| p.percentile_for(sas_rating));

    DeckSynergyInfo {
        aerc: deck.aerc,
        raw_aerc,
        synergy_rating: deck.synergy,
        antisynergy_rating: deck.antisynergy,
        efficiency_bonus,
        sas_rating,
        sas_percentile,
        sa_stars: sas_percentile.map(SaStars::from_percentile),
        house_scores,
        statistics: statistics.clone(),
        synergy_combos: combos.to_vec(),
    }
}
