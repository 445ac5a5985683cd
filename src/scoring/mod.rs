//! Deck scoring pipeline
//!
//! statistics -> synergy resolution -> aggregation. Every stage is a pure
//! function of its inputs, so a [`DeckScorer`] can be shared across
//! threads and scoring the same deck twice gives identical results.

pub mod aggregate;
pub mod config;
pub mod percentile;
pub mod statistics;
pub mod synergy;

pub use aggregate::{aggregate, DeckSynergyInfo, HouseScore, SynergyPair};
pub use config::{DeckTraitThresholds, ScoringConfig};
pub use percentile::{PopulationStats, SaStars};
pub use statistics::{compute_statistics, DeckStatistics, HouseStatistics};
pub use synergy::{resolve, SynergyCombo, SynergyMatch};

use crate::core::Deck;
use crate::Result;

/// Scores decks against a config and an optional population table
#[derive(Debug, Clone, Copy)]
pub struct DeckScorer<'a> {
    config: &'a ScoringConfig,
    population: Option<&'a PopulationStats>,
}

impl<'a> DeckScorer<'a> {
    pub fn new(config: &'a ScoringConfig) -> Self {
        DeckScorer {
            config,
            population: None,
        }
    }

    pub fn with_population(mut self, population: &'a PopulationStats) -> Self {
        self.population = Some(population);
        self
    }

    /// Score one deck; an invalid config is reported as `InvalidConfig`
    pub fn score(&self, deck: &Deck) -> Result<DeckSynergyInfo> {
        self.config.validate()?;
        let statistics = compute_statistics(deck.cards())?;
        let combos = resolve(deck.cards(), &statistics, self.config);
        let info = aggregate(&combos, &statistics, self.population, self.config);
        log::debug!(
            "scored {}: sas {} (aerc {:.2}, synergy {:.2}, antisynergy {:.2})",
            deck.name.as_deref().unwrap_or("<unnamed>"),
            info.sas_rating,
            info.raw_aerc,
            info.synergy_rating,
            info.antisynergy_rating
        );
        Ok(info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{AercScores, Card, CardType, DeckCard, ExtraCardInfo, House};
    use crate::SasError;
    use std::sync::Arc;

    #[test]
    fn test_score_inert_deck() {
        let card = Arc::new(
            Card::new("1", "Plain", House::Sanctum, CardType::Creature).with_extra_info(ExtraCardInfo::new(
                AercScores {
                    expected_amber: 1.0,
                    effective_power: 5.0,
                    ..AercScores::default()
                },
            )),
        );
        let deck = Deck::new((0..36).map(|_| DeckCard::native(card.clone())).collect()).unwrap();
        let config = ScoringConfig::default();

        let info = DeckScorer::new(&config).score(&deck).unwrap();
        assert_eq!(info.synergy_combos.len(), 1);
        assert_eq!(info.synergy_combos[0].copies, 36);
        assert!((info.raw_aerc - 54.0).abs() < 1e-9);
        assert_eq!(info.sas_rating, 54);
        assert_eq!(info.synergy_rating, 0.0);
        assert_eq!(info.antisynergy_rating, 0.0);
    }

    #[test]
    fn test_unvalidated_config_is_an_error() {
        let card = Arc::new(Card::new("1", "Plain", House::Sanctum, CardType::Action));
        let deck = Deck::new((0..36).map(|_| DeckCard::native(card.clone())).collect()).unwrap();

        let inverted = ScoringConfig::default().with_synergy_clamp(2.0, -2.0);
        assert!(matches!(
            DeckScorer::new(&inverted).score(&deck),
            Err(SasError::InvalidConfig(_))
        ));

        let parsed: ScoringConfig = serde_json::from_str(r#"{ "minSynergy": 3.0 }"#).unwrap();
        assert!(matches!(
            DeckScorer::new(&parsed).score(&deck),
            Err(SasError::InvalidConfig(_))
        ));
    }
}
