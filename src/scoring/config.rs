//! Tunable scoring constants
//!
//! Every editorial constant of the scoring pipeline lives here: the
//! (rating magnitude, tier) synergy table, tier cut-offs, the per-card
//! clamp, the SAS scale and offset, and the deck-trait thresholds. The
//! defaults can be overridden from a JSON file.

use crate::core::SynergyTrait;
use crate::{Result, SasError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Tier weights used to build the default synergy table
pub const DEFAULT_TIER_WEIGHTS: [f64; 3] = [0.5, 1.0, 2.0];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScoringConfig {
    /// Contribution by `[magnitude - 1][tier - 1]`
    pub synergy_table: [[f64; 3]; 4],

    /// Minimum match count for tiers 1, 2 and 3
    pub tier_thresholds: [usize; 3],

    /// Matches beyond this are not counted
    pub max_counted_matches: usize,

    pub min_synergy: f64,
    pub max_synergy: f64,

    /// Tier at which a rule unlocks a card's `*Max` AERC values
    pub max_scaling_tier: u8,

    pub effective_power_divisor: f64,
    pub aerc_scale: f64,
    pub sas_offset: f64,

    pub efficiency_baseline: f64,
    pub efficiency_bonus_rate: f64,

    pub deck_traits: DeckTraitThresholds,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        let mut synergy_table = [[0.0; 3]; 4];
        for (magnitude, row) in synergy_table.iter_mut().enumerate() {
            for (tier, value) in row.iter_mut().enumerate() {
                *value = (magnitude + 1) as f64 * DEFAULT_TIER_WEIGHTS[tier];
            }
        }

        ScoringConfig {
            synergy_table,
            tier_thresholds: [1, 2, 3],
            max_counted_matches: 4,
            min_synergy: -2.0,
            max_synergy: 2.0,
            max_scaling_tier: 3,
            effective_power_divisor: 10.0,
            aerc_scale: 1.0,
            sas_offset: 0.0,
            efficiency_baseline: 0.0,
            efficiency_bonus_rate: 0.0,
            deck_traits: DeckTraitThresholds::default(),
        }
    }
}

impl ScoringConfig {
    /// Load a config from JSON; absent fields keep their defaults
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: ScoringConfig = serde_json::from_str(&content)?;
        config.validate()?;
        log::info!("loaded scoring config from {}", path.display());
        Ok(config)
    }

    pub fn with_synergy_table(mut self, table: [[f64; 3]; 4]) -> Self {
        self.synergy_table = table;
        self
    }

    pub fn with_synergy_clamp(mut self, min: f64, max: f64) -> Self {
        self.min_synergy = min;
        self.max_synergy = max;
        self
    }

    pub fn with_sas_constants(mut self, aerc_scale: f64, sas_offset: f64) -> Self {
        self.aerc_scale = aerc_scale;
        self.sas_offset = sas_offset;
        self
    }

    pub fn with_efficiency_bonus(mut self, baseline: f64, rate: f64) -> Self {
        self.efficiency_baseline = baseline;
        self.efficiency_bonus_rate = rate;
        self
    }

    pub fn with_max_scaling_tier(mut self, tier: u8) -> Self {
        self.max_scaling_tier = tier;
        self
    }

    /// Tier (0 for no effect) reached by `matches` counted instances
    pub fn tier_for(&self, matches: usize) -> u8 {
        let counted = matches.min(self.max_counted_matches);
        self.tier_thresholds.iter().filter(|&&t| counted >= t).count() as u8
    }

    /// Signed contribution of a rule of `rating` at `tier`
    pub fn contribution(&self, rating: i8, tier: u8) -> f64 {
        if tier == 0 || rating == 0 {
            return 0.0;
        }
        let magnitude = rating.unsigned_abs().min(4) as usize;
        let tier = tier.min(3) as usize;
        rating.signum() as f64 * self.synergy_table[magnitude - 1][tier - 1]
    }

    /// Clamp a summed synergy into `[min_synergy, max_synergy]`
    pub fn clamp_synergy(&self, net: f64) -> f64 {
        net.min(self.max_synergy).max(self.min_synergy)
    }

    pub fn validate(&self) -> Result<()> {
        let finite = [
            self.min_synergy,
            self.max_synergy,
            self.effective_power_divisor,
            self.aerc_scale,
            self.sas_offset,
            self.efficiency_baseline,
            self.efficiency_bonus_rate,
        ];
        if finite.iter().any(|v| !v.is_finite())
            || self.synergy_table.iter().flatten().any(|v| !v.is_finite())
        {
            return Err(SasError::InvalidConfig("non-finite constant".to_string()));
        }
        if self.min_synergy >= self.max_synergy {
            return Err(SasError::InvalidConfig(format!(
                "synergy clamp [{}, {}] is empty",
                self.min_synergy, self.max_synergy
            )));
        }
        if self.effective_power_divisor <= 0.0 {
            return Err(SasError::InvalidConfig(
                "effectivePowerDivisor must be positive".to_string(),
            ));
        }
        if self.tier_thresholds[0] == 0 || !is_strictly_ascending(&self.tier_thresholds) {
            return Err(SasError::InvalidConfig(format!(
                "tierThresholds {:?} must be positive and strictly ascending",
                self.tier_thresholds
            )));
        }
        if self.max_counted_matches < self.tier_thresholds[2] {
            return Err(SasError::InvalidConfig(
                "maxCountedMatches is below the tier 3 threshold".to_string(),
            ));
        }
        if !(1..=3).contains(&self.max_scaling_tier) {
            return Err(SasError::InvalidConfig(
                "maxScalingTier must be 1, 2 or 3".to_string(),
            ));
        }
        self.deck_traits.validate()
    }
}

fn is_strictly_ascending<T: PartialOrd>(values: &[T]) -> bool {
    values.windows(2).all(|w| w[0] < w[1])
}

/// Per-house-average cut-offs for the deck-wide aggregate traits
///
/// Each list holds four cut-offs. `high*` traits gain one strength step
/// per cut-off the average reaches; `low*` traits gain one per cut-off
/// the average is at or under, so their lists descend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DeckTraitThresholds {
    pub high_creature_count: [f64; 4],
    pub low_creature_count: [f64; 4],
    pub high_action_count: [f64; 4],
    pub high_artifact_count: [f64; 4],
    pub high_upgrade_count: [f64; 4],
    pub high_total_creature_power: [f64; 4],
    pub low_total_creature_power: [f64; 4],
    pub high_total_armor: [f64; 4],
    pub high_raw_amber: [f64; 4],
}

impl Default for DeckTraitThresholds {
    fn default() -> Self {
        DeckTraitThresholds {
            high_creature_count: [6.0, 7.0, 8.0, 9.0],
            low_creature_count: [5.0, 4.0, 3.0, 2.0],
            high_action_count: [5.0, 6.0, 7.0, 8.0],
            high_artifact_count: [2.0, 3.0, 4.0, 5.0],
            high_upgrade_count: [1.0, 2.0, 3.0, 4.0],
            high_total_creature_power: [25.0, 30.0, 35.0, 40.0],
            low_total_creature_power: [20.0, 17.0, 14.0, 11.0],
            high_total_armor: [2.0, 4.0, 6.0, 8.0],
            high_raw_amber: [4.0, 5.0, 6.0, 7.0],
        }
    }
}

impl DeckTraitThresholds {
    pub fn cutoffs(&self, trait_: SynergyTrait) -> Option<&[f64; 4]> {
        Some(match trait_ {
            SynergyTrait::HighCreatureCount => &self.high_creature_count,
            SynergyTrait::LowCreatureCount => &self.low_creature_count,
            SynergyTrait::HighActionCount => &self.high_action_count,
            SynergyTrait::HighArtifactCount => &self.high_artifact_count,
            SynergyTrait::HighUpgradeCount => &self.high_upgrade_count,
            SynergyTrait::HighTotalCreaturePower => &self.high_total_creature_power,
            SynergyTrait::LowTotalCreaturePower => &self.low_total_creature_power,
            SynergyTrait::HighTotalArmor => &self.high_total_armor,
            SynergyTrait::HighRawAmber => &self.high_raw_amber,
            _ => return None,
        })
    }

    /// Strength 0..=4 of `trait_` for a per-house average of `average`
    pub fn strength(&self, trait_: SynergyTrait, average: f64) -> usize {
        let Some(cutoffs) = self.cutoffs(trait_) else {
            return 0;
        };
        if is_low_trait(trait_) {
            cutoffs.iter().filter(|&&c| average <= c).count()
        } else {
            cutoffs.iter().filter(|&&c| average >= c).count()
        }
    }

    fn validate(&self) -> Result<()> {
        for trait_ in SynergyTrait::ALL.iter().filter(|t| t.is_aggregate()) {
            if let Some(cutoffs) = self.cutoffs(*trait_) {
                let ordered = if is_low_trait(*trait_) {
                    cutoffs.windows(2).all(|w| w[0] > w[1])
                } else {
                    is_strictly_ascending(cutoffs)
                };
                if !ordered || cutoffs.iter().any(|c| !c.is_finite()) {
                    return Err(SasError::InvalidConfig(format!(
                        "cut-offs for {trait_} are not monotonic: {cutoffs:?}"
                    )));
                }
            }
        }
        Ok(())
    }
}

fn is_low_trait(trait_: SynergyTrait) -> bool {
    matches!(
        trait_,
        SynergyTrait::LowCreatureCount | SynergyTrait::LowTotalCreaturePower
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = ScoringConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.synergy_table[0], [0.5, 1.0, 2.0]);
        assert_eq!(config.synergy_table[3], [2.0, 4.0, 8.0]);
    }

    #[test]
    fn test_tiers() {
        let config = ScoringConfig::default();
        assert_eq!(config.tier_for(0), 0);
        assert_eq!(config.tier_for(1), 1);
        assert_eq!(config.tier_for(2), 2);
        assert_eq!(config.tier_for(3), 3);
        assert_eq!(config.tier_for(12), 3);
    }

    #[test]
    fn test_contribution_is_signed() {
        let config = ScoringConfig::default();
        assert_eq!(config.contribution(1, 1), 0.5);
        assert_eq!(config.contribution(-2, 2), -2.0);
        assert_eq!(config.contribution(3, 3), 6.0);
        assert_eq!(config.contribution(4, 0), 0.0);
    }

    #[test]
    fn test_invalid_clamp_rejected() {
        let config = ScoringConfig::default().with_synergy_clamp(1.0, -1.0);
        assert!(matches!(config.validate(), Err(SasError::InvalidConfig(_))));
        assert_eq!(config.clamp_synergy(0.5), 1.0);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: ScoringConfig = serde_json::from_str(r#"{ "sasOffset": 12.5 }"#).unwrap();
        assert_eq!(config.sas_offset, 12.5);
        assert_eq!(config.max_synergy, 2.0);
        assert_eq!(config.deck_traits, DeckTraitThresholds::default());
    }

    #[test]
    fn test_aggregate_strength() {
        let thresholds = DeckTraitThresholds::default();
        assert_eq!(thresholds.strength(SynergyTrait::HighCreatureCount, 5.0), 0);
        assert_eq!(thresholds.strength(SynergyTrait::HighCreatureCount, 7.5), 2);
        assert_eq!(thresholds.strength(SynergyTrait::HighCreatureCount, 10.0), 4);
        assert_eq!(thresholds.strength(SynergyTrait::LowCreatureCount, 4.0), 2);
        assert_eq!(thresholds.strength(SynergyTrait::LowCreatureCount, 6.0), 0);
        assert_eq!(thresholds.strength(SynergyTrait::DealsDamage, 100.0), 0);
    }

    #[test]
    fn test_non_monotonic_cutoffs_rejected() {
        let mut config = ScoringConfig::default();
        config.deck_traits.high_total_armor = [2.0, 1.0, 6.0, 8.0];
        assert!(config.validate().is_err());
    }
}
