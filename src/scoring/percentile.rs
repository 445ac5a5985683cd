//! Population statistics: SAS to percentile lookup
//!
//! The table is maintained outside a scoring pass (by a batch rescore)
//! and consumed read-only. Lookups between tracked values interpolate
//! linearly; values outside the table clamp to 0 and 100.

use crate::{Result, SasError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

#[derive(Debug, Serialize, Deserialize)]
struct PopulationFile {
    percentiles: Vec<(i32, f64)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PopulationStats {
    table: BTreeMap<i32, f64>,
}

impl PopulationStats {
    /// Build from (SAS, percentile) pairs
    ///
    /// SAS values must be strictly increasing and percentiles must be
    /// non-decreasing within `[0, 100]`.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (i32, f64)>) -> Result<Self> {
        let mut table = BTreeMap::new();
        let mut previous: Option<(i32, f64)> = None;
        for (sas, percentile) in pairs {
            if !(0.0..=100.0).contains(&percentile) {
                return Err(SasError::InvalidPopulation(format!(
                    "percentile {percentile} for SAS {sas} is outside [0, 100]"
                )));
            }
            if let Some((prev_sas, prev_pct)) = previous {
                if sas <= prev_sas {
                    return Err(SasError::InvalidPopulation(format!(
                        "SAS {sas} does not follow {prev_sas}"
                    )));
                }
                if percentile < prev_pct {
                    return Err(SasError::InvalidPopulation(format!(
                        "percentile drops from {prev_pct} to {percentile} at SAS {sas}"
                    )));
                }
            }
            previous = Some((sas, percentile));
            table.insert(sas, percentile);
        }
        if table.is_empty() {
            return Err(SasError::InvalidPopulation("empty table".to_string()));
        }
        Ok(PopulationStats { table })
    }

    /// Build the table from a population of SAS ratings
    ///
    /// Each distinct rating gets the midpoint-rank percentile: the share of
    /// decks below it plus half the share of decks equal to it.
    pub fn from_ratings(ratings: &[i32]) -> Result<Self> {
        if ratings.is_empty() {
            return Err(SasError::InvalidPopulation("no ratings".to_string()));
        }
        let mut counts: BTreeMap<i32, usize> = BTreeMap::new();
        for sas in ratings {
            *counts.entry(*sas).or_default() += 1;
        }

        let total = ratings.len() as f64;
        let mut below = 0usize;
        let pairs: Vec<(i32, f64)> = counts
            .into_iter()
            .map(|(sas, count)| {
                let percentile = (below as f64 + count as f64 / 2.0) / total * 100.0;
                below += count;
                (sas, percentile)
            })
            .collect();
        Self::from_pairs(pairs)
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let file: PopulationFile = serde_json::from_str(&content)?;
        let stats = Self::from_pairs(file.percentiles)?;
        log::info!("loaded {} population buckets from {}", stats.len(), path.display());
        Ok(stats)
    }

    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let file = PopulationFile {
            percentiles: self.table.iter().map(|(s, p)| (*s, *p)).collect(),
        };
        fs::write(path, serde_json::to_string_pretty(&file)?)?;
        Ok(())
    }

    /// Percentile of a SAS rating against the population
    pub fn percentile_for(&self, sas: i32) -> f64 {
        if let Some(exact) = self.table.get(&sas) {
            return *exact;
        }
        let below = self.table.range(..sas).next_back();
        let above = self.table.range(sas..).next();
        match (below, above) {
            (None, _) => 0.0,
            (_, None) => 100.0,
            (Some((&lo_sas, &lo_pct)), Some((&hi_sas, &hi_pct))) => {
                let t = (sas - lo_sas) as f64 / (hi_sas - lo_sas) as f64;
                lo_pct + t * (hi_pct - lo_pct)
            }
        }
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

/// Star rating derived from a deck's percentile
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum SaStars {
    Half,
    One,
    OneAndHalf,
    Two,
    TwoAndHalf,
    Three,
    ThreeAndHalf,
    Four,
    FourAndHalf,
    Five,
    GoldFive,
}

impl SaStars {
    pub fn from_percentile(percentile: f64) -> SaStars {
        match percentile {
            p if p >= 99.99 => SaStars::GoldFive,
            p if p >= 99.9 => SaStars::Five,
            p if p >= 99.0 => SaStars::FourAndHalf,
            p if p >= 90.0 => SaStars::Four,
            p if p >= 75.0 => SaStars::ThreeAndHalf,
            p if p >= 25.0 => SaStars::Three,
            p if p >= 10.0 => SaStars::TwoAndHalf,
            p if p >= 1.0 => SaStars::Two,
            p if p >= 0.1 => SaStars::OneAndHalf,
            p if p >= 0.01 => SaStars::One,
            _ => SaStars::Half,
        }
    }

    pub fn stars(&self) -> f64 {
        match self {
            SaStars::Half => 0.5,
            SaStars::One => 1.0,
            SaStars::OneAndHalf => 1.5,
            SaStars::Two => 2.0,
            SaStars::TwoAndHalf => 2.5,
            SaStars::Three => 3.0,
            SaStars::ThreeAndHalf => 3.5,
            SaStars::Four => 4.0,
            SaStars::FourAndHalf => 4.5,
            SaStars::Five | SaStars::GoldFive => 5.0,
        }
    }

    pub fn is_gold(&self) -> bool {
        *self == SaStars::GoldFive
    }
}
