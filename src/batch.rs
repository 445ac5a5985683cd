//! Bulk rescoring of many decks in parallel
//!
//! Decks are scored independently with rayon against one shared catalog.
//! A deck that fails to load, resolve or score is logged and reported in
//! [`BatchReport::failures`]; the rest of the batch carries on.

use crate::core::Deck;
use crate::loader::{CardCatalog, DeckList, DeckLoader};
use crate::scoring::{DeckScorer, DeckSynergyInfo, PopulationStats, ScoringConfig};
use crate::{Result, SasError};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// One successfully scored deck
#[derive(Debug, Clone)]
pub struct ScoredDeck {
    pub label: String,
    pub info: DeckSynergyInfo,
}

/// One deck the batch skipped
#[derive(Debug, Clone)]
pub struct BatchFailure {
    pub label: String,
    pub error: String,
}

/// Outcome of a batch, in input order
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    pub scored: Vec<ScoredDeck>,
    pub failures: Vec<BatchFailure>,
    pub elapsed: Duration,
}

impl BatchReport {
    pub fn total(&self) -> usize {
        self.scored.len() + self.failures.len()
    }

    pub fn mean_sas(&self) -> Option<f64> {
        if self.scored.is_empty() {
            return None;
        }
        let sum: i64 = self.scored.iter().map(|d| d.info.sas_rating as i64).sum();
        Some(sum as f64 / self.scored.len() as f64)
    }

    /// Percentile table rebuilt from this batch's ratings
    pub fn population(&self) -> Result<PopulationStats> {
        let ratings: Vec<i32> = self.scored.iter().map(|d| d.info.sas_rating).collect();
        PopulationStats::from_ratings(&ratings)
    }

    pub fn decks_per_second(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.total() as f64 / secs
        } else {
            0.0
        }
    }

    fn from_outcomes(outcomes: Vec<(String, Result<DeckSynergyInfo>)>, start: Instant) -> Self {
        let mut report = BatchReport::default();
        for (label, outcome) in outcomes {
            match outcome {
                Ok(info) => report.scored.push(ScoredDeck { label, info }),
                Err(e) => {
                    log::warn!("skipping deck {label}: {e}");
                    report.failures.push(BatchFailure {
                        label,
                        error: e.to_string(),
                    });
                }
            }
        }
        report.elapsed = start.elapsed();
        log::info!(
            "rescored {} decks ({} failed) in {:.2}s",
            report.scored.len(),
            report.failures.len(),
            report.elapsed.as_secs_f64()
        );
        report
    }
}

fn score_list(
    catalog: &CardCatalog,
    list: &DeckList,
    scorer: &DeckScorer<'_>,
) -> Result<DeckSynergyInfo> {
    let deck: Deck = list.resolve(catalog)?;
    scorer.score(&deck)
}

fn make_scorer<'a>(config: &'a ScoringConfig, population: Option<&'a PopulationStats>) -> DeckScorer<'a> {
    match population {
        Some(p) => DeckScorer::new(config).with_population(p),
        None => DeckScorer::new(config),
    }
}

/// Resolve and score parsed deck lists in parallel
///
/// Decks without a name are labelled by their position in `decks`.
pub fn rescore(
    catalog: &CardCatalog,
    decks: &[DeckList],
    config: &ScoringConfig,
    population: Option<&PopulationStats>,
) -> BatchReport {
    let start = Instant::now();
    let scorer = make_scorer(config, population);

    let outcomes = decks
        .par_iter()
        .enumerate()
        .map(|(index, list)| {
            let label = list.name.clone().unwrap_or_else(|| format!("deck #{index}"));
            (label, score_list(catalog, list, &scorer))
        })
        .collect();

    BatchReport::from_outcomes(outcomes, start)
}

/// Load, resolve and score deck files in parallel
pub fn rescore_files(
    catalog: &CardCatalog,
    paths: &[PathBuf],
    config: &ScoringConfig,
    population: Option<&PopulationStats>,
) -> BatchReport {
    let start = Instant::now();
    let scorer = make_scorer(config, population);

    let outcomes = paths
        .par_iter()
        .map(|path| {
            let label = path.display().to_string();
            let outcome = DeckLoader::load_from_file(path).and_then(|list| score_list(catalog, &list, &scorer));
            (label, outcome)
        })
        .collect();

    BatchReport::from_outcomes(outcomes, start)
}

/// All `.dck` files under `dir`, sorted by path
pub fn discover_deck_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(SasError::IoError(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("Deck directory not found: {dir:?}"),
        )));
    }

    let mut paths = Vec::new();
    for entry in jwalk::WalkDir::new(dir).skip_hidden(false) {
        let entry = entry.map_err(|e| SasError::IoError(std::io::Error::other(e.to_string())))?;
        if entry.file_type().is_file() && entry.path().extension().is_some_and(|ext| ext == "dck") {
            paths.push(entry.path());
        }
    }
    paths.sort();
    Ok(paths)
}
