//! Deck SAS - Main Binary
//!
//! Scores KeyForge decks (AERC and SAS) from a card catalog and deck lists

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use deck_sas::{
    batch,
    loader::{CardCatalog, DeckLoader},
    scoring::{DeckScorer, DeckSynergyInfo, PopulationStats, ScoringConfig},
};
use log::{LevelFilter, Log, Metadata, Record};
use std::path::{Path, PathBuf};

/// Verbosity level for log output (custom parser supporting both names and numbers)
#[derive(Debug, Clone, Copy)]
struct VerbosityArg(LevelFilter);

impl std::str::FromStr for VerbosityArg {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "silent" | "0" => Ok(VerbosityArg(LevelFilter::Off)),
            "minimal" | "1" => Ok(VerbosityArg(LevelFilter::Warn)),
            "normal" | "2" => Ok(VerbosityArg(LevelFilter::Info)),
            "verbose" | "3" => Ok(VerbosityArg(LevelFilter::Debug)),
            _ => Err(format!(
                "invalid verbosity level '{s}' (expected: silent/0, minimal/1, normal/2, verbose/3)"
            )),
        }
    }
}

/// Writes log records to stderr
struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("[{}] {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

fn init_logging(verbosity: VerbosityArg) {
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(verbosity.0);
    }
}

#[derive(Parser)]
#[command(name = "sas")]
#[command(about = "Deck SAS - KeyForge deck scoring (AERC and SAS)", long_about = None)]
struct Cli {
    /// Verbosity level for log output (0=silent, 1=minimal, 2=normal, 3=verbose)
    #[arg(long, default_value = "minimal", short = 'v', global = true)]
    verbosity: VerbosityArg,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score a single deck
    Score {
        /// Card catalog (.json)
        #[arg(value_name = "CATALOG")]
        catalog: PathBuf,

        /// Deck list (.dck)
        #[arg(value_name = "DECK")]
        deck: PathBuf,

        /// Scoring config overrides (.json)
        #[arg(long, value_name = "CONFIG_FILE")]
        config: Option<PathBuf>,

        /// Population percentile table (.json)
        #[arg(long, value_name = "POPULATION_FILE")]
        population: Option<PathBuf>,

        /// Print the full result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Rescore every .dck file under a directory in parallel
    Batch {
        /// Card catalog (.json)
        #[arg(value_name = "CATALOG")]
        catalog: PathBuf,

        /// Directory searched recursively for .dck files
        #[arg(value_name = "DIR")]
        dir: PathBuf,

        /// Scoring config overrides (.json)
        #[arg(long, value_name = "CONFIG_FILE")]
        config: Option<PathBuf>,

        /// Population percentile table (.json)
        #[arg(long, value_name = "POPULATION_FILE")]
        population: Option<PathBuf>,

        /// Write a percentile table rebuilt from this batch
        #[arg(long, value_name = "OUTPUT_FILE")]
        write_population: Option<PathBuf>,
    },

    /// Load and validate a card catalog
    Validate {
        /// Card catalog (.json)
        #[arg(value_name = "CATALOG")]
        catalog: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbosity);

    match cli.command {
        Commands::Score {
            catalog,
            deck,
            config,
            population,
            json,
        } => run_score(&catalog, &deck, config.as_deref(), population.as_deref(), json),
        Commands::Batch {
            catalog,
            dir,
            config,
            population,
            write_population,
        } => run_batch(
            &catalog,
            &dir,
            config.as_deref(),
            population.as_deref(),
            write_population.as_deref(),
        ),
        Commands::Validate { catalog } => {
            let catalog = load_catalog(&catalog)?;
            println!("Catalog OK: {} cards", catalog.len());
            Ok(())
        }
    }
}

fn load_catalog(path: &Path) -> anyhow::Result<CardCatalog> {
    CardCatalog::load_from_file(path).with_context(|| format!("loading catalog {}", path.display()))
}

fn load_config(path: Option<&Path>) -> anyhow::Result<ScoringConfig> {
    match path {
        Some(path) => ScoringConfig::load_from_file(path)
            .with_context(|| format!("loading config {}", path.display())),
        None => Ok(ScoringConfig::default()),
    }
}

fn load_population(path: Option<&Path>) -> anyhow::Result<Option<PopulationStats>> {
    path.map(|path| {
        PopulationStats::load_from_file(path)
            .with_context(|| format!("loading population {}", path.display()))
    })
    .transpose()
}

fn run_score(
    catalog: &Path,
    deck: &Path,
    config: Option<&Path>,
    population: Option<&Path>,
    json: bool,
) -> anyhow::Result<()> {
    let catalog = load_catalog(catalog)?;
    let config = load_config(config)?;
    let population = load_population(population)?;

    let list = DeckLoader::load_from_file(deck).with_context(|| format!("loading deck {}", deck.display()))?;
    let deck = list
        .resolve(&catalog)
        .with_context(|| format!("resolving deck {}", deck.display()))?;

    let mut scorer = DeckScorer::new(&config);
    if let Some(population) = &population {
        scorer = scorer.with_population(population);
    }
    let info = scorer.score(&deck)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&info)?);
    } else {
        print_summary(deck.name.as_deref().unwrap_or("deck"), &info);
    }
    Ok(())
}

fn run_batch(
    catalog: &Path,
    dir: &Path,
    config: Option<&Path>,
    population: Option<&Path>,
    write_population: Option<&Path>,
) -> anyhow::Result<()> {
    let catalog = load_catalog(catalog)?;
    let config = load_config(config)?;
    let population = load_population(population)?;

    let paths = batch::discover_deck_files(dir)?;
    if paths.is_empty() {
        bail!("no .dck files found under {}", dir.display());
    }
    println!("Rescoring {} decks...", paths.len());

    let report = batch::rescore_files(&catalog, &paths, &config, population.as_ref());

    println!("\n=== Batch Complete ===");
    println!("Decks scored: {}", report.scored.len());
    println!("Decks failed: {}", report.failures.len());
    println!("Elapsed time: {:.2}s", report.elapsed.as_secs_f64());
    println!("Decks per second: {:.2}", report.decks_per_second());
    if let Some(mean) = report.mean_sas() {
        println!("Mean SAS: {mean:.2}");
    }

    let mut ranked: Vec<_> = report.scored.iter().collect();
    ranked.sort_by(|a, b| b.info.sas_rating.cmp(&a.info.sas_rating).then_with(|| a.label.cmp(&b.label)));
    println!("\n=== Ratings ===");
    for deck in ranked {
        match deck.info.sas_percentile {
            Some(pct) => println!("  {:>4} SAS ({pct:5.1}%)  {}", deck.info.sas_rating, deck.label),
            None => println!("  {:>4} SAS  {}", deck.info.sas_rating, deck.label),
        }
    }

    if !report.failures.is_empty() {
        println!("\n=== Failures ===");
        for failure in &report.failures {
            println!("  {}: {}", failure.label, failure.error);
        }
    }

    if let Some(out) = write_population {
        let table = report.population()?;
        table
            .save_to_file(out)
            .with_context(|| format!("writing population {}", out.display()))?;
        println!("\nWrote {} population buckets to {}", table.len(), out.display());
    }
    Ok(())
}

fn print_summary(name: &str, info: &DeckSynergyInfo) {
    println!("=== {name} ===");
    match (info.sas_percentile, info.sa_stars) {
        (Some(pct), Some(stars)) => println!(
            "SAS: {} ({pct:.1} percentile, {} stars{})",
            info.sas_rating,
            stars.stars(),
            if stars.is_gold() { ", gold" } else { "" }
        ),
        _ => println!("SAS: {}", info.sas_rating),
    }
    println!("Raw AERC: {:.2}", info.raw_aerc);
    println!("Synergy: +{:.2}  Antisynergy: -{:.2}", info.synergy_rating, info.antisynergy_rating);
    if info.efficiency_bonus > 0.0 {
        println!("Efficiency bonus: {:.2}", info.efficiency_bonus);
    }

    println!("\n=== AERC ===");
    for (axis, value) in info.aerc.iter() {
        println!("  {:<18} {value:6.2}", axis.display_name());
    }

    println!("\n=== Houses ===");
    for house in &info.house_scores {
        println!(
            "  {:<13} {:6.2}  (aerc {:.2}, +{:.2}, -{:.2})",
            house.house.as_str(),
            house.sas,
            house.raw_aerc,
            house.synergy_rating,
            house.antisynergy_rating
        );
    }

    println!("\n=== Cards ===");
    for combo in &info.synergy_combos {
        let mut notes = Vec::new();
        if !combo.synergies.is_empty() {
            notes.push(format!("+[{}]", combo.synergies.join(", ")));
        }
        if !combo.antisynergies.is_empty() {
            notes.push(format!("-[{}]", combo.antisynergies.join(", ")));
        }
        println!(
            "  {}x {:<28} {:<13} {:5.2} {:+5.2}  {}",
            combo.copies,
            combo.card_name.as_str(),
            combo.house.as_str(),
            combo.card_rating,
            combo.net_synergy,
            notes.join(" ")
        );
    }
}
