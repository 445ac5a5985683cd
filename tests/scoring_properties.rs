//! Property tests for the scoring invariants

use deck_sas::core::{
    AercScores, Card, CardType, Deck, DeckCard, ExtraCardInfo, House, Rating, SynTraitHouse,
    SynergyRule, SynergyTrait, TraitRule,
};
use deck_sas::scoring::{DeckScorer, PopulationStats, SaStars, ScoringConfig};
use proptest::prelude::*;
use std::sync::Arc;

const TRAITS: [SynergyTrait; 8] = [
    SynergyTrait::DealsDamage,
    SynergyTrait::CapturesAmber,
    SynergyTrait::DrawsCards,
    SynergyTrait::Archives,
    SynergyTrait::Creature,
    SynergyTrait::Action,
    SynergyTrait::HighCreatureCount,
    SynergyTrait::LowTotalCreaturePower,
];

const HOUSES: [House; 3] = [House::Brobnar, House::Shadows, House::StarAlliance];

fn arb_rating() -> impl Strategy<Value = Rating> {
    prop_oneof![-4i8..=-1, 1i8..=4].prop_map(|v| Rating::new(v).unwrap())
}

fn arb_scope() -> impl Strategy<Value = SynTraitHouse> {
    prop_oneof![
        Just(SynTraitHouse::AnyHouse),
        Just(SynTraitHouse::House),
        Just(SynTraitHouse::OutOfHouse),
    ]
}

fn arb_card(index: usize) -> impl Strategy<Value = Card> {
    let card_type = prop_oneof![Just(CardType::Creature), Just(CardType::Action), Just(CardType::Artifact)];
    let declared = prop::collection::vec((0usize..4, arb_rating(), arb_scope()), 0..3);
    let rules = prop::collection::vec((0usize..TRAITS.len(), arb_rating(), arb_scope()), 0..4);
    (card_type, 0u8..4, 0u8..9, 0.0f64..3.0, 0.0f64..3.0, declared, rules).prop_map(
        move |(card_type, amber, power, expected_amber, control, declared, rules)| {
            let mut info = ExtraCardInfo::new(AercScores {
                expected_amber,
                creature_control: control,
                effective_power: power as f64,
                ..AercScores::default()
            });
            for (t, rating, scope) in declared {
                info = info.with_trait(TraitRule::new(TRAITS[t], rating).with_house(scope));
            }
            for (t, rating, scope) in rules {
                info = info.with_synergy(SynergyRule::with_trait(TRAITS[t], rating).with_house(scope));
            }
            let house = HOUSES[index % HOUSES.len()];
            let power = if card_type == CardType::Creature { power } else { 0 };
            Card::new(format!("p-{index}"), format!("Card {index}"), house, card_type)
                .with_stats(amber, power, 0)
                .with_extra_info(info)
        },
    )
}

/// A pool of cards and a 36-card deck drawn from it, 12 per house
fn arb_deck() -> impl Strategy<Value = Deck> {
    let pool = (0..9usize).map(arb_card).collect::<Vec<_>>();
    (pool, prop::collection::vec(0usize..3, 36)).prop_map(|(pool, picks)| {
        let pool: Vec<Arc<Card>> = pool.into_iter().map(Arc::new).collect();
        let cards = picks
            .iter()
            .enumerate()
            .map(|(slot, pick)| {
                let house_index = slot / 12;
                let card = pool[house_index + 3 * pick].clone();
                DeckCard::new(card, HOUSES[house_index])
            })
            .collect();
        Deck::new(cards).unwrap()
    })
}

proptest! {
    #[test]
    fn net_synergy_is_clamped(deck in arb_deck()) {
        let config = ScoringConfig::default();
        let info = DeckScorer::new(&config).score(&deck).unwrap();
        for combo in &info.synergy_combos {
            prop_assert!(combo.net_synergy >= -2.0 && combo.net_synergy <= 2.0);
        }
        prop_assert!(info.synergy_rating >= 0.0);
        prop_assert!(info.antisynergy_rating >= 0.0);
    }

    #[test]
    fn copies_sum_to_deck_size(deck in arb_deck()) {
        let config = ScoringConfig::default();
        let info = DeckScorer::new(&config).score(&deck).unwrap();
        let copies: u32 = info.synergy_combos.iter().map(|c| c.copies).sum();
        prop_assert_eq!(copies, 36);
    }

    #[test]
    fn scoring_is_deterministic(deck in arb_deck()) {
        let config = ScoringConfig::default();
        let scorer = DeckScorer::new(&config);
        let first = scorer.score(&deck).unwrap();
        let second = scorer.score(&deck).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn house_scores_add_up(deck in arb_deck()) {
        let config = ScoringConfig::default();
        let info = DeckScorer::new(&config).score(&deck).unwrap();
        let sum: f64 = info.house_scores.iter().map(|h| h.sas).sum();
        let expected = info.raw_aerc + info.synergy_rating - info.antisynergy_rating;
        prop_assert!((sum - expected).abs() < 1e-6);
    }

    #[test]
    fn percentile_is_monotonic(
        ratings in prop::collection::vec(-20i32..200, 1..200),
        a in -50i32..250,
        b in -50i32..250,
    ) {
        let population = PopulationStats::from_ratings(&ratings).unwrap();
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(population.percentile_for(lo) <= population.percentile_for(hi));
        let p = population.percentile_for(a);
        prop_assert!((0.0..=100.0).contains(&p));
    }

    #[test]
    fn stars_are_monotonic(a in 0.0f64..=100.0, b in 0.0f64..=100.0) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(SaStars::from_percentile(lo) <= SaStars::from_percentile(hi));
    }
}
