//! Synergy resolution
//!
//! Works in two passes. First every placement's effective traits are
//! collected deck-wide (declared traits plus the implicit card-type
//! trait). Then, for each distinct (card name, deck house) group, the
//! card's synergy rules are matched against the other placements, the
//! match counts are converted to tiers, and the contributions are summed
//! and clamped.
//!
//! Copies of a card in the same house are merged into one combo and
//! evaluated once on their first placement. Self-exclusion is by
//! placement, so the other copies still count as matches.

use crate::core::{
    AercAxis, AercScores, Card, CardName, CardType, DeckCard, House, Rating, SynTraitHouse,
    SynTraitPlayer, SynergyRule, SynergyTarget, SynergyTrait,
};
use crate::scoring::config::ScoringConfig;
use crate::scoring::statistics::{DeckStatistics, HouseStatistics};
use serde::Serialize;
use smallvec::SmallVec;

/// Resolved scoring record for one (card name, deck house) group
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SynergyCombo {
    pub card_name: CardName,
    pub house: House,
    pub card_type: CardType,
    pub copies: u32,

    /// Resolved AERC of one copy (max values applied where unlocked)
    pub aerc: AercScores,

    /// Sum of `aerc` with effective power down-weighted
    pub card_rating: f64,

    /// Sum of rule contributions before clamping
    pub raw_synergy: f64,

    /// `raw_synergy` clamped to the configured range
    pub net_synergy: f64,

    pub synergies: SmallVec<[String; 4]>,
    pub antisynergies: SmallVec<[String; 4]>,

    /// One entry per synergy rule on the card
    pub matches: Vec<SynergyMatch>,
}

impl SynergyCombo {
    /// Base rating plus net synergy, per copy
    pub fn value(&self) -> f64 {
        self.card_rating + self.net_synergy
    }
}

/// How one synergy rule fared in this deck
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SynergyMatch {
    pub target: SynergyTarget,
    pub rating: Rating,
    pub house: SynTraitHouse,
    pub player: SynTraitPlayer,

    /// Matching placements (or aggregate strength), capped
    pub match_count: usize,
    pub tier: u8,
    pub contribution: f64,

    /// Names of the matching cards, deduplicated
    pub partners: SmallVec<[CardName; 4]>,
}

/// A trait carried by one placement
#[derive(Debug, Clone, Copy)]
struct TraitInstance {
    trait_: SynergyTrait,
    house: SynTraitHouse,
    player: SynTraitPlayer,
}

fn effective_traits(card: &Card) -> SmallVec<[TraitInstance; 4]> {
    let mut traits: SmallVec<[TraitInstance; 4]> = card
        .extra_info
        .traits
        .iter()
        .map(|t| TraitInstance {
            trait_: t.trait_,
            house: t.house,
            player: t.player,
        })
        .collect();
    traits.push(TraitInstance {
        trait_: SynergyTrait::for_card_type(card.card_type),
        house: SynTraitHouse::AnyHouse,
        player: SynTraitPlayer::Any,
    });
    traits
}

/// Resolve synergies for every (card name, deck house) group
///
/// Combos are ordered by house, then card name.
pub fn resolve(
    cards: &[DeckCard],
    statistics: &DeckStatistics,
    config: &ScoringConfig,
) -> Vec<SynergyCombo> {
    let traits: Vec<_> = cards.iter().map(|p| effective_traits(&p.card)).collect();
    let resolver = Resolver {
        cards,
        traits: &traits,
        statistics,
        config,
    };

    let mut groups: Vec<(usize, String, u32)> = Vec::new();
    for (index, placement) in cards.iter().enumerate() {
        let key = placement.card.name.lookup_key();
        match groups
            .iter_mut()
            .find(|(first, k, _)| cards[*first].house == placement.house && *k == key)
        {
            Some((_, _, copies)) => *copies += 1,
            None => groups.push((index, key, 1)),
        }
    }
    groups.sort_by(|a, b| cards[a.0].house.cmp(&cards[b.0].house).then_with(|| a.1.cmp(&b.1)));

    groups
        .into_iter()
        .map(|(holder, _, copies)| resolver.combo(holder, copies))
        .collect()
}

struct Resolver<'a> {
    cards: &'a [DeckCard],
    traits: &'a [SmallVec<[TraitInstance; 4]>],
    statistics: &'a DeckStatistics,
    config: &'a ScoringConfig,
}

impl Resolver<'_> {
    fn combo(&self, holder: usize, copies: u32) -> SynergyCombo {
        let placement = &self.cards[holder];
        let card = &placement.card;

        let matches: Vec<SynergyMatch> = card
            .extra_info
            .synergies
            .iter()
            .map(|rule| self.evaluate(holder, rule))
            .collect();

        let raw_synergy: f64 = matches.iter().map(|m| m.contribution).sum();
        let net_synergy = self.config.clamp_synergy(raw_synergy);

        let mut synergies = SmallVec::new();
        let mut antisynergies = SmallVec::new();
        for m in &matches {
            let label = m.target.to_string();
            let list: &mut SmallVec<[String; 4]> = if m.contribution > 0.0 {
                &mut synergies
            } else if m.contribution < 0.0 {
                &mut antisynergies
            } else {
                continue;
            };
            if !list.contains(&label) {
                list.push(label);
            }
        }

        let aerc = self.resolve_aerc(card, &matches);
        let card_rating = aerc.rating(self.config.effective_power_divisor);

        SynergyCombo {
            card_name: card.name.clone(),
            house: placement.house,
            card_type: card.card_type,
            copies,
            aerc,
            card_rating,
            raw_synergy,
            net_synergy,
            synergies,
            antisynergies,
            matches,
        }
    }

    /// Nominal AERC, with a `*Max` value substituted when a rule pointing
    /// the same way reaches the scaling tier
    fn resolve_aerc(&self, card: &Card, matches: &[SynergyMatch]) -> AercScores {
        let info = &card.extra_info;
        AercScores::from_fn(|axis: AercAxis| {
            let nominal = *info.aerc.get(axis);
            match *info.aerc_max.get(axis) {
                Some(max) => {
                    let wants_positive = max >= nominal;
                    let unlocked = matches.iter().any(|m| {
                        m.rating.is_positive() == wants_positive
                            && m.tier >= self.config.max_scaling_tier
                    });
                    if unlocked {
                        max
                    } else {
                        nominal
                    }
                }
                None => nominal,
            }
        })
    }

    fn evaluate(&self, holder: usize, rule: &SynergyRule) -> SynergyMatch {
        let (count, partners) = match &rule.target {
            SynergyTarget::Trait(t) if t.is_aggregate() => (self.aggregate_strength(holder, rule, *t), SmallVec::new()),
            SynergyTarget::Trait(t) => self.count_matches(holder, rule, |index| {
                self.traits[index].iter().any(|instance| {
                    instance.trait_ == *t
                        && rule.player.matches(instance.player)
                        && instance.house.permits(self.cards[index].house, self.cards[holder].house)
                })
            }),
            SynergyTarget::Card(name) => {
                let key = name.lookup_key();
                self.count_matches(holder, rule, |index| self.cards[index].card.name.lookup_key() == key)
            }
        };

        let counted = count.min(self.config.max_counted_matches);
        let tier = self.config.tier_for(counted);
        SynergyMatch {
            target: rule.target.clone(),
            rating: rule.rating,
            house: rule.house,
            player: rule.player,
            match_count: counted,
            tier,
            contribution: self.config.contribution(rule.rating.value(), tier),
            partners,
        }
    }

    /// Placements other than `holder` that are in the rule's house scope
    /// and satisfy `is_match`
    fn count_matches(
        &self,
        holder: usize,
        rule: &SynergyRule,
        is_match: impl Fn(usize) -> bool,
    ) -> (usize, SmallVec<[CardName; 4]>) {
        let holder_house = self.cards[holder].house;
        let mut count = 0;
        let mut partners: SmallVec<[CardName; 4]> = SmallVec::new();
        for (index, placement) in self.cards.iter().enumerate() {
            if index == holder || !rule.house.permits(holder_house, placement.house) {
                continue;
            }
            if is_match(index) {
                count += 1;
                if !partners.contains(&placement.card.name) {
                    partners.push(placement.card.name.clone());
                }
            }
        }
        (count, partners)
    }

    /// Strength 0..=4 of a deck-wide trait over the houses in scope,
    /// leaving out the holder's own card
    fn aggregate_strength(&self, holder: usize, rule: &SynergyRule, trait_: SynergyTrait) -> usize {
        let holder_house = self.cards[holder].house;
        let in_scope: SmallVec<[&(House, HouseStatistics); 3]> = self
            .statistics
            .by_house
            .iter()
            .filter(|(house, _)| rule.house.permits(holder_house, *house))
            .collect();
        if in_scope.is_empty() {
            return 0;
        }

        let mut total: f64 = in_scope
            .iter()
            .filter_map(|(_, stats)| stats.aggregate_value(trait_))
            .sum();
        if rule.house.permits(holder_house, holder_house) {
            let mut own = HouseStatistics::default();
            own.add(&self.cards[holder].card);
            total -= own.aggregate_value(trait_).unwrap_or(0.0);
        }

        let average = total / in_scope.len() as f64;
        self.config.deck_traits.strength(trait_, average)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ExtraCardInfo, TraitRule};
    use crate::scoring::statistics::compute_statistics;
    use std::sync::Arc;

    fn rating(v: i8) -> Rating {
        Rating::new(v).unwrap()
    }

    fn filler(house: House) -> Arc<Card> {
        Arc::new(Card::new(format!("f-{house}"), format!("Filler {house}"), house, CardType::Action))
    }

    /// 12 cards per house, with `special` replacing the first Brobnar fillers
    fn deck_with(special: &[DeckCard]) -> Vec<DeckCard> {
        let mut cards = special.to_vec();
        for house in [House::Brobnar, House::Dis, House::Logos] {
            let already = cards.iter().filter(|c| c.house == house).count();
            let filler = filler(house);
            cards.extend((already..12).map(|_| DeckCard::native(filler.clone())));
        }
        cards
    }

    fn run(cards: &[DeckCard]) -> Vec<SynergyCombo> {
        let config = ScoringConfig::default();
        let stats = compute_statistics(cards).unwrap();
        resolve(cards, &stats, &config)
    }

    fn combo<'a>(combos: &'a [SynergyCombo], name: &str) -> &'a SynergyCombo {
        combos.iter().find(|c| c.card_name.as_str() == name).unwrap()
    }

    #[test]
    fn test_inert_cards_have_no_synergy() {
        let combos = run(&deck_with(&[]));
        assert_eq!(combos.len(), 3);
        assert!(combos.iter().all(|c| c.net_synergy == 0.0 && c.matches.is_empty()));
        assert_eq!(combos.iter().map(|c| c.copies).sum::<u32>(), 36);
    }

    #[test]
    fn test_self_is_excluded() {
        let pack_hunter = Arc::new(
            Card::new("p", "Pack Hunter", House::Brobnar, CardType::Creature).with_extra_info(
                ExtraCardInfo::default()
                    .with_trait(TraitRule::new(SynergyTrait::Fights, rating(1)))
                    .with_synergy(SynergyRule::with_trait(SynergyTrait::Fights, rating(1))),
            ),
        );

        let single = run(&deck_with(&[DeckCard::native(pack_hunter.clone())]));
        assert_eq!(combo(&single, "Pack Hunter").net_synergy, 0.0);

        let pair = run(&deck_with(&[
            DeckCard::native(pack_hunter.clone()),
            DeckCard::native(pack_hunter),
        ]));
        let c = combo(&pair, "Pack Hunter");
        assert_eq!(c.copies, 2);
        assert_eq!(c.matches[0].match_count, 1);
        assert_eq!(c.net_synergy, 0.5);
        assert_eq!(c.synergies.as_slice(), &["fights".to_string()]);
    }

    #[test]
    fn test_house_scoped_rule() {
        let leader = Arc::new(
            Card::new("l", "Leader", House::Brobnar, CardType::Action).with_extra_info(
                ExtraCardInfo::default().with_synergy(
                    SynergyRule::with_trait(SynergyTrait::Creature, rating(1))
                        .with_house(SynTraitHouse::House),
                ),
            ),
        );
        let grunt = Arc::new(Card::new("g", "Grunt", House::Dis, CardType::Creature));

        let cards = deck_with(&[
            DeckCard::native(leader.clone()),
            DeckCard::native(grunt.clone()),
            DeckCard::native(grunt.clone()),
        ]);
        assert_eq!(combo(&run(&cards), "Leader").matches[0].match_count, 0);

        let mut out_of_house = (*leader).clone();
        out_of_house.extra_info.synergies[0].house = SynTraitHouse::OutOfHouse;
        let cards = deck_with(&[
            DeckCard::native(Arc::new(out_of_house)),
            DeckCard::native(grunt.clone()),
            DeckCard::native(grunt),
        ]);
        let binding = run(&cards);
        let c = combo(&binding, "Leader");
        assert_eq!(c.matches[0].match_count, 2);
        assert_eq!(c.matches[0].tier, 2);
        assert_eq!(c.net_synergy, 1.0);
    }

    #[test]
    fn test_maverick_scored_in_deck_house() {
        let gardener = Arc::new(
            Card::new("m", "Gardener", House::Untamed, CardType::Action).with_extra_info(
                ExtraCardInfo::default().with_synergy(
                    SynergyRule::with_trait(SynergyTrait::Action, rating(1))
                        .with_house(SynTraitHouse::House),
                ),
            ),
        );
        let cards = deck_with(&[DeckCard::new(gardener, House::Dis)]);
        let binding = run(&cards);
        let c = combo(&binding, "Gardener");
        assert_eq!(c.house, House::Dis);
        assert_eq!(c.matches[0].match_count, 4);
        assert_eq!(c.matches[0].tier, 3);
    }

    #[test]
    fn test_clamp_after_sum() {
        let glutton = Arc::new(
            Card::new("x", "Glutton", House::Logos, CardType::Action).with_extra_info(
                ExtraCardInfo::default()
                    .with_synergy(SynergyRule::with_trait(SynergyTrait::Action, rating(4)))
                    .with_synergy(SynergyRule::with_card("Filler Dis", rating(-1))),
            ),
        );
        let binding = run(&deck_with(&[DeckCard::native(glutton)]));
        let c = combo(&binding, "Glutton");
        assert_eq!(c.raw_synergy, 6.0);
        assert_eq!(c.net_synergy, 2.0);
        assert_eq!(c.antisynergies.as_slice(), &["Filler Dis".to_string()]);
    }

    #[test]
    fn test_trait_house_scope_limits_partners() {
        let shy = Arc::new(
            Card::new("s", "Shy", House::Dis, CardType::Creature).with_extra_info(
                ExtraCardInfo::default()
                    .with_trait(TraitRule::new(SynergyTrait::Heals, rating(2)).with_house(SynTraitHouse::House)),
            ),
        );
        let medic = Arc::new(
            Card::new("h", "Medic", House::Brobnar, CardType::Creature).with_extra_info(
                ExtraCardInfo::default().with_synergy(SynergyRule::with_trait(SynergyTrait::Heals, rating(2))),
            ),
        );
        let cards = deck_with(&[DeckCard::native(medic), DeckCard::native(shy)]);
        assert_eq!(combo(&run(&cards), "Medic").matches[0].match_count, 0);
    }

    #[test]
    fn test_player_scope() {
        let thief = Arc::new(
            Card::new("t", "Thief", House::Dis, CardType::Action).with_extra_info(
                ExtraCardInfo::default()
                    .with_trait(TraitRule::new(SynergyTrait::StealsAmber, rating(1)).with_player(SynTraitPlayer::Enemy)),
            ),
        );
        let fence = Arc::new(
            Card::new("f", "Fence", House::Dis, CardType::Action).with_extra_info(
                ExtraCardInfo::default().with_synergy(
                    SynergyRule::with_trait(SynergyTrait::StealsAmber, rating(2)).with_player(SynTraitPlayer::Friendly),
                ),
            ),
        );
        let cards = deck_with(&[DeckCard::native(fence), DeckCard::native(thief)]);
        assert_eq!(combo(&run(&cards), "Fence").matches[0].match_count, 0);
    }

    #[test]
    fn test_max_scaling_unlocks_at_tier_three() {
        let captain = Card::new("c", "Captain", House::Brobnar, CardType::Creature).with_extra_info(
            ExtraCardInfo::new(AercScores {
                effective_power: 3.0,
                ..AercScores::default()
            })
            .with_max(AercAxis::EffectivePower, 6.0)
            .with_synergy(SynergyRule::with_trait(SynergyTrait::Creature, rating(1)).with_house(SynTraitHouse::House)),
        );
        let captain = Arc::new(captain);
        let soldier = Arc::new(Card::new("s", "Soldier", House::Brobnar, CardType::Creature));

        let two = deck_with(&[
            DeckCard::native(captain.clone()),
            DeckCard::native(soldier.clone()),
            DeckCard::native(soldier.clone()),
        ]);
        assert_eq!(combo(&run(&two), "Captain").aerc.effective_power, 3.0);

        let three = deck_with(&[
            DeckCard::native(captain),
            DeckCard::native(soldier.clone()),
            DeckCard::native(soldier.clone()),
            DeckCard::native(soldier),
        ]);
        let binding = run(&three);
        let c = combo(&binding, "Captain");
        assert_eq!(c.aerc.effective_power, 6.0);
        assert!((c.card_rating - 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_max_below_nominal_needs_negative_rule() {
        let sapper = |rule_rating: i8| {
            Arc::new(
                Card::new("d", "Sapper", House::Brobnar, CardType::Action).with_extra_info(
                    ExtraCardInfo::new(AercScores {
                        creature_control: 2.0,
                        ..AercScores::default()
                    })
                    .with_max(AercAxis::CreatureControl, 0.5)
                    .with_synergy(
                        SynergyRule::with_trait(SynergyTrait::Creature, rating(rule_rating))
                            .with_house(SynTraitHouse::House),
                    ),
                ),
            )
        };
        let soldier = Arc::new(Card::new("s", "Soldier", House::Brobnar, CardType::Creature));
        let with_soldiers = |holder: Arc<Card>, soldiers: usize| {
            let mut special = vec![DeckCard::native(holder)];
            special.extend((0..soldiers).map(|_| DeckCard::native(soldier.clone())));
            deck_with(&special)
        };

        let two = combo(&run(&with_soldiers(sapper(-1), 2)), "Sapper").aerc.creature_control;
        assert_eq!(two, 2.0);

        let three = combo(&run(&with_soldiers(sapper(-1), 3)), "Sapper").aerc.creature_control;
        assert_eq!(three, 0.5);

        // A positive rule at tier 3 points away from a lower max
        let positive = combo(&run(&with_soldiers(sapper(1), 3)), "Sapper").aerc.creature_control;
        assert_eq!(positive, 2.0);
    }

    #[test]
    fn test_aggregate_excludes_holder() {
        let armored = Arc::new(
            Card::new("a", "Bulwark", House::Brobnar, CardType::Creature)
                .with_stats(0, 4, 12)
                .with_extra_info(ExtraCardInfo::default().with_synergy(
                    SynergyRule::with_trait(SynergyTrait::HighTotalArmor, rating(2))
                        .with_house(SynTraitHouse::House),
                )),
        );
        let binding = run(&deck_with(&[DeckCard::native(armored)]));
        let c = combo(&binding, "Bulwark");
        assert_eq!(c.matches[0].match_count, 0);
        assert_eq!(c.net_synergy, 0.0);
    }

    #[test]
    fn test_combos_ordered_by_house_then_name() {
        let combos = run(&deck_with(&[]));
        let houses: Vec<_> = combos.iter().map(|c| c.house).collect();
        assert_eq!(houses, vec![House::Brobnar, House::Dis, House::Logos]);
    }
}
