//! Trait and synergy vocabulary
//!
//! Traits are tags declared on a card ("deals damage", "captures aember").
//! Synergy rules on other cards match against those tags, against the
//! implicit card-type tags, against deck-wide aggregate properties, or
//! against a specific card by name.

use crate::core::{CardName, CardType};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

macro_rules! synergy_traits {
    ($($variant:ident => $name:literal),+ $(,)?) => {
        /// The closed trait vocabulary
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum SynergyTrait {
            $($variant),+
        }

        impl SynergyTrait {
            pub const ALL: &'static [SynergyTrait] = &[$(SynergyTrait::$variant),+];

            /// Name used in catalog files
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(SynergyTrait::$variant => $name),+
                }
            }
        }

        impl FromStr for SynergyTrait {
            type Err = String;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                match s {
                    $($name => Ok(SynergyTrait::$variant),)+
                    _ => Err(format!("unknown trait '{s}'")),
                }
            }
        }
    };
}

synergy_traits! {
    // Declared traits
    DealsDamage => "dealsDamage",
    DestroysCreatures => "destroysCreatures",
    DestroysArtifacts => "destroysArtifacts",
    CapturesAmber => "capturesAmber",
    StealsAmber => "stealsAmber",
    LosesAmber => "losesAmber",
    GainsAmber => "gainsAmber",
    ReapsAmber => "reapsAmber",
    DrawsCards => "drawsCards",
    IncreasesHandSize => "increasesHandSize",
    DiscardsCards => "discardsCards",
    Archives => "archives",
    ForgesKeys => "forgesKeys",
    IncreasesKeyCost => "increasesKeyCost",
    ReadiesCreatures => "readiesCreatures",
    UsesCreatures => "usesCreatures",
    Fights => "fights",
    Reaps => "reaps",
    Exhausts => "exhausts",
    Stuns => "stuns",
    Enrages => "enrages",
    Heals => "heals",
    AddsArmor => "addsArmor",
    AddsPowerCounters => "addsPowerCounters",
    HasElusive => "hasElusive",
    HasTaunt => "hasTaunt",
    HasAssault => "hasAssault",
    HasHazardous => "hasHazardous",
    ReturnsToHand => "returnsToHand",
    ReturnsFromDiscard => "returnsFromDiscard",
    PurgesCards => "purgesCards",
    Sacrifices => "sacrifices",
    DestroysSelf => "destroysSelf",
    PutsCreaturesIntoPlay => "putsCreaturesIntoPlay",
    PlaysOutOfHouse => "playsOutOfHouse",
    ShufflesDiscard => "shufflesDiscard",
    HighPower => "highPower",
    LowPower => "lowPower",

    // Implicit from card type
    Creature => "creature",
    Action => "action",
    Artifact => "artifact",
    Upgrade => "upgrade",

    // Deck-wide aggregates
    HighCreatureCount => "highCreatureCount",
    LowCreatureCount => "lowCreatureCount",
    HighActionCount => "highActionCount",
    HighArtifactCount => "highArtifactCount",
    HighUpgradeCount => "highUpgradeCount",
    HighTotalCreaturePower => "highTotalCreaturePower",
    LowTotalCreaturePower => "lowTotalCreaturePower",
    HighTotalArmor => "highTotalArmor",
    HighRawAmber => "highRawAmber",

    // Synergy with a named card
    Card => "card",
}

impl SynergyTrait {
    /// Traits derived from deck statistics rather than declared on cards
    pub fn is_aggregate(&self) -> bool {
        matches!(
            self,
            SynergyTrait::HighCreatureCount
                | SynergyTrait::LowCreatureCount
                | SynergyTrait::HighActionCount
                | SynergyTrait::HighArtifactCount
                | SynergyTrait::HighUpgradeCount
                | SynergyTrait::HighTotalCreaturePower
                | SynergyTrait::LowTotalCreaturePower
                | SynergyTrait::HighTotalArmor
                | SynergyTrait::HighRawAmber
        )
    }

    /// The card type this trait is implied by, if any
    pub fn card_type(&self) -> Option<CardType> {
        match self {
            SynergyTrait::Creature => Some(CardType::Creature),
            SynergyTrait::Action => Some(CardType::Action),
            SynergyTrait::Artifact => Some(CardType::Artifact),
            SynergyTrait::Upgrade => Some(CardType::Upgrade),
            _ => None,
        }
    }

    pub fn for_card_type(card_type: CardType) -> SynergyTrait {
        match card_type {
            CardType::Creature => SynergyTrait::Creature,
            CardType::Action => SynergyTrait::Action,
            CardType::Artifact => SynergyTrait::Artifact,
            CardType::Upgrade => SynergyTrait::Upgrade,
        }
    }

    /// Whether a card may list this in its `traits`
    pub fn can_be_declared(&self) -> bool {
        !self.is_aggregate() && self.card_type().is_none() && *self != SynergyTrait::Card
    }
}

impl fmt::Display for SynergyTrait {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for SynergyTrait {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for SynergyTrait {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// House scope of a trait or synergy rule, relative to the holder's deck house
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SynTraitHouse {
    #[default]
    AnyHouse,
    House,
    OutOfHouse,
}

impl SynTraitHouse {
    /// Whether a card in `other` is in scope for a holder in `holder`
    pub fn permits(&self, holder: crate::core::House, other: crate::core::House) -> bool {
        match self {
            SynTraitHouse::AnyHouse => true,
            SynTraitHouse::House => holder == other,
            SynTraitHouse::OutOfHouse => holder != other,
        }
    }
}

/// Which player a trait or rule concerns
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SynTraitPlayer {
    #[default]
    Any,
    Friendly,
    Enemy,
}

impl SynTraitPlayer {
    pub fn matches(&self, other: SynTraitPlayer) -> bool {
        *self == SynTraitPlayer::Any || other == SynTraitPlayer::Any || *self == other
    }
}

/// Signed rule strength in -4..=4, never 0
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i8", into = "i8")]
pub struct Rating(i8);

impl Rating {
    pub fn new(value: i8) -> Option<Rating> {
        if value != 0 && (-4..=4).contains(&value) {
            Some(Rating(value))
        } else {
            None
        }
    }

    pub fn value(&self) -> i8 {
        self.0
    }

    /// 1..=4
    pub fn magnitude(&self) -> usize {
        self.0.unsigned_abs() as usize
    }

    pub fn is_positive(&self) -> bool {
        self.0 > 0
    }

    pub fn signum(&self) -> f64 {
        if self.0 > 0 {
            1.0
        } else {
            -1.0
        }
    }
}

impl TryFrom<i8> for Rating {
    type Error = String;

    fn try_from(value: i8) -> std::result::Result<Self, Self::Error> {
        Rating::new(value).ok_or_else(|| format!("rating {value} outside -4..=4 or zero"))
    }
}

impl From<Rating> for i8 {
    fn from(rating: Rating) -> i8 {
        rating.0
    }
}

/// A trait a card carries
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TraitRule {
    #[serde(rename = "trait")]
    pub trait_: SynergyTrait,
    pub rating: Rating,
    pub house: SynTraitHouse,
    pub player: SynTraitPlayer,
}

impl TraitRule {
    pub fn new(trait_: SynergyTrait, rating: Rating) -> Self {
        TraitRule {
            trait_,
            rating,
            house: SynTraitHouse::AnyHouse,
            player: SynTraitPlayer::Any,
        }
    }

    pub fn with_house(mut self, house: SynTraitHouse) -> Self {
        self.house = house;
        self
    }

    pub fn with_player(mut self, player: SynTraitPlayer) -> Self {
        self.player = player;
        self
    }
}

/// What a synergy rule looks for
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SynergyTarget {
    Trait(SynergyTrait),
    Card(CardName),
}

impl fmt::Display for SynergyTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SynergyTarget::Trait(t) => write!(f, "{t}"),
            SynergyTarget::Card(name) => write!(f, "{name}"),
        }
    }
}

impl Serialize for SynergyTarget {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A synergy (positive rating) or antisynergy (negative rating) rule
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SynergyRule {
    pub target: SynergyTarget,
    pub rating: Rating,
    pub house: SynTraitHouse,
    pub player: SynTraitPlayer,
}

impl SynergyRule {
    pub fn new(target: SynergyTarget, rating: Rating) -> Self {
        SynergyRule {
            target,
            rating,
            house: SynTraitHouse::AnyHouse,
            player: SynTraitPlayer::Any,
        }
    }

    pub fn with_trait(trait_: SynergyTrait, rating: Rating) -> Self {
        Self::new(SynergyTarget::Trait(trait_), rating)
    }

    pub fn with_card(name: impl Into<CardName>, rating: Rating) -> Self {
        Self::new(SynergyTarget::Card(name.into()), rating)
    }

    pub fn with_house(mut self, house: SynTraitHouse) -> Self {
        self.house = house;
        self
    }

    pub fn with_player(mut self, player: SynTraitPlayer) -> Self {
        self.player = player;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::House;

    #[test]
    fn test_trait_names_round_trip() {
        for t in SynergyTrait::ALL {
            assert_eq!(t.as_str().parse::<SynergyTrait>(), Ok(*t));
        }
        assert!("dealsDmg".parse::<SynergyTrait>().is_err());
    }

    #[test]
    fn test_declarable_traits() {
        assert!(SynergyTrait::DealsDamage.can_be_declared());
        assert!(!SynergyTrait::Creature.can_be_declared());
        assert!(!SynergyTrait::HighTotalArmor.can_be_declared());
        assert!(!SynergyTrait::Card.can_be_declared());
        assert_eq!(SynergyTrait::for_card_type(CardType::Artifact), SynergyTrait::Artifact);
    }

    #[test]
    fn test_rating_bounds() {
        assert!(Rating::new(0).is_none());
        assert!(Rating::new(5).is_none());
        assert!(Rating::new(-5).is_none());
        let r = Rating::new(-3).unwrap();
        assert_eq!(r.magnitude(), 3);
        assert!(!r.is_positive());
        assert!(serde_json::from_str::<Rating>("0").is_err());
    }

    #[test]
    fn test_house_scope() {
        assert!(SynTraitHouse::AnyHouse.permits(House::Dis, House::Logos));
        assert!(SynTraitHouse::House.permits(House::Dis, House::Dis));
        assert!(!SynTraitHouse::House.permits(House::Dis, House::Logos));
        assert!(SynTraitHouse::OutOfHouse.permits(House::Dis, House::Logos));
        assert!(!SynTraitHouse::OutOfHouse.permits(House::Dis, House::Dis));
    }

    #[test]
    fn test_player_scope() {
        assert!(SynTraitPlayer::Any.matches(SynTraitPlayer::Enemy));
        assert!(SynTraitPlayer::Friendly.matches(SynTraitPlayer::Any));
        assert!(!SynTraitPlayer::Friendly.matches(SynTraitPlayer::Enemy));
    }

    #[test]
    fn test_serialized_names() {
        assert_eq!(serde_json::to_string(&SynTraitHouse::OutOfHouse).unwrap(), "\"outOfHouse\"");
        assert_eq!(serde_json::to_string(&SynergyTrait::HighRawAmber).unwrap(), "\"highRawAmber\"");
    }
}
