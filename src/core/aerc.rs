//! AERC rating axes
//!
//! Every card carries a small editorial rating on each of ten axes. The
//! same shape is used for a card's nominal values, its optional "max"
//! values, and whole-deck totals, so the axis set lives in one generic
//! struct.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul};

/// One of the ten AERC axes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AercAxis {
    AmberControl,
    ExpectedAmber,
    ArtifactControl,
    CreatureControl,
    Efficiency,
    Disruption,
    EffectivePower,
    StealPrevention,
    HouseCheating,
    Other,
}

impl AercAxis {
    pub const ALL: [AercAxis; 10] = [
        AercAxis::AmberControl,
        AercAxis::ExpectedAmber,
        AercAxis::ArtifactControl,
        AercAxis::CreatureControl,
        AercAxis::Efficiency,
        AercAxis::Disruption,
        AercAxis::EffectivePower,
        AercAxis::StealPrevention,
        AercAxis::HouseCheating,
        AercAxis::Other,
    ];

    /// Name shown to players
    pub fn display_name(&self) -> &'static str {
        match self {
            AercAxis::AmberControl => "Aember Control",
            AercAxis::ExpectedAmber => "Expected Aember",
            AercAxis::ArtifactControl => "Artifact Control",
            AercAxis::CreatureControl => "Creature Control",
            AercAxis::Efficiency => "Efficiency",
            AercAxis::Disruption => "Disruption",
            AercAxis::EffectivePower => "Effective Power",
            AercAxis::StealPrevention => "Steal Prevention",
            AercAxis::HouseCheating => "House Cheating",
            AercAxis::Other => "Other",
        }
    }
}

impl fmt::Display for AercAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A value per AERC axis
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Aerc<T> {
    pub amber_control: T,
    pub expected_amber: T,
    pub artifact_control: T,
    pub creature_control: T,
    pub efficiency: T,
    pub disruption: T,
    pub effective_power: T,
    #[serde(alias = "amberProtection")]
    pub steal_prevention: T,
    pub house_cheating: T,
    pub other: T,
}

/// Resolved ratings for a card, or totals for a deck
pub type AercScores = Aerc<f64>;

/// Optional full-strength ratings for a card
pub type AercMax = Aerc<Option<f64>>;

impl<T> Aerc<T> {
    pub fn get(&self, axis: AercAxis) -> &T {
        match axis {
            AercAxis::AmberControl => &self.amber_control,
            AercAxis::ExpectedAmber => &self.expected_amber,
            AercAxis::ArtifactControl => &self.artifact_control,
            AercAxis::CreatureControl => &self.creature_control,
            AercAxis::Efficiency => &self.efficiency,
            AercAxis::Disruption => &self.disruption,
            AercAxis::EffectivePower => &self.effective_power,
            AercAxis::StealPrevention => &self.steal_prevention,
            AercAxis::HouseCheating => &self.house_cheating,
            AercAxis::Other => &self.other,
        }
    }

    pub fn get_mut(&mut self, axis: AercAxis) -> &mut T {
        match axis {
            AercAxis::AmberControl => &mut self.amber_control,
            AercAxis::ExpectedAmber => &mut self.expected_amber,
            AercAxis::ArtifactControl => &mut self.artifact_control,
            AercAxis::CreatureControl => &mut self.creature_control,
            AercAxis::Efficiency => &mut self.efficiency,
            AercAxis::Disruption => &mut self.disruption,
            AercAxis::EffectivePower => &mut self.effective_power,
            AercAxis::StealPrevention => &mut self.steal_prevention,
            AercAxis::HouseCheating => &mut self.house_cheating,
            AercAxis::Other => &mut self.other,
        }
    }

    /// Build a value for every axis from a function of the axis
    pub fn from_fn(mut f: impl FnMut(AercAxis) -> T) -> Self {
        Aerc {
            amber_control: f(AercAxis::AmberControl),
            expected_amber: f(AercAxis::ExpectedAmber),
            artifact_control: f(AercAxis::ArtifactControl),
            creature_control: f(AercAxis::CreatureControl),
            efficiency: f(AercAxis::Efficiency),
            disruption: f(AercAxis::Disruption),
            effective_power: f(AercAxis::EffectivePower),
            steal_prevention: f(AercAxis::StealPrevention),
            house_cheating: f(AercAxis::HouseCheating),
            other: f(AercAxis::Other),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (AercAxis, &T)> + '_ {
        AercAxis::ALL.into_iter().map(move |axis| (axis, self.get(axis)))
    }
}

impl AercScores {
    /// Sum of all axes with effective power divided by `effective_power_divisor`
    pub fn rating(&self, effective_power_divisor: f64) -> f64 {
        self.iter()
            .map(|(axis, value)| {
                if axis == AercAxis::EffectivePower {
                    value / effective_power_divisor
                } else {
                    *value
                }
            })
            .sum()
    }

    pub fn all_finite(&self) -> bool {
        self.iter().all(|(_, v)| v.is_finite())
    }
}

impl AercMax {
    pub fn is_empty(&self) -> bool {
        self.iter().all(|(_, v)| v.is_none())
    }
}

impl Add for AercScores {
    type Output = AercScores;

    fn add(self, rhs: AercScores) -> AercScores {
        AercScores::from_fn(|axis| self.get(axis) + rhs.get(axis))
    }
}

impl AddAssign for AercScores {
    fn add_assign(&mut self, rhs: AercScores) {
        for axis in AercAxis::ALL {
            *self.get_mut(axis) += rhs.get(axis);
        }
    }
}

impl Mul<f64> for AercScores {
    type Output = AercScores;

    fn mul(self, rhs: f64) -> AercScores {
        AercScores::from_fn(|axis| self.get(axis) * rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_down_weights_effective_power() {
        let scores = AercScores {
            expected_amber: 1.5,
            creature_control: 0.5,
            effective_power: 30.0,
            ..AercScores::default()
        };
        assert!((scores.rating(10.0) - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_add_and_scale() {
        let a = AercScores {
            other: 1.0,
            ..AercScores::default()
        };
        let total = (a + a) * 3.0;
        assert_eq!(total.other, 6.0);
        assert_eq!(total.disruption, 0.0);
    }

    #[test]
    fn test_amber_protection_alias() {
        let max: AercMax = serde_json::from_str(r#"{"amberProtection": 2.0}"#).unwrap();
        assert_eq!(max.steal_prevention, Some(2.0));
        assert!(!max.is_empty());
        assert!(AercMax::default().is_empty());
    }

    #[test]
    fn test_display_names() {
        assert_eq!(AercAxis::StealPrevention.to_string(), "Steal Prevention");
        assert_eq!(AercAxis::ALL.len(), 10);
    }
}
