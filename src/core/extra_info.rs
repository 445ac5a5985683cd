//! Editorial scoring data attached to a card

use crate::core::{AercAxis, AercMax, AercScores, SynergyRule, TraitRule};
use serde::Serialize;

/// AERC ratings plus declared traits and synergy rules
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtraCardInfo {
    pub aerc: AercScores,
    pub aerc_max: AercMax,
    pub traits: Vec<TraitRule>,
    pub synergies: Vec<SynergyRule>,
}

impl ExtraCardInfo {
    pub fn new(aerc: AercScores) -> Self {
        ExtraCardInfo {
            aerc,
            ..ExtraCardInfo::default()
        }
    }

    pub fn with_max(mut self, axis: AercAxis, value: f64) -> Self {
        *self.aerc_max.get_mut(axis) = Some(value);
        self
    }

    pub fn with_trait(mut self, rule: TraitRule) -> Self {
        self.traits.push(rule);
        self
    }

    pub fn with_synergy(mut self, rule: SynergyRule) -> Self {
        self.synergies.push(rule);
        self
    }
}
