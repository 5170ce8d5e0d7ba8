//! Scripted bot configuration.

use serde::{Deserialize, Serialize};

/// Tuning knobs for the scripted bot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BotConfig {
    /// Weight of the cost term in `attack + health - cost_weight * cost`.
    /// Higher values make expensive cards look worse.
    pub cost_weight: f64,

    /// Only chump-block (block with a unit that will die without killing)
    /// when the unblocked damage would otherwise be lethal.
    pub block_when_lethal_only: bool,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            cost_weight: 0.5,
            block_when_lethal_only: true,
        }
    }
}

impl BotConfig {
    /// Set the cost weight.
    pub fn with_cost_weight(mut self, weight: f64) -> Self {
        self.cost_weight = weight;
        self
    }

    /// Chump-block every unblocked attacker when units are left over.
    pub fn always_chump_block(mut self) -> Self {
        self.block_when_lethal_only = false;
        self
    }
}
