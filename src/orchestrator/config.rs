//! Orchestrator configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::cards::CardCatalog;
use crate::core::config::MatchConfig;

/// Runtime settings shared by every match an orchestrator hosts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrchestratorConfig {
    /// Pause before each bot intent so observers can follow along.
    pub bot_action_delay: Duration,

    /// Capacity of each match's command queue.
    pub command_buffer_size: usize,

    /// Capacity of the match event broadcast.
    pub event_capacity: usize,

    /// Seed of the stream that seeds each new match.
    pub seed: u64,

    /// Template for new matches; `seed` is replaced per match.
    pub match_config: MatchConfig,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            bot_action_delay: Duration::from_millis(800),
            command_buffer_size: 32,
            event_capacity: 256,
            seed: 42,
            match_config: MatchConfig::default(),
        }
    }
}

impl OrchestratorConfig {
    /// Set the bot pacing delay.
    pub fn with_bot_action_delay(mut self, delay: Duration) -> Self {
        self.bot_action_delay = delay;
        self
    }

    /// Set the seed stream.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Replace the match template.
    pub fn with_match_config(mut self, config: MatchConfig) -> Self {
        self.match_config = config;
        self
    }

    /// Use the mana table of the catalog decks are built from.
    pub fn with_catalog(mut self, catalog: &CardCatalog) -> Self {
        self.match_config = self.match_config.with_catalog(catalog);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardCategory, ManaTable};

    #[test]
    fn test_default_config() {
        let config = OrchestratorConfig::default();
        assert_eq!(config.bot_action_delay, Duration::from_millis(800));
        assert_eq!(config.command_buffer_size, 32);
        assert_eq!(config.match_config.deck_size, 40);
    }

    #[test]
    fn test_builder() {
        let config = OrchestratorConfig::default()
            .with_bot_action_delay(Duration::ZERO)
            .with_seed(9)
            .with_match_config(MatchConfig::default().with_starting_life(5));

        assert_eq!(config.bot_action_delay, Duration::ZERO);
        assert_eq!(config.seed, 9);
        assert_eq!(config.match_config.starting_life, 5);
    }

    #[test]
    fn test_with_catalog() {
        let catalog = CardCatalog::starter().with_mana_table(ManaTable::uniform(2));
        let config = OrchestratorConfig::default().with_catalog(&catalog);

        assert_eq!(config.match_config.mana_table.value_of(CardCategory::Unit), 2);
    }
}
