//! Match configuration.
//!
//! The rules numbers (life, deck size, hand size, fatigue) and the mana
//! table are data, not constants baked into the phase machine.

use serde::{Deserialize, Serialize};

use crate::cards::{CardCatalog, ManaTable};

/// Parameters for a single match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Life each participant starts with.
    pub starting_life: i64,

    /// Exact number of cards a deck must contain.
    pub deck_size: usize,

    /// Cards dealt to each hand after shuffling.
    pub opening_hand_size: usize,

    /// Life lost when drawing from an empty deck.
    pub fatigue_damage: i64,

    /// Seed for deck shuffles. Same seed and decks produce the same match.
    pub seed: u64,

    /// Mana gained per card category when committed to the mana zone.
    /// Copied from the catalog the decks were built from.
    pub mana_table: ManaTable,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            starting_life: 20,
            deck_size: 40,
            opening_hand_size: 7,
            fatigue_damage: 1,
            seed: 42,
            mana_table: ManaTable::default(),
        }
    }
}

impl MatchConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the shuffle seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set starting life.
    pub fn with_starting_life(mut self, life: i64) -> Self {
        self.starting_life = life;
        self
    }

    /// Set the required deck size.
    pub fn with_deck_size(mut self, size: usize) -> Self {
        self.deck_size = size;
        self
    }

    /// Set the opening hand size.
    pub fn with_opening_hand_size(mut self, size: usize) -> Self {
        self.opening_hand_size = size;
        self
    }

    /// Set fatigue damage.
    pub fn with_fatigue_damage(mut self, damage: i64) -> Self {
        self.fatigue_damage = damage;
        self
    }

    /// Default rules with the mana table of `catalog`.
    pub fn from_catalog(catalog: &CardCatalog) -> Self {
        Self::default().with_catalog(catalog)
    }

    /// Take the mana table from `catalog`, the only place it is defined.
    pub fn with_catalog(mut self, catalog: &CardCatalog) -> Self {
        self.mana_table = catalog.mana_table().clone();
        self
    }
}
