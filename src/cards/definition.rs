//! Card definitions - static catalog data.
//!
//! `CardDefinition` holds the immutable attributes of a named card. The
//! engine copies the attributes it needs into each `CardInstance` when a
//! deck is built, so the catalog is never consulted mid-match.

use serde::{Deserialize, Serialize};

/// Card category. Drives mana value and battlefield eligibility.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardCategory {
    #[serde(alias = "Unit")]
    Unit,
    #[serde(alias = "Ship")]
    Ship,
    /// Produces mana only; cannot be deployed as a unit.
    #[serde(alias = "Shipyard")]
    Shipyard,
}

impl CardCategory {
    /// Whether cards of this category can be played onto the battlefield.
    #[must_use]
    pub const fn is_deployable(self) -> bool {
        matches!(self, CardCategory::Unit | CardCategory::Ship)
    }
}

impl std::fmt::Display for CardCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            CardCategory::Unit => "unit",
            CardCategory::Ship => "ship",
            CardCategory::Shipyard => "shipyard",
        };
        f.write_str(label)
    }
}

/// Static card definition.
///
/// Catalog files written with the older `power`/`defense` field names
/// are accepted as aliases for `attack`/`health`.
///
/// ```
/// use duel_ccg::cards::{CardCategory, CardDefinition};
///
/// let tank = CardDefinition::new("Heavy Tank", CardCategory::Unit)
///     .with_cost(3)
///     .with_stats(3, 3);
///
/// assert_eq!(tank.attack, 3);
/// assert!(tank.category.is_deployable());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDefinition {
    /// Catalog name, unique within a catalog.
    pub name: String,

    pub category: CardCategory,

    /// Mana needed to deploy.
    #[serde(default)]
    pub cost: i64,

    #[serde(default, alias = "power")]
    pub attack: i64,

    #[serde(default, alias = "defense")]
    pub health: i64,
}

impl CardDefinition {
    /// Create a definition with zero cost and stats.
    #[must_use]
    pub fn new(name: impl Into<String>, category: CardCategory) -> Self {
        Self {
            name: name.into(),
            category,
            cost: 0,
            attack: 0,
            health: 0,
        }
    }

    /// Set the deployment cost (builder pattern).
    #[must_use]
    pub fn with_cost(mut self, cost: i64) -> Self {
        self.cost = cost;
        self
    }

    /// Set attack and health (builder pattern).
    #[must_use]
    pub fn with_stats(mut self, attack: i64, health: i64) -> Self {
        self.attack = attack;
        self.health = health;
        self
    }
}
