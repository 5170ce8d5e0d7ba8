//! Card instances - runtime card state.
//!
//! A `CardInstance` is one physical card in a match. It carries a
//! denormalized copy of the catalog attributes the rules need, plus the
//! `tapped` flag. Instances are moved between zones, never copied.

use serde::{Deserialize, Serialize};

use super::definition::{CardCategory, CardDefinition};
use crate::core::entity::CardInstanceId;

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardInstance {
    /// Match-unique identity.
    pub id: CardInstanceId,

    /// Catalog name (display only; rules never look it up again).
    pub name: String,

    pub category: CardCategory,
    pub cost: i64,
    pub attack: i64,
    pub health: i64,

    /// Used this turn or summoning sick.
    #[serde(default)]
    pub tapped: bool,
}

impl CardInstance {
    /// Stamp out an untapped instance of a definition.
    #[must_use]
    pub fn from_definition(id: CardInstanceId, def: &CardDefinition) -> Self {
        Self {
            id,
            name: def.name.clone(),
            category: def.category,
            cost: def.cost,
            attack: def.attack,
            health: def.health,
            tapped: false,
        }
    }

    /// Whether this card may be deployed as a battlefield unit.
    #[must_use]
    pub fn is_deployable(&self) -> bool {
        self.category.is_deployable()
    }
}
