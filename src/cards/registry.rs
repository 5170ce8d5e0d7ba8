//! Card catalog: read-only name → definition lookup.
//!
//! The catalog is loaded once (usually from JSON) and shared read-only by
//! every match. It also owns the category → mana value table, so mana
//! rules live with the card data rather than in the phase machine.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::definition::{CardCategory, CardDefinition};
use super::instance::CardInstance;
use crate::core::entity::CardInstanceId;
use crate::core::error::ConstructionError;

/// Mana gained when a card of a given category enters the mana zone.
///
/// Categories without an explicit entry use the default value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManaTable {
    default_value: i64,
    #[serde(default)]
    overrides: FxHashMap<CardCategory, i64>,
}

impl Default for ManaTable {
    fn default() -> Self {
        Self::uniform(1).with_value(CardCategory::Ship, 2)
    }
}

impl ManaTable {
    /// Every category yields `value`.
    #[must_use]
    pub fn uniform(value: i64) -> Self {
        Self {
            default_value: value,
            overrides: FxHashMap::default(),
        }
    }

    /// Override one category (builder pattern).
    #[must_use]
    pub fn with_value(mut self, category: CardCategory, value: i64) -> Self {
        self.overrides.insert(category, value);
        self
    }

    /// Mana value of a category.
    #[must_use]
    pub fn value_of(&self, category: CardCategory) -> i64 {
        self.overrides
            .get(&category)
            .copied()
            .unwrap_or(self.default_value)
    }
}

/// Failures while loading a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("malformed catalog data")]
    Parse(#[from] serde_json::Error),

    #[error("card {name:?} is defined twice")]
    DuplicateName { name: String },
}

/// Catalog of card definitions.
///
/// ## Example
///
/// ```
/// use duel_ccg::cards::{CardCatalog, CardCategory, CardDefinition};
///
/// let mut catalog = CardCatalog::new();
/// catalog
///     .register(CardDefinition::new("Scout Drone", CardCategory::Unit).with_cost(2).with_stats(2, 1))
///     .unwrap();
///
/// let drone = catalog.get("Scout Drone").unwrap();
/// assert_eq!(drone.cost, 2);
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardCatalog {
    cards: FxHashMap<String, CardDefinition>,
    mana_table: ManaTable,
}

impl CardCatalog {
    /// Create an empty catalog with the default mana table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The stock card pool.
    #[must_use]
    pub fn starter() -> Self {
        let mut catalog = Self::new();
        let pool = [
            CardDefinition::new("Foot Soldier", CardCategory::Unit).with_cost(1).with_stats(1, 2),
            CardDefinition::new("Heavy Tank", CardCategory::Unit).with_cost(3).with_stats(3, 3),
            CardDefinition::new("Starship", CardCategory::Ship).with_cost(5).with_stats(5, 4),
            CardDefinition::new("Scout Drone", CardCategory::Unit).with_cost(2).with_stats(2, 1),
            CardDefinition::new("Orbital Shipyard", CardCategory::Shipyard),
        ];
        for def in pool {
            catalog.cards.insert(def.name.clone(), def);
        }
        catalog
    }

    /// Load definitions from a JSON array.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let defs: Vec<CardDefinition> = serde_json::from_str(json)?;
        let mut catalog = Self::new();
        for def in defs {
            catalog.register(def)?;
        }
        Ok(catalog)
    }

    /// Replace the mana table (builder pattern).
    #[must_use]
    pub fn with_mana_table(mut self, table: ManaTable) -> Self {
        self.mana_table = table;
        self
    }

    /// Register a definition. Names must be unique.
    pub fn register(&mut self, def: CardDefinition) -> Result<(), CatalogError> {
        if self.cards.contains_key(&def.name) {
            return Err(CatalogError::DuplicateName { name: def.name });
        }
        self.cards.insert(def.name.clone(), def);
        Ok(())
    }

    /// Look up a definition by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&CardDefinition> {
        self.cards.get(name)
    }

    /// Check if a name is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.cards.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate over all definitions (unordered).
    pub fn iter(&self) -> impl Iterator<Item = &CardDefinition> {
        self.cards.values()
    }

    /// All names, sorted, for deterministic random picks.
    #[must_use]
    pub fn sorted_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.cards.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Find definitions of one category.
    pub fn find_by_category(&self, category: CardCategory) -> impl Iterator<Item = &CardDefinition> {
        self.cards.values().filter(move |c| c.category == category)
    }

    /// The category → mana value table.
    #[must_use]
    pub fn mana_table(&self) -> &ManaTable {
        &self.mana_table
    }

    /// Create a runtime instance of a named card.
    pub fn instantiate(&self, name: &str, id: CardInstanceId) -> Result<CardInstance, ConstructionError> {
        self.get(name)
            .map(|def| CardInstance::from_definition(id, def))
            .ok_or_else(|| ConstructionError::UnknownCard { name: name.to_string() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_mana_table() {
        let table = ManaTable::default();
        assert_eq!(table.value_of(CardCategory::Ship), 2);
        assert_eq!(table.value_of(CardCategory::Unit), 1);
        assert_eq!(table.value_of(CardCategory::Shipyard), 1);
    }

    #[test]
    fn test_custom_mana_table() {
        let table = ManaTable::uniform(0).with_value(CardCategory::Shipyard, 3);
        assert_eq!(table.value_of(CardCategory::Shipyard), 3);
        assert_eq!(table.value_of(CardCategory::Unit), 0);
    }

    #[test]
    fn test_register_and_get() {
        let mut catalog = CardCatalog::new();
        catalog
            .register(CardDefinition::new("Test Card", CardCategory::Unit))
            .unwrap();

        assert!(catalog.contains("Test Card"));
        assert!(catalog.get("Missing").is_none());
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let mut catalog = CardCatalog::new();
        catalog.register(CardDefinition::new("A", CardCategory::Unit)).unwrap();

        let err = catalog.register(CardDefinition::new("A", CardCategory::Ship)).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateName { name } if name == "A"));
    }

    #[test]
    fn test_from_json() {
        let json = r#"[
            {"name": "Foot Soldier", "category": "unit", "cost": 1, "power": 1, "defense": 2},
            {"name": "Starship", "category": "ship", "cost": 5, "attack": 5, "health": 4}
        ]"#;
        let catalog = CardCatalog::from_json(json).unwrap();

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get("Starship").unwrap().health, 4);
        assert_eq!(catalog.get("Foot Soldier").unwrap().attack, 1);
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(matches!(
            CardCatalog::from_json("{not json"),
            Err(CatalogError::Parse(_))
        ));
    }

    #[test]
    fn test_starter_pool() {
        let catalog = CardCatalog::starter();
        assert_eq!(catalog.len(), 5);
        assert_eq!(catalog.find_by_category(CardCategory::Unit).count(), 3);
        assert_eq!(
            catalog.sorted_names(),
            vec!["Foot Soldier", "Heavy Tank", "Orbital Shipyard", "Scout Drone", "Starship"]
        );
    }

    #[test]
    fn test_instantiate() {
        let catalog = CardCatalog::starter();

        let tank = catalog.instantiate("Heavy Tank", CardInstanceId(4)).unwrap();
        assert_eq!(tank.id, CardInstanceId(4));
        assert_eq!(tank.cost, 3);
        assert!(!tank.tapped);

        assert_eq!(
            catalog.instantiate("Dreadnought", CardInstanceId(5)).unwrap_err(),
            ConstructionError::UnknownCard { name: "Dreadnought".to_string() }
        );
    }
}
