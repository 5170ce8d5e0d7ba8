//! Deck assembly: saved card lists → card instances.
//!
//! A `DeckBuilder` is created per match so both decks draw ids from the
//! same allocator. It validates the deck size and every name against the
//! catalog; shuffling is left to match construction.

use super::instance::CardInstance;
use super::registry::CardCatalog;
use crate::core::entity::InstanceIdAllocator;
use crate::core::error::ConstructionError;
use crate::core::player::ParticipantId;
use crate::core::rng::GameRng;

/// Builds match-ready decks from catalog names.
///
/// ```
/// use duel_ccg::cards::{CardCatalog, DeckBuilder};
/// use duel_ccg::core::ParticipantId;
///
/// let catalog = CardCatalog::starter();
/// let mut builder = DeckBuilder::new(&catalog, 2);
///
/// let deck = builder
///     .build(&ParticipantId::new("alice"), &["Heavy Tank", "Starship"])
///     .unwrap();
/// assert_eq!(deck.len(), 2);
/// assert_ne!(deck[0].id, deck[1].id);
/// ```
#[derive(Debug)]
pub struct DeckBuilder<'a> {
    catalog: &'a CardCatalog,
    deck_size: usize,
    ids: InstanceIdAllocator,
}

impl<'a> DeckBuilder<'a> {
    /// Create a builder producing decks of exactly `deck_size` cards.
    #[must_use]
    pub fn new(catalog: &'a CardCatalog, deck_size: usize) -> Self {
        Self {
            catalog,
            deck_size,
            ids: InstanceIdAllocator::new(),
        }
    }

    /// Build a deck from an explicit list of names.
    pub fn build<S: AsRef<str>>(
        &mut self,
        owner: &ParticipantId,
        names: &[S],
    ) -> Result<Vec<CardInstance>, ConstructionError> {
        if names.len() != self.deck_size {
            return Err(ConstructionError::DeckSize {
                participant: owner.clone(),
                expected: self.deck_size,
                actual: names.len(),
            });
        }

        // Resolve every name before allocating so a bad list burns no ids.
        let defs = names
            .iter()
            .map(|name| {
                self.catalog
                    .get(name.as_ref())
                    .ok_or_else(|| ConstructionError::UnknownCard {
                        name: name.as_ref().to_string(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(defs
            .into_iter()
            .map(|def| CardInstance::from_definition(self.ids.alloc(), def))
            .collect())
    }

    /// Pick a deck from a larger saved collection.
    ///
    /// The collection is shuffled and the first `deck_size` names are used.
    pub fn from_collection<S: AsRef<str>>(
        &mut self,
        owner: &ParticipantId,
        collection: &[S],
        rng: &mut GameRng,
    ) -> Result<Vec<CardInstance>, ConstructionError> {
        if collection.len() < self.deck_size {
            return Err(ConstructionError::DeckSize {
                participant: owner.clone(),
                expected: self.deck_size,
                actual: collection.len(),
            });
        }

        let mut names: Vec<&str> = collection.iter().map(AsRef::as_ref).collect();
        rng.shuffle(&mut names);
        names.truncate(self.deck_size);
        self.build(owner, &names)
    }

    /// Draw a uniformly random deck from the whole catalog (with repeats).
    pub fn random_deck(
        &mut self,
        owner: &ParticipantId,
        rng: &mut GameRng,
    ) -> Result<Vec<CardInstance>, ConstructionError> {
        let pool = self.catalog.sorted_names();
        let names: Vec<&str> = (0..self.deck_size)
            .filter_map(|_| rng.choose(&pool).copied())
            .collect();
        self.build(owner, &names)
    }
}
