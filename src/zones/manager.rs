//! Per-participant zones and card movement between them.
//!
//! `Zones` owns every card instance of one participant. Moving a card
//! removes it from one zone and pushes it onto another, so an instance is
//! always in exactly one place. The only way a card leaves `Zones` for good
//! is `remove_from_battlefield` (death).
//!
//! Zones are backed by `im::Vector`, making a full match snapshot an O(1)
//! clone for bots and observers.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::cards::CardInstance;
use crate::core::entity::CardInstanceId;

/// Zones a card can be in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ZoneKind {
    Hand,
    /// Ordered; the top card is the back of the vector.
    Deck,
    Battlefield,
    /// Append-only for the rest of the match.
    ManaZone,
}

impl std::fmt::Display for ZoneKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ZoneKind::Hand => "hand",
            ZoneKind::Deck => "deck",
            ZoneKind::Battlefield => "battlefield",
            ZoneKind::ManaZone => "mana zone",
        };
        f.write_str(label)
    }
}

/// All zones of one participant.
///
/// ```
/// use duel_ccg::cards::{CardCatalog, DeckBuilder};
/// use duel_ccg::core::ParticipantId;
/// use duel_ccg::zones::{ZoneKind, Zones};
///
/// let catalog = CardCatalog::starter();
/// let deck = DeckBuilder::new(&catalog, 2)
///     .build(&ParticipantId::new("alice"), &["Heavy Tank", "Starship"])
///     .unwrap();
///
/// let mut zones = Zones::with_deck(deck);
/// let drawn = zones.draw().unwrap();
///
/// assert_eq!(zones.len(ZoneKind::Hand), 1);
/// assert!(zones.find(ZoneKind::Hand, drawn).is_some());
/// assert_eq!(zones.total_cards(), 2);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zones {
    hand: Vector<CardInstance>,
    deck: Vector<CardInstance>,
    battlefield: Vector<CardInstance>,
    mana_zone: Vector<CardInstance>,
}

impl Zones {
    /// Create zones holding only a deck (already in draw order).
    #[must_use]
    pub fn with_deck(deck: Vec<CardInstance>) -> Self {
        Self {
            deck: deck.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Borrow a zone.
    #[must_use]
    pub fn zone(&self, kind: ZoneKind) -> &Vector<CardInstance> {
        match kind {
            ZoneKind::Hand => &self.hand,
            ZoneKind::Deck => &self.deck,
            ZoneKind::Battlefield => &self.battlefield,
            ZoneKind::ManaZone => &self.mana_zone,
        }
    }

    fn zone_mut(&mut self, kind: ZoneKind) -> &mut Vector<CardInstance> {
        match kind {
            ZoneKind::Hand => &mut self.hand,
            ZoneKind::Deck => &mut self.deck,
            ZoneKind::Battlefield => &mut self.battlefield,
            ZoneKind::ManaZone => &mut self.mana_zone,
        }
    }

    #[must_use]
    pub fn hand(&self) -> &Vector<CardInstance> {
        &self.hand
    }

    #[must_use]
    pub fn deck(&self) -> &Vector<CardInstance> {
        &self.deck
    }

    #[must_use]
    pub fn battlefield(&self) -> &Vector<CardInstance> {
        &self.battlefield
    }

    #[must_use]
    pub fn mana_zone(&self) -> &Vector<CardInstance> {
        &self.mana_zone
    }

    /// Number of cards in a zone.
    #[must_use]
    pub fn len(&self, kind: ZoneKind) -> usize {
        self.zone(kind).len()
    }

    /// Cards across all four zones.
    #[must_use]
    pub fn total_cards(&self) -> usize {
        self.hand.len() + self.deck.len() + self.battlefield.len() + self.mana_zone.len()
    }

    /// Find a card in a zone.
    #[must_use]
    pub fn find(&self, kind: ZoneKind, id: CardInstanceId) -> Option<&CardInstance> {
        self.zone(kind).iter().find(|c| c.id == id)
    }

    fn position(&self, kind: ZoneKind, id: CardInstanceId) -> Option<usize> {
        self.zone(kind).iter().position(|c| c.id == id)
    }

    /// Move the top deck card to the hand. `None` if the deck is empty.
    pub fn draw(&mut self) -> Option<CardInstanceId> {
        let card = self.deck.pop_back()?;
        let id = card.id;
        self.hand.push_back(card);
        Some(id)
    }

    /// Move a card between zones. Returns the moved card, or `None` (and
    /// changes nothing) if it is not in `from`.
    pub fn move_card(
        &mut self,
        id: CardInstanceId,
        from: ZoneKind,
        to: ZoneKind,
    ) -> Option<&mut CardInstance> {
        let index = self.position(from, id)?;
        let card = self.zone_mut(from).remove(index);
        let target = self.zone_mut(to);
        target.push_back(card);
        target.back_mut()
    }

    /// Mutable access to a battlefield unit.
    pub fn unit_mut(&mut self, id: CardInstanceId) -> Option<&mut CardInstance> {
        let index = self.position(ZoneKind::Battlefield, id)?;
        self.battlefield.get_mut(index)
    }

    /// Untap every battlefield unit.
    pub fn untap_all(&mut self) {
        for unit in self.battlefield.iter_mut() {
            unit.tapped = false;
        }
    }

    /// Remove battlefield units whose id satisfies `is_dead`.
    ///
    /// Returns how many units were removed.
    pub fn remove_from_battlefield(&mut self, is_dead: impl Fn(CardInstanceId) -> bool) -> usize {
        let before = self.battlefield.len();
        self.battlefield.retain(|unit| !is_dead(unit.id));
        before - self.battlefield.len()
    }

    /// Untapped battlefield units.
    pub fn ready_units(&self) -> impl Iterator<Item = &CardInstance> {
        self.battlefield.iter().filter(|unit| !unit.tapped)
    }
}
