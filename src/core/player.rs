//! Participant identification and per-participant data storage.
//!
//! ## ParticipantId
//!
//! Opaque identity of a seat holder (a user id, or a bot handle such as
//! `"bot"`). The engine never interprets it.
//!
//! ## ParticipantMap
//!
//! Per-participant data keyed by identity. The map also remembers the
//! seating order fixed at match creation; turn parity picks the active
//! seat (`turn % 2`), so nothing outside this module ever indexes
//! participants by position.

use std::ops::Index;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::error::ConstructionError;

/// Identity of a match participant.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantId(String);

impl ParticipantId {
    /// Create a participant id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw identity.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ParticipantId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ParticipantId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Per-participant storage for a two-seat match.
///
/// ## Example
///
/// ```
/// use duel_ccg::core::{ParticipantId, ParticipantMap};
///
/// let alice = ParticipantId::new("alice");
/// let bob = ParticipantId::new("bob");
///
/// let mut life = ParticipantMap::new([alice.clone(), bob.clone()], |_| 20).unwrap();
///
/// if let Some(l) = life.get_mut(&bob) {
///     *l -= 4;
/// }
///
/// assert_eq!(life[&alice], 20);
/// assert_eq!(life[&bob], 16);
/// assert_eq!(life.opponent_of(&alice), Some(&bob));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantMap<T> {
    seating: [ParticipantId; 2],
    data: FxHashMap<ParticipantId, T>,
}

impl<T> ParticipantMap<T> {
    /// Create a map with values from a factory function.
    ///
    /// Fails if both seats name the same participant.
    pub fn new(
        seating: [ParticipantId; 2],
        factory: impl Fn(&ParticipantId) -> T,
    ) -> Result<Self, ConstructionError> {
        if seating[0] == seating[1] {
            return Err(ConstructionError::DuplicateParticipant {
                participant: seating[0].clone(),
            });
        }

        let data = seating.iter().map(|id| (id.clone(), factory(id))).collect();
        Ok(Self { seating, data })
    }

    /// Create a map from a fallible factory.
    pub fn try_new<E>(
        seating: [ParticipantId; 2],
        mut factory: impl FnMut(&ParticipantId) -> Result<T, E>,
    ) -> Result<Self, E>
    where
        E: From<ConstructionError>,
    {
        if seating[0] == seating[1] {
            return Err(ConstructionError::DuplicateParticipant {
                participant: seating[0].clone(),
            }
            .into());
        }

        let mut data = FxHashMap::default();
        for id in &seating {
            data.insert(id.clone(), factory(id)?);
        }
        Ok(Self { seating, data })
    }

    /// Seating order fixed at creation.
    #[must_use]
    pub fn seating(&self) -> &[ParticipantId; 2] {
        &self.seating
    }

    /// Participant occupying the seat selected by `parity` (taken modulo 2).
    #[must_use]
    pub fn seat(&self, parity: u32) -> &ParticipantId {
        &self.seating[(parity % 2) as usize]
    }

    /// The other participant, or `None` if `id` is not seated.
    #[must_use]
    pub fn opponent_of(&self, id: &ParticipantId) -> Option<&ParticipantId> {
        if *id == self.seating[0] {
            Some(&self.seating[1])
        } else if *id == self.seating[1] {
            Some(&self.seating[0])
        } else {
            None
        }
    }

    /// Check whether `id` holds a seat.
    #[must_use]
    pub fn contains(&self, id: &ParticipantId) -> bool {
        self.data.contains_key(id)
    }

    /// Get a participant's data.
    #[must_use]
    pub fn get(&self, id: &ParticipantId) -> Option<&T> {
        self.data.get(id)
    }

    /// Get a participant's data mutably.
    pub fn get_mut(&mut self, id: &ParticipantId) -> Option<&mut T> {
        self.data.get_mut(id)
    }

    /// Iterate in seating order.
    pub fn iter(&self) -> impl Iterator<Item = (&ParticipantId, &T)> {
        self.seating
            .iter()
            .filter_map(move |id| self.data.get(id).map(|value| (id, value)))
    }

    /// Iterate mutably (unordered).
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&ParticipantId, &mut T)> {
        self.data.iter_mut()
    }

    /// Build a new map by transforming each entry.
    pub fn map<U>(&self, f: impl Fn(&ParticipantId, &T) -> U) -> ParticipantMap<U> {
        ParticipantMap {
            seating: self.seating.clone(),
            data: self
                .data
                .iter()
                .map(|(id, value)| (id.clone(), f(id, value)))
                .collect(),
        }
    }
}

impl<T> Index<&ParticipantId> for ParticipantMap<T> {
    type Output = T;

    /// Panics if `id` is not seated; use `get` on untrusted input.
    fn index(&self, id: &ParticipantId) -> &Self::Output {
        &self.data[id]
    }
}
