//! Card instance identification.
//!
//! Every physical card in a match has a unique `CardInstanceId`, distinct
//! from its catalog name. Two copies of "Heavy Tank" in the same deck are
//! two instances with two ids.
//!
//! ## Allocation
//!
//! Ids are handed out by an `InstanceIdAllocator` shared by both decks of a
//! match, so ids never collide across participants:
//!
//! ```
//! use duel_ccg::core::InstanceIdAllocator;
//!
//! let mut ids = InstanceIdAllocator::new();
//! let a = ids.alloc();
//! let b = ids.alloc();
//! assert_ne!(a, b);
//! assert_eq!(b.raw(), a.raw() + 1);
//! ```

use serde::{Deserialize, Serialize};

/// Unique identifier for a card instance within a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardInstanceId(pub u32);

impl CardInstanceId {
    /// Create an instance id from a raw value.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for CardInstanceId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for CardInstanceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Sequential allocator for card instance ids.
#[derive(Clone, Debug, Default)]
pub struct InstanceIdAllocator {
    next: u32,
}

impl InstanceIdAllocator {
    /// Start allocating from id 1.
    #[must_use]
    pub fn new() -> Self {
        Self { next: 1 }
    }

    /// Start allocating from a specific id.
    #[must_use]
    pub fn starting_at(first: u32) -> Self {
        Self { next: first }
    }

    /// Allocate the next id.
    pub fn alloc(&mut self) -> CardInstanceId {
        let id = CardInstanceId(self.next);
        self.next += 1;
        id
    }

    /// The id the next `alloc` call will return.
    #[must_use]
    pub fn peek(&self) -> CardInstanceId {
        CardInstanceId(self.next)
    }
}
