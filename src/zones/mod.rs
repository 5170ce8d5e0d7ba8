//! Zone system for card locations.
//!
//! Each participant has four zones: hand, deck, battlefield and mana zone.
//! Cards move between zones by ownership transfer; nothing is ever copied.

pub mod manager;

pub use manager::{ZoneKind, Zones};
