//! Card system: catalog definitions, runtime instances, deck assembly.
//!
//! ## Key Types
//!
//! - `CardCategory`: Unit, Ship, Shipyard
//! - `CardDefinition`: Static catalog data
//! - `CardCatalog`: Read-only name lookup plus the mana table
//! - `ManaTable`: Category → mana value
//! - `CardInstance`: One physical card in a match
//! - `DeckBuilder`: Saved name lists → validated instances

pub mod deck;
pub mod definition;
pub mod instance;
pub mod registry;

pub use deck::DeckBuilder;
pub use definition::{CardCategory, CardDefinition};
pub use instance::CardInstance;
pub use registry::{CardCatalog, CatalogError, ManaTable};
