//! Zone system for card locations.
//!
//! Every side has the same fixed zones: deck, hand, a five-slot monster
//! zone, a five-slot spell/trap zone and a graveyard. Slots refer to cards
//! by value; a card is in exactly one zone at a time.
//!
//! ## Key Types
//!
//! - `ZoneManager`: One side's zones and the moves between them
//! - `ZoneKind` / `ZonePosition`: Where a card currently sits

pub mod manager;

pub use manager::{ZoneKind, ZoneManager, ZonePosition, SLOT_COUNT};
