//! Card system: templates, instances, registry and the standard catalog.
//!
//! ## Key Types
//!
//! - `TemplateId`: Identifier for card templates (what decks list)
//! - `CardTemplate`: Immutable card data, tagged by `CardKind`
//! - `CardInstance`: One physical copy with a match-unique `InstanceId`
//! - `MonsterCard` / `SetCard`: Board-only state of a card in a slot
//! - `CardRegistry`: Template lookup

pub mod attributes;
pub mod catalog;
pub mod definition;
pub mod instance;
pub mod registry;

pub use attributes::Attribute;
pub use definition::{CardKind, CardTemplate, MonsterStats, TemplateId};
pub use instance::{Boost, BoostStat, CardInstance, MonsterCard, Position, SetCard, SummonMethod};
pub use registry::CardRegistry;
