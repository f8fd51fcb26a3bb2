//! Effect system for spells and traps.
//!
//! - `SpellEffect` / `TrapEffect`: closed sets of effect descriptors
//! - `TargetSide` / `Selection` / `RevivePick`: how effects choose what they hit
//! - `EffectResolver`: applies effect lists to match state
//!
//! Effects are data. Templates carry them, the resolver interprets them,
//! and nothing is registered at runtime.

mod effect;
mod resolver;
mod targeting;

pub use effect::{BoostDuration, SpellEffect, TrapEffect};
pub use resolver::{EffectResolver, TrapOutcome};
pub use targeting::{RevivePick, Selection, TargetSide};
