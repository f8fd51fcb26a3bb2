//! Duel rules: phases, combat arithmetic and the rules engine trait.
//!
//! - `phase`: the turn's phase cycle and `can_perform` gating
//! - `combat`: effective stats and the attack outcome table
//! - `engine`: `RulesEngine`, implemented by [`crate::games::duel::Duel`]

pub mod combat;
pub mod engine;
pub mod phase;

pub use combat::{CombatOutcome, Defender, EffectiveStats};
pub use engine::{MatchResult, RulesEngine};
pub use phase::{can_perform, Permission, Phase};
