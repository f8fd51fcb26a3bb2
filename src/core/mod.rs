//! Core types: instance ids, sides, state, actions, RNG, configuration
//! and errors.
//!
//! Everything the rules operate on lives here; the rules themselves live
//! in [`crate::rules`] and [`crate::games::duel`].

pub mod action;
pub mod config;
pub mod entity;
pub mod error;
pub mod player;
pub mod rng;
pub mod state;

pub use action::{Action, ActionKind, ActionRecord, AttackTarget};
pub use config::{MatchConfig, TrapPolicy, DEFAULT_HAND_CAP, DEFAULT_OPENING_HAND, DEFAULT_STARTING_LIFE};
pub use entity::{InstanceAllocator, InstanceId};
pub use error::{ActionError, ErrorClass, ReplayError, SetupError};
pub use player::{SideId, SideMap};
pub use rng::{GameRng, GameRngState};
pub use state::{MatchState, SideState};
