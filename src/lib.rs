//! # duel-kernel
//!
//! A deterministic rules kernel for two-player duel card battles.
//!
//! ## Design Principles
//!
//! 1. **Single Owned State**: The whole match is one `MatchState` tree.
//!    Slots hold cards by value and refer to nothing by pointer.
//!
//! 2. **Rules Apart From State**: `Duel` implements `RulesEngine` and holds
//!    only the card registry and configuration.
//!
//! 3. **Closed Variants**: Actions, events, errors and card effects are
//!    closed enums. New effects extend the enums.
//!
//! ## Architecture
//!
//! - **Atomic Actions**: Every action runs on a clone of the state and is
//!   committed only if it succeeds and the board invariants still hold.
//!   Piles and logs are `im` persistent structures, so the clone is cheap.
//!
//! - **Determinism**: All randomness comes from one seeded ChaCha stream
//!   owned by the state. Same seed and same actions give the same events.
//!
//! - **Trap Windows**: Answering traps is an explicit paused state. The
//!   non-active side must answer before anything else is accepted.
//!
//! ## Modules
//!
//! - `core`: Ids, sides, actions, state, RNG, configuration and errors
//! - `zones`: Deck, hand, monster and spell/trap slots, graveyard
//! - `cards`: Templates, instances, registry and the standard catalog
//! - `terrain`: Biomes and the terrain modifier table
//! - `rules`: Phases, combat arithmetic and the `RulesEngine` trait
//! - `effects`: Spell and trap effects and their resolver
//! - `triggers`: Events, trap triggers and trap windows
//! - `games`: The duel itself: engine, matches, handles and views

pub mod core;
pub mod zones;
pub mod cards;
pub mod terrain;
pub mod rules;
pub mod effects;
pub mod triggers;
pub mod games;

// Re-export commonly used types
pub use crate::core::{
    InstanceId, SideId, SideMap,
    GameRng, GameRngState,
    Action, ActionKind, ActionRecord, AttackTarget,
    MatchConfig, TrapPolicy,
    ActionError, ErrorClass, ReplayError, SetupError,
    MatchState, SideState,
};

pub use crate::zones::{ZoneManager, SLOT_COUNT};

pub use crate::cards::{
    Attribute, CardInstance, CardKind, CardRegistry, CardTemplate,
    MonsterCard, MonsterStats, Position, SetCard, TemplateId,
};

pub use crate::terrain::{Terrain, TerrainModifier};

pub use crate::rules::{MatchResult, Permission, Phase, RulesEngine};

pub use crate::effects::{BoostDuration, EffectResolver, RevivePick, SpellEffect, TargetSide, TrapEffect};

pub use crate::triggers::{Event, TrapWindow, TriggerKind};

pub use crate::games::duel::{
    new_match, Duel, Match, MatchBuilder, MatchHandle, MatchSetup,
    MatchView, TrapDecision, TrapResponder,
};
