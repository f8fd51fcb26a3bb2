//! Events and the trap-trigger system.
//!
//! ## Key Components
//!
//! - [`Event`]: Closed set of things that happen in a match
//! - [`TriggerKind`]: What a trap answers to
//! - [`eligible_traps`]: Which set traps may fire for a trigger right now
//! - [`TrapWindow`]: The paused state in which the non-active side answers
//!
//! Windows open for attacks, summons, life loss and the start of the
//! opponent's turn. The match either pauses with a `TrapOffered` event or
//! resolves the window on its own, depending on the configured
//! [`TrapPolicy`](crate::core::TrapPolicy).

mod condition;
mod event;
mod window;

pub use condition::{eligible_traps, is_eligible, TriggerKind};
pub use event::Event;
pub use window::{AttackerRef, TrapContext, TrapWindow};
