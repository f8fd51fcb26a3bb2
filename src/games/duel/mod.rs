//! The duel: two sides, five-slot zones, phased turns, terrain-modified
//! combat, tribute summons and trap windows.
//!
//! - `Duel`: the rules engine (stateless, shareable)
//! - `Match`: one duel with its state; actions are staged and committed
//!   atomically
//! - `MatchHandle`: a shared match that can consult a `TrapResponder`
//! - `MatchBuilder` / `new_match`: construction
//! - `MatchView`: what one seat can see
//!
//! ## Example
//!
//! ```
//! use duel_kernel::cards::catalog::{ids, standard_registry};
//! use duel_kernel::core::{Action, AttackTarget, MatchConfig, SideId};
//! use duel_kernel::games::duel::MatchBuilder;
//!
//! let mut game = MatchBuilder::new(standard_registry().unwrap())
//!     .seed(1)
//!     .deck(SideId::A, vec![ids::EMBER_DRAKE; 10])
//!     .deck(SideId::B, vec![ids::EMBER_DRAKE; 10])
//!     .config(MatchConfig::default().unshuffled())
//!     .build()
//!     .unwrap();
//!
//! game.apply(SideId::A, &Action::AdvancePhase).unwrap();
//! game.apply(SideId::A, &Action::NormalSummon { hand_idx: 0, slot: 0 }).unwrap();
//! game.apply(SideId::A, &Action::AdvancePhase).unwrap();
//! game.apply(SideId::A, &Action::DeclareAttack { attacker_slot: 0, target: AttackTarget::Direct }).unwrap();
//!
//! assert_eq!(game.life(SideId::B), 6500);
//! ```

mod actions;
mod builder;
mod game;
mod resolution;
mod session;
mod traps;
mod view;

pub use builder::{new_match, MatchBuilder, MatchSetup};
pub use game::Duel;
pub use session::{Match, MatchHandle, TrapDecision, TrapResponder};
pub use view::{CardRef, HandView, MatchView, MonsterView, SetCardView, SideView, WindowView};
