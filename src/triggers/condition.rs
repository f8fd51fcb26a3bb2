//! Trap trigger kinds and eligibility.
//!
//! A set trap is eligible for a window when:
//! - it is face-down in its owner's spell/trap zone
//! - its trigger kind matches the window
//! - it was set on an earlier side turn than the current one

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::CardRegistry;
use crate::core::{MatchState, SideId};

/// What makes a trap eligible.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TriggerKind {
    /// An opponent monster declares an attack.
    OnAttack,
    /// The opponent normal or tribute summons.
    OnSummon,
    /// The trap owner lost life during the opponent's action.
    OnDamage,
    /// The opponent's turn begins.
    OnEnemyTurnStart,
    /// Activated by its owner with `ActivateSetSpell` during their main phase.
    Manual,
}

impl TriggerKind {
    pub const ALL: [TriggerKind; 5] = [
        TriggerKind::OnAttack,
        TriggerKind::OnSummon,
        TriggerKind::OnDamage,
        TriggerKind::OnEnemyTurnStart,
        TriggerKind::Manual,
    ];
}

/// Check whether the trap in `owner`'s spell/trap `slot` may fire for
/// `trigger` right now.
#[must_use]
pub fn is_eligible(
    state: &MatchState,
    registry: &CardRegistry,
    owner: SideId,
    slot: usize,
    trigger: TriggerKind,
) -> bool {
    let Some(set) = state.sides[owner].zones.spell_trap(slot) else {
        return false;
    };
    if !set.face_down || set.set_on_sequence >= state.turn_sequence {
        return false;
    }
    registry
        .get(set.card.template)
        .and_then(|t| t.trap_parts())
        .map_or(false, |(kind, _)| kind == trigger)
}

/// Eligible trap slots of `owner` in slot order.
#[must_use]
pub fn eligible_traps(
    state: &MatchState,
    registry: &CardRegistry,
    owner: SideId,
    trigger: TriggerKind,
) -> SmallVec<[usize; 5]> {
    (0..crate::zones::SLOT_COUNT)
        .filter(|&slot| is_eligible(state, registry, owner, slot, trigger))
        .collect()
}
