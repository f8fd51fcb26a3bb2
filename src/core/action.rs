//! Player actions.
//!
//! Every driver request is a first-class tagged variant. Slots index the
//! five-slot zones (0..5); hand indices index the acting side's hand in its
//! current order.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::player::SideId;

/// What a declared attack is aimed at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttackTarget {
    /// The opponent's life points. Legal only with an empty enemy monster zone.
    Direct,
    /// The opponent monster in this slot.
    Monster(usize),
}

/// A complete player action.
///
/// ## Example
///
/// ```
/// use duel_kernel::core::{Action, ActionKind, AttackTarget};
///
/// let summon = Action::NormalSummon { hand_idx: 0, slot: 2 };
/// let attack = Action::DeclareAttack { attacker_slot: 2, target: AttackTarget::Direct };
///
/// assert_eq!(summon.kind(), ActionKind::NormalSummon);
/// assert_eq!(attack.kind(), ActionKind::DeclareAttack);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Move the top card of the deck into hand.
    Draw,
    /// Summon a level 4 or lower monster in attack position.
    NormalSummon { hand_idx: usize, slot: usize },
    /// Summon a level 5+ monster by sending own monsters to the graveyard.
    TributeSummon {
        hand_idx: usize,
        slot: usize,
        tributes: SmallVec<[usize; 2]>,
    },
    /// Place a spell or trap face-down.
    Set { hand_idx: usize, slot: usize },
    /// Cast a spell from hand.
    CastSpell { hand_idx: usize },
    /// Activate a spell previously set face-down.
    ActivateSetSpell { slot: usize },
    /// Flip a monster between attack and defense position.
    TogglePosition { slot: usize },
    /// Attack with a monster.
    DeclareAttack { attacker_slot: usize, target: AttackTarget },
    /// Move to the next phase.
    AdvancePhase,
    /// Go from main phase 1 straight to main phase 2.
    SkipBattle,
    /// Walk through the remaining phases and hand the turn over.
    EndTurn,
    /// Answer an open trap window by activating one eligible trap.
    ActivateTrap { slot: usize },
    /// Close an open trap window without activating anything.
    DeclineTraps,
}

/// Discriminant of an [`Action`], used for phase gating.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    Draw,
    NormalSummon,
    TributeSummon,
    Set,
    CastSpell,
    ActivateSetSpell,
    TogglePosition,
    DeclareAttack,
    AdvancePhase,
    SkipBattle,
    EndTurn,
    ActivateTrap,
    DeclineTraps,
}

impl Action {
    /// Tribute summon helper taking any slice of tribute slots.
    #[must_use]
    pub fn tribute_summon(hand_idx: usize, slot: usize, tributes: &[usize]) -> Self {
        Self::TributeSummon {
            hand_idx,
            slot,
            tributes: SmallVec::from_slice(tributes),
        }
    }

    /// The action's kind.
    #[must_use]
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::Draw => ActionKind::Draw,
            Action::NormalSummon { .. } => ActionKind::NormalSummon,
            Action::TributeSummon { .. } => ActionKind::TributeSummon,
            Action::Set { .. } => ActionKind::Set,
            Action::CastSpell { .. } => ActionKind::CastSpell,
            Action::ActivateSetSpell { .. } => ActionKind::ActivateSetSpell,
            Action::TogglePosition { .. } => ActionKind::TogglePosition,
            Action::DeclareAttack { .. } => ActionKind::DeclareAttack,
            Action::AdvancePhase => ActionKind::AdvancePhase,
            Action::SkipBattle => ActionKind::SkipBattle,
            Action::EndTurn => ActionKind::EndTurn,
            Action::ActivateTrap { .. } => ActionKind::ActivateTrap,
            Action::DeclineTraps => ActionKind::DeclineTraps,
        }
    }

    /// Trap-window responses are submitted by the non-active side.
    #[must_use]
    pub fn is_trap_response(&self) -> bool {
        matches!(self, Action::ActivateTrap { .. } | Action::DeclineTraps)
    }
}

/// A recorded action with metadata for history tracking.
///
/// Used for:
/// - Replay (re-applying a history to a fresh match with the same setup)
/// - Debugging
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The side that submitted the action.
    pub side: SideId,

    /// The action taken.
    pub action: Action,

    /// Turn number when the action was taken.
    pub turn: u32,

    /// Sequence number within the match (for ordering).
    pub sequence: u32,
}

impl ActionRecord {
    /// Create a new action record.
    #[must_use]
    pub fn new(side: SideId, action: Action, turn: u32, sequence: u32) -> Self {
        Self {
            side,
            action,
            turn,
            sequence,
        }
    }
}
