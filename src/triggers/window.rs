//! Trap windows.
//!
//! A window is the paused state in which the non-active side may answer
//! an action with its eligible traps. The window remembers what opened it
//! so resolution can continue once it closes.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::condition::TriggerKind;
use crate::core::{AttackTarget, InstanceId, SideId};

/// The attacking monster, captured when its window opened.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AttackerRef {
    pub slot: usize,
    pub card: InstanceId,
    /// Printed ATK, for `DestroyAttacker` thresholds.
    pub base_atk: u32,
    /// Effective ATK at declaration.
    pub atk: i64,
}

/// What opened a trap window.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrapContext {
    /// A declared attack waiting to resolve.
    Attack {
        attacker: AttackerRef,
        target: AttackTarget,
        /// Monster in the target slot at declaration.
        target_card: Option<InstanceId>,
    },
    /// A monster that was just summoned.
    Summon {
        slot: usize,
        card: InstanceId,
        base_atk: u32,
        atk: i64,
    },
    /// The window owner just lost `amount` life.
    Damage {
        amount: i64,
        attacker: Option<AttackerRef>,
    },
    /// The owner's opponent just started a turn.
    EnemyTurnStart,
    /// A manual trap activated by its owner; no pending action.
    Manual,
}

impl TrapContext {
    /// The trigger kind a context answers to.
    #[must_use]
    pub const fn trigger(&self) -> TriggerKind {
        match self {
            TrapContext::Attack { .. } => TriggerKind::OnAttack,
            TrapContext::Summon { .. } => TriggerKind::OnSummon,
            TrapContext::Damage { .. } => TriggerKind::OnDamage,
            TrapContext::EnemyTurnStart => TriggerKind::OnEnemyTurnStart,
            TrapContext::Manual => TriggerKind::Manual,
        }
    }

    /// ATK that `ReflectDamage` scales.
    #[must_use]
    pub const fn reflect_base(&self) -> i64 {
        match self {
            TrapContext::Attack { attacker, .. } => attacker.atk,
            TrapContext::Summon { atk, .. } => *atk,
            TrapContext::Damage {
                attacker: Some(attacker),
                ..
            } => attacker.atk,
            TrapContext::Damage { amount, .. } => *amount,
            TrapContext::EnemyTurnStart | TrapContext::Manual => 0,
        }
    }
}

/// An open trap window.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TrapWindow {
    /// The side allowed to respond.
    pub owner: SideId,
    pub trigger: TriggerKind,
    /// Eligible spell/trap slots, in slot order.
    pub eligible: SmallVec<[usize; 5]>,
    pub context: TrapContext,
    /// Set once an activated trap negated the pending attack.
    pub negated: bool,
}

impl TrapWindow {
    #[must_use]
    pub fn new(owner: SideId, context: TrapContext, eligible: SmallVec<[usize; 5]>) -> Self {
        Self {
            owner,
            trigger: context.trigger(),
            eligible,
            context,
            negated: false,
        }
    }

    #[must_use]
    pub fn offers(&self, slot: usize) -> bool {
        self.eligible.contains(&slot)
    }
}
