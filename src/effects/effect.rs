//! Effect descriptors.
//!
//! Spells and traps carry ordered lists of these closed variants. The
//! resolver dispatches on the variant; adding an effect means adding a
//! variant here and an arm in the resolver.

use serde::{Deserialize, Serialize};

use super::targeting::{RevivePick, Selection, TargetSide};

/// How long a stat boost lasts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoostDuration {
    /// Until the monster leaves the field.
    #[default]
    Permanent,
    /// Counted down at each end phase of the boosted side; removed at zero.
    Turns(u32),
}

/// A spell effect.
///
/// ## Player effects
///
/// - `DamagePlayer`: subtract life points
/// - `HealPlayer`: add life points
///
/// ## Monster effects
///
/// - `DamageOneMonster` / `DamageAllMonsters`: reduce HP, destroying at 0
/// - `DestroyOneMonster`: unconditional destruction
/// - `BoostAtkAllAllies` / `BoostDefAllAllies`: flat bonus to each of the
///   caster's monsters on the field when the spell resolves
/// - `ReviveFromGraveyard`: special summon a monster from the caster's
///   graveyard into the caster's first empty monster slot, in attack
///   position and without using the normal summon
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpellEffect {
    DamagePlayer {
        amount: i64,
        target: TargetSide,
    },
    DamageOneMonster {
        amount: i64,
        target: TargetSide,
        selection: Selection,
    },
    DamageAllMonsters {
        amount: i64,
        target: TargetSide,
    },
    HealPlayer {
        amount: i64,
        target: TargetSide,
    },
    BoostAtkAllAllies {
        amount: i64,
        #[serde(default)]
        duration: BoostDuration,
    },
    BoostDefAllAllies {
        amount: i64,
        #[serde(default)]
        duration: BoostDuration,
    },
    DestroyOneMonster {
        target: TargetSide,
        selection: Selection,
    },
    ReviveFromGraveyard {
        #[serde(default)]
        pick: RevivePick,
    },
}


/// A trap effect.
///
/// "Enemy" is always the trap owner's opponent, which is the active side
/// for every trigger a trap can answer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrapEffect {
    /// Cancel the pending attack. The attacker keeps its attack.
    NegateAttack,
    /// Send the attacker (or the just-summoned monster) to the graveyard.
    /// With a threshold, only if its base ATK is at least the threshold.
    /// Against an attack this also negates it.
    DestroyAttacker { atk_threshold: Option<u32> },
    /// Deal `percent`% of the attacker's ATK to the attacker's owner.
    ReflectDamage { percent: u32 },
    /// Deal `amount` to the trap owner's opponent.
    DamageEnemy { amount: i64 },
}
