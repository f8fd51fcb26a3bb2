//! Turn phases and per-phase action gating.
//!
//! The phase cycle is draw, main 1, battle, main 2, end; leaving the end
//! phase hands the turn to the other side.

use serde::{Deserialize, Serialize};

use crate::core::{ActionError, ActionKind, SideId};

/// A phase of a side's turn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Phase {
    #[default]
    Draw,
    Main1,
    Battle,
    Main2,
    End,
}

impl Phase {
    /// The following phase. `End` wraps to `Draw` of the next turn.
    #[must_use]
    pub const fn next(self) -> Phase {
        match self {
            Phase::Draw => Phase::Main1,
            Phase::Main1 => Phase::Battle,
            Phase::Battle => Phase::Main2,
            Phase::Main2 => Phase::End,
            Phase::End => Phase::Draw,
        }
    }

    #[must_use]
    pub const fn is_main(self) -> bool {
        matches!(self, Phase::Main1 | Phase::Main2)
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Phase::Draw => "draw",
            Phase::Main1 => "main1",
            Phase::Battle => "battle",
            Phase::Main2 => "main2",
            Phase::End => "end",
        };
        f.write_str(name)
    }
}

/// Answer of [`can_perform`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Permission {
    Allowed,
    WrongPhase,
    NotActiveSide,
}

impl Permission {
    #[must_use]
    pub fn is_allowed(self) -> bool {
        self == Permission::Allowed
    }

    /// Convert into the matching rule error.
    pub fn check(self) -> Result<(), ActionError> {
        match self {
            Permission::Allowed => Ok(()),
            Permission::WrongPhase => Err(ActionError::WrongPhase),
            Permission::NotActiveSide => Err(ActionError::NotActiveSide),
        }
    }
}

/// Whether an action kind is legal in a phase.
#[must_use]
pub fn allowed_in(kind: ActionKind, phase: Phase) -> bool {
    match kind {
        ActionKind::Draw => phase == Phase::Draw,
        ActionKind::NormalSummon
        | ActionKind::TributeSummon
        | ActionKind::Set
        | ActionKind::CastSpell
        | ActionKind::ActivateSetSpell
        | ActionKind::TogglePosition => phase.is_main(),
        ActionKind::DeclareAttack => phase == Phase::Battle,
        ActionKind::SkipBattle => phase == Phase::Main1,
        ActionKind::AdvancePhase
        | ActionKind::EndTurn
        | ActionKind::ActivateTrap
        | ActionKind::DeclineTraps => true,
    }
}

/// Phase and side gating for `side` submitting an action of `kind`.
///
/// Trap responses belong to the non-active side; every other action to
/// the active side. Whether a trap window is actually open is checked by
/// the action resolver.
#[must_use]
pub fn can_perform(phase: Phase, active: SideId, side: SideId, kind: ActionKind) -> Permission {
    let entitled = match kind {
        ActionKind::ActivateTrap | ActionKind::DeclineTraps => active.opponent(),
        _ => active,
    };
    if side != entitled {
        Permission::NotActiveSide
    } else if !allowed_in(kind, phase) {
        Permission::WrongPhase
    } else {
        Permission::Allowed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_cycle() {
        let mut phase = Phase::Draw;
        let mut seen = vec![phase];
        for _ in 0..5 {
            phase = phase.next();
            seen.push(phase);
        }
        assert_eq!(
            seen,
            vec![
                Phase::Draw,
                Phase::Main1,
                Phase::Battle,
                Phase::Main2,
                Phase::End,
                Phase::Draw
            ]
        );
    }

    #[test]
    fn test_attack_only_in_battle() {
        assert_eq!(
            can_perform(Phase::Main1, SideId::A, SideId::A, ActionKind::DeclareAttack),
            Permission::WrongPhase
        );
        assert_eq!(
            can_perform(Phase::Battle, SideId::A, SideId::A, ActionKind::DeclareAttack),
            Permission::Allowed
        );
    }

    #[test]
    fn test_inactive_side_rejected() {
        assert_eq!(
            can_perform(Phase::Main1, SideId::A, SideId::B, ActionKind::NormalSummon),
            Permission::NotActiveSide
        );
        assert_eq!(
            can_perform(Phase::Draw, SideId::B, SideId::A, ActionKind::AdvancePhase),
            Permission::NotActiveSide
        );
    }

    #[test]
    fn test_trap_responses_belong_to_opponent() {
        assert!(can_perform(Phase::Battle, SideId::A, SideId::B, ActionKind::ActivateTrap).is_allowed());
        assert_eq!(
            can_perform(Phase::Battle, SideId::A, SideId::A, ActionKind::DeclineTraps),
            Permission::NotActiveSide
        );
    }

    #[test]
    fn test_main_phase_actions() {
        for kind in [ActionKind::NormalSummon, ActionKind::Set, ActionKind::CastSpell, ActionKind::TogglePosition] {
            assert!(allowed_in(kind, Phase::Main1));
            assert!(allowed_in(kind, Phase::Main2));
            assert!(!allowed_in(kind, Phase::Battle));
            assert!(!allowed_in(kind, Phase::Draw));
        }
        assert_eq!(Permission::WrongPhase.check(), Err(ActionError::WrongPhase));
    }

    #[test]
    fn test_turn_shortcuts() {
        assert!(allowed_in(ActionKind::SkipBattle, Phase::Main1));
        for phase in [Phase::Draw, Phase::Battle, Phase::Main2, Phase::End] {
            assert!(!allowed_in(ActionKind::SkipBattle, phase));
        }
        assert!(allowed_in(ActionKind::EndTurn, Phase::Draw));
        assert!(allowed_in(ActionKind::EndTurn, Phase::End));
        assert_eq!(
            can_perform(Phase::Main1, SideId::A, SideId::B, ActionKind::EndTurn),
            Permission::NotActiveSide
        );
    }
}
