//! Closed error enums returned by the kernel.
//!
//! `ActionError` falls into three classes (see [`ErrorClass`]): rule
//! violations leave the match untouched and are meant for UI feedback,
//! `MatchOver` is returned for every action after the match ended, and
//! `InternalInvariant` reports a broken board invariant.

use thiserror::Error;

use crate::cards::TemplateId;
use crate::rules::MatchResult;

/// Coarse classification of an [`ActionError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorClass {
    /// The submitted action breaks a rule.
    Rule,
    /// The match is over.
    Terminal,
    /// The kernel itself is in an inconsistent state.
    Internal,
}

/// Why an action was rejected.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ActionError {
    #[error("action not allowed in the current phase")]
    WrongPhase,
    #[error("only the active side may do that")]
    NotActiveSide,
    #[error("slot {0} is occupied")]
    SlotOccupied(usize),
    #[error("slot {0} is empty")]
    EmptySlot(usize),
    #[error("slot {0} does not exist")]
    InvalidSlot(usize),
    #[error("hand index {0} is out of range")]
    InvalidHandIndex(usize),
    #[error("tribute summon needs {required} tributes, got {provided}")]
    InsufficientTributes { required: usize, provided: usize },
    #[error("slot {0} was offered as tribute twice")]
    DuplicateTribute(usize),
    #[error("monster does not need tributes; normal summon it instead")]
    TributeNotRequired,
    #[error("monster level {0} is too high for a normal summon")]
    LevelTooHigh(u8),
    #[error("normal summon already used this turn")]
    NormalSummonAlreadyUsed,
    #[error("card is not a monster")]
    NotAMonster,
    #[error("card is not a spell")]
    NotASpell,
    #[error("card is neither a spell nor a trap")]
    NotASpellOrTrap,
    #[error("monster already changed position this turn")]
    PositionAlreadyChanged,
    #[error("monsters in defense position cannot attack")]
    CannotAttackInDefense,
    #[error("monster already attacked this turn")]
    AttackerAlreadyAttacked,
    #[error("monster changed position this turn and cannot attack")]
    AttackerSwitchedPosition,
    #[error("no monster to attack in that slot")]
    NoValidTargets,
    #[error("direct attack blocked by an opponent monster")]
    DirectAttackBlocked,
    #[error("no free monster slot")]
    MonsterZoneFull,
    #[error("no monster in the graveyard to revive")]
    NothingToRevive,
    #[error("no draw is owed this phase")]
    NoDrawRequired,
    #[error("a trap window is waiting for a response")]
    TrapWindowPending,
    #[error("no trap window is open")]
    NoTrapWindow,
    #[error("trap in slot {0} cannot be activated now")]
    TrapNotEligible(usize),
    #[error("match is over: {0}")]
    MatchOver(MatchResult),
    #[error("match is already resolving an action")]
    Reentrant,
    #[error("internal invariant violated: {0}")]
    InternalInvariant(String),
}

impl ActionError {
    /// Which class this error belongs to.
    #[must_use]
    pub fn class(&self) -> ErrorClass {
        match self {
            ActionError::MatchOver(_) => ErrorClass::Terminal,
            ActionError::InternalInvariant(_) => ErrorClass::Internal,
            _ => ErrorClass::Rule,
        }
    }
}

/// Errors raised while building or restoring a match.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SetupError {
    #[error("deck references unknown template {0}")]
    UnknownTemplate(TemplateId),
    #[error("template {0} registered twice")]
    DuplicateTemplate(TemplateId),
    #[error("snapshot could not be decoded: {0}")]
    Snapshot(String),
}

/// Errors raised while replaying a recorded action history.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ReplayError {
    #[error(transparent)]
    Setup(#[from] SetupError),
    #[error("recorded action {index} was rejected: {source}")]
    Rejected { index: usize, source: ActionError },
}
