//! Rules engine trait.
//!
//! The rules are kept apart from the state they act on:
//! - What actions are legal
//! - How actions modify state
//! - Win/loss conditions

use serde::{Deserialize, Serialize};

use crate::cards::CardRegistry;
use crate::core::{Action, ActionError, ActionKind, MatchConfig, MatchState, SideId};
use crate::rules::phase::{self, Permission};
use crate::triggers::Event;

/// Result of a finished match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchResult {
    /// Single winner.
    Winner(SideId),
    /// Both sides fell at once.
    Draw,
}

impl MatchResult {
    /// Check if a side won.
    #[must_use]
    pub fn is_winner(&self, side: SideId) -> bool {
        matches!(self, MatchResult::Winner(s) if *s == side)
    }

    #[must_use]
    pub fn winner(&self) -> Option<SideId> {
        match self {
            MatchResult::Winner(side) => Some(*side),
            MatchResult::Draw => None,
        }
    }
}

impl std::fmt::Display for MatchResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchResult::Winner(side) => write!(f, "side {} wins", side),
            MatchResult::Draw => write!(f, "draw"),
        }
    }
}

/// Rules engine trait.
///
/// ## Implementation Notes
///
/// - `apply_action` may leave `state` half-modified when it returns an
///   error; callers stage on a clone and commit only on success
/// - `apply_action` must be deterministic: same state and action, same
///   events
/// - `is_terminal` returns `None` while the match continues
pub trait RulesEngine {
    /// Get the match configuration.
    fn config(&self) -> &MatchConfig;

    /// Get the card templates.
    fn registry(&self) -> &CardRegistry;

    /// Apply an action submitted by `side`.
    fn apply_action(
        &self,
        state: &mut MatchState,
        side: SideId,
        action: &Action,
    ) -> Result<Vec<Event>, ActionError>;

    /// Check if the match is over.
    fn is_terminal(&self, state: &MatchState) -> Option<MatchResult>;

    /// Every action worth trying for `side` in `state`, legal or not.
    fn candidate_actions(&self, state: &MatchState, side: SideId) -> Vec<Action>;

    // === Convenience Methods ===

    /// Phase and side gating.
    fn can_perform(&self, state: &MatchState, side: SideId, kind: ActionKind) -> Permission {
        phase::can_perform(state.phase, state.active, side, kind)
    }

    /// Enumerate all legal actions for a side.
    ///
    /// Default implementation dry-runs every candidate on a clone of the
    /// state.
    fn legal_actions(&self, state: &MatchState, side: SideId) -> Vec<Action> {
        self.candidate_actions(state, side)
            .into_iter()
            .filter(|action| {
                let mut scratch = state.clone();
                self.apply_action(&mut scratch, side, action).is_ok()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_result_is_winner() {
        let result = MatchResult::Winner(SideId::B);
        assert!(!result.is_winner(SideId::A));
        assert!(result.is_winner(SideId::B));
        assert_eq!(result.winner(), Some(SideId::B));

        let draw = MatchResult::Draw;
        assert!(!draw.is_winner(SideId::A));
        assert_eq!(draw.winner(), None);
    }

    #[test]
    fn test_match_result_display() {
        assert_eq!(MatchResult::Winner(SideId::A).to_string(), "side A wins");
        assert_eq!(MatchResult::Draw.to_string(), "draw");
    }
}
