//! Match configuration.
//!
//! A match is configured at construction time with a `MatchConfig`. The
//! defaults are the base duel rules: 8000 life, 5-card opening hands, a
//! soft hand cap of 10, shuffled decks and no draw on turn 1.

use serde::{Deserialize, Serialize};

/// Default starting life points.
pub const DEFAULT_STARTING_LIFE: i64 = 8000;

/// Default opening hand size.
pub const DEFAULT_OPENING_HAND: usize = 5;

/// Default soft hand cap.
pub const DEFAULT_HAND_CAP: usize = 10;

/// How trap windows are resolved.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrapPolicy {
    /// Pause with `TrapOffered`; the trap owner answers with
    /// `ActivateTrap` or `DeclineTraps`.
    #[default]
    Manual,
    /// Activate every eligible trap in slot order without pausing.
    AutoActivate,
    /// Ask the `TrapResponder` installed on the match handle. Without a
    /// responder this behaves like `Manual`.
    Responder,
}

/// Complete match configuration.
///
/// ```
/// use duel_kernel::core::{MatchConfig, TrapPolicy};
///
/// let config = MatchConfig::default()
///     .with_starting_life(4000)
///     .with_trap_policy(TrapPolicy::AutoActivate);
///
/// assert_eq!(config.starting_life, 4000);
/// assert_eq!(config.opening_hand, 5);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Life points each side starts with.
    pub starting_life: i64,

    /// Cards dealt to each side before turn 1.
    pub opening_hand: usize,

    /// Hand size above which drawn cards are discarded.
    pub hand_cap: usize,

    /// Trap window resolution policy.
    pub trap_policy: TrapPolicy,

    /// Shuffle decks with the match seed before dealing.
    pub shuffle_decks: bool,

    /// Skip the draw-phase draw while the turn counter is 1.
    pub skip_first_turn_draw: bool,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            starting_life: DEFAULT_STARTING_LIFE,
            opening_hand: DEFAULT_OPENING_HAND,
            hand_cap: DEFAULT_HAND_CAP,
            trap_policy: TrapPolicy::default(),
            shuffle_decks: true,
            skip_first_turn_draw: true,
        }
    }
}

impl MatchConfig {
    /// Set starting life points.
    #[must_use]
    pub fn with_starting_life(mut self, life: i64) -> Self {
        self.starting_life = life;
        self
    }

    /// Set the opening hand size.
    #[must_use]
    pub fn with_opening_hand(mut self, cards: usize) -> Self {
        self.opening_hand = cards;
        self
    }

    /// Set the soft hand cap.
    #[must_use]
    pub fn with_hand_cap(mut self, cap: usize) -> Self {
        self.hand_cap = cap;
        self
    }

    /// Set the trap window policy.
    #[must_use]
    pub fn with_trap_policy(mut self, policy: TrapPolicy) -> Self {
        self.trap_policy = policy;
        self
    }

    /// Keep decks in the order given (top = last element).
    #[must_use]
    pub fn unshuffled(mut self) -> Self {
        self.shuffle_decks = false;
        self
    }

    /// Draw on turn 1 as on every other turn.
    #[must_use]
    pub fn draw_on_first_turn(mut self) -> Self {
        self.skip_first_turn_draw = false;
        self
    }
}
