//! Matches and match handles.
//!
//! `Match` owns one duel: rules, setup and state. Every action is staged
//! on a clone of the state and committed only when it succeeds, so a
//! rejected action leaves the match exactly as it was.
//!
//! `MatchHandle` shares a match between a driver and its collaborators and
//! consults a [`TrapResponder`] for trap windows under
//! `TrapPolicy::Responder`.

use std::cell::RefCell;
use std::rc::Rc;

use im::Vector;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::builder::MatchSetup;
use super::game::Duel;
use super::view::MatchView;
use crate::cards::CardRegistry;
use crate::core::{Action, ActionError, ActionKind, ActionRecord, MatchState, ReplayError, SetupError, SideId, TrapPolicy};
use crate::rules::{MatchResult, Permission, Phase, RulesEngine};
use crate::triggers::{Event, TrapWindow};

/// One duel.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    rules: Duel,
    setup: MatchSetup,
    state: MatchState,
}

impl Match {
    /// Start a match from `setup`.
    pub fn new(registry: CardRegistry, setup: MatchSetup) -> Result<Self, SetupError> {
        let state = setup.initial_state(&registry)?;
        Ok(Self {
            rules: Duel::new(registry, setup.config.clone()),
            setup,
            state,
        })
    }

    /// Submit an action for `side`.
    ///
    /// Returns the events the action produced, in order.
    pub fn apply(&mut self, side: SideId, action: &Action) -> Result<Vec<Event>, ActionError> {
        let mut staged = self.state.clone();
        let events = self.rules.apply_action(&mut staged, side, action)?;
        self.state = staged;
        Ok(events)
    }

    // === Queries ===

    #[must_use]
    pub fn rules(&self) -> &Duel {
        &self.rules
    }

    #[must_use]
    pub fn setup(&self) -> &MatchSetup {
        &self.setup
    }

    #[must_use]
    pub fn state(&self) -> &MatchState {
        &self.state
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    #[must_use]
    pub fn active(&self) -> SideId {
        self.state.active
    }

    #[must_use]
    pub fn life(&self, side: SideId) -> i64 {
        self.state.sides[side].life
    }

    #[must_use]
    pub fn result(&self) -> Option<MatchResult> {
        self.rules.is_terminal(&self.state)
    }

    #[must_use]
    pub fn winner(&self) -> Option<SideId> {
        self.result().and_then(|r| r.winner())
    }

    /// The open trap window, if any.
    #[must_use]
    pub fn pending(&self) -> Option<&TrapWindow> {
        self.state.pending.as_ref()
    }

    #[must_use]
    pub fn history(&self) -> &Vector<ActionRecord> {
        &self.state.history
    }

    #[must_use]
    pub fn event_log(&self) -> &Vector<Event> {
        &self.state.event_log
    }

    #[must_use]
    pub fn view(&self, viewer: SideId) -> MatchView {
        MatchView::new(&self.state, self.rules.registry(), viewer)
    }

    #[must_use]
    pub fn legal_actions(&self, side: SideId) -> Vec<Action> {
        self.rules.legal_actions(&self.state, side)
    }

    #[must_use]
    pub fn can_perform(&self, side: SideId, kind: ActionKind) -> Permission {
        self.rules.can_perform(&self.state, side, kind)
    }

    /// The opponent monster slot with the lowest effective ATK, lowest
    /// slot first on ties.
    #[must_use]
    pub fn weakest_target(&self, side: SideId) -> Option<usize> {
        let enemy = side.opponent();
        self.state.sides[enemy]
            .zones
            .occupied_monsters()
            .filter_map(|(slot, _)| {
                let stats = self.state.monster_stats(self.rules.registry(), enemy, slot)?;
                Some((stats.atk, slot))
            })
            .min()
            .map(|(_, slot)| slot)
    }

    // === Replay ===

    /// Rebuild a match by re-applying recorded actions to a fresh one.
    pub fn replay(
        registry: CardRegistry,
        setup: MatchSetup,
        records: &[ActionRecord],
    ) -> Result<Self, ReplayError> {
        let mut game = Self::new(registry, setup)?;
        for (index, record) in records.iter().enumerate() {
            game.apply(record.side, &record.action)
                .map_err(|source| ReplayError::Rejected { index, source })?;
        }
        Ok(game)
    }

    // === Snapshots ===

    /// Compact binary snapshot of the whole match.
    pub fn to_bytes(&self) -> Result<Vec<u8>, SetupError> {
        bincode::serialize(self).map_err(|err| SetupError::Snapshot(err.to_string()))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SetupError> {
        bincode::deserialize(bytes).map_err(|err| SetupError::Snapshot(err.to_string()))
    }

    /// Self-describing snapshot of the whole match.
    pub fn to_json(&self) -> Result<String, SetupError> {
        serde_json::to_string(self).map_err(|err| SetupError::Snapshot(err.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, SetupError> {
        serde_json::from_str(json).map_err(|err| SetupError::Snapshot(err.to_string()))
    }
}

/// An answer to a trap window.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrapDecision {
    Activate(usize),
    Decline,
}

impl TrapDecision {
    #[must_use]
    pub fn into_action(self) -> Action {
        match self {
            TrapDecision::Activate(slot) => Action::ActivateTrap { slot },
            TrapDecision::Decline => Action::DeclineTraps,
        }
    }
}

/// Decides trap windows on behalf of their owner (an AI seat, a remote
/// player).
pub trait TrapResponder {
    fn respond(&mut self, view: &MatchView, window: &TrapWindow) -> TrapDecision;
}

/// Shared handle to a match.
///
/// Clones share the same match. Submitting an action while another one is
/// still resolving (from inside a responder) fails with
/// [`ActionError::Reentrant`].
#[derive(Clone)]
pub struct MatchHandle {
    inner: Rc<RefCell<Match>>,
    responder: Option<Rc<RefCell<dyn TrapResponder>>>,
}

impl MatchHandle {
    #[must_use]
    pub fn new(game: Match) -> Self {
        Self {
            inner: Rc::new(RefCell::new(game)),
            responder: None,
        }
    }

    /// Install the responder consulted under `TrapPolicy::Responder`.
    #[must_use]
    pub fn with_responder(mut self, responder: impl TrapResponder + 'static) -> Self {
        self.responder = Some(Rc::new(RefCell::new(responder)));
        self
    }

    /// Submit an action for `side`.
    pub fn apply(&self, side: SideId, action: &Action) -> Result<Vec<Event>, ActionError> {
        let mut game = self.inner.try_borrow_mut().map_err(|_| ActionError::Reentrant)?;
        let mut events = game.apply(side, action)?;

        let Some(responder) = &self.responder else {
            return Ok(events);
        };
        if game.rules().config().trap_policy != TrapPolicy::Responder {
            return Ok(events);
        }

        while let Some(window) = game.pending().cloned() {
            let view = game.view(window.owner);
            let decision = responder
                .try_borrow_mut()
                .map_err(|_| ActionError::Reentrant)?
                .respond(&view, &window);
            match game.apply(window.owner, &decision.into_action()) {
                Ok(more) => events.extend(more),
                Err(err) => {
                    warn!(side = %window.owner, ?decision, %err, "trap responder decision rejected; declining");
                    events.extend(game.apply(window.owner, &Action::DeclineTraps)?);
                }
            }
        }
        Ok(events)
    }

    /// Run `f` against the match.
    pub fn with<R>(&self, f: impl FnOnce(&Match) -> R) -> Result<R, ActionError> {
        let game = self.inner.try_borrow().map_err(|_| ActionError::Reentrant)?;
        Ok(f(&game))
    }

    pub fn view(&self, viewer: SideId) -> Result<MatchView, ActionError> {
        self.with(|game| game.view(viewer))
    }

    pub fn legal_actions(&self, side: SideId) -> Result<Vec<Action>, ActionError> {
        self.with(|game| game.legal_actions(side))
    }

    pub fn result(&self) -> Result<Option<MatchResult>, ActionError> {
        self.with(Match::result)
    }

    /// A copy of the current match.
    pub fn snapshot(&self) -> Result<Match, ActionError> {
        self.with(Match::clone)
    }
}

impl std::fmt::Debug for MatchHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatchHandle")
            .field("inner", &self.inner)
            .field("responder", &self.responder.is_some())
            .finish()
    }
}
