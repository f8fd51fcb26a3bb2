//! Match state.
//!
//! ## SideState
//!
//! Per-side data:
//! - Life points
//! - The five zones
//! - Once-per-turn normal summon flag
//!
//! ## MatchState
//!
//! The whole match as one owned tree:
//! - Both sides, turn counters, active side and phase
//! - Terrain per side and the RNG
//! - An open trap window, if any, and the result once decided
//! - Action history and the event log
//!
//! Piles and logs are `im` persistent structures, so `clone()` is cheap
//! enough to stage every action on a copy.
//!
//! The board primitives here (drawing, life changes, destruction) emit
//! their own events and check for the end of the match.

use im::Vector;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::debug;

use super::action::ActionRecord;
use super::entity::InstanceAllocator;
use super::error::ActionError;
use super::player::{SideId, SideMap};
use super::rng::GameRng;
use crate::cards::{CardInstance, CardRegistry, MonsterCard, Position, SummonMethod};
use crate::rules::combat::{effective_stats, EffectiveStats};
use crate::rules::{MatchResult, Phase};
use crate::terrain::Terrain;
use crate::triggers::{Event, TrapWindow};
use crate::zones::{ZoneManager, SLOT_COUNT};

/// One duelist's state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SideState {
    pub side: SideId,
    pub life: i64,
    pub zones: ZoneManager,
    pub normal_summon_used: bool,
}

impl SideState {
    #[must_use]
    pub fn new(side: SideId, life: i64) -> Self {
        Self {
            side,
            life,
            zones: ZoneManager::new(),
            normal_summon_used: false,
        }
    }

    /// Monster slots that attacked this turn.
    #[must_use]
    pub fn attacked_slots(&self) -> SmallVec<[usize; SLOT_COUNT]> {
        self.zones
            .occupied_monsters()
            .filter(|(_, m)| m.attacked_this_turn)
            .map(|(slot, _)| slot)
            .collect()
    }

    /// Clear the once-per-turn bookkeeping.
    pub fn reset_turn(&mut self) {
        self.normal_summon_used = false;
        for (_, monster) in self.zones.occupied_monsters_mut() {
            monster.reset_turn_flags();
        }
    }
}

/// Complete match state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchState {
    pub sides: SideMap<SideState>,

    /// Turn number (starts at 1, increments when side A becomes active).
    pub turn: u32,

    /// Side-turn counter (starts at 1, increments on every hand-over).
    pub turn_sequence: u32,

    pub active: SideId,
    pub phase: Phase,
    pub terrain: SideMap<Terrain>,
    pub rng: GameRng,

    /// Whether the active side already drew this turn.
    pub drew_this_turn: bool,

    /// Open trap window waiting for a response.
    pub pending: Option<TrapWindow>,

    /// Set once the match is decided.
    pub result: Option<MatchResult>,

    pub ids: InstanceAllocator,

    /// Cards each side started with.
    pub initial_counts: SideMap<usize>,

    /// Accepted actions, in order.
    pub history: Vector<ActionRecord>,

    /// Events of every accepted action, in order.
    pub event_log: Vector<Event>,
}

impl MatchState {
    /// Empty board at turn 1, draw phase, side A active.
    #[must_use]
    pub fn new(seed: u64, terrain: SideMap<Terrain>, starting_life: i64) -> Self {
        Self {
            sides: SideMap::new(|side| SideState::new(side, starting_life)),
            turn: 1,
            turn_sequence: 1,
            active: SideId::A,
            phase: Phase::Draw,
            terrain,
            rng: GameRng::new(seed),
            drew_this_turn: false,
            pending: None,
            result: None,
            ids: InstanceAllocator::default(),
            initial_counts: SideMap::with_value(0),
            history: Vector::new(),
            event_log: Vector::new(),
        }
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.result.is_some()
    }

    #[must_use]
    pub fn inactive(&self) -> SideId {
        self.active.opponent()
    }

    /// Effective ATK/DEF of the monster in `side`'s `slot`.
    #[must_use]
    pub fn monster_stats(
        &self,
        registry: &CardRegistry,
        side: SideId,
        slot: usize,
    ) -> Option<EffectiveStats> {
        let monster = self.sides[side].zones.monster(slot)?;
        let stats = registry.get(monster.card.template)?.monster_stats()?;
        Some(effective_stats(monster, stats, self.terrain[side]))
    }

    // === Board primitives ===

    /// Draw for `side`. An empty deck loses the match; a full hand sends
    /// the drawn card to the graveyard.
    pub fn draw(&mut self, side: SideId, hand_cap: usize, events: &mut Vec<Event>) {
        self.drew_this_turn = true;
        let zones = &mut self.sides[side].zones;
        let Some(card) = zones.draw_top() else {
            debug!(side = %side, "deck out");
            self.finish(MatchResult::Winner(side.opponent()), events);
            return;
        };

        events.push(Event::Drew { side, card: card.id });
        if zones.hand().len() >= hand_cap {
            zones.bury(card);
            events.push(Event::Discarded { side, card: card.id });
        } else {
            zones.add_to_hand(card);
        }
    }

    /// Add `delta` to `side`'s life and check for the end of the match.
    pub fn change_life(&mut self, side: SideId, delta: i64, events: &mut Vec<Event>) {
        if delta == 0 || self.is_over() {
            return;
        }
        let life = {
            let state = &mut self.sides[side];
            state.life += delta;
            state.life
        };
        events.push(Event::LifeChanged { side, delta, life });
        self.check_life_totals(events);
    }

    /// Decide the match if a side is at or below zero life.
    pub fn check_life_totals(&mut self, events: &mut Vec<Event>) {
        if self.is_over() {
            return;
        }
        let a_out = self.sides[SideId::A].life <= 0;
        let b_out = self.sides[SideId::B].life <= 0;
        let result = match (a_out, b_out) {
            (true, true) => MatchResult::Draw,
            (true, false) => MatchResult::Winner(SideId::B),
            (false, true) => MatchResult::Winner(SideId::A),
            (false, false) => return,
        };
        self.finish(result, events);
    }

    /// Record the result and close any open window.
    pub fn finish(&mut self, result: MatchResult, events: &mut Vec<Event>) {
        if self.is_over() {
            return;
        }
        debug!(%result, turn = self.turn, "match ended");
        self.result = Some(result);
        self.pending = None;
        events.push(Event::MatchEnded { result });
    }

    /// Send the monster in `side`'s `slot` to its owner's graveyard.
    pub fn destroy_monster(
        &mut self,
        side: SideId,
        slot: usize,
        events: &mut Vec<Event>,
    ) -> Option<MonsterCard> {
        let monster = self.sides[side].zones.take_monster(slot)?;
        self.bury(monster.card);
        events.push(Event::MonsterDestroyed {
            side,
            slot,
            card: monster.id(),
        });
        Some(monster)
    }

    /// Push a card onto its owner's graveyard.
    pub fn bury(&mut self, card: CardInstance) {
        self.sides[card.owner].zones.bury(card);
    }

    /// Hand the turn to the other side and reset per-turn bookkeeping.
    pub fn start_next_turn(&mut self) {
        self.active = self.active.opponent();
        if self.active == SideId::A {
            self.turn += 1;
        }
        self.turn_sequence += 1;
        self.phase = Phase::Draw;
        self.drew_this_turn = false;
        for side in SideId::BOTH {
            self.sides[side].reset_turn();
        }
    }

    // === Invariants ===

    /// Check the board invariants that must hold between actions.
    pub fn check_invariants(&self) -> Result<(), ActionError> {
        let broken = |msg: String| Err(ActionError::InternalInvariant(msg));

        let mut seen = FxHashSet::default();
        for (side, state) in self.sides.iter() {
            for card in state.zones.all_cards() {
                if !seen.insert(card.id) {
                    return broken(format!("instance {} appears twice", card.id));
                }
                if card.id.raw() == 0 || card.id.raw() > self.ids.allocated() {
                    return broken(format!("instance {} was never allocated", card.id));
                }
            }

            let count = state.zones.card_count();
            if count != self.initial_counts[side] {
                return broken(format!(
                    "side {} holds {} cards, started with {}",
                    side, count, self.initial_counts[side]
                ));
            }

            let normal_summoned = state
                .zones
                .occupied_monsters()
                .filter(|(_, m)| m.summoned == Some(SummonMethod::Normal))
                .count();
            if normal_summoned > 1 || (normal_summoned == 1 && !state.normal_summon_used) {
                return broken(format!("side {} normal summon bookkeeping", side));
            }
            if side != self.active && (state.normal_summon_used || normal_summoned > 0) {
                return broken(format!("inactive side {} carries summon flags", side));
            }
            if side != self.active && !state.attacked_slots().is_empty() {
                return broken(format!("inactive side {} carries attack flags", side));
            }

            for (slot, monster) in state.zones.occupied_monsters() {
                if monster.attacked_this_turn && monster.position != Position::Attack {
                    return broken(format!("side {} slot {} attacked from defense", side, slot));
                }
                if monster.card.owner != side {
                    return broken(format!("side {} slot {} holds a foreign card", side, slot));
                }
            }

            if state.life <= 0 && self.result.is_none() {
                return broken(format!("side {} has {} life but the match goes on", side, state.life));
            }
        }

        if let Some(window) = &self.pending {
            if self.result.is_some() {
                return broken("trap window open after the match ended".into());
            }
            if window.owner != self.inactive() {
                return broken("trap window owned by the active side".into());
            }
        }
        Ok(())
    }
}
