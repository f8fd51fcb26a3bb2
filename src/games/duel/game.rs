//! The duel rules engine.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::resolution::Resolution;
use crate::cards::CardRegistry;
use crate::core::{Action, ActionError, ActionRecord, AttackTarget, MatchConfig, MatchState, SideId};
use crate::rules::{MatchResult, RulesEngine};
use crate::triggers::Event;
use crate::zones::SLOT_COUNT;

/// Duel rules over a fixed card registry and configuration.
///
/// `Duel` holds no match state; any number of matches can share one.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Duel {
    registry: CardRegistry,
    config: MatchConfig,
}

impl Duel {
    #[must_use]
    pub fn new(registry: CardRegistry, config: MatchConfig) -> Self {
        Self { registry, config }
    }

    fn check_gate(&self, state: &MatchState, side: SideId, action: &Action) -> Result<(), ActionError> {
        if let Some(result) = state.result {
            return Err(ActionError::MatchOver(result));
        }
        match (&state.pending, action.is_trap_response()) {
            (Some(_), false) => return Err(ActionError::TrapWindowPending),
            (None, true) => return Err(ActionError::NoTrapWindow),
            _ => {}
        }
        self.can_perform(state, side, action.kind()).check()
    }

    fn resolve(
        &self,
        state: &mut MatchState,
        side: SideId,
        action: &Action,
    ) -> Result<Vec<Event>, ActionError> {
        self.check_gate(state, side, action)?;

        let turn = state.turn;
        let sequence = state.history.len() as u32;

        let mut resolution = Resolution::new(self, state);
        resolution.apply(side, action)?;
        let events = resolution.into_events();

        state.history.push_back(ActionRecord::new(side, action.clone(), turn, sequence));
        state.event_log.extend(events.iter().cloned());
        state.check_invariants()?;
        Ok(events)
    }
}

impl RulesEngine for Duel {
    fn config(&self) -> &MatchConfig {
        &self.config
    }

    fn registry(&self) -> &CardRegistry {
        &self.registry
    }

    fn apply_action(
        &self,
        state: &mut MatchState,
        side: SideId,
        action: &Action,
    ) -> Result<Vec<Event>, ActionError> {
        let result = self.resolve(state, side, action);
        match &result {
            Ok(events) => debug!(
                side = %side,
                kind = ?action.kind(),
                events = events.len(),
                "action accepted"
            ),
            Err(err) => debug!(side = %side, kind = ?action.kind(), %err, "action rejected"),
        }
        result
    }

    fn is_terminal(&self, state: &MatchState) -> Option<MatchResult> {
        state.result
    }

    fn candidate_actions(&self, state: &MatchState, side: SideId) -> Vec<Action> {
        if state.is_over() {
            return Vec::new();
        }

        if let Some(window) = &state.pending {
            if window.owner != side {
                return Vec::new();
            }
            let mut actions: Vec<Action> = window
                .eligible
                .iter()
                .map(|&slot| Action::ActivateTrap { slot })
                .collect();
            actions.push(Action::DeclineTraps);
            return actions;
        }

        if side != state.active {
            return Vec::new();
        }

        let own = &state.sides[side].zones;
        let enemy = &state.sides[side.opponent()].zones;
        let empty_monster_slots: Vec<usize> = (0..SLOT_COUNT).filter(|&s| own.monster(s).is_none()).collect();
        let empty_spell_slots: Vec<usize> = (0..SLOT_COUNT).filter(|&s| own.spell_trap(s).is_none()).collect();
        let occupied: Vec<usize> = own.occupied_monsters().map(|(slot, _)| slot).collect();

        let mut actions = vec![Action::Draw, Action::AdvancePhase, Action::SkipBattle, Action::EndTurn];

        for (hand_idx, card) in own.hand().iter().enumerate() {
            let Some(template) = self.registry.get(card.template) else {
                continue;
            };
            match template.monster_stats() {
                Some(stats) => match stats.required_tributes() {
                    0 => actions.extend(
                        empty_monster_slots
                            .iter()
                            .map(|&slot| Action::NormalSummon { hand_idx, slot }),
                    ),
                    1 => {
                        for &tribute in &occupied {
                            push_tributes(&mut actions, hand_idx, &[tribute], &empty_monster_slots);
                        }
                    }
                    _ => {
                        for &first in &occupied {
                            for &second in occupied.iter().filter(|&&slot| slot != first) {
                                push_tributes(&mut actions, hand_idx, &[first, second], &empty_monster_slots);
                            }
                        }
                    }
                },
                None => {
                    if template.is_spell() {
                        actions.push(Action::CastSpell { hand_idx });
                    }
                    actions.extend(empty_spell_slots.iter().map(|&slot| Action::Set { hand_idx, slot }));
                }
            }
        }

        for slot in 0..SLOT_COUNT {
            if own.spell_trap(slot).is_some() {
                actions.push(Action::ActivateSetSpell { slot });
            }
        }

        for &slot in &occupied {
            actions.push(Action::TogglePosition { slot });
            actions.push(Action::DeclareAttack {
                attacker_slot: slot,
                target: AttackTarget::Direct,
            });
            for (target, _) in enemy.occupied_monsters() {
                actions.push(Action::DeclareAttack {
                    attacker_slot: slot,
                    target: AttackTarget::Monster(target),
                });
            }
        }

        actions
    }
}

/// One tribute summon per target slot: any tribute slot or any empty slot.
fn push_tributes(actions: &mut Vec<Action>, hand_idx: usize, tributes: &[usize], empty: &[usize]) {
    for &slot in tributes.iter().chain(empty) {
        actions.push(Action::tribute_summon(hand_idx, slot, tributes));
    }
}
