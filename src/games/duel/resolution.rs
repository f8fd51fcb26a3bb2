//! Per-action resolution context.
//!
//! A `Resolution` borrows the rules and the (staged) match state for the
//! length of one action and collects the events it produces. Action
//! handlers live in `actions.rs`, trap windows in `traps.rs`; attack
//! resolution lives here because both of them end in it.

use tracing::debug;

use super::game::Duel;
use crate::cards::{CardRegistry, CardTemplate, MonsterStats, TemplateId};
use crate::core::{Action, ActionError, AttackTarget, InstanceId, MatchState, SideId};
use crate::rules::combat::{self, Defender, EffectiveStats};
use crate::rules::RulesEngine;
use crate::triggers::{AttackerRef, Event, TrapContext};
use crate::zones::SLOT_COUNT;

pub(crate) struct Resolution<'a> {
    pub(super) rules: &'a Duel,
    pub(super) state: &'a mut MatchState,
    pub(super) events: Vec<Event>,
}

impl<'a> Resolution<'a> {
    pub(crate) fn new(rules: &'a Duel, state: &'a mut MatchState) -> Self {
        Self {
            rules,
            state,
            events: Vec::new(),
        }
    }

    pub(crate) fn into_events(self) -> Vec<Event> {
        self.events
    }

    /// Dispatch one gated action.
    pub(crate) fn apply(&mut self, side: SideId, action: &Action) -> Result<(), ActionError> {
        match action {
            Action::Draw => self.draw(side),
            Action::NormalSummon { hand_idx, slot } => self.normal_summon(side, *hand_idx, *slot),
            Action::TributeSummon {
                hand_idx,
                slot,
                tributes,
            } => self.tribute_summon(side, *hand_idx, *slot, tributes),
            Action::Set { hand_idx, slot } => self.set(side, *hand_idx, *slot),
            Action::CastSpell { hand_idx } => self.cast_spell(side, *hand_idx),
            Action::ActivateSetSpell { slot } => self.activate_set_spell(side, *slot),
            Action::TogglePosition { slot } => self.toggle_position(side, *slot),
            Action::DeclareAttack {
                attacker_slot,
                target,
            } => self.declare_attack(side, *attacker_slot, *target),
            Action::AdvancePhase => self.advance_phase(side),
            Action::SkipBattle => self.skip_battle(side),
            Action::EndTurn => self.end_turn(side),
            Action::ActivateTrap { slot } => self.respond_activate(side, *slot),
            Action::DeclineTraps => self.respond_decline(),
        }
    }

    // === Lookups ===

    pub(super) fn registry(&self) -> &'a CardRegistry {
        let rules: &'a Duel = self.rules;
        rules.registry()
    }

    /// Template of a card already in the match. A miss means the match was
    /// built against a different registry.
    pub(super) fn template(&self, id: TemplateId) -> Result<&'a CardTemplate, ActionError> {
        self.registry()
            .get(id)
            .ok_or_else(|| ActionError::InternalInvariant(format!("unknown template {}", id)))
    }

    pub(super) fn printed_stats(&self, id: TemplateId) -> Result<MonsterStats, ActionError> {
        self.template(id)?
            .monster_stats()
            .copied()
            .ok_or_else(|| ActionError::InternalInvariant(format!("{} on the field is not a monster", id)))
    }

    pub(super) fn effective(&self, side: SideId, slot: usize) -> Result<EffectiveStats, ActionError> {
        self.state
            .monster_stats(self.registry(), side, slot)
            .ok_or_else(|| ActionError::InternalInvariant(format!("no monster stats for side {} slot {}", side, slot)))
    }

    pub(super) fn is_monster(&self, side: SideId, slot: usize, card: InstanceId) -> bool {
        self.state.sides[side].zones.monster(slot).map(|m| m.id()) == Some(card)
    }

    // === Follow-ups ===

    /// Open an on-damage window if the non-active side lost life since
    /// `life_before` was taken.
    pub(super) fn after_damage(&mut self, life_before: i64, attacker: Option<AttackerRef>) -> Result<(), ActionError> {
        if self.state.is_over() {
            return Ok(());
        }
        let lost = life_before - self.state.sides[self.state.inactive()].life;
        if lost > 0 {
            self.open_window(TrapContext::Damage { amount: lost, attacker })?;
        }
        Ok(())
    }

    /// Continue whatever a trap window interrupted.
    pub(super) fn resume(&mut self, context: TrapContext, negated: bool) -> Result<(), ActionError> {
        match context {
            TrapContext::Attack {
                attacker,
                target,
                target_card,
            } if !negated && !self.state.is_over() => self.resolve_attack(attacker, target, target_card),
            _ => Ok(()),
        }
    }

    /// Resolve a declared attack against the board as it stands now.
    fn resolve_attack(
        &mut self,
        attacker: AttackerRef,
        target: AttackTarget,
        target_card: Option<InstanceId>,
    ) -> Result<(), ActionError> {
        let side = self.state.active;
        let enemy = side.opponent();

        if !self.is_monster(side, attacker.slot, attacker.card) {
            debug!(side = %side, slot = attacker.slot, "attacker left the field; attack fizzles");
            return Ok(());
        }
        let atk = self.effective(side, attacker.slot)?.atk;

        let defender = match (target, target_card) {
            (AttackTarget::Direct, _) => Defender::Direct,
            (AttackTarget::Monster(slot), Some(card)) if self.is_monster(enemy, slot, card) => {
                let position = self.state.sides[enemy]
                    .zones
                    .monster(slot)
                    .map(|m| m.position)
                    .ok_or(ActionError::EmptySlot(slot))?;
                Defender::Monster {
                    position,
                    stats: self.effective(enemy, slot)?,
                }
            }
            (AttackTarget::Monster(slot), _) => {
                debug!(side = %side, target = slot, "attack target left the field; attack fizzles");
                self.mark_attacked(side, attacker.slot);
                return Ok(());
            }
        };

        let outcome = combat::resolve(atk, defender);
        let life_before = self.state.sides[enemy].life;

        self.events.push(Event::Attacked {
            side,
            attacker_slot: attacker.slot,
            target,
        });
        if outcome.target_destroyed {
            if let AttackTarget::Monster(slot) = target {
                self.state.destroy_monster(enemy, slot, &mut self.events);
            }
        }
        if outcome.attacker_destroyed {
            self.state.destroy_monster(side, attacker.slot, &mut self.events);
        } else {
            self.mark_attacked(side, attacker.slot);
        }
        self.state
            .change_life(enemy, -outcome.damage_to_defender, &mut self.events);
        self.state
            .change_life(side, -outcome.damage_to_attacker, &mut self.events);

        self.after_damage(life_before, Some(AttackerRef { atk, ..attacker }))
    }

    fn mark_attacked(&mut self, side: SideId, slot: usize) {
        if let Some(monster) = self.state.sides[side].zones.monster_mut(slot) {
            monster.attacked_this_turn = true;
        }
    }
}

/// Reject slot indices outside the five-slot zones.
pub(super) fn check_slot(slot: usize) -> Result<(), ActionError> {
    if slot < SLOT_COUNT {
        Ok(())
    } else {
        Err(ActionError::InvalidSlot(slot))
    }
}
