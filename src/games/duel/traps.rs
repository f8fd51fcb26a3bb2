//! Trap windows: opening, answering and closing them.
//!
//! Under `TrapPolicy::Manual` and `TrapPolicy::Responder` an opened window
//! is parked in `MatchState::pending` until its owner answers; under
//! `TrapPolicy::AutoActivate` every eligible trap fires in slot order
//! before the action returns.

use tracing::debug;

use super::resolution::Resolution;
use crate::core::{ActionError, SideId, TrapPolicy};
use crate::effects::{EffectResolver, TrapEffect, TrapOutcome};
use crate::rules::RulesEngine;
use crate::triggers::{eligible_traps, is_eligible, Event, TrapContext, TrapWindow};

impl Resolution<'_> {
    /// Give the non-active side a chance to answer `context`.
    pub(super) fn open_window(&mut self, context: TrapContext) -> Result<(), ActionError> {
        if self.state.is_over() {
            return Ok(());
        }
        let owner = self.state.inactive();
        let eligible = eligible_traps(self.state, self.registry(), owner, context.trigger());
        if eligible.is_empty() {
            return self.resume(context, false);
        }

        debug!(side = %owner, trigger = ?context.trigger(), slots = ?eligible, "trap window opened");
        self.events.push(Event::TrapOffered {
            side: owner,
            trigger: context.trigger(),
            slots: eligible.clone(),
        });
        let window = TrapWindow::new(owner, context, eligible);

        match self.rules.config().trap_policy {
            TrapPolicy::AutoActivate => self.auto_activate(window),
            TrapPolicy::Manual | TrapPolicy::Responder => {
                self.state.pending = Some(window);
                Ok(())
            }
        }
    }

    fn auto_activate(&mut self, mut window: TrapWindow) -> Result<(), ActionError> {
        while let Some(&slot) = window.eligible.first() {
            self.fire_in_window(&mut window, slot)?;
        }
        self.close_window(window)
    }

    /// `ActivateTrap` against the pending window.
    pub(super) fn respond_activate(&mut self, side: SideId, slot: usize) -> Result<(), ActionError> {
        let mut window = self.state.pending.take().ok_or(ActionError::NoTrapWindow)?;
        if !window.offers(slot) || !is_eligible(self.state, self.registry(), side, slot, window.trigger) {
            return Err(ActionError::TrapNotEligible(slot));
        }

        self.fire_in_window(&mut window, slot)?;
        if window.eligible.is_empty() || self.state.is_over() {
            return self.close_window(window);
        }

        self.events.push(Event::TrapOffered {
            side,
            trigger: window.trigger,
            slots: window.eligible.clone(),
        });
        self.state.pending = Some(window);
        Ok(())
    }

    /// `DeclineTraps` against the pending window.
    pub(super) fn respond_decline(&mut self) -> Result<(), ActionError> {
        let window = self.state.pending.take().ok_or(ActionError::NoTrapWindow)?;
        self.close_window(window)
    }

    /// Activate one trap inside `window` and refresh what is still on offer.
    fn fire_in_window(&mut self, window: &mut TrapWindow, slot: usize) -> Result<(), ActionError> {
        let card = self.state.sides[window.owner]
            .zones
            .spell_trap(slot)
            .map(|set| set.card)
            .ok_or(ActionError::EmptySlot(slot))?;
        let (_, effects) = self
            .template(card.template)?
            .trap_parts()
            .ok_or(ActionError::TrapNotEligible(slot))?;

        let outcome = self.activate_trap(window.owner, slot, effects, &window.context)?;
        window.negated |= outcome.negated;

        let subject_gone = match window.context {
            TrapContext::Summon { slot, card, .. } => !self.is_monster(self.state.active, slot, card),
            _ => false,
        };
        window.eligible = if window.negated || subject_gone || self.state.is_over() {
            Default::default()
        } else {
            eligible_traps(self.state, self.registry(), window.owner, window.trigger)
        };
        Ok(())
    }

    /// Flip the trap in `owner`'s `slot`, resolve its effects and send it
    /// to the graveyard.
    pub(super) fn activate_trap(
        &mut self,
        owner: SideId,
        slot: usize,
        effects: &[TrapEffect],
        context: &TrapContext,
    ) -> Result<TrapOutcome, ActionError> {
        let set = self.state.sides[owner]
            .zones
            .spell_trap_mut(slot)
            .ok_or(ActionError::EmptySlot(slot))?;
        set.face_down = false;
        set.activated = true;
        let card = set.card;

        debug!(side = %owner, slot, card = %card.id, "trap activated");
        self.events.push(Event::TrapActivated {
            side: owner,
            slot,
            card: card.id,
            template: card.template,
        });

        let outcome = EffectResolver::resolve_trap(self.state, owner, card.id, effects, context, &mut self.events);
        if outcome.negated {
            if let TrapContext::Attack { attacker, .. } = context {
                self.events.push(Event::TrapNegatedAttack {
                    side: owner,
                    attacker: attacker.card,
                });
            }
        }

        if let Some(set) = self.state.sides[owner].zones.take_spell_trap(slot) {
            self.state.bury(set.card);
        }
        Ok(outcome)
    }

    fn close_window(&mut self, window: TrapWindow) -> Result<(), ActionError> {
        debug!(side = %window.owner, trigger = ?window.trigger, negated = window.negated, "trap window closed");
        self.resume(window.context, window.negated)
    }
}
