//! Action handlers.
//!
//! Each handler validates everything before it touches the board, so a
//! rejected action leaves no partial change behind even without staging.
//! Phase and side gating has already happened in [`super::Duel`].

use tracing::debug;

use super::resolution::{check_slot, Resolution};
use crate::cards::{CardInstance, CardKind, MonsterCard, Position, SetCard, SummonMethod};
use crate::core::{ActionError, AttackTarget, SideId};
use crate::effects::{EffectResolver, SpellEffect};
use crate::rules::{Phase, RulesEngine};
use crate::triggers::{is_eligible, AttackerRef, Event, TrapContext, TriggerKind};

impl Resolution<'_> {
    // === Draw ===

    /// Whether the active side still owes its draw-phase draw.
    pub(super) fn draw_required(&self) -> bool {
        let config = self.rules.config();
        self.state.phase == Phase::Draw
            && !self.state.drew_this_turn
            && !(config.skip_first_turn_draw && self.state.turn == 1)
    }

    pub(super) fn draw(&mut self, side: SideId) -> Result<(), ActionError> {
        if !self.draw_required() {
            return Err(ActionError::NoDrawRequired);
        }
        let hand_cap = self.rules.config().hand_cap;
        self.state.draw(side, hand_cap, &mut self.events);
        Ok(())
    }

    // === Summons ===

    pub(super) fn normal_summon(&mut self, side: SideId, hand_idx: usize, slot: usize) -> Result<(), ActionError> {
        check_slot(slot)?;
        let card = self.hand_card(side, hand_idx)?;
        let stats = *self
            .template(card.template)?
            .monster_stats()
            .ok_or(ActionError::NotAMonster)?;
        if stats.required_tributes() > 0 {
            return Err(ActionError::LevelTooHigh(stats.level));
        }
        if self.state.sides[side].normal_summon_used {
            return Err(ActionError::NormalSummonAlreadyUsed);
        }
        if self.state.sides[side].zones.monster(slot).is_some() {
            return Err(ActionError::SlotOccupied(slot));
        }

        self.take_hand_card(side, hand_idx)?;
        self.state.sides[side].normal_summon_used = true;
        self.place_summoned(side, slot, card, stats.atk, SummonMethod::Normal)
    }

    pub(super) fn tribute_summon(
        &mut self,
        side: SideId,
        hand_idx: usize,
        slot: usize,
        tributes: &[usize],
    ) -> Result<(), ActionError> {
        check_slot(slot)?;
        let card = self.hand_card(side, hand_idx)?;
        let stats = *self
            .template(card.template)?
            .monster_stats()
            .ok_or(ActionError::NotAMonster)?;

        let required = stats.required_tributes();
        if required == 0 {
            return Err(ActionError::TributeNotRequired);
        }
        if tributes.len() != required {
            return Err(ActionError::InsufficientTributes {
                required,
                provided: tributes.len(),
            });
        }
        let zones = &self.state.sides[side].zones;
        for (i, &tribute) in tributes.iter().enumerate() {
            check_slot(tribute)?;
            if tributes[..i].contains(&tribute) {
                return Err(ActionError::DuplicateTribute(tribute));
            }
            if zones.monster(tribute).is_none() {
                return Err(ActionError::EmptySlot(tribute));
            }
        }
        if zones.monster(slot).is_some() && !tributes.contains(&slot) {
            return Err(ActionError::SlotOccupied(slot));
        }

        self.take_hand_card(side, hand_idx)?;
        for &tribute in tributes {
            let monster = self.state.sides[side]
                .zones
                .take_monster(tribute)
                .ok_or(ActionError::EmptySlot(tribute))?;
            self.state.bury(monster.card);
            self.events.push(Event::Tributed {
                side,
                slot: tribute,
                card: monster.id(),
            });
        }
        self.place_summoned(side, slot, card, stats.atk, SummonMethod::Tribute)
    }

    /// Put a summoned monster on the field, then give the opponent its
    /// on-summon window.
    fn place_summoned(
        &mut self,
        side: SideId,
        slot: usize,
        card: CardInstance,
        base_atk: u32,
        method: SummonMethod,
    ) -> Result<(), ActionError> {
        self.state.sides[side]
            .zones
            .place_monster(slot, MonsterCard::summoned(card, base_atk, method))
            .map_err(|_| ActionError::SlotOccupied(slot))?;
        self.events.push(Event::Summoned {
            side,
            slot,
            card: card.id,
            template: card.template,
            method,
        });

        let atk = self.effective(side, slot)?.atk;
        self.open_window(TrapContext::Summon {
            slot,
            card: card.id,
            base_atk,
            atk,
        })
    }

    // === Spells and traps ===

    pub(super) fn set(&mut self, side: SideId, hand_idx: usize, slot: usize) -> Result<(), ActionError> {
        check_slot(slot)?;
        let card = self.hand_card(side, hand_idx)?;
        if self.template(card.template)?.is_monster() {
            return Err(ActionError::NotASpellOrTrap);
        }
        if self.state.sides[side].zones.spell_trap(slot).is_some() {
            return Err(ActionError::SlotOccupied(slot));
        }

        self.take_hand_card(side, hand_idx)?;
        let sequence = self.state.turn_sequence;
        self.state.sides[side]
            .zones
            .place_spell_trap(slot, SetCard::set(card, sequence))
            .map_err(|_| ActionError::SlotOccupied(slot))?;
        self.events.push(Event::Set {
            side,
            slot,
            card: card.id,
        });
        Ok(())
    }

    pub(super) fn cast_spell(&mut self, side: SideId, hand_idx: usize) -> Result<(), ActionError> {
        let card = self.hand_card(side, hand_idx)?;
        let effects = self
            .template(card.template)?
            .spell_effects()
            .ok_or(ActionError::NotASpell)?;

        self.check_spell_targets(side, effects)?;

        self.take_hand_card(side, hand_idx)?;
        self.resolve_spell(side, card, effects)
    }

    /// Activate a face-down spell, or a manual trap set on an earlier turn.
    pub(super) fn activate_set_spell(&mut self, side: SideId, slot: usize) -> Result<(), ActionError> {
        check_slot(slot)?;
        let set = *self.state.sides[side]
            .zones
            .spell_trap(slot)
            .ok_or(ActionError::EmptySlot(slot))?;

        match &self.template(set.card.template)?.kind {
            CardKind::Spell { effects } => {
                self.check_spell_targets(side, effects)?;
                self.state.sides[side].zones.take_spell_trap(slot);
                self.resolve_spell(side, set.card, effects)
            }
            CardKind::Trap {
                trigger: TriggerKind::Manual,
                effects,
            } => {
                if !is_eligible(self.state, self.registry(), side, slot, TriggerKind::Manual) {
                    return Err(ActionError::TrapNotEligible(slot));
                }
                let life_before = self.state.sides[side.opponent()].life;
                self.activate_trap(side, slot, effects, &TrapContext::Manual)?;
                self.after_damage(life_before, None)
            }
            CardKind::Trap { .. } => Err(ActionError::TrapNotEligible(slot)),
            CardKind::Monster(_) => Err(ActionError::NotASpell),
        }
    }

    /// A revive needs a free monster slot and a monster in the caster's
    /// graveyard when the spell is cast.
    fn check_spell_targets(&self, side: SideId, effects: &[SpellEffect]) -> Result<(), ActionError> {
        let zones = &self.state.sides[side].zones;
        for effect in effects {
            if let SpellEffect::ReviveFromGraveyard { pick } = *effect {
                if zones.first_empty_monster_slot().is_none() {
                    return Err(ActionError::MonsterZoneFull);
                }
                if pick.pick(zones, self.registry()).is_none() {
                    return Err(ActionError::NothingToRevive);
                }
            }
        }
        Ok(())
    }

    fn resolve_spell(&mut self, side: SideId, card: CardInstance, effects: &[SpellEffect]) -> Result<(), ActionError> {
        self.events.push(Event::SpellCast {
            side,
            card: card.id,
            template: card.template,
        });
        let registry = self.registry();
        let life_before = self.state.sides[side.opponent()].life;
        EffectResolver::resolve_spell(self.state, registry, side, card.id, effects, &mut self.events);
        self.state.bury(card);
        self.after_damage(life_before, None)
    }

    // === Monsters ===

    pub(super) fn toggle_position(&mut self, side: SideId, slot: usize) -> Result<(), ActionError> {
        check_slot(slot)?;
        let monster = self.state.sides[side]
            .zones
            .monster_mut(slot)
            .ok_or(ActionError::EmptySlot(slot))?;
        if monster.position_changed_this_turn {
            return Err(ActionError::PositionAlreadyChanged);
        }
        if monster.attacked_this_turn {
            return Err(ActionError::AttackerAlreadyAttacked);
        }

        monster.position = monster.position.flipped();
        monster.position_changed_this_turn = true;
        let position = monster.position;
        self.events.push(Event::PositionChanged { side, slot, position });
        Ok(())
    }

    pub(super) fn declare_attack(
        &mut self,
        side: SideId,
        attacker_slot: usize,
        target: AttackTarget,
    ) -> Result<(), ActionError> {
        check_slot(attacker_slot)?;
        let attacker = self.state.sides[side]
            .zones
            .monster(attacker_slot)
            .ok_or(ActionError::EmptySlot(attacker_slot))?;
        if attacker.position == Position::Defense {
            return Err(ActionError::CannotAttackInDefense);
        }
        if attacker.attacked_this_turn {
            return Err(ActionError::AttackerAlreadyAttacked);
        }
        if attacker.position_changed_this_turn {
            return Err(ActionError::AttackerSwitchedPosition);
        }
        let card = attacker.card;

        let enemy_zones = &self.state.sides[side.opponent()].zones;
        let target_card = match target {
            AttackTarget::Direct => {
                if enemy_zones.has_monsters() {
                    return Err(ActionError::DirectAttackBlocked);
                }
                None
            }
            AttackTarget::Monster(slot) => {
                check_slot(slot)?;
                let defender = enemy_zones.monster(slot).ok_or(ActionError::NoValidTargets)?;
                Some(defender.id())
            }
        };

        let base_atk = self.printed_stats(card.template)?.atk;
        let atk = self.effective(side, attacker_slot)?.atk;
        debug!(side = %side, slot = attacker_slot, ?target, atk, "attack declared");

        self.open_window(TrapContext::Attack {
            attacker: AttackerRef {
                slot: attacker_slot,
                card: card.id,
                base_atk,
                atk,
            },
            target,
            target_card,
        })
    }

    // === Phases ===

    pub(super) fn advance_phase(&mut self, side: SideId) -> Result<(), ActionError> {
        let from = self.state.phase;
        match from {
            Phase::Draw if self.draw_required() => {
                let hand_cap = self.rules.config().hand_cap;
                self.state.draw(side, hand_cap, &mut self.events);
                if self.state.is_over() {
                    return Ok(());
                }
            }
            Phase::End => return self.start_turn(side),
            _ => {}
        }

        let to = from.next();
        self.state.phase = to;
        self.events.push(Event::PhaseAdvanced { side, from, to });
        if to == Phase::End {
            self.expire_boosts(side);
        }
        Ok(())
    }

    /// Main 1 to main 2 through an empty battle phase.
    pub(super) fn skip_battle(&mut self, side: SideId) -> Result<(), ActionError> {
        self.advance_phase(side)?;
        self.advance_phase(side)
    }

    /// Advance until the turn passes to the other side or the match ends.
    /// Any draw still owed is taken on the way out of the draw phase.
    pub(super) fn end_turn(&mut self, side: SideId) -> Result<(), ActionError> {
        let turn_sequence = self.state.turn_sequence;
        while self.state.turn_sequence == turn_sequence && !self.state.is_over() {
            self.advance_phase(side)?;
        }
        debug!(side = %side, turn = self.state.turn, "turn ended early");
        Ok(())
    }

    /// Count down timed boosts on `side`'s monsters.
    fn expire_boosts(&mut self, side: SideId) {
        for (slot, monster) in self.state.sides[side].zones.occupied_monsters_mut() {
            if monster.tick_boosts() > 0 {
                self.events.push(Event::BoostExpired {
                    side,
                    slot,
                    card: monster.id(),
                });
            }
        }
    }

    /// Hand the turn over, then give the previous active side its
    /// enemy-turn-start window.
    fn start_turn(&mut self, side: SideId) -> Result<(), ActionError> {
        self.state.start_next_turn();
        self.events.push(Event::PhaseAdvanced {
            side,
            from: Phase::End,
            to: Phase::Draw,
        });
        self.events.push(Event::TurnStarted {
            side: self.state.active,
            turn: self.state.turn,
        });
        debug!(side = %self.state.active, turn = self.state.turn, "turn started");
        self.open_window(TrapContext::EnemyTurnStart)
    }

    // === Hand ===

    fn hand_card(&self, side: SideId, hand_idx: usize) -> Result<CardInstance, ActionError> {
        self.state.sides[side]
            .zones
            .hand_card(hand_idx)
            .copied()
            .ok_or(ActionError::InvalidHandIndex(hand_idx))
    }

    fn take_hand_card(&mut self, side: SideId, hand_idx: usize) -> Result<CardInstance, ActionError> {
        self.state.sides[side]
            .zones
            .take_from_hand(hand_idx)
            .ok_or(ActionError::InvalidHandIndex(hand_idx))
    }
}
