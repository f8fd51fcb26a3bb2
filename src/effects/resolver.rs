//! Effect resolution.
//!
//! Applies spell and trap effect lists to a `MatchState` in list order.
//! Each effect sees the board left by the previous one. Resolution stops
//! as soon as the match is decided.

use tracing::trace;

use super::effect::{SpellEffect, TrapEffect};
use super::targeting::RevivePick;
use crate::cards::{Boost, BoostStat, CardRegistry, MonsterCard, SummonMethod};
use crate::core::{InstanceId, MatchState, SideId};
use crate::triggers::{Event, TrapContext};

/// What a resolved trap did to the action it answered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TrapOutcome {
    /// The pending attack is cancelled.
    pub negated: bool,
}

/// Resolves effect lists on match state.
pub struct EffectResolver;

impl EffectResolver {
    /// Resolve a spell cast by `caster`.
    pub fn resolve_spell(
        state: &mut MatchState,
        registry: &CardRegistry,
        caster: SideId,
        card: InstanceId,
        effects: &[SpellEffect],
        events: &mut Vec<Event>,
    ) {
        for (index, effect) in effects.iter().enumerate() {
            if state.is_over() {
                break;
            }
            events.push(Event::EffectApplied {
                side: caster,
                card,
                index,
            });
            Self::apply_spell_effect(state, registry, caster, effect, events);
        }
    }

    fn apply_spell_effect(
        state: &mut MatchState,
        registry: &CardRegistry,
        caster: SideId,
        effect: &SpellEffect,
        events: &mut Vec<Event>,
    ) {
        trace!(side = %caster, ?effect, "spell effect");
        match *effect {
            SpellEffect::DamagePlayer { amount, target } => {
                state.change_life(target.resolve(caster), -amount, events);
            }
            SpellEffect::HealPlayer { amount, target } => {
                state.change_life(target.resolve(caster), amount, events);
            }
            SpellEffect::DamageOneMonster {
                amount,
                target,
                selection,
            } => {
                let side = target.resolve(caster);
                if let Some(slot) = selection.pick(&state.sides[side].zones) {
                    damage_monster(state, side, slot, amount, events);
                }
            }
            SpellEffect::DamageAllMonsters { amount, target } => {
                let side = target.resolve(caster);
                let slots: Vec<usize> = state.sides[side]
                    .zones
                    .occupied_monsters()
                    .map(|(slot, _)| slot)
                    .collect();
                for slot in slots {
                    damage_monster(state, side, slot, amount, events);
                }
            }
            SpellEffect::BoostAtkAllAllies { amount, duration } => {
                boost_all(state, caster, Boost { stat: BoostStat::Atk, amount, duration });
            }
            SpellEffect::BoostDefAllAllies { amount, duration } => {
                boost_all(state, caster, Boost { stat: BoostStat::Def, amount, duration });
            }
            SpellEffect::DestroyOneMonster { target, selection } => {
                let side = target.resolve(caster);
                if let Some(slot) = selection.pick(&state.sides[side].zones) {
                    state.destroy_monster(side, slot, events);
                }
            }
            SpellEffect::ReviveFromGraveyard { pick } => {
                revive(state, registry, caster, pick, events);
            }
        }
    }

    /// Resolve a trap owned by `owner` against the action in `context`.
    pub fn resolve_trap(
        state: &mut MatchState,
        owner: SideId,
        card: InstanceId,
        effects: &[TrapEffect],
        context: &TrapContext,
        events: &mut Vec<Event>,
    ) -> TrapOutcome {
        let enemy = owner.opponent();
        let mut outcome = TrapOutcome::default();

        for (index, effect) in effects.iter().enumerate() {
            if state.is_over() {
                break;
            }
            events.push(Event::EffectApplied {
                side: owner,
                card,
                index,
            });
            trace!(side = %owner, ?effect, "trap effect");

            match *effect {
                TrapEffect::NegateAttack => {
                    if matches!(context, TrapContext::Attack { .. }) {
                        outcome.negated = true;
                    }
                }
                TrapEffect::DestroyAttacker { atk_threshold } => {
                    let victim = match context {
                        TrapContext::Attack { attacker, .. } => {
                            Some((attacker.slot, attacker.card, attacker.base_atk))
                        }
                        TrapContext::Summon {
                            slot,
                            card,
                            base_atk,
                            ..
                        } => Some((*slot, *card, *base_atk)),
                        TrapContext::Damage {
                            attacker: Some(attacker),
                            ..
                        } => Some((attacker.slot, attacker.card, attacker.base_atk)),
                        _ => None,
                    };
                    let Some((slot, victim, base_atk)) = victim else {
                        continue;
                    };
                    if atk_threshold.map_or(false, |threshold| base_atk < threshold) {
                        continue;
                    }
                    if state.sides[enemy].zones.monster(slot).map(|m| m.id()) == Some(victim) {
                        state.destroy_monster(enemy, slot, events);
                    }
                    if matches!(context, TrapContext::Attack { .. }) {
                        outcome.negated = true;
                    }
                }
                TrapEffect::ReflectDamage { percent } => {
                    let amount = (context.reflect_base() * i64::from(percent)).div_euclid(100);
                    state.change_life(enemy, -amount, events);
                }
                TrapEffect::DamageEnemy { amount } => {
                    state.change_life(enemy, -amount, events);
                }
            }
        }
        outcome
    }
}

/// Reduce a monster's HP, destroying it at zero.
fn damage_monster(state: &mut MatchState, side: SideId, slot: usize, amount: i64, events: &mut Vec<Event>) {
    let Some(monster) = state.sides[side].zones.monster_mut(slot) else {
        return;
    };
    monster.current_hp -= amount;
    if monster.current_hp <= 0 {
        state.destroy_monster(side, slot, events);
    }
}

/// Special summon a graveyard monster into the first empty slot. Does
/// nothing without a fitting monster or a free slot.
fn revive(state: &mut MatchState, registry: &CardRegistry, side: SideId, pick: RevivePick, events: &mut Vec<Event>) {
    let zones = &state.sides[side].zones;
    let (Some(index), Some(slot)) = (pick.pick(zones, registry), zones.first_empty_monster_slot()) else {
        return;
    };
    let Some(card) = zones.graveyard().get(index).copied() else {
        return;
    };
    let Some(stats) = registry.get(card.template).and_then(|t| t.monster_stats()) else {
        return;
    };

    let zones = &mut state.sides[side].zones;
    zones.take_from_graveyard(index);
    if let Err(monster) = zones.place_monster(slot, MonsterCard::summoned(card, stats.atk, SummonMethod::Special)) {
        zones.bury(monster.card);
        return;
    }
    events.push(Event::Summoned {
        side,
        slot,
        card: card.id,
        template: card.template,
        method: SummonMethod::Special,
    });
}

fn boost_all(state: &mut MatchState, side: SideId, boost: Boost) {
    for (_, monster) in state.sides[side].zones.occupied_monsters_mut() {
        monster.boosts.push(boost);
    }
}
