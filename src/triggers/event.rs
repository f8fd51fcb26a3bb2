//! Match events.
//!
//! Every accepted action returns the ordered list of events it produced;
//! the match also appends them to its log. The set of events is closed.
//!
//! Events carry full information (instance ids, templates of face-up
//! cards). Hidden-information filtering happens in the views, not here.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::condition::TriggerKind;
use crate::cards::{Position, SummonMethod, TemplateId};
use crate::core::{AttackTarget, InstanceId, SideId};
use crate::rules::{MatchResult, Phase};

/// Something that happened in a match.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Event {
    /// A card moved from deck to hand.
    Drew { side: SideId, card: InstanceId },
    /// A drawn card went straight to the graveyard because the hand was full.
    Discarded { side: SideId, card: InstanceId },
    Summoned {
        side: SideId,
        slot: usize,
        card: InstanceId,
        template: TemplateId,
        method: SummonMethod,
    },
    /// A monster was sent to the graveyard as a tribute.
    Tributed {
        side: SideId,
        slot: usize,
        card: InstanceId,
    },
    /// A spell or trap was placed face-down.
    Set {
        side: SideId,
        slot: usize,
        card: InstanceId,
    },
    SpellCast {
        side: SideId,
        card: InstanceId,
        template: TemplateId,
    },
    /// Effect `index` of a spell or trap resolves; its consequences follow.
    EffectApplied {
        side: SideId,
        card: InstanceId,
        index: usize,
    },
    /// A timed boost on a monster ran out.
    BoostExpired {
        side: SideId,
        slot: usize,
        card: InstanceId,
    },
    /// A trap window opened; `side` may activate one of `slots`.
    TrapOffered {
        side: SideId,
        trigger: TriggerKind,
        slots: SmallVec<[usize; 5]>,
    },
    TrapActivated {
        side: SideId,
        slot: usize,
        card: InstanceId,
        template: TemplateId,
    },
    /// A trap cancelled the pending attack of `attacker`.
    TrapNegatedAttack { side: SideId, attacker: InstanceId },
    /// An attack resolved.
    Attacked {
        side: SideId,
        attacker_slot: usize,
        target: AttackTarget,
    },
    MonsterDestroyed {
        side: SideId,
        slot: usize,
        card: InstanceId,
    },
    /// Life changed by `delta`; `life` is the new total.
    LifeChanged { side: SideId, delta: i64, life: i64 },
    PositionChanged {
        side: SideId,
        slot: usize,
        position: Position,
    },
    PhaseAdvanced {
        side: SideId,
        from: Phase,
        to: Phase,
    },
    TurnStarted { side: SideId, turn: u32 },
    MatchEnded { result: MatchResult },
}

impl Event {
    /// The side the event is about, if any.
    #[must_use]
    pub fn side(&self) -> Option<SideId> {
        match self {
            Event::Drew { side, .. }
            | Event::Discarded { side, .. }
            | Event::Summoned { side, .. }
            | Event::Tributed { side, .. }
            | Event::Set { side, .. }
            | Event::SpellCast { side, .. }
            | Event::EffectApplied { side, .. }
            | Event::BoostExpired { side, .. }
            | Event::TrapOffered { side, .. }
            | Event::TrapActivated { side, .. }
            | Event::TrapNegatedAttack { side, .. }
            | Event::Attacked { side, .. }
            | Event::MonsterDestroyed { side, .. }
            | Event::LifeChanged { side, .. }
            | Event::PositionChanged { side, .. }
            | Event::PhaseAdvanced { side, .. }
            | Event::TurnStarted { side, .. } => Some(*side),
            Event::MatchEnded { .. } => None,
        }
    }

    /// Short variant name, for logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Event::Drew { .. } => "Drew",
            Event::Discarded { .. } => "Discarded",
            Event::Summoned { .. } => "Summoned",
            Event::Tributed { .. } => "Tributed",
            Event::Set { .. } => "Set",
            Event::SpellCast { .. } => "SpellCast",
            Event::EffectApplied { .. } => "EffectApplied",
            Event::BoostExpired { .. } => "BoostExpired",
            Event::TrapOffered { .. } => "TrapOffered",
            Event::TrapActivated { .. } => "TrapActivated",
            Event::TrapNegatedAttack { .. } => "TrapNegatedAttack",
            Event::Attacked { .. } => "Attacked",
            Event::MonsterDestroyed { .. } => "MonsterDestroyed",
            Event::LifeChanged { .. } => "LifeChanged",
            Event::PositionChanged { .. } => "PositionChanged",
            Event::PhaseAdvanced { .. } => "PhaseAdvanced",
            Event::TurnStarted { .. } => "TurnStarted",
            Event::MatchEnded { .. } => "MatchEnded",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_side() {
        let event = Event::LifeChanged {
            side: SideId::B,
            delta: -1500,
            life: 6500,
        };
        assert_eq!(event.side(), Some(SideId::B));
        assert_eq!(event.name(), "LifeChanged");

        let end = Event::MatchEnded {
            result: MatchResult::Winner(SideId::A),
        };
        assert_eq!(end.side(), None);
    }

    #[test]
    fn test_event_serialization() {
        let events = vec![
            Event::TrapOffered {
                side: SideId::B,
                trigger: TriggerKind::OnAttack,
                slots: SmallVec::from_slice(&[0, 2]),
            },
            Event::Attacked {
                side: SideId::A,
                attacker_slot: 0,
                target: AttackTarget::Direct,
            },
        ];

        let json = serde_json::to_string(&events).unwrap();
        let restored: Vec<Event> = serde_json::from_str(&json).unwrap();
        assert_eq!(events, restored);
    }
}
