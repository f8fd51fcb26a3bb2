//! Per-viewer match views.
//!
//! A view shows what a human in the viewer's seat could see: their own
//! hand and face-down cards, the opponent's hand only as a count, and the
//! opponent's face-down cards only as occupied slots. Decks are counts for
//! both sides.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::{CardInstance, CardRegistry, Position, TemplateId};
use crate::core::{InstanceId, MatchState, SideId};
use crate::rules::{MatchResult, Phase};
use crate::terrain::Terrain;
use crate::triggers::TriggerKind;
use crate::zones::SLOT_COUNT;

/// A visible card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardRef {
    pub id: InstanceId,
    pub template: TemplateId,
}

impl From<&CardInstance> for CardRef {
    fn from(card: &CardInstance) -> Self {
        Self {
            id: card.id,
            template: card.template,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum HandView {
    Visible(Vec<CardRef>),
    Hidden { count: usize },
}

impl HandView {
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            HandView::Visible(cards) => cards.len(),
            HandView::Hidden { count } => *count,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A monster on the field with its current numbers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonsterView {
    pub card: CardRef,
    pub position: Position,
    pub atk: i64,
    pub def: i64,
    pub hp: i64,
    pub attacked_this_turn: bool,
    pub position_changed_this_turn: bool,
}

/// A spell/trap slot as the viewer sees it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SetCardView {
    /// An opponent card that is still face-down.
    Hidden,
    Known { card: CardRef, face_down: bool },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SideView {
    pub side: SideId,
    pub life: i64,
    pub terrain: Terrain,
    pub deck_size: usize,
    pub hand: HandView,
    pub monsters: [Option<MonsterView>; SLOT_COUNT],
    pub spell_traps: [Option<SetCardView>; SLOT_COUNT],
    pub graveyard: Vec<CardRef>,
    /// Monster slots that already attacked this turn.
    pub attacked_slots: SmallVec<[usize; SLOT_COUNT]>,
}

/// An open trap window. Only its owner learns which slots are eligible.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowView {
    pub owner: SideId,
    pub trigger: TriggerKind,
    pub eligible: Option<SmallVec<[usize; SLOT_COUNT]>>,
}

/// The match from one side's seat.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchView {
    pub viewer: SideId,
    pub turn: u32,
    pub phase: Phase,
    pub active: SideId,
    pub result: Option<MatchResult>,
    pub trap_window: Option<WindowView>,
    pub own: SideView,
    pub opponent: SideView,
}

impl MatchView {
    #[must_use]
    pub fn new(state: &MatchState, registry: &CardRegistry, viewer: SideId) -> Self {
        Self {
            viewer,
            turn: state.turn,
            phase: state.phase,
            active: state.active,
            result: state.result,
            trap_window: state.pending.as_ref().map(|window| WindowView {
                owner: window.owner,
                trigger: window.trigger,
                eligible: (window.owner == viewer).then(|| window.eligible.clone()),
            }),
            own: side_view(state, registry, viewer, true),
            opponent: side_view(state, registry, viewer.opponent(), false),
        }
    }

    #[must_use]
    pub fn winner(&self) -> Option<SideId> {
        self.result.and_then(|r| r.winner())
    }

    /// The view of `side`, whichever seat it is.
    #[must_use]
    pub fn side(&self, side: SideId) -> &SideView {
        if side == self.viewer {
            &self.own
        } else {
            &self.opponent
        }
    }
}

fn side_view(state: &MatchState, registry: &CardRegistry, side: SideId, owner_view: bool) -> SideView {
    let side_state = &state.sides[side];
    let zones = &side_state.zones;

    let hand = if owner_view {
        HandView::Visible(zones.hand().iter().map(CardRef::from).collect())
    } else {
        HandView::Hidden {
            count: zones.hand().len(),
        }
    };

    let monsters = std::array::from_fn(|slot| {
        let monster = zones.monster(slot)?;
        let stats = state.monster_stats(registry, side, slot)?;
        Some(MonsterView {
            card: CardRef::from(&monster.card),
            position: monster.position,
            atk: stats.atk,
            def: stats.def,
            hp: monster.current_hp,
            attacked_this_turn: monster.attacked_this_turn,
            position_changed_this_turn: monster.position_changed_this_turn,
        })
    });

    let spell_traps = std::array::from_fn(|slot| {
        zones.spell_trap(slot).map(|set| {
            if set.face_down && !owner_view {
                SetCardView::Hidden
            } else {
                SetCardView::Known {
                    card: CardRef::from(&set.card),
                    face_down: set.face_down,
                }
            }
        })
    });

    SideView {
        side,
        life: side_state.life,
        terrain: state.terrain[side],
        deck_size: zones.deck_len(),
        hand,
        monsters,
        spell_traps,
        graveyard: zones.graveyard().iter().map(CardRef::from).collect(),
        attacked_slots: side_state.attacked_slots(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::catalog::{ids, standard_registry};
    use crate::cards::{MonsterCard, SetCard, SummonMethod};
    use crate::games::duel::MatchSetup;

    fn state() -> (MatchState, CardRegistry) {
        let registry = standard_registry().unwrap();
        let mut setup = MatchSetup::new(3);
        setup.decks[SideId::A] = vec![ids::EMBER_DRAKE; 8];
        setup.decks[SideId::B] = vec![ids::MIRROR_BARRIER; 8];
        setup.config = setup.config.unshuffled();
        let mut state = setup.initial_state(&registry).unwrap();

        let trap = state.sides[SideId::B].zones.take_from_hand(0).unwrap();
        state.sides[SideId::B]
            .zones
            .place_spell_trap(1, SetCard::set(trap, 1))
            .unwrap();
        (state, registry)
    }

    #[test]
    fn test_opponent_hand_is_a_count() {
        let (state, registry) = state();
        let view = MatchView::new(&state, &registry, SideId::A);

        assert!(matches!(view.own.hand, HandView::Visible(ref cards) if cards.len() == 5));
        assert_eq!(view.opponent.hand, HandView::Hidden { count: 4 });
        assert_eq!(view.opponent.deck_size, 3);
    }

    #[test]
    fn test_face_down_cards_hidden_from_opponent() {
        let (state, registry) = state();

        let from_a = MatchView::new(&state, &registry, SideId::A);
        assert_eq!(from_a.opponent.spell_traps[1], Some(SetCardView::Hidden));
        assert_eq!(from_a.opponent.spell_traps[0], None);

        let from_b = MatchView::new(&state, &registry, SideId::B);
        assert!(matches!(
            from_b.own.spell_traps[1],
            Some(SetCardView::Known { face_down: true, card }) if card.template == ids::MIRROR_BARRIER
        ));
    }

    #[test]
    fn test_side_lookup() {
        let (state, registry) = state();
        let view = MatchView::new(&state, &registry, SideId::B);

        assert_eq!(view.side(SideId::B).side, SideId::B);
        assert_eq!(view.side(SideId::A).side, SideId::A);
        assert_eq!(view.winner(), None);
    }

    #[test]
    fn test_attacked_slots_listed_for_both_seats() {
        let (mut state, registry) = state();
        for slot in [3, 1] {
            let card = state.sides[SideId::A].zones.take_from_hand(0).unwrap();
            state.sides[SideId::A]
                .zones
                .place_monster(slot, MonsterCard::summoned(card, 1500, SummonMethod::Tribute))
                .unwrap();
        }
        state.sides[SideId::A].zones.monster_mut(3).unwrap().attacked_this_turn = true;

        let from_b = MatchView::new(&state, &registry, SideId::B);
        assert_eq!(from_b.opponent.attacked_slots.as_slice(), &[3]);
        assert!(from_b.own.attacked_slots.is_empty());
        assert_eq!(MatchView::new(&state, &registry, SideId::A).own.attacked_slots.as_slice(), &[3]);
    }
}
