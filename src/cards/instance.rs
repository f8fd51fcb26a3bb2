//! Card instances - runtime card state.
//!
//! `CardInstance` is one physical copy of a template. It carries no
//! mutable fields of its own: board-only state lives in the slot wrappers
//! [`MonsterCard`] and [`SetCard`], which exist only while the card
//! occupies a monster or spell/trap slot.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::definition::TemplateId;
use crate::core::entity::InstanceId;
use crate::core::player::SideId;
use crate::effects::BoostDuration;

/// A card instance in a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardInstance {
    /// Unique id for this copy.
    pub id: InstanceId,

    /// The template this copy was printed from.
    pub template: TemplateId,

    /// The side whose deck the card started in.
    pub owner: SideId,
}

impl CardInstance {
    #[must_use]
    pub fn new(id: InstanceId, template: TemplateId, owner: SideId) -> Self {
        Self {
            id,
            template,
            owner,
        }
    }
}

/// Battle position of a monster.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    Attack,
    Defense,
}

impl Position {
    /// The other position.
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Position::Attack => Position::Defense,
            Position::Defense => Position::Attack,
        }
    }
}

/// How a monster reached the field this turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SummonMethod {
    Normal,
    Tribute,
    /// Brought in by an effect; does not use the normal summon.
    Special,
}

/// Which stat a boost raises.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoostStat {
    Atk,
    Def,
}

/// A flat stat bonus granted by a spell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Boost {
    pub stat: BoostStat,
    pub amount: i64,
    pub duration: BoostDuration,
}

/// A monster occupying a monster-zone slot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonsterCard {
    pub card: CardInstance,
    pub position: Position,

    /// Remaining hit points for effect damage. Starts at the base ATK
    /// (at least 1); combat never touches it.
    pub current_hp: i64,

    /// Set when the monster was summoned during the current turn.
    pub summoned: Option<SummonMethod>,

    pub attacked_this_turn: bool,

    pub position_changed_this_turn: bool,

    /// Active boosts, oldest first.
    #[serde(default)]
    pub boosts: SmallVec<[Boost; 2]>,
}

impl MonsterCard {
    /// A freshly summoned monster in attack position.
    #[must_use]
    pub fn summoned(card: CardInstance, base_atk: u32, method: SummonMethod) -> Self {
        Self {
            card,
            position: Position::Attack,
            current_hp: i64::from(base_atk).max(1),
            summoned: Some(method),
            attacked_this_turn: false,
            position_changed_this_turn: false,
            boosts: SmallVec::new(),
        }
    }

    #[must_use]
    pub fn id(&self) -> InstanceId {
        self.card.id
    }

    /// Sum of active boosts for a stat.
    #[must_use]
    pub fn boost_total(&self, stat: BoostStat) -> i64 {
        self.boosts
            .iter()
            .filter(|b| b.stat == stat)
            .map(|b| b.amount)
            .sum()
    }

    /// Clear the once-per-turn flags.
    pub fn reset_turn_flags(&mut self) {
        self.summoned = None;
        self.attacked_this_turn = false;
        self.position_changed_this_turn = false;
    }

    /// Count down timed boosts by one turn, dropping the ones that run out.
    ///
    /// Returns how many boosts expired.
    pub fn tick_boosts(&mut self) -> usize {
        let before = self.boosts.len();
        for boost in self.boosts.iter_mut() {
            if let BoostDuration::Turns(n) = boost.duration {
                boost.duration = BoostDuration::Turns(n.saturating_sub(1));
            }
        }
        self.boosts
            .retain(|b| !matches!(b.duration, BoostDuration::Turns(0)));
        before - self.boosts.len()
    }
}

/// A spell or trap occupying a spell/trap slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SetCard {
    pub card: CardInstance,
    pub face_down: bool,
    pub activated: bool,

    /// Side-turn sequence number on which the card was set. Traps may only
    /// fire on a later side turn.
    pub set_on_sequence: u32,
}

impl SetCard {
    /// A card placed face-down.
    #[must_use]
    pub fn set(card: CardInstance, sequence: u32) -> Self {
        Self {
            card,
            face_down: true,
            activated: false,
            set_on_sequence: sequence,
        }
    }

    #[must_use]
    pub fn id(&self) -> InstanceId {
        self.card.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card() -> CardInstance {
        CardInstance::new(InstanceId::new(1), TemplateId::new(101), SideId::A)
    }

    #[test]
    fn test_summoned_monster_defaults() {
        let monster = MonsterCard::summoned(card(), 1500, SummonMethod::Normal);

        assert_eq!(monster.position, Position::Attack);
        assert_eq!(monster.current_hp, 1500);
        assert_eq!(monster.summoned, Some(SummonMethod::Normal));
        assert!(!monster.attacked_this_turn);
    }

    #[test]
    fn test_zero_atk_monster_has_one_hp() {
        let monster = MonsterCard::summoned(card(), 0, SummonMethod::Normal);
        assert_eq!(monster.current_hp, 1);
    }

    #[test]
    fn test_boost_totals_and_ticks() {
        let mut monster = MonsterCard::summoned(card(), 1000, SummonMethod::Tribute);
        monster.boosts.push(Boost {
            stat: BoostStat::Atk,
            amount: 300,
            duration: BoostDuration::Permanent,
        });
        monster.boosts.push(Boost {
            stat: BoostStat::Atk,
            amount: 200,
            duration: BoostDuration::Turns(1),
        });
        monster.boosts.push(Boost {
            stat: BoostStat::Def,
            amount: 400,
            duration: BoostDuration::Turns(2),
        });

        assert_eq!(monster.boost_total(BoostStat::Atk), 500);
        assert_eq!(monster.boost_total(BoostStat::Def), 400);

        assert_eq!(monster.tick_boosts(), 1);
        assert_eq!(monster.boost_total(BoostStat::Atk), 300);
        assert_eq!(monster.boost_total(BoostStat::Def), 400);

        assert_eq!(monster.tick_boosts(), 1);
        assert_eq!(monster.boost_total(BoostStat::Def), 0);
        assert_eq!(monster.boosts.len(), 1);
    }

    #[test]
    fn test_reset_turn_flags() {
        let mut monster = MonsterCard::summoned(card(), 1000, SummonMethod::Normal);
        monster.attacked_this_turn = true;
        monster.position_changed_this_turn = true;

        monster.reset_turn_flags();

        assert_eq!(monster.summoned, None);
        assert!(!monster.attacked_this_turn);
        assert!(!monster.position_changed_this_turn);
    }

    #[test]
    fn test_set_card() {
        let set = SetCard::set(card(), 3);
        assert!(set.face_down);
        assert!(!set.activated);
        assert_eq!(set.set_on_sequence, 3);
        assert_eq!(set.id(), InstanceId::new(1));
    }

    #[test]
    fn test_position_flip() {
        assert_eq!(Position::Attack.flipped(), Position::Defense);
        assert_eq!(Position::Defense.flipped(), Position::Attack);
    }
}
