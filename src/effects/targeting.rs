//! Effect targeting.
//!
//! Targets are expressed relative to the card's controller (`TargetSide`)
//! and picked deterministically from the target side's monster zone
//! (`Selection`) or graveyard (`RevivePick`).

use serde::{Deserialize, Serialize};

use crate::cards::{CardRegistry, TemplateId};
use crate::core::SideId;
use crate::zones::ZoneManager;

/// Which side an effect aims at, relative to the caster.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetSide {
    Enemy,
    Ally,
}

impl TargetSide {
    /// The absolute side for a caster.
    #[must_use]
    pub const fn resolve(self, caster: SideId) -> SideId {
        match self {
            TargetSide::Enemy => caster.opponent(),
            TargetSide::Ally => caster,
        }
    }
}

/// How a single-monster effect picks its target.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Selection {
    /// The lowest-index occupied monster slot.
    #[default]
    FirstOccupied,
}

impl Selection {
    /// Pick a monster slot, or `None` if the zone is empty.
    #[must_use]
    pub fn pick(self, zones: &ZoneManager) -> Option<usize> {
        match self {
            Selection::FirstOccupied => zones.first_occupied_monster(),
        }
    }
}

/// Which graveyard monster a revive effect brings back.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RevivePick {
    /// The monster buried most recently.
    #[default]
    Latest,
    /// The most recently buried copy of one template.
    Template(TemplateId),
}

impl RevivePick {
    /// Graveyard index of the monster to revive, or `None` if nothing fits.
    #[must_use]
    pub fn pick(self, zones: &ZoneManager, registry: &CardRegistry) -> Option<usize> {
        let is_monster = |template| registry.get(template).map_or(false, |t| t.is_monster());
        zones
            .graveyard()
            .iter()
            .enumerate()
            .rev()
            .find(|(_, card)| match self {
                RevivePick::Latest => is_monster(card.template),
                RevivePick::Template(id) => card.template == id && is_monster(id),
            })
            .map(|(index, _)| index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::catalog::{ids, standard_registry};
    use crate::cards::{CardInstance, MonsterCard, SummonMethod};
    use crate::core::InstanceId;

    #[test]
    fn test_target_side_resolution() {
        assert_eq!(TargetSide::Enemy.resolve(SideId::A), SideId::B);
        assert_eq!(TargetSide::Ally.resolve(SideId::A), SideId::A);
        assert_eq!(TargetSide::Enemy.resolve(SideId::B), SideId::A);
    }

    #[test]
    fn test_first_occupied_selection() {
        let mut zones = ZoneManager::new();
        assert_eq!(Selection::FirstOccupied.pick(&zones), None);

        for slot in [3, 1] {
            let card = CardInstance::new(InstanceId(slot as u32 + 1), TemplateId(101), SideId::B);
            zones
                .place_monster(slot, MonsterCard::summoned(card, 1000, SummonMethod::Normal))
                .unwrap();
        }
        assert_eq!(Selection::FirstOccupied.pick(&zones), Some(1));
    }

    #[test]
    fn test_revive_pick_skips_spells() {
        let registry = standard_registry().unwrap();
        let mut zones = ZoneManager::new();
        assert_eq!(RevivePick::Latest.pick(&zones, &registry), None);

        for (raw, template) in [(1, ids::GALE_FALCON), (2, ids::IRON_GOLEM), (3, ids::FIREBALL)] {
            zones.bury(CardInstance::new(InstanceId(raw), template, SideId::A));
        }

        assert_eq!(RevivePick::Latest.pick(&zones, &registry), Some(1));
        assert_eq!(RevivePick::Template(ids::GALE_FALCON).pick(&zones, &registry), Some(0));
        assert_eq!(RevivePick::Template(ids::FIREBALL).pick(&zones, &registry), None);
        assert_eq!(RevivePick::Template(ids::EMBER_DRAKE).pick(&zones, &registry), None);
    }
}
