//! Standard card catalog.
//!
//! A ready-made registry covering every monster level band, every
//! attribute, one spell per effect variant and one trap per trigger kind.
//! Drivers can start matches from it directly; tests use it as fixture
//! data.

use super::attributes::Attribute;
use super::definition::{CardTemplate, TemplateId};
use super::registry::CardRegistry;
use crate::core::error::SetupError;
use crate::effects::{BoostDuration, RevivePick, Selection, SpellEffect, TargetSide, TrapEffect};
use crate::triggers::TriggerKind;

/// Template ids of the standard catalog.
pub mod ids {
    use crate::cards::TemplateId;

    // Monsters, level 4 and below.
    pub const EMBER_DRAKE: TemplateId = TemplateId::new(101);
    pub const TIDE_SERPENT: TemplateId = TemplateId::new(102);
    pub const GALE_FALCON: TemplateId = TemplateId::new(103);
    pub const STONE_SENTINEL: TemplateId = TemplateId::new(104);
    pub const DAWN_ACOLYTE: TemplateId = TemplateId::new(105);
    pub const SHADE_STALKER: TemplateId = TemplateId::new(106);
    pub const IRON_GOLEM: TemplateId = TemplateId::new(107);
    pub const CINDER_IMP: TemplateId = TemplateId::new(108);

    // One tribute.
    pub const STORM_WYVERN: TemplateId = TemplateId::new(111);
    pub const FROST_TITAN: TemplateId = TemplateId::new(112);

    // Two tributes.
    pub const ABYSS_DRAGON: TemplateId = TemplateId::new(121);
    pub const SOLAR_COLOSSUS: TemplateId = TemplateId::new(122);

    // Spells.
    pub const FIREBALL: TemplateId = TemplateId::new(201);
    pub const CHAIN_LIGHTNING: TemplateId = TemplateId::new(202);
    pub const EARTHQUAKE: TemplateId = TemplateId::new(203);
    pub const HEALING_SPRING: TemplateId = TemplateId::new(204);
    pub const WAR_CRY: TemplateId = TemplateId::new(205);
    pub const STONE_SKIN: TemplateId = TemplateId::new(206);
    pub const BANISH: TemplateId = TemplateId::new(207);
    pub const REVIVAL_RITE: TemplateId = TemplateId::new(208);

    // Traps.
    pub const MIRROR_BARRIER: TemplateId = TemplateId::new(301);
    pub const SEALING_VEIL: TemplateId = TemplateId::new(302);
    pub const PITFALL: TemplateId = TemplateId::new(303);
    pub const RETRIBUTION: TemplateId = TemplateId::new(304);
    pub const AMBUSH: TemplateId = TemplateId::new(305);
    pub const SPIKED_MIRROR: TemplateId = TemplateId::new(306);
    pub const DETONATOR: TemplateId = TemplateId::new(307);
}

/// Every template of the standard catalog, sorted by id.
#[must_use]
pub fn standard_templates() -> Vec<CardTemplate> {
    use self::ids::*;

    vec![
        CardTemplate::monster(EMBER_DRAKE, "Ember Drake", 4, Attribute::Fire, 1500, 1200),
        CardTemplate::monster(TIDE_SERPENT, "Tide Serpent", 4, Attribute::Water, 1400, 1600),
        CardTemplate::monster(GALE_FALCON, "Gale Falcon", 3, Attribute::Wind, 1200, 800),
        CardTemplate::monster(STONE_SENTINEL, "Stone Sentinel", 4, Attribute::Earth, 1000, 1800),
        CardTemplate::monster(DAWN_ACOLYTE, "Dawn Acolyte", 2, Attribute::Light, 800, 1000),
        CardTemplate::monster(SHADE_STALKER, "Shade Stalker", 4, Attribute::Dark, 1600, 900),
        CardTemplate::monster(IRON_GOLEM, "Iron Golem", 4, Attribute::None, 1500, 1500),
        CardTemplate::monster(CINDER_IMP, "Cinder Imp", 4, Attribute::Fire, 1400, 1000),
        CardTemplate::monster(STORM_WYVERN, "Storm Wyvern", 5, Attribute::Wind, 2000, 1500),
        CardTemplate::monster(FROST_TITAN, "Frost Titan", 6, Attribute::Water, 2300, 2000),
        CardTemplate::monster(ABYSS_DRAGON, "Abyss Dragon", 7, Attribute::Dark, 2500, 2000),
        CardTemplate::monster(SOLAR_COLOSSUS, "Solar Colossus", 8, Attribute::Light, 3000, 2500),
        CardTemplate::spell(
            FIREBALL,
            "Fireball",
            vec![SpellEffect::DamagePlayer {
                amount: 500,
                target: TargetSide::Enemy,
            }],
        ),
        CardTemplate::spell(
            CHAIN_LIGHTNING,
            "Chain Lightning",
            vec![SpellEffect::DamageOneMonster {
                amount: 1000,
                target: TargetSide::Enemy,
                selection: Selection::FirstOccupied,
            }],
        ),
        CardTemplate::spell(
            EARTHQUAKE,
            "Earthquake",
            vec![SpellEffect::DamageAllMonsters {
                amount: 800,
                target: TargetSide::Enemy,
            }],
        ),
        CardTemplate::spell(
            HEALING_SPRING,
            "Healing Spring",
            vec![SpellEffect::HealPlayer {
                amount: 1000,
                target: TargetSide::Ally,
            }],
        ),
        CardTemplate::spell(
            WAR_CRY,
            "War Cry",
            vec![SpellEffect::BoostAtkAllAllies {
                amount: 500,
                duration: BoostDuration::Permanent,
            }],
        ),
        CardTemplate::spell(
            STONE_SKIN,
            "Stone Skin",
            vec![SpellEffect::BoostDefAllAllies {
                amount: 700,
                duration: BoostDuration::Turns(1),
            }],
        ),
        CardTemplate::spell(
            BANISH,
            "Banish",
            vec![SpellEffect::DestroyOneMonster {
                target: TargetSide::Enemy,
                selection: Selection::FirstOccupied,
            }],
        ),
        CardTemplate::spell(
            REVIVAL_RITE,
            "Revival Rite",
            vec![SpellEffect::ReviveFromGraveyard {
                pick: RevivePick::Latest,
            }],
        ),
        CardTemplate::trap(
            MIRROR_BARRIER,
            "Mirror Barrier",
            TriggerKind::OnAttack,
            vec![TrapEffect::DestroyAttacker { atk_threshold: None }],
        ),
        CardTemplate::trap(
            SEALING_VEIL,
            "Sealing Veil",
            TriggerKind::OnAttack,
            vec![TrapEffect::NegateAttack],
        ),
        CardTemplate::trap(
            PITFALL,
            "Pitfall",
            TriggerKind::OnSummon,
            vec![TrapEffect::DestroyAttacker {
                atk_threshold: Some(1500),
            }],
        ),
        CardTemplate::trap(
            RETRIBUTION,
            "Retribution",
            TriggerKind::OnDamage,
            vec![TrapEffect::ReflectDamage { percent: 50 }],
        ),
        CardTemplate::trap(
            AMBUSH,
            "Ambush",
            TriggerKind::OnEnemyTurnStart,
            vec![TrapEffect::DamageEnemy { amount: 300 }],
        ),
        CardTemplate::trap(
            SPIKED_MIRROR,
            "Spiked Mirror",
            TriggerKind::OnAttack,
            vec![TrapEffect::NegateAttack, TrapEffect::ReflectDamage { percent: 50 }],
        ),
        CardTemplate::trap(
            DETONATOR,
            "Detonator",
            TriggerKind::Manual,
            vec![TrapEffect::DamageEnemy { amount: 500 }],
        ),
    ]
}

/// Registry holding the standard catalog.
///
/// Fails with `DuplicateTemplate` if two catalog entries share an id.
pub fn standard_registry() -> Result<CardRegistry, SetupError> {
    CardRegistry::from_templates(standard_templates())
}

/// Template id lookup by display name.
#[must_use]
pub fn template_named(name: &str) -> Option<TemplateId> {
    standard_templates()
        .into_iter()
        .find(|t| t.name == name)
        .map(|t| t.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardKind;

    #[test]
    fn test_catalog_ids_are_unique() {
        assert_eq!(standard_registry().unwrap().len(), standard_templates().len());
    }

    #[test]
    fn test_duplicate_catalog_entry_is_reported() {
        let mut templates = standard_templates();
        let copy = templates[3].clone();
        templates.push(copy);

        assert_eq!(
            CardRegistry::from_templates(templates),
            Err(SetupError::DuplicateTemplate(ids::STONE_SENTINEL))
        );
    }

    #[test]
    fn test_catalog_covers_spell_effects() {
        let registry = standard_registry().unwrap();
        let revive = registry.lookup(ids::REVIVAL_RITE).unwrap();
        assert!(matches!(
            revive.spell_effects(),
            Some([SpellEffect::ReviveFromGraveyard { pick: RevivePick::Latest }])
        ));
    }

    #[test]
    fn test_catalog_covers_attributes_and_levels() {
        let registry = standard_registry().unwrap();
        for attribute in Attribute::ALL {
            assert!(
                !registry
                    .find(|t| t.monster_stats().map_or(false, |s| s.attribute == attribute))
                    .is_empty(),
                "no monster with attribute {}",
                attribute
            );
        }
        for tributes in 0..=2 {
            assert!(!registry
                .find(|t| t
                    .monster_stats()
                    .map_or(false, |s| s.required_tributes() == tributes))
                .is_empty());
        }
    }

    #[test]
    fn test_catalog_covers_trap_triggers() {
        let registry = standard_registry().unwrap();
        for trigger in TriggerKind::ALL {
            let found = registry.find(|t| matches!(&t.kind, CardKind::Trap { trigger: k, .. } if *k == trigger));
            assert!(!found.is_empty(), "no trap for {:?}", trigger);
        }
    }

    #[test]
    fn test_template_named() {
        assert_eq!(template_named("Pitfall"), Some(ids::PITFALL));
        assert_eq!(template_named("Nope"), None);
    }
}
