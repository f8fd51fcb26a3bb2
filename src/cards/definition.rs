//! Card templates - immutable card data.
//!
//! `CardTemplate` holds what every copy of a card shares: its name and its
//! kind-specific data (monster stats, spell effects, trap trigger and
//! effects). Per-copy data lives in [`super::CardInstance`] and in the
//! board slots.

use serde::{Deserialize, Serialize};

use super::attributes::Attribute;
use crate::effects::{SpellEffect, TrapEffect};
use crate::triggers::TriggerKind;

/// Stable identifier of a card template.
///
/// Decks are ordered lists of template ids.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TemplateId(pub u32);

impl TemplateId {
    /// Create a new template ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for TemplateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Template({})", self.0)
    }
}

/// Printed monster statistics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MonsterStats {
    /// Level (stars). Decides the tribute cost.
    pub level: u8,
    pub attribute: Attribute,
    /// Base attack.
    pub atk: u32,
    /// Base defense.
    pub def: u32,
}

impl MonsterStats {
    /// Tributes needed to summon a monster of this level.
    ///
    /// ```
    /// use duel_kernel::cards::{Attribute, MonsterStats};
    ///
    /// let stats = |level| MonsterStats { level, attribute: Attribute::None, atk: 0, def: 0 };
    /// assert_eq!(stats(4).required_tributes(), 0);
    /// assert_eq!(stats(6).required_tributes(), 1);
    /// assert_eq!(stats(8).required_tributes(), 2);
    /// ```
    #[must_use]
    pub const fn required_tributes(&self) -> usize {
        match self.level {
            0..=4 => 0,
            5..=6 => 1,
            _ => 2,
        }
    }
}

/// What kind of card a template describes.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardKind {
    Monster(MonsterStats),
    Spell {
        /// Applied in order when the spell resolves.
        effects: Vec<SpellEffect>,
    },
    Trap {
        trigger: TriggerKind,
        /// Applied in order when the trap is activated.
        effects: Vec<TrapEffect>,
    },
}

/// Immutable card template.
///
/// ## Example
///
/// ```
/// use duel_kernel::cards::{Attribute, CardTemplate, TemplateId};
///
/// let dragon = CardTemplate::monster(TemplateId::new(1), "Ember Drake", 4, Attribute::Fire, 1500, 1200);
///
/// assert!(dragon.is_monster());
/// assert_eq!(dragon.monster_stats().map(|s| s.atk), Some(1500));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardTemplate {
    /// Unique identifier for this template.
    pub id: TemplateId,

    /// Display name.
    pub name: String,

    /// Kind-specific data.
    pub kind: CardKind,
}

impl CardTemplate {
    /// Create a monster template.
    #[must_use]
    pub fn monster(
        id: TemplateId,
        name: impl Into<String>,
        level: u8,
        attribute: Attribute,
        atk: u32,
        def: u32,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            kind: CardKind::Monster(MonsterStats {
                level,
                attribute,
                atk,
                def,
            }),
        }
    }

    /// Create a spell template.
    #[must_use]
    pub fn spell(id: TemplateId, name: impl Into<String>, effects: Vec<SpellEffect>) -> Self {
        Self {
            id,
            name: name.into(),
            kind: CardKind::Spell { effects },
        }
    }

    /// Create a trap template.
    #[must_use]
    pub fn trap(
        id: TemplateId,
        name: impl Into<String>,
        trigger: TriggerKind,
        effects: Vec<TrapEffect>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            kind: CardKind::Trap { trigger, effects },
        }
    }

    #[must_use]
    pub fn is_monster(&self) -> bool {
        matches!(self.kind, CardKind::Monster(_))
    }

    #[must_use]
    pub fn is_spell(&self) -> bool {
        matches!(self.kind, CardKind::Spell { .. })
    }

    #[must_use]
    pub fn is_trap(&self) -> bool {
        matches!(self.kind, CardKind::Trap { .. })
    }

    /// Monster stats, if this is a monster.
    #[must_use]
    pub fn monster_stats(&self) -> Option<&MonsterStats> {
        match &self.kind {
            CardKind::Monster(stats) => Some(stats),
            _ => None,
        }
    }

    /// Spell effects, if this is a spell.
    #[must_use]
    pub fn spell_effects(&self) -> Option<&[SpellEffect]> {
        match &self.kind {
            CardKind::Spell { effects } => Some(effects),
            _ => None,
        }
    }

    /// Trap trigger and effects, if this is a trap.
    #[must_use]
    pub fn trap_parts(&self) -> Option<(TriggerKind, &[TrapEffect])> {
        match &self.kind {
            CardKind::Trap { trigger, effects } => Some((*trigger, effects)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::TargetSide;

    #[test]
    fn test_template_id() {
        let id = TemplateId::new(42);
        assert_eq!(id.raw(), 42);
        assert_eq!(format!("{}", id), "Template(42)");
    }

    #[test]
    fn test_kind_accessors() {
        let bolt = CardTemplate::spell(
            TemplateId::new(2),
            "Bolt",
            vec![SpellEffect::DamagePlayer { amount: 500, target: TargetSide::Enemy }],
        );
        let hole = CardTemplate::trap(
            TemplateId::new(3),
            "Pitfall",
            TriggerKind::OnSummon,
            vec![TrapEffect::DestroyAttacker { atk_threshold: Some(1500) }],
        );

        assert!(bolt.is_spell());
        assert!(bolt.monster_stats().is_none());
        assert_eq!(bolt.spell_effects().map(<[_]>::len), Some(1));

        assert!(hole.is_trap());
        let (trigger, effects) = hole.trap_parts().unwrap();
        assert_eq!(trigger, TriggerKind::OnSummon);
        assert_eq!(effects.len(), 1);
    }

    #[test]
    fn test_template_serialization() {
        let card = CardTemplate::monster(TemplateId::new(1), "Golem", 7, Attribute::Earth, 2400, 2800);

        let json = serde_json::to_string(&card).unwrap();
        let deserialized: CardTemplate = serde_json::from_str(&json).unwrap();

        assert_eq!(card, deserialized);
        assert_eq!(deserialized.monster_stats().unwrap().required_tributes(), 2);
    }
}
