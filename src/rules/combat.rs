//! Combat arithmetic.
//!
//! Pure functions: effective stats from base stats, terrain and boosts,
//! and the outcome table for one attack. Applying an outcome to the board
//! is the action resolver's job.

use serde::{Deserialize, Serialize};

use crate::cards::{BoostStat, MonsterCard, MonsterStats, Position};
use crate::terrain::Terrain;

/// ATK and DEF as they stand right now.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EffectiveStats {
    pub atk: i64,
    pub def: i64,
}

/// Terrain-adjusted base stats plus active boosts, floored at zero.
#[must_use]
pub fn effective_stats(monster: &MonsterCard, stats: &MonsterStats, terrain: Terrain) -> EffectiveStats {
    let modifier = terrain.modifier(stats.attribute);
    EffectiveStats {
        atk: (modifier.apply_atk(stats.atk) + monster.boost_total(BoostStat::Atk)).max(0),
        def: (modifier.apply_def(stats.def) + monster.boost_total(BoostStat::Def)).max(0),
    }
}

/// What an attack hits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Defender {
    /// The opponent's life points.
    Direct,
    Monster {
        position: Position,
        stats: EffectiveStats,
    },
}

/// Result of one attack. Damage values are life points lost (non-negative).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CombatOutcome {
    pub attacker_destroyed: bool,
    pub target_destroyed: bool,
    pub damage_to_defender: i64,
    pub damage_to_attacker: i64,
}

/// Resolve an attack by an attack-position monster with `attacker_atk`.
///
/// ```
/// use duel_kernel::cards::Position;
/// use duel_kernel::rules::combat::{resolve, Defender, EffectiveStats};
///
/// let wall = Defender::Monster {
///     position: Position::Defense,
///     stats: EffectiveStats { atk: 0, def: 1800 },
/// };
/// let outcome = resolve(1500, wall);
///
/// assert_eq!(outcome.damage_to_attacker, 300);
/// assert!(!outcome.target_destroyed);
/// ```
#[must_use]
pub fn resolve(attacker_atk: i64, defender: Defender) -> CombatOutcome {
    let outcome = match defender {
        Defender::Direct => CombatOutcome {
            damage_to_defender: attacker_atk,
            ..CombatOutcome::default()
        },
        Defender::Monster {
            position: Position::Attack,
            stats,
        } => {
            let d = attacker_atk - stats.atk;
            CombatOutcome {
                attacker_destroyed: d <= 0,
                target_destroyed: d >= 0,
                damage_to_defender: d.max(0),
                damage_to_attacker: (-d).max(0),
            }
        }
        Defender::Monster {
            position: Position::Defense,
            stats,
        } => {
            let d = attacker_atk - stats.def;
            CombatOutcome {
                target_destroyed: d > 0,
                damage_to_attacker: (-d).max(0),
                ..CombatOutcome::default()
            }
        }
    };
    tracing::trace!(attacker_atk, ?defender, ?outcome, "combat resolved");
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Attribute, Boost, CardInstance, SummonMethod, TemplateId};
    use crate::core::{InstanceId, SideId};
    use crate::effects::BoostDuration;

    fn attack_pos(atk: i64) -> Defender {
        Defender::Monster {
            position: Position::Attack,
            stats: EffectiveStats { atk, def: 0 },
        }
    }

    fn defense_pos(def: i64) -> Defender {
        Defender::Monster {
            position: Position::Defense,
            stats: EffectiveStats { atk: 0, def },
        }
    }

    #[test]
    fn test_direct_attack() {
        let outcome = resolve(1500, Defender::Direct);
        assert_eq!(outcome.damage_to_defender, 1500);
        assert!(!outcome.attacker_destroyed && !outcome.target_destroyed);
    }

    #[test]
    fn test_attack_vs_attack() {
        let win = resolve(1800, attack_pos(1500));
        assert!(win.target_destroyed && !win.attacker_destroyed);
        assert_eq!(win.damage_to_defender, 300);

        let lose = resolve(1200, attack_pos(1500));
        assert!(lose.attacker_destroyed && !lose.target_destroyed);
        assert_eq!(lose.damage_to_attacker, 300);

        let tie = resolve(1500, attack_pos(1500));
        assert!(tie.attacker_destroyed && tie.target_destroyed);
        assert_eq!(tie.damage_to_attacker + tie.damage_to_defender, 0);
    }

    #[test]
    fn test_attack_vs_defense() {
        let pierce = resolve(2000, defense_pos(1500));
        assert!(pierce.target_destroyed);
        assert_eq!(pierce.damage_to_defender, 0);

        let bounce = resolve(1500, defense_pos(1800));
        assert!(!bounce.target_destroyed && !bounce.attacker_destroyed);
        assert_eq!(bounce.damage_to_attacker, 300);

        assert_eq!(resolve(1500, defense_pos(1500)), CombatOutcome::default());
    }

    #[test]
    fn test_effective_stats_terrain_and_boosts() {
        let stats = MonsterStats {
            level: 4,
            attribute: Attribute::Fire,
            atk: 1400,
            def: 1000,
        };
        let card = CardInstance::new(InstanceId(1), TemplateId(108), SideId::A);
        let mut monster = MonsterCard::summoned(card, stats.atk, SummonMethod::Normal);

        assert_eq!(
            effective_stats(&monster, &stats, Terrain::Volcano),
            EffectiveStats { atk: 1820, def: 1000 }
        );

        monster.boosts.push(Boost {
            stat: BoostStat::Atk,
            amount: 500,
            duration: BoostDuration::Permanent,
        });
        assert_eq!(effective_stats(&monster, &stats, Terrain::Plain).atk, 1900);

        monster.boosts.push(Boost {
            stat: BoostStat::Def,
            amount: -5000,
            duration: BoostDuration::Permanent,
        });
        assert_eq!(effective_stats(&monster, &stats, Terrain::Plain).def, 0);
    }
}
