//! Terrain biomes and the (terrain, attribute) modifier table.

use serde::{Deserialize, Serialize};

use crate::cards::Attribute;

/// Closed set of battlefield biomes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Terrain {
    #[default]
    Plain,
    Volcano,
    Glacier,
    Ocean,
    Forest,
    Mountain,
    Desert,
    Swamp,
    Wasteland,
}

/// Percentage adjustments applied to a monster's base stats.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TerrainModifier {
    pub atk_percent: i32,
    pub def_percent: i32,
}

impl TerrainModifier {
    /// No adjustment.
    pub const NONE: TerrainModifier = TerrainModifier::new(0, 0);

    #[must_use]
    pub const fn new(atk_percent: i32, def_percent: i32) -> Self {
        Self {
            atk_percent,
            def_percent,
        }
    }

    /// Terrain-adjusted ATK.
    #[must_use]
    pub fn apply_atk(&self, base_atk: u32) -> i64 {
        apply_percent(base_atk, self.atk_percent)
    }

    /// Terrain-adjusted DEF.
    #[must_use]
    pub fn apply_def(&self, base_def: u32) -> i64 {
        apply_percent(base_def, self.def_percent)
    }
}

/// `floor(base * (100 + percent) / 100)`, clamped at zero.
///
/// ```
/// use duel_kernel::terrain::apply_percent;
///
/// assert_eq!(apply_percent(1500, 25), 1875);
/// assert_eq!(apply_percent(1500, -33), 1005);
/// assert_eq!(apply_percent(1400, 0), 1400);
/// ```
#[must_use]
pub fn apply_percent(base: u32, percent: i32) -> i64 {
    let scaled = i64::from(base) * (100 + i64::from(percent));
    scaled.div_euclid(100).max(0)
}

impl Terrain {
    /// Every biome.
    pub const ALL: [Terrain; 9] = [
        Terrain::Plain,
        Terrain::Volcano,
        Terrain::Glacier,
        Terrain::Ocean,
        Terrain::Forest,
        Terrain::Mountain,
        Terrain::Desert,
        Terrain::Swamp,
        Terrain::Wasteland,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Terrain::Plain => "plain",
            Terrain::Volcano => "volcano",
            Terrain::Glacier => "glacier",
            Terrain::Ocean => "ocean",
            Terrain::Forest => "forest",
            Terrain::Mountain => "mountain",
            Terrain::Desert => "desert",
            Terrain::Swamp => "swamp",
            Terrain::Wasteland => "wasteland",
        }
    }

    /// Modifier for a monster of `attribute` fighting on this terrain.
    #[must_use]
    pub const fn modifier(self, attribute: Attribute) -> TerrainModifier {
        use Attribute::*;

        match (self, attribute) {
            (Terrain::Plain, _) => TerrainModifier::NONE,

            (Terrain::Volcano, Fire) => TerrainModifier::new(30, 0),
            (Terrain::Volcano, Water) => TerrainModifier::new(-10, 0),

            (Terrain::Glacier, Water) => TerrainModifier::new(0, 20),
            (Terrain::Glacier, Fire) => TerrainModifier::new(0, -10),

            (Terrain::Ocean, Water) => TerrainModifier::new(10, 10),
            (Terrain::Ocean, Fire) => TerrainModifier::new(-20, 0),

            (Terrain::Forest, Wind) => TerrainModifier::new(10, 0),
            (Terrain::Forest, Earth) => TerrainModifier::new(0, 10),
            (Terrain::Forest, Fire) => TerrainModifier::new(-10, 0),

            (Terrain::Mountain, Earth) => TerrainModifier::new(0, 25),
            (Terrain::Mountain, Wind) => TerrainModifier::new(10, -10),

            (Terrain::Desert, Fire) => TerrainModifier::new(10, 0),
            (Terrain::Desert, Earth) => TerrainModifier::new(10, 0),
            (Terrain::Desert, Water) => TerrainModifier::new(-20, 0),

            (Terrain::Swamp, Water) => TerrainModifier::new(0, 10),
            (Terrain::Swamp, Earth) => TerrainModifier::new(-10, 0),
            (Terrain::Swamp, Dark) => TerrainModifier::new(10, 0),

            (Terrain::Wasteland, Dark) => TerrainModifier::new(20, 0),
            (Terrain::Wasteland, Light) => TerrainModifier::new(0, -20),

            _ => TerrainModifier::NONE,
        }
    }
}

impl std::fmt::Display for Terrain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_is_neutral() {
        for attribute in Attribute::ALL {
            assert_eq!(Terrain::Plain.modifier(attribute), TerrainModifier::NONE);
        }
    }

    #[test]
    fn test_volcano_fire() {
        let modifier = Terrain::Volcano.modifier(Attribute::Fire);
        assert_eq!(modifier.apply_atk(1400), 1820);
        assert_eq!(modifier.apply_def(1000), 1000);
    }

    #[test]
    fn test_floor_rounding() {
        assert_eq!(apply_percent(1500, 25), 1875);
        assert_eq!(apply_percent(1500, -33), 1005);
        assert_eq!(apply_percent(999, 10), 1098);
        assert_eq!(apply_percent(1, -30), 0);
        assert_eq!(apply_percent(0, 30), 0);
    }

    #[test]
    fn test_modifiers_stay_in_range() {
        for terrain in Terrain::ALL {
            for attribute in Attribute::ALL {
                let m = terrain.modifier(attribute);
                assert!((-30..=30).contains(&m.atk_percent), "{} {}", terrain, attribute);
                assert!((-30..=30).contains(&m.def_percent), "{} {}", terrain, attribute);
            }
        }
    }

    #[test]
    fn test_none_attribute_never_modified() {
        for terrain in Terrain::ALL {
            assert_eq!(terrain.modifier(Attribute::None), TerrainModifier::NONE);
        }
    }
}
