//! Terrain types and their effect on a rolling ball

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Terrain tag carried by a level zone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Terrain {
    Grass,
    Ice,
    Sand,
    /// Pink sand, grabs the ball hard
    #[serde(alias = "pink_sand")]
    StickySand,
    Water,
    Oil,
}

/// Hazards interrupt motion instead of slowing the ball
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Hazard {
    /// Respawn at the last stable position
    Water,
    /// Respawn at the level start
    Oil,
}

/// What a surface does to the ball this tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SurfaceEffect {
    /// Fraction of velocity kept per tick
    Friction(f32),
    Hazard(Hazard),
}

/// Friction coefficient per non-hazard terrain
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrictionTable {
    pub grass: f32,
    pub ice: f32,
    pub sand: f32,
    pub sticky_sand: f32,
}

impl Default for FrictionTable {
    fn default() -> Self {
        Self {
            grass: FRICTION_GRASS,
            ice: FRICTION_ICE,
            sand: FRICTION_SAND,
            sticky_sand: FRICTION_STICKY_SAND,
        }
    }
}

impl FrictionTable {
    /// Iterate `(name, coefficient)` pairs, for validation
    pub fn entries(&self) -> [(&'static str, f32); 4] {
        [
            ("grass", self.grass),
            ("ice", self.ice),
            ("sand", self.sand),
            ("sticky_sand", self.sticky_sand),
        ]
    }
}

impl Terrain {
    pub const ALL: [Terrain; 6] = [
        Terrain::Grass,
        Terrain::Ice,
        Terrain::Sand,
        Terrain::StickySand,
        Terrain::Water,
        Terrain::Oil,
    ];

    /// Resolve this terrain to its effect. Water and oil never carry friction.
    pub fn effect(self, friction: &FrictionTable) -> SurfaceEffect {
        match self {
            Terrain::Grass => SurfaceEffect::Friction(friction.grass),
            Terrain::Ice => SurfaceEffect::Friction(friction.ice),
            Terrain::Sand => SurfaceEffect::Friction(friction.sand),
            Terrain::StickySand => SurfaceEffect::Friction(friction.sticky_sand),
            Terrain::Water => SurfaceEffect::Hazard(Hazard::Water),
            Terrain::Oil => SurfaceEffect::Hazard(Hazard::Oil),
        }
    }

    pub fn is_hazard(self) -> bool {
        matches!(self, Terrain::Water | Terrain::Oil)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hazards_have_no_friction() {
        let table = FrictionTable::default();
        for terrain in Terrain::ALL {
            let effect = terrain.effect(&table);
            assert_eq!(
                terrain.is_hazard(),
                matches!(effect, SurfaceEffect::Hazard(_)),
                "{terrain:?}"
            );
        }
    }

    #[test]
    fn test_default_friction_ordering() {
        let table = FrictionTable::default();
        // Ice slides furthest, sticky sand stops quickest
        assert!(table.ice > table.grass);
        assert!(table.grass > table.sand);
        assert!(table.sand > table.sticky_sand);
        for (name, c) in table.entries() {
            assert!(c > 0.0 && c < 1.0, "{name} = {c}");
        }
    }

    #[test]
    fn test_terrain_serde_names() {
        let t: Terrain = serde_json::from_str("\"sticky_sand\"").unwrap();
        assert_eq!(t, Terrain::StickySand);
        let t: Terrain = serde_json::from_str("\"pink_sand\"").unwrap();
        assert_eq!(t, Terrain::StickySand);
        assert_eq!(serde_json::to_string(&Terrain::Oil).unwrap(), "\"oil\"");
    }
}
