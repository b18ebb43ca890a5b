//! Level geometry and the course catalog
//!
//! Levels are static data in virtual game-space (600x900 portrait by
//! default): a start point, a hole, reflective wall rectangles and terrain
//! zones. Anything not covered by a zone is grass.

use glam::Vec2;
use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::surface::Terrain;
use crate::error::LevelError;
use crate::tuning::Tuning;

/// Axis-aligned rectangle (top-left corner + size)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        Vec2::new(self.x + self.w, self.y + self.h)
    }

    /// Strict interior test (points on the edge are outside)
    pub fn contains(&self, p: Vec2) -> bool {
        p.x > self.x && p.x < self.x + self.w && p.y > self.y && p.y < self.y + self.h
    }

    /// Closest point of the rectangle to `p` (clamped per axis)
    #[inline]
    pub fn closest_point(&self, p: Vec2) -> Vec2 {
        p.min(self.max()).max(self.min())
    }
}

/// Terrain-tagged region
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    #[serde(flatten)]
    pub rect: Rect,
    #[serde(rename = "type")]
    pub terrain: Terrain,
}

impl Zone {
    pub const fn new(x: f32, y: f32, w: f32, h: f32, terrain: Terrain) -> Self {
        Self {
            rect: Rect::new(x, y, w, h),
            terrain,
        }
    }
}

/// Difficulty tag used to filter the catalog at match setup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

/// A single hole
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    pub id: u32,
    #[serde(default)]
    pub difficulty: Difficulty,
    pub start: Vec2,
    pub hole: Vec2,
    #[serde(default)]
    pub walls: Vec<Rect>,
    /// Declared order matters: the first zone containing the ball wins
    #[serde(default)]
    pub zones: Vec<Zone>,
}

impl Level {
    /// First zone (in declared order) whose interior holds `p`
    pub fn zone_at(&self, p: Vec2) -> Option<&Zone> {
        self.zones.iter().find(|z| z.rect.contains(p))
    }

    /// Terrain under `p`, grass when no zone matches
    pub fn terrain_at(&self, p: Vec2) -> Terrain {
        self.zone_at(p).map_or(Terrain::Grass, |z| z.terrain)
    }

    fn validate(&self, tuning: &Tuning) -> Result<(), LevelError> {
        let rects = self
            .walls
            .iter()
            .map(|r| ("wall", r))
            .chain(self.zones.iter().map(|z| ("zone", &z.rect)));
        for (index, (what, r)) in rects.enumerate() {
            if !(r.w > 0.0 && r.h > 0.0) {
                return Err(LevelError::DegenerateRect {
                    level: self.id,
                    what,
                    index,
                    w: r.w,
                    h: r.h,
                });
            }
        }

        for (what, p) in [("start", self.start), ("hole", self.hole)] {
            let inside = p.x >= 0.0
                && p.x <= tuning.world_width
                && p.y >= 0.0
                && p.y <= tuning.world_height;
            if !inside {
                return Err(LevelError::OutOfWorld {
                    level: self.id,
                    what,
                    x: p.x,
                    y: p.y,
                    width: tuning.world_width,
                    height: tuning.world_height,
                });
            }
        }

        // The tee must not sit on a hazard
        let terrain = self.terrain_at(self.start);
        if terrain.is_hazard() {
            return Err(LevelError::StartOnHazard {
                level: self.id,
                terrain,
                x: self.start.x,
                y: self.start.y,
            });
        }

        Ok(())
    }
}

/// Parse and validate a JSON level catalog (an array of levels)
pub fn load_catalog(json: &str, tuning: &Tuning) -> Result<Vec<Level>, LevelError> {
    let levels: Vec<Level> = serde_json::from_str(json)?;
    if levels.is_empty() {
        return Err(LevelError::EmptyCatalog);
    }

    let mut seen = Vec::with_capacity(levels.len());
    for level in &levels {
        if seen.contains(&level.id) {
            return Err(LevelError::DuplicateId(level.id));
        }
        seen.push(level.id);
        level.validate(tuning)?;
    }

    log::info!("Loaded {} levels", levels.len());
    Ok(levels)
}

/// Order in which the selected courses are played
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CourseOrder {
    /// Catalog order
    #[default]
    Catalog,
    /// Deterministic shuffle from a seed
    Shuffled { seed: u64 },
}

/// Build the level queue for a match.
///
/// Filters by difficulty (falling back to the whole catalog when nothing
/// matches), applies the course order, then keeps the first `count` levels.
pub fn select_levels(
    catalog: &[Level],
    difficulty: Option<Difficulty>,
    order: CourseOrder,
    count: usize,
) -> Vec<Level> {
    let mut queue: Vec<Level> = match difficulty {
        Some(d) => catalog.iter().filter(|l| l.difficulty == d).cloned().collect(),
        None => catalog.to_vec(),
    };
    if queue.is_empty() {
        if let Some(d) = difficulty {
            log::warn!("No {:?} levels in catalog, using all levels", d);
        }
        queue = catalog.to_vec();
    }

    if let CourseOrder::Shuffled { seed } = order {
        let mut rng = Pcg32::seed_from_u64(seed);
        queue.shuffle(&mut rng);
    }

    queue.truncate(count);
    queue
}

/// Built-in five-course catalog
pub fn default_catalog() -> Vec<Level> {
    vec![
        // Introduction: one wall across the fairway
        Level {
            id: 1,
            difficulty: Difficulty::Easy,
            start: Vec2::new(300.0, 800.0),
            hole: Vec2::new(300.0, 150.0),
            walls: vec![Rect::new(100.0, 400.0, 400.0, 30.0)],
            zones: vec![],
        },
        // Ice and sand
        Level {
            id: 2,
            difficulty: Difficulty::Medium,
            start: Vec2::new(100.0, 800.0),
            hole: Vec2::new(500.0, 100.0),
            walls: vec![Rect::new(290.0, 300.0, 20.0, 300.0)],
            zones: vec![
                Zone::new(0.0, 300.0, 600.0, 300.0, Terrain::Ice),
                Zone::new(400.0, 50.0, 200.0, 200.0, Terrain::Sand),
            ],
        },
        // Sticky sand trap
        Level {
            id: 3,
            difficulty: Difficulty::Medium,
            start: Vec2::new(300.0, 850.0),
            hole: Vec2::new(300.0, 100.0),
            walls: vec![],
            zones: vec![Zone::new(100.0, 300.0, 400.0, 300.0, Terrain::StickySand)],
        },
        // Lake on the left
        Level {
            id: 4,
            difficulty: Difficulty::Hard,
            start: Vec2::new(100.0, 800.0),
            hole: Vec2::new(500.0, 200.0),
            walls: vec![Rect::new(250.0, 400.0, 350.0, 30.0)],
            zones: vec![Zone::new(0.0, 0.0, 200.0, 600.0, Terrain::Water)],
        },
        // Oil slicks between walls
        Level {
            id: 5,
            difficulty: Difficulty::Hard,
            start: Vec2::new(300.0, 850.0),
            hole: Vec2::new(300.0, 100.0),
            walls: vec![
                Rect::new(150.0, 600.0, 300.0, 30.0),
                Rect::new(150.0, 300.0, 300.0, 30.0),
            ],
            zones: vec![
                Zone::new(0.0, 450.0, 600.0, 100.0, Terrain::Oil),
                Zone::new(0.0, 150.0, 600.0, 100.0, Terrain::Oil),
            ],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_is_valid() {
        let tuning = Tuning::default();
        let catalog = default_catalog();
        assert_eq!(catalog.len(), 5);
        for level in &catalog {
            level.validate(&tuning).unwrap();
        }
    }

    #[test]
    fn test_first_zone_wins() {
        let level = Level {
            id: 1,
            difficulty: Difficulty::Easy,
            start: Vec2::new(10.0, 10.0),
            hole: Vec2::new(500.0, 500.0),
            walls: vec![],
            zones: vec![
                Zone::new(0.0, 0.0, 200.0, 200.0, Terrain::Sand),
                Zone::new(100.0, 100.0, 200.0, 200.0, Terrain::Water),
            ],
        };
        assert_eq!(level.terrain_at(Vec2::new(150.0, 150.0)), Terrain::Sand);
        assert_eq!(level.terrain_at(Vec2::new(250.0, 250.0)), Terrain::Water);
        assert_eq!(level.terrain_at(Vec2::new(400.0, 400.0)), Terrain::Grass);
        // Edges are not inside
        assert_eq!(level.terrain_at(Vec2::new(0.0, 50.0)), Terrain::Grass);
    }

    #[test]
    fn test_closest_point() {
        let r = Rect::new(100.0, 100.0, 50.0, 20.0);
        assert_eq!(r.closest_point(Vec2::new(0.0, 0.0)), Vec2::new(100.0, 100.0));
        assert_eq!(r.closest_point(Vec2::new(120.0, 300.0)), Vec2::new(120.0, 120.0));
        assert_eq!(r.closest_point(Vec2::new(120.0, 110.0)), Vec2::new(120.0, 110.0));
    }

    #[test]
    fn test_load_catalog_json() {
        let json = r#"[
            { "id": 7, "difficulty": "hard", "start": [100, 800], "hole": [300, 150],
              "walls": [{ "x": 100, "y": 400, "w": 400, "h": 30 }],
              "zones": [{ "x": 0, "y": 0, "w": 600, "h": 100, "type": "pink_sand" }] },
            { "id": 8, "start": [50, 50], "hole": [550, 850] }
        ]"#;
        let levels = load_catalog(json, &Tuning::default()).unwrap();
        assert_eq!(levels.len(), 2);
        assert_eq!(levels[0].difficulty, Difficulty::Hard);
        assert_eq!(levels[0].zones[0].terrain, Terrain::StickySand);
        assert_eq!(levels[1].difficulty, Difficulty::Medium);
        assert!(levels[1].walls.is_empty());
    }

    #[test]
    fn test_load_catalog_rejects_bad_data() {
        let tuning = Tuning::default();
        assert!(matches!(
            load_catalog("[]", &tuning),
            Err(LevelError::EmptyCatalog)
        ));
        assert!(matches!(
            load_catalog(r#"[{ "id": 1, "start": [0, 0], "hole": [700, 10] }]"#, &tuning),
            Err(LevelError::OutOfWorld { what: "hole", .. })
        ));
        assert!(matches!(
            load_catalog(
                r#"[{ "id": 1, "start": [0, 0], "hole": [10, 10],
                      "walls": [{ "x": 0, "y": 0, "w": 0, "h": 5 }] }]"#,
                &tuning
            ),
            Err(LevelError::DegenerateRect { what: "wall", .. })
        ));
        assert!(matches!(
            load_catalog(
                r#"[{ "id": 1, "start": [0, 0], "hole": [10, 10] },
                    { "id": 1, "start": [0, 0], "hole": [10, 10] }]"#,
                &tuning
            ),
            Err(LevelError::DuplicateId(1))
        ));
    }

    #[test]
    fn test_load_catalog_rejects_start_in_hazard() {
        let tuning = Tuning::default();
        let json = r#"[{ "id": 3, "start": [100, 100], "hole": [500, 800],
                         "zones": [{ "x": 0, "y": 0, "w": 200, "h": 200, "type": "water" }] }]"#;
        assert!(matches!(
            load_catalog(json, &tuning),
            Err(LevelError::StartOnHazard {
                level: 3,
                terrain: Terrain::Water,
                ..
            })
        ));

        // Only the first zone counts: sand over oil is a legal tee
        let json = r#"[{ "id": 4, "start": [100, 100], "hole": [500, 800],
                         "zones": [{ "x": 0, "y": 0, "w": 200, "h": 200, "type": "sand" },
                                   { "x": 0, "y": 0, "w": 200, "h": 200, "type": "oil" }] }]"#;
        assert!(load_catalog(json, &tuning).is_ok());
    }

    #[test]
    fn test_select_levels_by_difficulty() {
        let catalog = default_catalog();
        let hard = select_levels(&catalog, Some(Difficulty::Hard), CourseOrder::Catalog, 10);
        assert_eq!(hard.iter().map(|l| l.id).collect::<Vec<_>>(), vec![4, 5]);

        let first_three = select_levels(&catalog, None, CourseOrder::Catalog, 3);
        assert_eq!(first_three.iter().map(|l| l.id).collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn test_select_levels_falls_back_when_nothing_matches() {
        let catalog: Vec<Level> = default_catalog()
            .into_iter()
            .filter(|l| l.difficulty != Difficulty::Easy)
            .collect();
        let queue = select_levels(&catalog, Some(Difficulty::Easy), CourseOrder::Catalog, 2);
        assert_eq!(queue.iter().map(|l| l.id).collect::<Vec<_>>(), vec![2, 3]);
    }

    #[test]
    fn test_shuffle_is_deterministic() {
        let catalog = default_catalog();
        let order = CourseOrder::Shuffled { seed: 42 };
        let a = select_levels(&catalog, None, order, 5);
        let b = select_levels(&catalog, None, order, 5);
        assert_eq!(a, b);

        let mut ids: Vec<u32> = a.iter().map(|l| l.id).collect();
        ids.sort_unstable();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }
}
