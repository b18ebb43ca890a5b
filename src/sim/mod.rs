//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (one tick per frame)
//! - Stable iteration order (declared order for zones and walls)
//! - No rendering or platform dependencies
//! - Delayed transitions are scheduled on the tick counter, never on timers

pub mod collision;
pub mod level;
pub mod state;
pub mod surface;
pub mod tick;

pub use collision::{Axis, CollisionResult, ball_in_hole, ball_rect_collision};
pub use level::{
    CourseOrder, Difficulty, Level, Rect, Zone, default_catalog, load_catalog, select_levels,
};
pub use state::{
    Ball, GameEvent, GamePhase, MatchSetup, MatchState, PLAYER_COLORS, Player, ScheduledTransition,
};
pub use surface::{FrictionTable, Hazard, SurfaceEffect, Terrain};
pub use tick::{Shot, TickInput, launch, step_ball, tick};
