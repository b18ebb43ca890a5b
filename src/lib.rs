//! Minigolf - turn-based mini-golf physics and match engine
//!
//! Core modules:
//! - `sim`: Deterministic simulation (ball physics, terrain, turns, levels)
//! - `aim`: Drag-to-aim input translation into shots
//! - `scoreboard`: Final ranked results
//! - `tuning`: Data-driven physics and pacing constants
//! - `error`: Errors for loading levels and tuning data
//!
//! Rendering, viewport scaling and menus live in the host; the host calls
//! [`sim::tick`] once per frame and reads [`sim::MatchState`] for display.

pub mod aim;
pub mod error;
pub mod scoreboard;
pub mod sim;
pub mod tuning;

pub use aim::DragTracker;
pub use error::{LevelError, TuningError};
pub use scoreboard::Scoreboard;
pub use tuning::Tuning;

/// Game configuration constants
///
/// Distances and speeds are in virtual game-space units; speeds are per tick.
pub mod consts {
    /// Simulation ticks per second (one tick per rendered frame)
    pub const TICK_RATE: u32 = 60;
    /// Fixed simulation timestep
    pub const SIM_DT: f32 = 1.0 / TICK_RATE as f32;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Virtual world dimensions (portrait)
    pub const WORLD_WIDTH: f32 = 600.0;
    pub const WORLD_HEIGHT: f32 = 900.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 18.0;
    /// Velocity per unit of drag vector
    pub const POWER_MULTIPLIER: f32 = 0.08;
    /// Launch speed cap (full drag × multiplier)
    pub const MAX_LAUNCH_SPEED: f32 = MAX_DRAG_DISTANCE * POWER_MULTIPLIER;
    /// Per-axis speed below which the ball is at rest
    pub const STOP_VELOCITY: f32 = 0.15;
    /// Speed multiplier applied to the reflected axis on wall hits
    pub const WALL_RESTITUTION: f32 = 1.1;

    /// Hole capture radius (must exceed ball radius)
    pub const HOLE_CAPTURE_RADIUS: f32 = 25.0;

    /// Aiming: drag distance mapped to 100% power
    pub const MAX_DRAG_DISTANCE: f32 = 250.0;
    /// Aiming: releases at or below this power (percent) are discarded
    pub const MIN_SHOT_POWER: f32 = 2.0;

    /// Pause after a holed ball before the next turn or level (1.5 s)
    pub const HOLE_TRANSITION_TICKS: u32 = 90;

    /// Fraction of velocity kept per tick on each surface
    pub const FRICTION_GRASS: f32 = 0.975;
    pub const FRICTION_ICE: f32 = 0.992;
    pub const FRICTION_SAND: f32 = 0.94;
    pub const FRICTION_STICKY_SAND: f32 = 0.88;
}
