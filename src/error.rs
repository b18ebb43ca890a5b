//! Errors for data loaded from outside the simulation
//!
//! The simulation itself never fails: absent levels, empty matches and
//! out-of-phase inputs are no-ops. Only level catalogs and tuning files,
//! which come from JSON, can be rejected.

use thiserror::Error;

use crate::sim::Terrain;

/// A level catalog could not be loaded
#[derive(Error, Debug)]
pub enum LevelError {
    #[error("failed to parse level catalog: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("level catalog is empty")]
    EmptyCatalog,

    #[error("level {level}: {what} rectangle #{index} has non-positive size {w}x{h}")]
    DegenerateRect {
        level: u32,
        what: &'static str,
        index: usize,
        w: f32,
        h: f32,
    },

    #[error("level {level}: {what} ({x}, {y}) lies outside the {width}x{height} world")]
    OutOfWorld {
        level: u32,
        what: &'static str,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },

    #[error("level {level}: start ({x}, {y}) lies on {terrain:?}")]
    StartOnHazard {
        level: u32,
        terrain: Terrain,
        x: f32,
        y: f32,
    },

    #[error("duplicate level id {0}")]
    DuplicateId(u32),
}

/// Tuning values were rejected
#[derive(Error, Debug)]
pub enum TuningError {
    #[error("failed to parse tuning: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("{name} must be positive, got {value}")]
    NotPositive { name: &'static str, value: f32 },

    #[error("friction for {name} must lie in (0, 1), got {value}")]
    FrictionOutOfRange { name: &'static str, value: f32 },

    #[error("hole capture radius {capture} must exceed ball radius {ball}")]
    CaptureTooSmall { capture: f32, ball: f32 },
}
