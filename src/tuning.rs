//! Data-driven physics and pacing constants
//!
//! Every field defaults to the matching constant in [`crate::consts`], so a
//! JSON override only needs the keys it changes.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::TuningError;
use crate::sim::surface::FrictionTable;

/// Runtime-tunable physics values, owned by each match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === World ===
    pub world_width: f32,
    pub world_height: f32,

    // === Ball ===
    pub ball_radius: f32,
    pub power_multiplier: f32,
    /// Launch speed cap; `None` leaves launches unclamped
    pub max_launch_speed: Option<f32>,
    pub stop_velocity: f32,
    pub wall_restitution: f32,

    // === Hole ===
    pub hole_capture_radius: f32,
    pub hole_transition_ticks: u32,

    // === Aiming ===
    pub max_drag_distance: f32,
    pub min_shot_power: f32,

    // === Surfaces ===
    pub friction: FrictionTable,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            world_width: WORLD_WIDTH,
            world_height: WORLD_HEIGHT,

            ball_radius: BALL_RADIUS,
            power_multiplier: POWER_MULTIPLIER,
            max_launch_speed: Some(MAX_LAUNCH_SPEED),
            stop_velocity: STOP_VELOCITY,
            wall_restitution: WALL_RESTITUTION,

            hole_capture_radius: HOLE_CAPTURE_RADIUS,
            hole_transition_ticks: HOLE_TRANSITION_TICKS,

            max_drag_distance: MAX_DRAG_DISTANCE,
            min_shot_power: MIN_SHOT_POWER,

            friction: FrictionTable::default(),
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON tuning override
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        log::info!("Loaded tuning override");
        Ok(tuning)
    }

    /// This tuning if it validates, otherwise the defaults
    pub fn or_default(self) -> Self {
        match self.validate() {
            Ok(()) => self,
            Err(e) => {
                log::warn!("Invalid tuning ({}), using defaults", e);
                Tuning::default()
            }
        }
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        let positive = [
            ("world_width", self.world_width),
            ("world_height", self.world_height),
            ("ball_radius", self.ball_radius),
            ("power_multiplier", self.power_multiplier),
            ("stop_velocity", self.stop_velocity),
            ("wall_restitution", self.wall_restitution),
            ("max_drag_distance", self.max_drag_distance),
            ("max_launch_speed", self.max_launch_speed.unwrap_or(1.0)),
        ];
        for (name, value) in positive {
            if !(value > 0.0) {
                return Err(TuningError::NotPositive { name, value });
            }
        }

        for (name, value) in self.friction.entries() {
            if !(value > 0.0 && value < 1.0) {
                return Err(TuningError::FrictionOutOfRange { name, value });
            }
        }

        // A ball resting exactly on the rim still counts
        if self.hole_capture_radius <= self.ball_radius {
            return Err(TuningError::CaptureTooSmall {
                capture: self.hole_capture_radius,
                ball: self.ball_radius,
            });
        }

        Ok(())
    }
}
