//! Drag-to-aim input translation
//!
//! The host maps pointer/touch events to game-space points and feeds them
//! here. Pulling back from the press point aims the opposite way, like a
//! slingshot. The drag is clamped to a maximum distance, and power is that
//! distance as a percentage of the maximum.

use glam::Vec2;

use crate::consts::MAX_DRAG_DISTANCE;
use crate::sim::{GamePhase, MatchState, Shot};
use crate::tuning::Tuning;

/// Tracks one drag gesture from press to release
#[derive(Debug, Clone)]
pub struct DragTracker {
    start: Option<Vec2>,
    vector: Vec2,
    power: f32,
    max_distance: f32,
}

impl DragTracker {
    /// Falls back to the default drag limit when `tuning` does not validate
    pub fn new(tuning: &Tuning) -> Self {
        let max_distance = match tuning.validate() {
            Ok(()) => tuning.max_drag_distance,
            Err(e) => {
                log::warn!("Invalid tuning for aiming ({}), using default drag limit", e);
                MAX_DRAG_DISTANCE
            }
        };
        Self {
            start: None,
            vector: Vec2::ZERO,
            power: 0.0,
            max_distance,
        }
    }

    /// Begin a drag. Ignored unless the match is waiting for a shot.
    pub fn press(&mut self, point: Vec2, state: &MatchState) -> bool {
        if state.phase != GamePhase::Aiming || state.ball.moving {
            return false;
        }
        self.start = Some(point);
        self.vector = Vec2::ZERO;
        self.power = 0.0;
        true
    }

    /// Update the aim from the current pointer position
    pub fn drag(&mut self, point: Vec2) {
        let Some(start) = self.start else {
            return;
        };
        self.vector = (start - point).clamp_length_max(self.max_distance);
        self.power = self.vector.length() / self.max_distance * 100.0;
    }

    /// End the drag, yielding the shot to hand to the simulation.
    ///
    /// Tiny drags are still returned; the simulation discards them without a
    /// stroke.
    pub fn release(&mut self) -> Option<Shot> {
        self.start.take()?;
        let shot = Shot {
            vector: self.vector,
            power: self.power,
        };
        self.vector = Vec2::ZERO;
        self.power = 0.0;
        Some(shot)
    }

    /// Abandon the drag without shooting (pointer left, match ended)
    pub fn cancel(&mut self) {
        self.start = None;
        self.vector = Vec2::ZERO;
        self.power = 0.0;
    }

    pub fn is_dragging(&self) -> bool {
        self.start.is_some()
    }

    /// Current aim vector (for the aim arrow)
    pub fn vector(&self) -> Vec2 {
        self.vector
    }

    /// Current power in percent
    pub fn power(&self) -> f32 {
        self.power
    }
}
