//! Match state and core simulation types
//!
//! A `MatchState` is built fresh for every match and is the single mutable
//! source of truth for the ball, turns and scores.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::level::{CourseOrder, Difficulty, Level, select_levels};
use crate::tuning::Tuning;

/// Current phase of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Ball at rest, active player may drag to aim
    Aiming,
    /// Ball moving, the integrator owns it
    InFlight,
    /// Timed pause after a holed ball
    HoleTransition,
    /// All levels played
    MatchComplete,
}

/// Player colors (RGB), cycled when there are more players than colors
pub const PLAYER_COLORS: [u32; 6] = [0xff3d00, 0x2979ff, 0x00e676, 0xffc400, 0xd500f9, 0x00b0ff];

/// A local player
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// 1-based ordinal
    pub id: u32,
    pub name: String,
    /// Strokes on the current hole
    pub strokes: u32,
    /// Strokes banked from completed holes
    pub total_strokes: u32,
    pub color: u32,
}

impl Player {
    pub fn new(id: u32) -> Self {
        let index = id.saturating_sub(1) as usize;
        Self {
            id,
            name: format!("Player {}", id),
            strokes: 0,
            total_strokes: 0,
            color: PLAYER_COLORS[index % PLAYER_COLORS.len()],
        }
    }
}

/// The shared ball
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub moving: bool,
    /// Where the ball last came to rest (water respawn anchor)
    pub last_stable_pos: Vec2,
}

impl Ball {
    pub fn new(radius: f32) -> Self {
        Self {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            radius,
            moving: false,
            last_stable_pos: Vec2::ZERO,
        }
    }

    /// Snap to `pos` at rest
    pub fn reset(&mut self, pos: Vec2) {
        self.pos = pos;
        self.vel = Vec2::ZERO;
        self.moving = false;
        self.last_stable_pos = pos;
    }

    /// Set off with `vel`. Callers must not launch a moving ball.
    pub fn launch(&mut self, vel: Vec2) {
        self.vel = vel;
        self.moving = true;
    }

    /// Stop in place, recording the stable position
    pub fn settle(&mut self) {
        self.vel = Vec2::ZERO;
        self.moving = false;
        self.last_stable_pos = self.pos;
    }
}

/// Notifications for the host (HUD messages, sounds)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A level (re)started for the given player
    LevelStarted { level_index: usize, level_id: u32 },
    /// The turn passed to another player
    TurnChanged { player_index: usize },
    /// A stroke was counted (shot or penalty)
    Stroke { player_index: usize, strokes: u32 },
    /// Ball fell in water, back to its last stable position
    Splash { player_index: usize },
    /// Ball slid on oil, back to the level start
    Slide { player_index: usize },
    /// Ball came to rest in the hole
    HoleCompleted { player_index: usize, strokes: u32 },
    MatchComplete,
}

/// Deferred hole transition, fired by `tick` once due.
///
/// Carries the indices it was scheduled against plus the match epoch; if any
/// of them changed by the time it fires, it is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledTransition {
    pub fire_at_tick: u64,
    pub level_index: usize,
    pub player_index: usize,
    pub epoch: u64,
}

/// Setup choices for a new match
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchSetup {
    pub player_count: usize,
    pub level_count: usize,
    /// Only play levels with this tag (falls back to all levels)
    pub difficulty: Option<Difficulty>,
    pub order: CourseOrder,
}

impl Default for MatchSetup {
    fn default() -> Self {
        Self {
            player_count: 1,
            level_count: 5,
            difficulty: None,
            order: CourseOrder::Catalog,
        }
    }
}

/// Complete match state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchState {
    pub tuning: Tuning,
    pub players: Vec<Player>,
    pub levels_queue: Vec<Level>,
    pub current_level_index: usize,
    pub current_player_index: usize,
    pub phase: GamePhase,
    pub ball: Ball,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Pending hole transition
    pub pending: Option<ScheduledTransition>,
    /// Bumped on every phase-changing transition; stale schedules compare against it
    pub epoch: u64,
    /// Events since the host last drained them
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl MatchState {
    /// Build a match from setup choices and a level catalog
    pub fn new(setup: &MatchSetup, catalog: &[Level], tuning: Tuning) -> Self {
        let levels = select_levels(catalog, setup.difficulty, setup.order, setup.level_count);
        let players = (1..=setup.player_count as u32).map(Player::new).collect();
        Self::with_levels(players, levels, tuning)
    }

    /// Build a match from an explicit roster and level queue.
    ///
    /// Tuning that fails validation is replaced by the defaults.
    pub fn with_levels(players: Vec<Player>, levels_queue: Vec<Level>, tuning: Tuning) -> Self {
        let tuning = tuning.or_default();
        let ball = Ball::new(tuning.ball_radius);
        let mut state = Self {
            tuning,
            players,
            levels_queue,
            current_level_index: 0,
            current_player_index: 0,
            phase: GamePhase::Aiming,
            ball,
            time_ticks: 0,
            pending: None,
            epoch: 0,
            events: Vec::new(),
        };

        if state.players.is_empty() || state.levels_queue.is_empty() {
            log::warn!(
                "Degenerate match ({} players, {} levels), completing immediately",
                state.players.len(),
                state.levels_queue.len()
            );
            state.current_level_index = state.levels_queue.len();
            state.complete_match();
        } else {
            log::info!(
                "Match started: {} players, {} levels",
                state.players.len(),
                state.levels_queue.len()
            );
            state.start_level();
        }

        state
    }

    /// Level being played, `None` once the queue is exhausted
    pub fn current_level(&self) -> Option<&Level> {
        self.levels_queue.get(self.current_level_index)
    }

    /// Player whose turn it is
    pub fn active_player(&self) -> Option<&Player> {
        self.players.get(self.current_player_index)
    }

    pub fn is_complete(&self) -> bool {
        self.phase == GamePhase::MatchComplete
    }

    /// Take all events emitted since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Players sorted by total strokes, lowest first (stable on roster order)
    pub fn standings(&self) -> Vec<&Player> {
        let mut ranked: Vec<&Player> = self.players.iter().collect();
        ranked.sort_by_key(|p| p.total_strokes);
        ranked
    }

    /// Put the ball on the current level's start and clear per-hole strokes
    pub(crate) fn start_level(&mut self) {
        let Some(level) = self.current_level() else {
            return;
        };
        let (start, level_id) = (level.start, level.id);

        self.ball.reset(start);
        for player in &mut self.players {
            player.strokes = 0;
        }
        self.phase = GamePhase::Aiming;
        self.epoch += 1;

        log::info!(
            "Level {} (id {}) for {}",
            self.current_level_index + 1,
            level_id,
            self.active_player().map_or("nobody", |p| p.name.as_str())
        );
        self.events.push(GameEvent::LevelStarted {
            level_index: self.current_level_index,
            level_id,
        });
        self.events.push(GameEvent::TurnChanged {
            player_index: self.current_player_index,
        });
    }

    pub(crate) fn complete_match(&mut self) {
        self.phase = GamePhase::MatchComplete;
        self.pending = None;
        self.epoch += 1;
        log::info!("Match complete");
        self.events.push(GameEvent::MatchComplete);
    }

    /// Add a stroke (shot or penalty) to the active player
    pub(crate) fn add_stroke(&mut self) {
        let player_index = self.current_player_index;
        if let Some(player) = self.players.get_mut(player_index) {
            player.strokes += 1;
            log::debug!("{} stroke {}", player.name, player.strokes);
            self.events.push(GameEvent::Stroke {
                player_index,
                strokes: player.strokes,
            });
        }
    }
}
