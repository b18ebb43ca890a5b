//! Fixed timestep simulation tick
//!
//! One tick per rendered frame. Velocities are in units per tick, so the
//! integrator has no `dt`.

use glam::Vec2;

use super::collision::{
    ball_in_hole, ball_rect_collision, clamp_to_world, reflect_axis, world_bounds_collision,
};
use super::state::{GameEvent, GamePhase, MatchState, ScheduledTransition};
use super::surface::{Hazard, SurfaceEffect};

/// A released drag: direction/length in game space plus power percent (0-100)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shot {
    pub vector: Vec2,
    pub power: f32,
}

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Released aim, if the pointer was let go since the last tick
    pub shot: Option<Shot>,
}

/// Advance the match by one tick
pub fn tick(state: &mut MatchState, input: &TickInput) {
    if state.phase == GamePhase::MatchComplete {
        return;
    }

    state.time_ticks += 1;

    match state.phase {
        GamePhase::Aiming => {
            if let Some(shot) = input.shot {
                launch(state, shot);
            }
        }
        GamePhase::InFlight => step_ball(state),
        GamePhase::HoleTransition => fire_due_transition(state),
        GamePhase::MatchComplete => {}
    }
}

/// Strike the ball for the active player.
///
/// Only accepted while aiming; a shot at or below the minimum power is a
/// phantom drag and is discarded without a stroke. Returns whether the ball
/// was launched.
pub fn launch(state: &mut MatchState, shot: Shot) -> bool {
    if state.phase != GamePhase::Aiming || state.ball.moving || state.current_level().is_none() {
        log::debug!("Ignoring shot in {:?}", state.phase);
        return false;
    }
    if shot.power <= state.tuning.min_shot_power {
        log::debug!("Discarding phantom drag ({:.1}%)", shot.power);
        return false;
    }

    let mut vel = shot.vector * state.tuning.power_multiplier;
    if let Some(max_speed) = state.tuning.max_launch_speed {
        vel = vel.clamp_length_max(max_speed);
    }

    state.ball.launch(vel);
    state.add_stroke();
    state.phase = GamePhase::InFlight;
    true
}

/// Advance a moving ball by one tick.
///
/// Hazards end the step immediately. Otherwise the surface friction is
/// applied, the ball moves, bounces off world edges and walls, and if it came
/// to rest the hole/turn resolution runs exactly once.
///
/// Rest is detected before the collision pass but resolved after it: the hole
/// check and `last_stable_pos` use the position after world and wall
/// push-out.
pub fn step_ball(state: &mut MatchState) {
    if !state.ball.moving {
        return;
    }
    let Some(level) = state.current_level() else {
        return;
    };
    let start = level.start;
    let effect = level.terrain_at(state.ball.pos).effect(&state.tuning.friction);

    let friction = match effect {
        SurfaceEffect::Hazard(hazard) => {
            apply_hazard(state, hazard, start);
            return;
        }
        SurfaceEffect::Friction(c) => c,
    };

    if integrate(state, friction) {
        // Coming to rest on a hazard counts as entering it
        let resting_on = state
            .current_level()
            .map(|l| l.terrain_at(state.ball.pos).effect(&state.tuning.friction));
        if let Some(SurfaceEffect::Hazard(hazard)) = resting_on {
            apply_hazard(state, hazard, start);
            return;
        }

        state.ball.settle();
        resolve_rest(state);
    }
}

/// Move the ball and resolve collisions. Returns true if it came to rest.
fn integrate(state: &mut MatchState, friction: f32) -> bool {
    let MatchState {
        tuning,
        levels_queue,
        current_level_index,
        ball,
        ..
    } = state;
    let Some(level) = levels_queue.get(*current_level_index) else {
        return false;
    };

    ball.vel *= friction;
    ball.pos += ball.vel;

    let at_rest = ball.vel.x.abs() < tuning.stop_velocity && ball.vel.y.abs() < tuning.stop_velocity;
    if at_rest {
        ball.vel = Vec2::ZERO;
    }

    let world = Vec2::new(tuning.world_width, tuning.world_height);
    world_bounds_collision(&mut ball.pos, &mut ball.vel, ball.radius, world);

    // Sequential, in declared order
    for wall in &level.walls {
        let hit = ball_rect_collision(ball.pos, ball.radius, wall, world);
        if hit.hit {
            ball.vel = reflect_axis(ball.vel, hit.axis, tuning.wall_restitution);
            ball.pos = hit.resolved_pos;
        }
    }
    // Bounces never exceed the launch cap
    if let Some(max_speed) = tuning.max_launch_speed {
        ball.vel = ball.vel.clamp_length_max(max_speed);
    }

    // A wall hugging the world edge can push the ball past it
    ball.pos = clamp_to_world(ball.pos, ball.radius, world);

    at_rest
}

fn apply_hazard(state: &mut MatchState, hazard: Hazard, level_start: Vec2) {
    let player_index = state.current_player_index;
    match hazard {
        Hazard::Water => {
            let anchor = state.ball.last_stable_pos;
            state.ball.reset(anchor);
            log::debug!("Splash! Back to ({:.0}, {:.0})", anchor.x, anchor.y);
            state.events.push(GameEvent::Splash { player_index });
        }
        Hazard::Oil => {
            state.ball.reset(level_start);
            log::debug!("Slide! Back to the start");
            state.events.push(GameEvent::Slide { player_index });
        }
    }
    state.add_stroke();
    state.phase = GamePhase::Aiming;
}

/// Ball just came to rest: hole it or pass the turn
fn resolve_rest(state: &mut MatchState) {
    let Some(hole) = state.current_level().map(|l| l.hole) else {
        return;
    };

    if ball_in_hole(state.ball.pos, hole, state.tuning.hole_capture_radius) {
        complete_hole(state);
    } else {
        next_turn(state);
    }
}

fn next_turn(state: &mut MatchState) {
    let count = state.players.len();
    if count == 0 {
        return;
    }
    state.current_player_index = (state.current_player_index + 1) % count;
    state.phase = GamePhase::Aiming;

    if let Some(player) = state.active_player() {
        log::debug!("{}'s turn", player.name);
    }
    state.events.push(GameEvent::TurnChanged {
        player_index: state.current_player_index,
    });
}

fn complete_hole(state: &mut MatchState) {
    let player_index = state.current_player_index;
    let Some(player) = state.players.get_mut(player_index) else {
        return;
    };
    player.total_strokes += player.strokes;
    let strokes = player.strokes;
    log::info!(
        "{} holed out in {} (total {})",
        player.name,
        strokes,
        player.total_strokes
    );
    state.events.push(GameEvent::HoleCompleted {
        player_index,
        strokes,
    });

    // Everyone has had the hole once the index wraps
    state.current_player_index += 1;
    if state.current_player_index >= state.players.len() {
        state.current_player_index = 0;
        state.current_level_index += 1;
    }

    state.phase = GamePhase::HoleTransition;
    schedule_transition(state);
}

/// Schedule the hole transition a full delay from now, against the current
/// level and player
fn schedule_transition(state: &mut MatchState) {
    state.epoch += 1;
    state.pending = Some(ScheduledTransition {
        fire_at_tick: state.time_ticks + u64::from(state.tuning.hole_transition_ticks),
        level_index: state.current_level_index,
        player_index: state.current_player_index,
        epoch: state.epoch,
    });
}

/// Fire the pending hole transition once it is due and still valid.
///
/// A missing or stale schedule is replaced by a fresh one for the current
/// state, so the level only resets after a full delay that was validated.
fn fire_due_transition(state: &mut MatchState) {
    let Some(pending) = state.pending else {
        log::warn!("Hole transition without a schedule, rescheduling");
        schedule_transition(state);
        return;
    };
    if state.time_ticks < pending.fire_at_tick {
        return;
    }
    state.pending = None;

    let still_valid = pending.epoch == state.epoch
        && pending.level_index == state.current_level_index
        && pending.player_index == state.current_player_index;
    if !still_valid {
        log::warn!("Stale hole transition {:?}, rescheduling", pending);
        schedule_transition(state);
        return;
    }

    resume_after_hole(state);
}

fn resume_after_hole(state: &mut MatchState) {
    if state.current_level_index >= state.levels_queue.len() {
        state.complete_match();
    } else {
        state.start_level();
    }
}
