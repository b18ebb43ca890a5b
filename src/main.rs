//! Minigolf entry point
//!
//! Native headless demo: plays a full match with scripted shots through the
//! same fixed-timestep loop a renderer would drive, then prints the
//! scoreboard as JSON.
//!
//! Usage: `minigolf [levels.json]`

use minigolf::consts::*;
use minigolf::sim::{
    GameEvent, GamePhase, Level, MatchSetup, MatchState, TickInput, default_catalog, load_catalog,
    tick,
};
use minigolf::{DragTracker, Scoreboard, Tuning};

/// Give up on a match after this many frames (about half an hour)
const MAX_FRAMES: u32 = 60 * 60 * 30;

/// Headless game instance
struct Game {
    state: MatchState,
    aim: DragTracker,
    accumulator: f32,
    input: TickInput,
}

impl Game {
    fn new(state: MatchState) -> Self {
        let aim = DragTracker::new(&state.tuning);
        Self {
            state,
            aim,
            accumulator: 0.0,
            input: TickInput::default(),
        }
    }

    /// Run simulation ticks
    fn update(&mut self, dt: f32) {
        let dt = dt.min(0.1);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let input = self.input.clone();
            tick(&mut self.state, &input);
            self.accumulator -= SIM_DT;
            substeps += 1;

            // Clear one-shot inputs after processing
            self.input.shot = None;
        }

        for event in self.state.drain_events() {
            report(&self.state, &event);
        }
    }

    /// Scripted player: pull back directly away from the hole, hard enough
    /// to roll about the remaining distance on grass
    fn play_turn(&mut self) {
        if self.state.phase != GamePhase::Aiming || self.input.shot.is_some() {
            return;
        }
        let Some(level) = self.state.current_level() else {
            return;
        };

        let ball = self.state.ball.pos;
        let to_hole = level.hole - ball;
        let tuning = &self.state.tuning;
        let glide = tuning.friction.grass / (1.0 - tuning.friction.grass);
        let speed = to_hole.length() / glide + tuning.stop_velocity;
        let drag = to_hole.normalize_or_zero() * (speed / tuning.power_multiplier);

        if self.aim.press(ball, &self.state) {
            self.aim.drag(ball - drag);
            self.input.shot = self.aim.release();
        }
    }
}

fn report(state: &MatchState, event: &GameEvent) {
    let name = |i: usize| state.players.get(i).map_or("?", |p| p.name.as_str());
    match event {
        GameEvent::Splash { player_index } => log::info!("{}: splash!", name(*player_index)),
        GameEvent::Slide { player_index } => log::info!("{}: slid on oil!", name(*player_index)),
        GameEvent::HoleCompleted {
            player_index,
            strokes,
        } => log::info!("{}: in the hole ({} strokes)", name(*player_index), strokes),
        _ => log::debug!("{:?}", event),
    }
}

fn load_levels(tuning: &Tuning) -> Result<Vec<Level>, Box<dyn std::error::Error>> {
    match std::env::args().nth(1) {
        Some(path) => {
            let json = std::fs::read_to_string(&path)?;
            Ok(load_catalog(&json, tuning)?)
        }
        None => Ok(default_catalog()),
    }
}

fn main() {
    env_logger::init();
    log::info!("Minigolf (native demo) starting...");

    let tuning = Tuning::default();
    let catalog = match load_levels(&tuning) {
        Ok(catalog) => catalog,
        Err(e) => {
            log::error!("Could not load levels: {}", e);
            std::process::exit(1);
        }
    };

    let setup = MatchSetup {
        player_count: 2,
        level_count: catalog.len(),
        ..Default::default()
    };
    let mut game = Game::new(MatchState::new(&setup, &catalog, tuning));

    let mut frames = 0;
    while !game.state.is_complete() && frames < MAX_FRAMES {
        game.play_turn();
        game.update(SIM_DT);
        frames += 1;
    }
    if !game.state.is_complete() {
        log::warn!("Match did not finish after {} frames", frames);
    }

    match Scoreboard::from_match(&game.state).to_json() {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Could not render scoreboard: {}", e),
    }
}
