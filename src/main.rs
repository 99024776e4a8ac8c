//! Frostfire headless runner
//!
//! Runs a match with no window: human sides are driven by a simple
//! autopilot, HUD and scene requests are written to the log, and the final
//! match snapshot is printed as JSON.
//!
//! Usage: `frostfire [settings.json] [seed] [left] [right]`
//!
//! `left` and `right` override who drives each side (`human` or `npc`).

use frostfire::{Settings, SideControl};
use frostfire::consts::*;
use frostfire::sim::{Ball, Contestant, GameEvent, Match, PaddleInput, Side, TickInput};

/// Give up after this many simulated seconds
const MAX_MATCH_SECONDS: f32 = 600.0;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let settings_path = args.next().unwrap_or_else(|| "frostfire.json".to_string());
    let seed = match args.next().map(|s| s.parse::<u64>()) {
        Some(Ok(seed)) => seed,
        Some(Err(e)) => {
            log::warn!("Invalid seed ({e}); using 1");
            1
        }
        None => 1,
    };

    let mut settings = Settings::load(&settings_path);
    for (control, arg) in [&mut settings.left, &mut settings.right].into_iter().zip(args) {
        match SideControl::from_str(&arg) {
            Some(c) => *control = c,
            None => log::warn!("Unknown side control {arg:?}; keeping {}", control.as_str()),
        }
    }
    let mut game = Match::new(settings, seed);
    let mut pilots = [Autopilot::default(); 2];

    while !game.is_closed() && game.time < MAX_MATCH_SECONDS {
        let mut input = TickInput::default();
        for (pilot, side) in pilots.iter_mut().zip(Side::BOTH) {
            if let Contestant::Human(paddle) = game.contestant(side) {
                let paddle_input = pilot.drive(paddle.pos, side, &game.ball);
                match side {
                    Side::Left => input.left = paddle_input,
                    Side::Right => input.right = paddle_input,
                }
            }
        }

        game.step(&input, SIM_DT);

        for event in game.drain_events() {
            match event {
                GameEvent::HudLives { left, right } => log::info!("{left} | {right}"),
                GameEvent::Victory { message, .. } => log::info!("{message}"),
                GameEvent::LoadScene(scene) => log::info!("Loading scene {scene:?}"),
                GameEvent::Quit => log::info!("Quitting"),
                other => log::debug!("{other:?}"),
            }
        }
    }

    if !game.is_closed() {
        log::warn!("Match still running after {MAX_MATCH_SECONDS}s; stopping");
    }

    match serde_json::to_string_pretty(&game.snapshot()) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Could not serialize the final snapshot: {e}"),
    }
    game.teardown();
}

/// Stand-in for a player: chase the ball inside our half, swing when close
#[derive(Debug, Clone, Copy, Default)]
struct Autopilot {
    swinging: bool,
}

impl Autopilot {
    fn drive(&mut self, pos: glam::Vec2, side: Side, ball: &Ball) -> PaddleInput {
        if self.swinging {
            self.swinging = false;
            return PaddleInput {
                attack_up: true,
                ..Default::default()
            };
        }

        let to_ball = ball.pos - pos;
        if to_ball.length() < HIT_RANGE {
            self.swinging = true;
            return PaddleInput {
                attack_down: true,
                ..Default::default()
            };
        }

        // Stay a little behind the ball so swings send it toward the opponent
        let behind = ball.pos + glam::Vec2::new(side.outward_sign() * 0.5, 0.0);
        let axis = (behind - pos).signum() * glam::Vec2::new(
            f32::from((behind.x - pos.x).abs() > 0.1),
            f32::from((behind.y - pos.y).abs() > 0.1),
        );
        PaddleInput {
            axis,
            run_down: to_ball.length() > 6.0,
            run_up: to_ball.length() <= 6.0,
            ..Default::default()
        }
    }
}
