//! The match loop
//!
//! Two clocks drive a match: `update` runs once per presentation frame
//! (input, decisions, timers) and `fixed_update` runs once per fixed
//! simulation step (integration, collision, goal dispatch). `step` combines
//! them with an accumulator.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::Serialize;

use super::agent::{Contestant, MovementState};
use super::ball::{Ball, BallType};
use super::collision::{bounce_off_walls, goal_entered, paddle_contact};
use super::controller::{MatchController, hud_lives};
use super::field::{Field, Side};
use super::npc::Npc;
use super::paddle::{Paddle, PaddleInput};
use super::pickup::{Pickup, PowerUpSpawner};
use super::state::{GameEvent, MatchPhase, MatchState};
use crate::consts::*;
use crate::settings::{Settings, SideControl};

/// How far in from its wall a contestant starts
const SPAWN_DEPTH: f32 = 2.0;

/// Input commands for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub left: PaddleInput,
    pub right: PaddleInput,
    /// Return to the main menu
    pub menu: bool,
    /// Leave the game
    pub quit: bool,
}

impl TickInput {
    pub fn for_side(&self, side: Side) -> &PaddleInput {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }
}

/// Serializable view of a running match
#[derive(Debug, Serialize)]
pub struct MatchSnapshot<'a> {
    pub seed: u64,
    pub time: f32,
    pub state: &'a MatchState,
    pub ball: &'a Ball,
    pub contestants: &'a [Contestant; 2],
    pub pickup: Option<&'a Pickup>,
}

/// A complete match: owns every agent, the rules and the RNG
#[derive(Debug)]
pub struct Match {
    pub settings: Settings,
    pub field: Field,
    pub ball: Ball,
    /// Left side first
    pub contestants: [Contestant; 2],
    pub spawner: PowerUpSpawner,
    pub controller: MatchController,
    pub state: MatchState,
    /// Seconds since kickoff
    pub time: f32,
    pub seed: u64,
    rng: Pcg32,
    events: Vec<GameEvent>,
    accumulator: f32,
    last_animation: [MovementState; 2],
    last_ball_type: BallType,
}

impl Match {
    pub fn new(settings: Settings, seed: u64) -> Self {
        let settings = settings.validated();
        let field = Field::from_settings(&settings.field);
        let mut ball = Ball::new(&field, &settings.ball);
        let mut controller = MatchController::new(&settings.rules);
        controller.attach(&mut ball);

        let contestants = [
            spawn_contestant(Side::Left, settings.left, &field, &settings),
            spawn_contestant(Side::Right, settings.right, &field, &settings),
        ];
        let state = MatchState::new(settings.rules.starting_life);
        let events = vec![hud_lives(&state)];
        log::info!(
            "Match start: {} (left) vs {} (right), seed {seed}",
            settings.left.as_str(),
            settings.right.as_str()
        );

        Self {
            spawner: PowerUpSpawner::new(&settings.power_ups),
            field,
            ball,
            contestants,
            controller,
            state,
            time: 0.0,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            events,
            accumulator: 0.0,
            last_animation: [MovementState::Idle; 2],
            last_ball_type: BallType::Normal,
            settings,
        }
    }

    pub fn contestant(&self, side: Side) -> &Contestant {
        &self.contestants[side_index(side)]
    }

    /// Nothing left to simulate once the menu has been requested
    pub fn is_closed(&self) -> bool {
        self.state.phase == MatchPhase::Closed
    }

    /// Presentation frame: input and decisions for every agent, then timers
    pub fn update(&mut self, input: &TickInput, dt: f32) {
        if self.is_closed() {
            return;
        }
        if input.quit {
            log::info!("Quit requested");
            self.events.push(GameEvent::Quit);
            self.state.phase = MatchPhase::Closed;
            return;
        }
        if input.menu {
            self.controller.request_menu(&mut self.state, &mut self.events);
            return;
        }

        self.controller.tick(dt, &mut self.state, &mut self.events);

        for contestant in self.contestants.iter_mut() {
            match contestant {
                Contestant::Human(paddle) => {
                    paddle.update(input.for_side(paddle.side), &mut self.ball, dt)
                }
                Contestant::Npc(npc) => npc.update(self.time, dt, &mut self.ball),
            }
        }

        self.ball.tick_timers(dt, &mut self.rng);
        self.note_ball_type();

        if let Some(pickup) = self.spawner.tick(dt, &mut self.rng) {
            self.events.push(GameEvent::PickupSpawned { kind: pickup.kind });
        }

        for (i, contestant) in self.contestants.iter().enumerate() {
            let state = contestant.movement_state();
            if state != self.last_animation[i] {
                self.last_animation[i] = state;
                self.events.push(GameEvent::AnimationState {
                    side: contestant.side(),
                    state,
                });
            }
        }

        self.time += dt;
    }

    /// Fixed step: integrate, resolve collisions, then dispatch goals
    pub fn fixed_update(&mut self, dt: f32) {
        if self.is_closed() {
            return;
        }

        for contestant in self.contestants.iter_mut() {
            contestant.integrate(dt);
        }
        self.ball.integrate(dt);

        bounce_off_walls(&mut self.ball, &self.field);
        for contestant in &self.contestants {
            paddle_contact(&mut self.ball, contestant.pos(), contestant.vel(), contestant.radius());
        }
        for contestant in &self.contestants {
            if let Some(kind) = self.spawner.try_collect(contestant.pos(), contestant.radius(), &mut self.ball) {
                self.events.push(GameEvent::PickupCollected {
                    kind,
                    by: contestant.side(),
                });
            }
        }
        self.note_ball_type();
        if let Some(goal) = goal_entered(&self.ball, &self.field) {
            self.ball.on_goal_trigger(goal);
        }

        for goal in self.ball.drain_goals() {
            self.controller.handle_goal(
                goal,
                &self.ball,
                &self.field,
                &mut self.contestants,
                &mut self.state,
                &mut self.events,
            );
        }
    }

    /// One presentation frame plus as many fixed steps as it covers
    pub fn step(&mut self, input: &TickInput, frame_dt: f32) {
        let frame_dt = frame_dt.clamp(0.0, MAX_FRAME_DT);
        self.update(input, frame_dt);

        self.accumulator += frame_dt;
        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.fixed_update(SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
    }

    /// Events produced since the last drain, oldest first
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Stop listening to the ball before the match is dropped
    pub fn teardown(&mut self) {
        self.controller.detach(&mut self.ball);
        log::debug!("Match torn down at t={:.2}s", self.time);
    }

    pub fn snapshot(&self) -> MatchSnapshot<'_> {
        MatchSnapshot {
            seed: self.seed,
            time: self.time,
            state: &self.state,
            ball: &self.ball,
            contestants: &self.contestants,
            pickup: self.spawner.active(),
        }
    }

    fn note_ball_type(&mut self) {
        let ball_type = self.ball.ball_type();
        if ball_type != self.last_ball_type {
            self.last_ball_type = ball_type;
            self.events.push(GameEvent::BallTypeChanged(ball_type));
        }
    }
}

fn side_index(side: Side) -> usize {
    match side {
        Side::Left => 0,
        Side::Right => 1,
    }
}

fn spawn_contestant(side: Side, control: SideControl, field: &Field, settings: &Settings) -> Contestant {
    let spawn = Vec2::new(
        field.wall_x(side) - side.outward_sign() * SPAWN_DEPTH,
        (field.lower_y + field.upper_y) / 2.0,
    );
    let slow_factor = settings.rules.slow_factor;
    match control {
        SideControl::Human => Contestant::Human(Paddle::new(side, spawn, field, &settings.paddle, slow_factor)),
        SideControl::Npc => Contestant::Npc(Npc::new(side, spawn, field, &settings.npc, slow_factor)),
    }
}
