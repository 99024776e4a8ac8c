//! Match rules: goals cost life, ice goals slow, zero life ends the match

use serde::{Deserialize, Serialize};

use super::agent::Contestant;
use super::ball::{Ball, BallType, GoalEvent};
use super::field::{Field, Side};
use super::state::{GameEvent, MatchPhase, MatchState, Scene};
use super::timer::Countdown;
use crate::settings::RuleSettings;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchController {
    slow_effect_duration: f32,
    victory_return_delay: f32,
    victory_text: bool,
    attached: bool,
}

impl MatchController {
    pub fn new(rules: &RuleSettings) -> Self {
        Self {
            slow_effect_duration: rules.slow_effect_duration,
            victory_return_delay: rules.victory_return_delay,
            victory_text: rules.victory_text,
            attached: false,
        }
    }

    /// Start listening for the ball's goals
    pub fn attach(&mut self, ball: &mut Ball) {
        ball.subscribe();
        self.attached = true;
    }

    /// Stop listening; called on teardown
    pub fn detach(&mut self, ball: &mut Ball) {
        ball.unsubscribe();
        self.attached = false;
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Score one goal against whichever side the ball was on
    pub fn handle_goal(
        &self,
        goal: GoalEvent,
        ball: &Ball,
        field: &Field,
        contestants: &mut [Contestant; 2],
        state: &mut MatchState,
        events: &mut Vec<GameEvent>,
    ) {
        if state.is_terminal() {
            log::debug!("Goal after the match ended; ignoring");
            return;
        }

        let damage = ball.damage();
        let ball_type = ball.ball_type();
        let Some(conceded) = field.conceding_side(goal.ball_x) else {
            log::warn!(
                "Goal with the ball on the centerline (x={}); cannot tell who conceded",
                goal.ball_x
            );
            return;
        };

        *state.life_mut(conceded) -= damage;
        log::info!(
            "Player {} scores! Player {} loses {damage} life, {} left",
            conceded.opponent().player_number(),
            conceded.player_number(),
            state.life(conceded)
        );
        events.push(GameEvent::Goal {
            conceded,
            damage,
            ball_type,
        });

        if ball_type == BallType::Ice {
            let scorer = conceded.opponent();
            if let Some(contestant) = contestants.iter_mut().find(|c| c.side() == scorer) {
                contestant.apply_slow(self.slow_effect_duration);
            }
        }

        events.push(hud_lives(state));
        self.check_end(state, events);
    }

    fn check_end(&self, state: &mut MatchState, events: &mut Vec<GameEvent>) {
        let winner = if state.life_left <= 0 {
            Side::Right
        } else if state.life_right <= 0 {
            Side::Left
        } else {
            return;
        };

        state.winner = Some(winner);
        log::info!("Game over! Player {} wins!", winner.player_number());

        if self.victory_text {
            events.push(GameEvent::Victory {
                winner,
                message: victory_message(winner),
            });
            state.phase = MatchPhase::Finished {
                return_in: Countdown::started(self.victory_return_delay),
            };
        } else {
            log::warn!("No victory text configured; returning to the menu right away");
            self.close(state, events);
        }
    }

    /// Frame update: count down the victory banner
    pub fn tick(&self, dt: f32, state: &mut MatchState, events: &mut Vec<GameEvent>) {
        if let MatchPhase::Finished { mut return_in } = state.phase {
            if return_in.tick(dt) {
                self.close(state, events);
            } else {
                state.phase = MatchPhase::Finished { return_in };
            }
        }
    }

    /// Leave for the menu immediately
    pub fn request_menu(&self, state: &mut MatchState, events: &mut Vec<GameEvent>) {
        log::info!("Returning to the main menu");
        self.close(state, events);
    }

    fn close(&self, state: &mut MatchState, events: &mut Vec<GameEvent>) {
        if state.phase != MatchPhase::Closed {
            state.phase = MatchPhase::Closed;
            events.push(GameEvent::LoadScene(Scene::Menu));
        }
    }
}

/// HUD life lines for both sides
pub fn hud_lives(state: &MatchState) -> GameEvent {
    GameEvent::HudLives {
        left: format!("LIFE P1: {}", state.life_left),
        right: format!("LIFE P2: {}", state.life_right),
    }
}

pub fn victory_message(winner: Side) -> String {
    format!("PLAYER {} WINS!", winner.player_number())
}
