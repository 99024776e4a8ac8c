//! Match-level state and the events handed to the presentation layer

use serde::{Deserialize, Serialize};

use super::agent::MovementState;
use super::ball::BallType;
use super::field::Side;
use super::pickup::PickupKind;
use super::timer::Countdown;

/// Current phase of the match
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MatchPhase {
    /// Active gameplay
    Playing,
    /// Winner declared, victory banner up until the countdown runs out
    Finished { return_in: Countdown },
    /// Menu requested, nothing left to simulate
    Closed,
}

/// Screens the scene loader can switch to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Scene {
    Menu,
}

/// Life totals and the result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchState {
    pub life_left: i32,
    pub life_right: i32,
    pub winner: Option<Side>,
    pub phase: MatchPhase,
}

impl MatchState {
    pub fn new(starting_life: i32) -> Self {
        Self {
            life_left: starting_life,
            life_right: starting_life,
            winner: None,
            phase: MatchPhase::Playing,
        }
    }

    pub fn life(&self, side: Side) -> i32 {
        match side {
            Side::Left => self.life_left,
            Side::Right => self.life_right,
        }
    }

    pub fn life_mut(&mut self, side: Side) -> &mut i32 {
        match side {
            Side::Left => &mut self.life_left,
            Side::Right => &mut self.life_right,
        }
    }

    /// Once a winner exists the match no longer accepts goals
    pub fn is_terminal(&self) -> bool {
        self.winner.is_some()
    }
}

/// Something the HUD, scene loader, animator or audio may care about
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Life text for both sides
    HudLives { left: String, right: String },
    /// A goal was scored against `conceded`
    Goal { conceded: Side, damage: i32, ball_type: BallType },
    /// Victory banner
    Victory { winner: Side, message: String },
    /// Switch to another scene
    LoadScene(Scene),
    /// Leave the application
    Quit,
    /// A contestant's animation signal changed
    AnimationState { side: Side, state: MovementState },
    PickupSpawned { kind: PickupKind },
    PickupCollected { kind: PickupKind, by: Side },
    BallTypeChanged(BallType),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state() {
        let state = MatchState::new(3);
        assert_eq!(state.life(Side::Left), 3);
        assert_eq!(state.life(Side::Right), 3);
        assert!(!state.is_terminal());
        assert_eq!(state.phase, MatchPhase::Playing);
    }

    #[test]
    fn test_life_mut() {
        let mut state = MatchState::new(3);
        *state.life_mut(Side::Right) -= 2;
        assert_eq!(state.life_right, 1);
        assert_eq!(state.life_left, 3);
    }
}
