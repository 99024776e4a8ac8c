//! Deterministic match simulation
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep for movement and collisions
//! - Seeded RNG only
//! - Stable iteration order (left side first)
//! - No rendering or platform dependencies

pub mod agent;
pub mod ball;
pub mod collision;
pub mod controller;
pub mod effects;
pub mod field;
pub mod npc;
pub mod paddle;
pub mod pickup;
pub mod state;
pub mod tick;
pub mod timer;

pub use agent::{Contestant, MovementState};
pub use ball::{Ball, BallType, GoalEvent};
pub use controller::MatchController;
pub use field::{Bounds, Field, Side};
pub use npc::{Npc, NpcMode};
pub use paddle::{Paddle, PaddleInput, SpeedState};
pub use pickup::{Pickup, PickupKind, PowerUpSpawner};
pub use state::{GameEvent, MatchPhase, MatchState, Scene};
pub use tick::{Match, MatchSnapshot, TickInput};
pub use timer::{Countdown, Repeating};
