//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by pool slot)
//! - No rendering, audio, or platform dependencies

pub mod autopilot;
pub mod camera;
pub mod collision;
pub mod explosion;
pub mod field;
pub mod input;
pub mod motion;
pub mod score;
pub mod state;
pub mod tick;

pub use camera::{CameraPose, Scenery};
pub use collision::{CollisionResult, find_first_hit, planar_distance, player_obstacle_collision};
pub use explosion::{ExplosionBurst, ExplosionSystem, Particle};
pub use field::{Obstacle, ObstacleField, RockMaterial};
pub use input::{InputSmoother, PointerMapper, SteeringInput};
pub use motion::{PlayerState, RiderPose};
pub use score::{ScoreOutcome, ScoreState};
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::{TickInput, tick};
