//! Game state aggregate
//!
//! Everything the simulation mutates lives in one `GameState`, passed by
//! reference into each component's update. No globals.

use glam::Vec3;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::camera::{CameraPose, Scenery};
use super::explosion::ExplosionSystem;
use super::field::ObstacleField;
use super::input::InputSmoother;
use super::motion::{PlayerState, RiderPose};
use super::score::ScoreState;
use crate::consts::SIM_DT;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Simulation advancing every tick
    Running,
    /// Win latched; simulation frozen for good
    Ended,
}

/// Something that happened during a tick, for collaborators outside the sim
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A rock was destroyed at `position`
    ObstacleDestroyed { id: u32, position: Vec3 },
    /// New score to display
    ScoreChanged { score: u32, threshold: u32 },
    /// Play the hit cue and duck the soundtrack (already cooldown-filtered)
    HitCue,
    /// Win threshold reached
    Won { score: u32 },
}

/// Complete game state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub tuning: Tuning,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub phase: GamePhase,
    pub steering: InputSmoother,
    pub player: PlayerState,
    pub rider: RiderPose,
    pub field: ObstacleField,
    pub explosions: ExplosionSystem,
    pub score: ScoreState,
    pub camera: CameraPose,
    pub scenery: Scenery,
    /// Simulation time (seconds) before which the hit cue stays suppressed
    pub audio_cooldown_until: f64,
    /// Events from the most recent tick
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new run with default balance
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    /// Create a new run and scatter the obstacle field
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let mut state = Self::empty(seed, tuning);
        let count = state.tuning.num_obstacles;
        let player_z = state.player.position.z;
        state
            .field
            .initialize(count, player_z, &state.tuning, &mut state.rng);
        state
    }

    /// A run with no rocks (scripted layouts place their own)
    pub fn empty(seed: u64, tuning: Tuning) -> Self {
        let player = PlayerState::new(&tuning);
        let camera = CameraPose::follow(&player, &tuning);
        let score = ScoreState::new(tuning.win_score);
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            tuning,
            time_ticks: 0,
            phase: GamePhase::Running,
            steering: InputSmoother::default(),
            player,
            rider: RiderPose::default(),
            field: ObstacleField::default(),
            explosions: ExplosionSystem::default(),
            score,
            camera,
            scenery: Scenery::default(),
            audio_cooldown_until: 0.0,
            events: Vec::new(),
        }
    }

    /// Simulation clock in seconds
    pub fn time_secs(&self) -> f64 {
        self.time_ticks as f64 * SIM_DT as f64
    }

    pub fn is_ended(&self) -> bool {
        self.phase == GamePhase::Ended
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_populated() {
        let state = GameState::new(42);
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.field.len(), 80);
        assert_eq!(state.score.score, 0);
        assert_eq!(state.score.win_threshold, 100);
        assert_eq!(state.camera.eye, Vec3::new(0.0, 5.0, 10.0));
    }

    #[test]
    fn test_same_seed_same_field() {
        let a = GameState::new(1234);
        let b = GameState::new(1234);
        for (x, y) in a.field.iter().zip(b.field.iter()) {
            assert_eq!(x.position, y.position);
            assert_eq!(x.radius, y.radius);
        }
    }
}
