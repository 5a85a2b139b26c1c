//! Ocean Runner - An endless surfing runner over an animated ocean
//!
//! Core modules:
//! - `sim`: Deterministic simulation (motion, obstacles, collisions, effects, scoring)
//! - `renderer`: GPU-ready instance buffers for an external 3D renderer
//! - `audio`: Audio reaction bridge and the ambient soundtrack pattern
//! - `hud`: Score / win text sinks
//! - `game`: Frame driver wiring the simulation to its collaborators
//! - `tuning`: Data-driven game balance

pub mod audio;
pub mod game;
pub mod hud;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use game::Game;
pub use settings::{FramePacing, QualityPreset, Settings};
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (one display frame at 60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame the fixed-timestep accumulator will absorb (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Forward motion (units per tick, forward is -Z)
    pub const FORWARD_START_SPEED: f32 = 0.06;
    pub const FORWARD_MAX_SPEED: f32 = 0.24;
    pub const FORWARD_ACCELERATION: f32 = 0.0002;

    /// Steering gains applied to the raw pointer sample
    pub const STEER_GAIN_X: f32 = 0.5;
    pub const STEER_GAIN_Y: f32 = 0.2;
    /// Board roll / pitch per unit of steering target
    pub const ROLL_GAIN: f32 = 0.2;
    pub const PITCH_GAIN: f32 = 0.1;
    /// Lateral drift per unit of steering target per tick
    pub const LATERAL_GAIN: f32 = 0.05;
    /// Lateral movement bound (player.x stays within +/- this)
    pub const LATERAL_BOUND: f32 = 20.0;
    /// Board lies flat on the water plane
    pub const BOARD_BASE_TILT: f32 = -std::f32::consts::FRAC_PI_2;
    /// Pointer pixels per raw steering unit
    pub const POINTER_SCALE: f32 = 100.0;

    /// Obstacle field
    pub const NUM_OBSTACLES: usize = 80;
    pub const OBSTACLE_SPAWN_HALF_WIDTH: f32 = 22.0;
    pub const OBSTACLE_MIN_RADIUS: f32 = 0.5;
    pub const OBSTACLE_MAX_RADIUS: f32 = 1.0;
    /// Initial band ahead of the player: [near, near + depth)
    pub const OBSTACLE_INITIAL_NEAR: f32 = 80.0;
    pub const OBSTACLE_INITIAL_DEPTH: f32 = 1000.0;
    /// Recycle band ahead of the player: [near, near + depth)
    pub const OBSTACLE_RECYCLE_NEAR: f32 = 200.0;
    pub const OBSTACLE_RECYCLE_DEPTH: f32 = 900.0;
    /// Obstacles further than this behind the player get recycled
    pub const OBSTACLE_TRAILING_MARGIN: f32 = 60.0;

    /// Player collision radius on the water plane
    pub const PLAYER_RADIUS: f32 = 0.7;

    /// Explosion bursts
    pub const BURST_PARTICLES: usize = 40;
    pub const BURST_LIFE: f32 = 0.8;
    /// Burst clock advance per tick (seconds)
    pub const BURST_STEP: f32 = 0.016;
    pub const PARTICLE_GRAVITY: f32 = 0.005;
    pub const PARTICLE_SHRINK: f32 = 0.98;
    pub const PARTICLE_MIN_SIZE: f32 = 0.06;
    pub const PARTICLE_MAX_SIZE: f32 = 0.12;
    pub const PARTICLE_SPREAD: f32 = 0.15;
    pub const PARTICLE_MIN_LIFT: f32 = 0.05;
    pub const PARTICLE_MAX_LIFT: f32 = 0.30;
    pub const PARTICLE_SPIN_X: f32 = 0.05;
    pub const PARTICLE_SPIN_Y: f32 = 0.03;
    pub const BURST_LIFT: f32 = 0.2;

    /// Scoring
    pub const WIN_SCORE: u32 = 100;
    /// Seconds the hit cue stays suppressed after firing
    pub const AUDIO_COOLDOWN_SECS: f64 = 0.25;

    /// Camera rig
    pub const CAMERA_HEIGHT: f32 = 5.0;
    pub const CAMERA_TRAIL: f32 = 10.0;

    /// Scenery placement
    pub const ISLAND_DISTANCE: f32 = 220.0;
    pub const ISLAND_HEIGHT: f32 = -0.35;
    pub const WATER_HEIGHT: f32 = -0.5;
    /// Water shader clock advance per tick
    pub const WATER_TIME_STEP: f32 = 0.016;
}

/// Replace a non-finite value with a fallback
#[inline]
pub fn finite_or(value: f32, fallback: f32) -> f32 {
    if value.is_finite() { value } else { fallback }
}

/// Convert a 0xRRGGBB color to linear-ish RGBA floats (alpha = 1)
#[inline]
pub fn hex_to_rgba(hex: u32) -> [f32; 4] {
    let r = ((hex >> 16) & 0xff) as f32 / 255.0;
    let g = ((hex >> 8) & 0xff) as f32 / 255.0;
    let b = (hex & 0xff) as f32 / 255.0;
    [r, g, b, 1.0]
}
