//! Data-driven game balance
//!
//! Every number the simulation integrates against lives here. Defaults match
//! the shipped game; a JSON document may override any subset of fields.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Balance values read by the simulation each tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Motion ===
    pub forward_start_speed: f32,
    pub forward_max_speed: f32,
    pub forward_acceleration: f32,
    pub lateral_bound: f32,
    pub lateral_gain: f32,
    pub roll_gain: f32,
    pub pitch_gain: f32,
    pub steer_gain_x: f32,
    pub steer_gain_y: f32,

    // === Obstacles ===
    pub num_obstacles: usize,
    pub spawn_half_width: f32,
    pub obstacle_min_radius: f32,
    pub obstacle_max_radius: f32,
    pub initial_near: f32,
    pub initial_depth: f32,
    pub recycle_near: f32,
    pub recycle_depth: f32,
    pub trailing_margin: f32,

    // === Collision ===
    pub player_radius: f32,

    // === Explosions ===
    pub burst_particles: usize,
    pub burst_life: f32,
    pub burst_step: f32,
    pub particle_gravity: f32,
    pub particle_shrink: f32,
    /// Horizontal launch speed range is `-spread..spread` on X and Z
    pub particle_spread: f32,
    pub particle_min_lift: f32,
    pub particle_max_lift: f32,
    pub particle_min_size: f32,
    pub particle_max_size: f32,
    /// Spin per tick about X and Y
    pub particle_spin_x: f32,
    pub particle_spin_y: f32,
    /// Shards start this far above the destroyed rock
    pub burst_lift: f32,

    // === Scoring / audio ===
    pub win_score: u32,
    pub audio_cooldown_secs: f64,

    // === Camera ===
    pub camera_height: f32,
    pub camera_trail: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            forward_start_speed: FORWARD_START_SPEED,
            forward_max_speed: FORWARD_MAX_SPEED,
            forward_acceleration: FORWARD_ACCELERATION,
            lateral_bound: LATERAL_BOUND,
            lateral_gain: LATERAL_GAIN,
            roll_gain: ROLL_GAIN,
            pitch_gain: PITCH_GAIN,
            steer_gain_x: STEER_GAIN_X,
            steer_gain_y: STEER_GAIN_Y,

            num_obstacles: NUM_OBSTACLES,
            spawn_half_width: OBSTACLE_SPAWN_HALF_WIDTH,
            obstacle_min_radius: OBSTACLE_MIN_RADIUS,
            obstacle_max_radius: OBSTACLE_MAX_RADIUS,
            initial_near: OBSTACLE_INITIAL_NEAR,
            initial_depth: OBSTACLE_INITIAL_DEPTH,
            recycle_near: OBSTACLE_RECYCLE_NEAR,
            recycle_depth: OBSTACLE_RECYCLE_DEPTH,
            trailing_margin: OBSTACLE_TRAILING_MARGIN,

            player_radius: PLAYER_RADIUS,

            burst_particles: BURST_PARTICLES,
            burst_life: BURST_LIFE,
            burst_step: BURST_STEP,
            particle_gravity: PARTICLE_GRAVITY,
            particle_shrink: PARTICLE_SHRINK,
            particle_spread: PARTICLE_SPREAD,
            particle_min_lift: PARTICLE_MIN_LIFT,
            particle_max_lift: PARTICLE_MAX_LIFT,
            particle_min_size: PARTICLE_MIN_SIZE,
            particle_max_size: PARTICLE_MAX_SIZE,
            particle_spin_x: PARTICLE_SPIN_X,
            particle_spin_y: PARTICLE_SPIN_Y,
            burst_lift: BURST_LIFT,

            win_score: WIN_SCORE,
            audio_cooldown_secs: AUDIO_COOLDOWN_SECS,

            camera_height: CAMERA_HEIGHT,
            camera_trail: CAMERA_TRAIL,
        }
    }
}

/// Why a tuning document was rejected
#[derive(Debug)]
pub enum TuningError {
    /// The document is not valid JSON for `Tuning`
    Parse(serde_json::Error),
    /// A field holds a value the simulation cannot run with
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "tuning parse error: {err}"),
            Self::Invalid { field, reason } => write!(f, "invalid tuning `{field}`: {reason}"),
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            Self::Invalid { .. } => None,
        }
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err)
    }
}

impl Tuning {
    /// Parse and validate a JSON tuning document (missing fields use defaults)
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Check that every value keeps the simulation well-formed
    pub fn validate(&self) -> Result<(), TuningError> {
        fn invalid(field: &'static str, reason: &'static str) -> Result<(), TuningError> {
            Err(TuningError::Invalid { field, reason })
        }

        let finite = [
            ("forward_start_speed", self.forward_start_speed),
            ("forward_max_speed", self.forward_max_speed),
            ("forward_acceleration", self.forward_acceleration),
            ("lateral_bound", self.lateral_bound),
            ("lateral_gain", self.lateral_gain),
            ("roll_gain", self.roll_gain),
            ("pitch_gain", self.pitch_gain),
            ("steer_gain_x", self.steer_gain_x),
            ("steer_gain_y", self.steer_gain_y),
            ("spawn_half_width", self.spawn_half_width),
            ("obstacle_min_radius", self.obstacle_min_radius),
            ("obstacle_max_radius", self.obstacle_max_radius),
            ("initial_near", self.initial_near),
            ("initial_depth", self.initial_depth),
            ("recycle_near", self.recycle_near),
            ("recycle_depth", self.recycle_depth),
            ("trailing_margin", self.trailing_margin),
            ("player_radius", self.player_radius),
            ("burst_life", self.burst_life),
            ("burst_step", self.burst_step),
            ("particle_gravity", self.particle_gravity),
            ("particle_shrink", self.particle_shrink),
            ("particle_spread", self.particle_spread),
            ("particle_min_lift", self.particle_min_lift),
            ("particle_max_lift", self.particle_max_lift),
            ("particle_min_size", self.particle_min_size),
            ("particle_max_size", self.particle_max_size),
            ("particle_spin_x", self.particle_spin_x),
            ("particle_spin_y", self.particle_spin_y),
            ("burst_lift", self.burst_lift),
            ("camera_height", self.camera_height),
            ("camera_trail", self.camera_trail),
        ];
        for (field, value) in finite {
            if !value.is_finite() {
                return invalid(field, "must be finite");
            }
        }

        if self.forward_start_speed < 0.0 {
            return invalid("forward_start_speed", "must not be negative");
        }
        if self.forward_max_speed < self.forward_start_speed {
            return invalid("forward_max_speed", "must be at least forward_start_speed");
        }
        if self.forward_acceleration <= 0.0 {
            return invalid("forward_acceleration", "must be positive");
        }
        if self.lateral_bound <= 0.0 {
            return invalid("lateral_bound", "must be positive");
        }
        if self.spawn_half_width <= 0.0 {
            return invalid("spawn_half_width", "must be positive");
        }
        if self.obstacle_min_radius <= 0.0 {
            return invalid("obstacle_min_radius", "must be positive");
        }
        if self.obstacle_max_radius <= self.obstacle_min_radius {
            return invalid("obstacle_max_radius", "must exceed obstacle_min_radius");
        }
        if self.initial_depth <= 0.0 {
            return invalid("initial_depth", "must be positive");
        }
        if self.recycle_depth <= 0.0 {
            return invalid("recycle_depth", "must be positive");
        }
        if self.trailing_margin < 0.0 {
            return invalid("trailing_margin", "must not be negative");
        }
        if self.player_radius <= 0.0 {
            return invalid("player_radius", "must be positive");
        }
        if self.burst_life <= 0.0 {
            return invalid("burst_life", "must be positive");
        }
        if self.burst_step <= 0.0 {
            return invalid("burst_step", "must be positive");
        }
        if !(0.0..=1.0).contains(&self.particle_shrink) {
            return invalid("particle_shrink", "must be within 0..=1");
        }
        if self.particle_spread <= 0.0 {
            return invalid("particle_spread", "must be positive");
        }
        if self.particle_max_lift <= self.particle_min_lift {
            return invalid("particle_max_lift", "must exceed particle_min_lift");
        }
        if self.particle_min_size <= 0.0 {
            return invalid("particle_min_size", "must be positive");
        }
        if self.particle_max_size <= self.particle_min_size {
            return invalid("particle_max_size", "must exceed particle_min_size");
        }
        if self.win_score == 0 {
            return invalid("win_score", "must be at least 1");
        }
        if !self.audio_cooldown_secs.is_finite() || self.audio_cooldown_secs < 0.0 {
            return invalid("audio_cooldown_secs", "must be a non-negative number");
        }
        Ok(())
    }

    /// Whole ticks for the forward speed to climb from start to cap
    pub fn ramp_ticks(&self) -> u32 {
        ((self.forward_max_speed - self.forward_start_speed) / self.forward_acceleration).round()
            as u32
    }

    /// Update steps a burst survives: `ceil(life / step)`
    pub fn burst_ticks(&self) -> u32 {
        // Tolerance absorbs f32 error in the division (0.8 / 0.016 is not exactly 50)
        (self.burst_life / self.burst_step - 1e-3).ceil().max(1.0) as u32
    }
}
