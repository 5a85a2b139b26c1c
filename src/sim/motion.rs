//! Player motion: forward ramp, steering, lateral clamp
//!
//! Integrates once per tick against fixed per-tick constants.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::input::SteeringInput;
use crate::consts::BOARD_BASE_TILT;
use crate::finite_or;
use crate::tuning::Tuning;

/// The board (and rider) pose and forward speed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerState {
    pub position: Vec3,
    /// Rotation about X; `BOARD_BASE_TILT` keeps the board flat on the water
    pub pitch: f32,
    /// Rotation about Z (lateral lean)
    pub roll: f32,
    /// Units per tick along -Z
    pub forward_speed: f32,
    /// Ticks spent accelerating since rest
    pub ramp_ticks: u32,
}

impl PlayerState {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            position: Vec3::ZERO,
            pitch: BOARD_BASE_TILT,
            roll: 0.0,
            forward_speed: tuning.forward_start_speed,
            ramp_ticks: 0,
        }
    }

    /// Advance one tick
    pub fn integrate(&mut self, steering: SteeringInput, tuning: &Tuning) {
        let target_x = finite_or(steering.target_x, 0.0);
        let target_y = finite_or(steering.target_y, 0.0);

        // Speed is derived from the tick count so the cap lands on an exact tick
        let ramp_len = tuning.ramp_ticks();
        self.ramp_ticks = self.ramp_ticks.saturating_add(1).min(ramp_len);
        let next = if self.ramp_ticks >= ramp_len {
            tuning.forward_max_speed
        } else {
            (tuning.forward_start_speed + tuning.forward_acceleration * self.ramp_ticks as f32)
                .min(tuning.forward_max_speed)
        };
        self.forward_speed = self.forward_speed.max(next);

        self.roll = -target_x * tuning.roll_gain;
        self.pitch = BOARD_BASE_TILT - target_y * tuning.pitch_gain;

        let bound = tuning.lateral_bound;
        self.position.x = (self.position.x + target_x * tuning.lateral_gain).clamp(-bound, bound);

        self.position.z -= self.forward_speed;

        debug_assert!(self.position.is_finite(), "player position went non-finite");
    }
}

/// Cosmetic rider lean derived from board roll
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RiderPose {
    pub torso_roll: f32,
    /// Applied to both legs about X
    pub knee_bend: f32,
    /// Applied to both arms about Y
    pub arm_counter: f32,
}

impl RiderPose {
    const MAX_LEAN: f32 = 0.4;

    pub fn from_roll(roll: f32) -> Self {
        let lean = finite_or(roll, 0.0).clamp(-Self::MAX_LEAN, Self::MAX_LEAN);
        Self {
            torso_roll: lean * 0.3,
            knee_bend: lean.abs() * 0.15,
            arm_counter: -lean * 0.5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn steer(x: f32, y: f32) -> SteeringInput {
        SteeringInput {
            target_x: x,
            target_y: y,
        }
    }

    #[test]
    fn test_speed_reaches_cap_after_900_ticks() {
        let tuning = Tuning::default();
        let mut player = PlayerState::new(&tuning);
        for _ in 0..899 {
            player.integrate(SteeringInput::default(), &tuning);
        }
        assert!(player.forward_speed < tuning.forward_max_speed);
        player.integrate(SteeringInput::default(), &tuning);
        assert_eq!(player.forward_speed, tuning.forward_max_speed);

        for _ in 0..100 {
            player.integrate(SteeringInput::default(), &tuning);
        }
        assert_eq!(player.forward_speed, tuning.forward_max_speed);
    }

    #[test]
    fn test_forward_is_negative_z() {
        let tuning = Tuning::default();
        let mut player = PlayerState::new(&tuning);
        player.integrate(SteeringInput::default(), &tuning);
        assert!(player.position.z < 0.0);
        assert!((player.position.z + 0.0602).abs() < 1e-6);
    }

    #[test]
    fn test_roll_and_pitch_follow_targets() {
        let tuning = Tuning::default();
        let mut player = PlayerState::new(&tuning);
        player.integrate(steer(1.0, 2.0), &tuning);
        assert!((player.roll + 0.2).abs() < 1e-6);
        assert!((player.pitch - (BOARD_BASE_TILT - 0.2)).abs() < 1e-6);
        assert!((player.position.x - 0.05).abs() < 1e-6);
    }

    #[test]
    fn test_hard_right_saturates_at_bound() {
        let tuning = Tuning::default();
        let mut player = PlayerState::new(&tuning);
        for _ in 0..500 {
            player.integrate(steer(50.0, 0.0), &tuning);
            assert!(player.position.x <= 20.0);
        }
        assert_eq!(player.position.x, 20.0);
    }

    #[test]
    fn test_non_finite_steering_is_ignored() {
        let tuning = Tuning::default();
        let mut player = PlayerState::new(&tuning);
        player.integrate(steer(f32::NAN, f32::INFINITY), &tuning);
        assert_eq!(player.position.x, 0.0);
        assert_eq!(player.pitch, BOARD_BASE_TILT);
    }

    #[test]
    fn test_rider_pose_clamps_lean() {
        let pose = RiderPose::from_roll(-2.0);
        assert!((pose.torso_roll + 0.12).abs() < 1e-6);
        assert!((pose.knee_bend - 0.06).abs() < 1e-6);
        assert!((pose.arm_counter - 0.2).abs() < 1e-6);
        assert_eq!(RiderPose::from_roll(0.0), RiderPose::default());
    }

    proptest! {
        #[test]
        fn prop_lateral_clamp_and_monotonic_speed(
            inputs in prop::collection::vec((-1000.0f32..1000.0, -1000.0f32..1000.0), 1..400)
        ) {
            let tuning = Tuning::default();
            let mut player = PlayerState::new(&tuning);
            let mut last_speed = player.forward_speed;
            for (x, y) in inputs {
                player.integrate(steer(x, y), &tuning);
                prop_assert!(player.position.x >= -20.0 && player.position.x <= 20.0);
                prop_assert!(player.forward_speed >= last_speed);
                prop_assert!(player.forward_speed <= tuning.forward_max_speed);
                last_speed = player.forward_speed;
            }
        }
    }
}
