//! Pointer sampling and steering targets
//!
//! The "smoothing" is a fixed scale-down of the latest raw sample, recomputed
//! every tick. Nothing is filtered over time and samples are never queued.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::POINTER_SCALE;

/// Steering targets consumed by the motion controller
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SteeringInput {
    pub target_x: f32,
    pub target_y: f32,
}

/// Holds the latest raw pointer sample and derives steering targets from it
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InputSmoother {
    raw: Vec2,
    targets: SteeringInput,
}

impl InputSmoother {
    /// Record a raw sample (last sample wins). Non-finite samples are dropped.
    pub fn sample(&mut self, raw: Vec2) {
        if raw.is_finite() {
            self.raw = raw;
        } else {
            log::debug!("Ignoring non-finite pointer sample {raw:?}");
        }
    }

    /// Recompute targets from the held sample
    pub fn update(&mut self, gain_x: f32, gain_y: f32) -> SteeringInput {
        self.targets = SteeringInput {
            target_x: self.raw.x * gain_x,
            target_y: self.raw.y * gain_y,
        };
        self.targets
    }

    /// Drop the held sample so steering goes straight until the next one
    pub fn recentre(&mut self) {
        self.raw = Vec2::ZERO;
        self.targets = SteeringInput::default();
    }

    pub fn raw(&self) -> Vec2 {
        self.raw
    }

    pub fn targets(&self) -> SteeringInput {
        self.targets
    }
}

/// Maps pointer client coordinates to raw steering samples
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerMapper {
    half_extent: Vec2,
}

impl PointerMapper {
    pub fn new(width: f32, height: f32) -> Self {
        let mut mapper = Self {
            half_extent: Vec2::ZERO,
        };
        mapper.resize(width, height);
        mapper
    }

    /// Recompute the viewport midpoint
    pub fn resize(&mut self, width: f32, height: f32) {
        self.half_extent = Vec2::new(width.max(0.0) / 2.0, height.max(0.0) / 2.0);
    }

    /// Centre on the viewport midpoint and scale to steering units
    pub fn to_raw(&self, client_x: f32, client_y: f32) -> Vec2 {
        (Vec2::new(client_x, client_y) - self.half_extent) / POINTER_SCALE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_targets_scale_raw_sample() {
        let mut smoother = InputSmoother::default();
        assert_eq!(smoother.update(0.5, 0.2), SteeringInput::default());

        smoother.sample(Vec2::new(4.0, -5.0));
        let t = smoother.update(0.5, 0.2);
        assert!((t.target_x - 2.0).abs() < 1e-6);
        assert!((t.target_y + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_absent_sample_holds_last() {
        let mut smoother = InputSmoother::default();
        smoother.sample(Vec2::new(1.0, 1.0));
        smoother.update(0.5, 0.2);
        let again = smoother.update(0.5, 0.2);
        assert!((again.target_x - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_recentre_clears_held_sample() {
        let mut smoother = InputSmoother::default();
        smoother.sample(Vec2::new(3.0, -2.0));
        smoother.update(0.5, 0.2);
        smoother.recentre();
        assert_eq!(smoother.raw(), Vec2::ZERO);
        assert_eq!(smoother.update(0.5, 0.2), SteeringInput::default());
    }

    #[test]
    fn test_non_finite_sample_ignored() {
        let mut smoother = InputSmoother::default();
        smoother.sample(Vec2::new(2.0, 0.0));
        smoother.sample(Vec2::new(f32::NAN, 1.0));
        assert_eq!(smoother.raw(), Vec2::new(2.0, 0.0));
    }

    #[test]
    fn test_pointer_mapper_centres() {
        let mut mapper = PointerMapper::new(800.0, 600.0);
        assert_eq!(mapper.to_raw(400.0, 300.0), Vec2::ZERO);
        assert_eq!(mapper.to_raw(800.0, 300.0), Vec2::new(4.0, 0.0));

        mapper.resize(1000.0, 600.0);
        assert_eq!(mapper.to_raw(400.0, 400.0), Vec2::new(-1.0, 1.0));
    }
}
