//! Camera rig and scenery that follows the player
//!
//! Everything here is a pure function of the player pose (plus the water
//! shader clock), recomputed every tick with no smoothing.

use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

use super::motion::PlayerState;
use crate::consts::*;
use crate::tuning::Tuning;

/// Where the camera sits and what it looks at
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraPose {
    pub eye: Vec3,
    pub target: Vec3,
}

impl Default for CameraPose {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, CAMERA_HEIGHT, CAMERA_TRAIL),
            target: Vec3::ZERO,
        }
    }
}

impl CameraPose {
    /// Direct follow: above and behind the board, looking at it
    pub fn follow(player: &PlayerState, tuning: &Tuning) -> Self {
        let p = player.position;
        Self {
            eye: Vec3::new(p.x, tuning.camera_height, p.z + tuning.camera_trail),
            target: p,
        }
    }

    /// Right-handed view matrix (Y up)
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, Vec3::Y)
    }
}

/// Set dressing that tracks the player so the ocean looks endless
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scenery {
    /// Island parked on the horizon ahead
    pub island: Vec3,
    /// Water plane centred under the board
    pub water: Vec3,
    /// Sky dome centred on the camera so stars stay distant
    pub sky: Vec3,
    /// Water shader clock (seconds)
    pub water_time: f32,
}

impl Default for Scenery {
    fn default() -> Self {
        Self {
            island: Vec3::new(0.0, ISLAND_HEIGHT, -ISLAND_DISTANCE),
            water: Vec3::new(0.0, WATER_HEIGHT, 0.0),
            sky: CameraPose::default().eye,
            water_time: 0.0,
        }
    }
}

impl Scenery {
    pub fn follow(&mut self, player: &PlayerState, camera: &CameraPose) {
        let p = player.position;
        self.water_time += WATER_TIME_STEP;
        self.island = Vec3::new(0.0, ISLAND_HEIGHT, p.z - ISLAND_DISTANCE);
        self.water = Vec3::new(p.x, WATER_HEIGHT, p.z);
        self.sky = camera.eye;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camera_follows_directly() {
        let tuning = Tuning::default();
        let mut player = PlayerState::new(&tuning);
        player.position = Vec3::new(3.0, 0.0, -40.0);

        let camera = CameraPose::follow(&player, &tuning);
        assert_eq!(camera.eye, Vec3::new(3.0, 5.0, -30.0));
        assert_eq!(camera.target, player.position);
    }

    #[test]
    fn test_view_matrix_centres_target() {
        let camera = CameraPose {
            eye: Vec3::new(0.0, 5.0, 10.0),
            target: Vec3::ZERO,
        };
        let in_view = camera.view_matrix().transform_point3(camera.target);
        assert!(in_view.x.abs() < 1e-5);
        assert!(in_view.y.abs() < 1e-5);
        // Right-handed: visible points sit on -Z in view space
        assert!(in_view.z < 0.0);
    }

    #[test]
    fn test_scenery_tracks_player() {
        let tuning = Tuning::default();
        let mut player = PlayerState::new(&tuning);
        player.position = Vec3::new(-2.0, 0.0, -100.0);
        let camera = CameraPose::follow(&player, &tuning);

        let mut scenery = Scenery::default();
        scenery.follow(&player, &camera);
        scenery.follow(&player, &camera);

        assert_eq!(scenery.island, Vec3::new(0.0, -0.35, -320.0));
        assert_eq!(scenery.water, Vec3::new(-2.0, -0.5, -100.0));
        assert_eq!(scenery.sky, camera.eye);
        assert!((scenery.water_time - 0.032).abs() < 1e-6);
    }
}
