//! Render snapshot of a game state
//!
//! The crate does not draw. A host renderer takes a `RenderFrame` each frame
//! and uploads the instance buffers and transforms as-is.

use glam::{EulerRot, Mat4, Quat};

use super::instance::{RockInstance, ShardInstance, colors};
use crate::hex_to_rgba;
use crate::sim::{CameraPose, GameState, RiderPose, Scenery};

/// Everything a renderer needs for one frame
#[derive(Debug, Clone)]
pub struct RenderFrame {
    pub rocks: Vec<RockInstance>,
    pub shards: Vec<ShardInstance>,
    /// Board model matrix (rider is parented to it)
    pub board: Mat4,
    pub rider: RiderPose,
    pub camera: CameraPose,
    pub view: Mat4,
    pub scenery: Scenery,
    pub clear_color: [f32; 4],
    /// Show the win banner
    pub won: bool,
}

impl RenderFrame {
    pub fn capture(state: &GameState) -> Self {
        let mut frame = Self {
            rocks: Vec::with_capacity(state.field.len()),
            shards: Vec::with_capacity(state.explosions.particle_count()),
            board: Mat4::IDENTITY,
            rider: state.rider,
            camera: state.camera,
            view: Mat4::IDENTITY,
            scenery: state.scenery,
            clear_color: hex_to_rgba(colors::SKY),
            won: false,
        };
        frame.refresh(state);
        frame
    }

    /// Rebuild in place, reusing buffer allocations
    pub fn refresh(&mut self, state: &GameState) {
        self.rocks.clear();
        self.rocks
            .extend(state.field.iter().map(RockInstance::from_obstacle));

        self.shards.clear();
        for burst in state.explosions.bursts() {
            self.shards.extend(
                burst
                    .particles
                    .iter()
                    .map(|p| ShardInstance::from_particle(p, burst)),
            );
        }

        let player = &state.player;
        let rotation = Quat::from_euler(EulerRot::XYZ, player.pitch, 0.0, player.roll);
        self.board = Mat4::from_rotation_translation(rotation, player.position);
        self.rider = state.rider;
        self.camera = state.camera;
        self.view = state.camera.view_matrix();
        self.scenery = state.scenery;
        self.won = state.score.game_over();
    }

    /// Rock instances as a flat float buffer
    pub fn rock_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.rocks)
    }

    /// Shard instances as a flat float buffer
    pub fn shard_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.shards)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{TickInput, tick};
    use crate::tuning::Tuning;
    use glam::Vec3;

    #[test]
    fn test_capture_counts() {
        let mut state = GameState::empty(3, Tuning::default());
        state.field.place(Vec3::new(0.0, 0.0, -0.5), 0.5);
        state.field.place(Vec3::new(5.0, 0.0, -50.0), 0.75);
        tick(&mut state, &TickInput::default());

        let frame = RenderFrame::capture(&state);
        assert_eq!(frame.rocks.len(), 2);
        assert_eq!(frame.shards.len(), 40);
        assert_eq!(frame.rock_floats().len(), 2 * 12);
        assert_eq!(frame.shard_floats().len(), 40 * 12);
        assert!(!frame.won);
    }

    #[test]
    fn test_board_transform_places_board() {
        let mut state = GameState::empty(3, Tuning::default());
        state.player.position = Vec3::new(2.0, 0.0, -7.0);
        let frame = RenderFrame::capture(&state);
        let origin = frame.board.transform_point3(Vec3::ZERO);
        assert!((origin - Vec3::new(2.0, 0.0, -7.0)).length() < 1e-5);

        // Base tilt lays the board's length (local Y) along the water (-Z)
        let nose = frame.board.transform_vector3(Vec3::Y);
        assert!(nose.y.abs() < 1e-5);
        assert!((nose.z + 1.0).abs() < 1e-5);
    }
}
