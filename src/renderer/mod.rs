//! Render snapshot module
//!
//! Packs game state into GPU-ready instance buffers for an external 3D renderer.

pub mod frame;
pub mod instance;

pub use frame::RenderFrame;
pub use instance::{RockInstance, ShardInstance};
