//! Per-instance data for the rock and shard draw calls

use bytemuck::{Pod, Zeroable};

use crate::hex_to_rgba;
use crate::sim::{ExplosionBurst, Obstacle, Particle};

/// One rock, drawn as an icosahedron scaled by `radius`
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct RockInstance {
    pub position: [f32; 3],
    pub radius: f32,
    pub color: [f32; 4],
    /// roughness, metalness, env map intensity, unused
    pub surface: [f32; 4],
}

impl RockInstance {
    pub fn from_obstacle(obstacle: &Obstacle) -> Self {
        let m = obstacle.material;
        Self {
            position: obstacle.position.to_array(),
            radius: obstacle.radius,
            color: hex_to_rgba(m.color),
            surface: [m.roughness, m.metalness, m.env_map_intensity, 0.0],
        }
    }
}

/// One explosion shard, drawn as a small dodecahedron
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct ShardInstance {
    pub position: [f32; 3],
    /// Base size times current scale
    pub size: f32,
    /// Spin about X and Y
    pub rotation: [f32; 2],
    pub opacity: f32,
    pub _pad: f32,
    pub color: [f32; 4],
}

impl ShardInstance {
    pub fn from_particle(particle: &Particle, burst: &ExplosionBurst) -> Self {
        let mut color = hex_to_rgba(burst.color);
        color[3] = particle.opacity;
        Self {
            position: particle.position.to_array(),
            size: particle.size * particle.scale,
            rotation: particle.rotation.to_array(),
            opacity: particle.opacity,
            _pad: 0.0,
            color,
        }
    }
}

/// Colors for scene elements
pub mod colors {
    /// Night sky / clear color
    pub const SKY: u32 = 0x02060d;
    pub const BOARD: u32 = 0xf7e26b;
}
