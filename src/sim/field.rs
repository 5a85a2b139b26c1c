//! Obstacle pool
//!
//! A fixed-size pool simulates an endless rock field: rocks that fall behind
//! the player are moved far ahead instead of being freed. A destroyed rock is
//! replaced in the same call, so the population never dips.

use glam::Vec3;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Surface description for a rock, chosen when the rock is created
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RockMaterial {
    /// 0xRRGGBB
    pub color: u32,
    pub roughness: f32,
    pub metalness: f32,
    pub env_map_intensity: f32,
}

impl RockMaterial {
    /// Near-white bluish, slightly metallic
    pub const SHINY: Self = Self {
        color: 0xE6EEF7,
        roughness: 0.25,
        metalness: 0.5,
        env_map_intensity: 0.8,
    };
}

impl Default for RockMaterial {
    fn default() -> Self {
        Self::SHINY
    }
}

/// A rock on the water
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub position: Vec3,
    /// Fixed for the lifetime of the id
    pub radius: f32,
    pub material: RockMaterial,
}

/// Owns every live obstacle
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ObstacleField {
    obstacles: Vec<Obstacle>,
    next_id: u32,
}

impl ObstacleField {
    /// Fill the pool with `count` rocks scattered ahead of `player_z`
    pub fn initialize(&mut self, count: usize, player_z: f32, tuning: &Tuning, rng: &mut Pcg32) {
        self.obstacles.clear();
        self.obstacles.reserve(count);
        for _ in 0..count {
            let id = self.allocate_id();
            let radius = rng.random_range(tuning.obstacle_min_radius..tuning.obstacle_max_radius);
            let position = random_ahead(
                player_z,
                tuning.initial_near,
                tuning.initial_depth,
                tuning.spawn_half_width,
                rng,
            );
            self.obstacles.push(Obstacle {
                id,
                position,
                radius,
                material: RockMaterial::SHINY,
            });
        }
        log::debug!("Obstacle field initialized with {count} rocks");
    }

    /// Move every rock trailing the player by more than the margin far ahead.
    /// Returns how many were moved.
    pub fn recycle(&mut self, player_z: f32, tuning: &Tuning, rng: &mut Pcg32) -> usize {
        let limit = player_z + tuning.trailing_margin;
        let mut moved = 0;
        for obstacle in &mut self.obstacles {
            if obstacle.position.z > limit {
                obstacle.position = random_ahead(
                    player_z,
                    tuning.recycle_near,
                    tuning.recycle_depth,
                    tuning.spawn_half_width,
                    rng,
                );
                moved += 1;
            }
        }
        moved
    }

    /// Destroy the rock with `id` and refill its slot with a fresh rock far
    /// ahead. Returns the destroyed rock, or `None` if the id is not live.
    pub fn remove(
        &mut self,
        id: u32,
        player_z: f32,
        tuning: &Tuning,
        rng: &mut Pcg32,
    ) -> Option<Obstacle> {
        let slot = self.obstacles.iter().position(|o| o.id == id)?;
        let replacement = Obstacle {
            id: self.allocate_id(),
            position: random_ahead(
                player_z,
                tuning.recycle_near,
                tuning.recycle_depth,
                tuning.spawn_half_width,
                rng,
            ),
            radius: rng.random_range(tuning.obstacle_min_radius..tuning.obstacle_max_radius),
            material: RockMaterial::SHINY,
        };
        Some(std::mem::replace(&mut self.obstacles[slot], replacement))
    }

    /// Add a rock at an exact spot (scripted layouts and tests)
    pub fn place(&mut self, position: Vec3, radius: f32) -> u32 {
        let id = self.allocate_id();
        self.obstacles.push(Obstacle {
            id,
            position,
            radius,
            material: RockMaterial::SHINY,
        });
        id
    }

    /// Live rocks in slot order
    pub fn iter(&self) -> impl Iterator<Item = &Obstacle> {
        self.obstacles.iter()
    }

    pub fn as_slice(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    pub fn contains(&self, id: u32) -> bool {
        self.obstacles.iter().any(|o| o.id == id)
    }

    fn allocate_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        id
    }
}

/// Random spot across the full width, `near..near + depth` ahead (-Z) of `player_z`
fn random_ahead(player_z: f32, near: f32, depth: f32, half_width: f32, rng: &mut Pcg32) -> Vec3 {
    let x = rng.random_range(-half_width..half_width);
    let z = player_z - (near + rng.random::<f32>() * depth);
    Vec3::new(x, 0.0, z)
}
