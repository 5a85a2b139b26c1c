//! Player vs rock collision on the water plane
//!
//! Distances are measured in XZ only; rocks sit on the surface so height
//! never separates them from the board.

use glam::{Vec2, Vec3};

use super::field::Obstacle;

/// Result of a collision scan
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionResult {
    /// Id of the rock that was hit
    pub obstacle_id: u32,
    /// Rock centre at the moment of impact
    pub point: Vec3,
    /// How far the volumes overlap
    pub penetration: f32,
}

/// Planar distance between two points, ignoring height
#[inline]
pub fn planar_distance(a: Vec3, b: Vec3) -> f32 {
    Vec2::new(a.x - b.x, a.z - b.z).length()
}

/// Check a single rock against the player anchor
pub fn player_obstacle_collision(
    player_pos: Vec3,
    player_radius: f32,
    obstacle: &Obstacle,
) -> Option<CollisionResult> {
    let distance = planar_distance(player_pos, obstacle.position);
    let reach = player_radius + obstacle.radius;
    (distance < reach).then(|| CollisionResult {
        obstacle_id: obstacle.id,
        point: obstacle.position,
        penetration: reach - distance,
    })
}

/// Scan rocks in slot order and stop at the first hit.
///
/// At most one rock is reported per tick; when several overlap at once the
/// earliest slot wins and the others get their chance on later ticks.
pub fn find_first_hit<'a>(
    player_pos: Vec3,
    player_radius: f32,
    obstacles: impl IntoIterator<Item = &'a Obstacle>,
) -> Option<CollisionResult> {
    obstacles
        .into_iter()
        .find_map(|o| player_obstacle_collision(player_pos, player_radius, o))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::field::RockMaterial;

    fn rock(id: u32, x: f32, z: f32, radius: f32) -> Obstacle {
        Obstacle {
            id,
            position: Vec3::new(x, 0.0, z),
            radius,
            material: RockMaterial::SHINY,
        }
    }

    #[test]
    fn test_planar_distance_ignores_height() {
        let d = planar_distance(Vec3::new(0.0, 10.0, 0.0), Vec3::new(3.0, -4.0, 4.0));
        assert!((d - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_hit_inside_radius_sum() {
        let r = rock(3, 0.0, -1.1, 0.5);
        let hit = player_obstacle_collision(Vec3::ZERO, 0.7, &r).unwrap();
        assert_eq!(hit.obstacle_id, 3);
        assert!((hit.penetration - 0.1).abs() < 1e-5);
    }

    #[test]
    fn test_touching_is_not_a_hit() {
        // Strict inequality: exactly touching does not count
        let r = rock(1, 1.5, 0.0, 0.5);
        assert!(player_obstacle_collision(Vec3::ZERO, 1.0, &r).is_none());
    }

    #[test]
    fn test_first_hit_in_slot_order_wins() {
        let rocks = [
            rock(1, 10.0, 0.0, 0.5),
            rock(2, 0.5, 0.0, 0.5),
            rock(3, 0.0, 0.0, 0.5),
        ];
        let hit = find_first_hit(Vec3::ZERO, 0.7, &rocks).unwrap();
        assert_eq!(hit.obstacle_id, 2);
    }

    #[test]
    fn test_no_hit_in_empty_field() {
        let empty: [Obstacle; 0] = [];
        assert!(find_first_hit(Vec3::ZERO, 0.7, &empty).is_none());
    }
}
