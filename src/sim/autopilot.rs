//! Demo steering: chase the nearest rock that can still be reached
//!
//! Produces raw pointer samples, so the autopilot drives the same input path
//! as a player's mouse.

use glam::Vec2;

use super::state::GameState;

/// How far ahead the autopilot looks for rocks
const LOOKAHEAD: f32 = 300.0;
/// Sideways distance the board can cover per unit travelled forward (conservative)
const REACH_SLOPE: f32 = 0.6;
/// Raw sample per unit of lateral error
const STEER_GAIN: f32 = 2.0;
/// Largest raw sample the autopilot emits
const MAX_RAW: f32 = 8.0;

/// Raw steering sample for this tick
pub fn steer(state: &GameState) -> Vec2 {
    let player = state.player.position;

    let target = state
        .field
        .iter()
        .filter_map(|o| {
            let ahead = player.z - o.position.z;
            let dx = o.position.x - player.x;
            let reachable = ahead > 0.0 && ahead <= LOOKAHEAD && dx.abs() <= ahead * REACH_SLOPE + 1.0;
            reachable.then_some((ahead, dx))
        })
        .min_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));

    match target {
        Some((_, dx)) => Vec2::new((dx * STEER_GAIN).clamp(-MAX_RAW, MAX_RAW), 0.0),
        // Nothing in reach: drift back toward the middle of the lane
        None => Vec2::new((-player.x * STEER_GAIN).clamp(-MAX_RAW, MAX_RAW), 0.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;
    use glam::Vec3;

    #[test]
    fn test_steers_toward_rock_ahead() {
        let mut state = GameState::empty(1, Tuning::default());
        state.field.place(Vec3::new(3.0, 0.0, -40.0), 0.5);
        assert!(steer(&state).x > 0.0);

        let mut state = GameState::empty(1, Tuning::default());
        state.field.place(Vec3::new(-3.0, 0.0, -40.0), 0.5);
        assert!(steer(&state).x < 0.0);
    }

    #[test]
    fn test_ignores_rocks_behind() {
        let mut state = GameState::empty(1, Tuning::default());
        state.player.position.x = 5.0;
        state.field.place(Vec3::new(15.0, 0.0, 10.0), 0.5);
        // Only a rock behind: recentre instead
        assert!(steer(&state).x < 0.0);
    }

    #[test]
    fn test_prefers_nearest_reachable() {
        let mut state = GameState::empty(1, Tuning::default());
        // Too far sideways for its distance
        state.field.place(Vec3::new(-20.0, 0.0, -5.0), 0.5);
        state.field.place(Vec3::new(2.0, 0.0, -30.0), 0.5);
        assert!(steer(&state).x > 0.0);
    }
}
