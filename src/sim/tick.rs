//! Fixed timestep simulation tick
//!
//! One call advances the run by one frame. Step order is part of the
//! contract: steering, motion, collision, explosion decay, recycling, then
//! camera and scenery.

use glam::Vec2;

use super::autopilot;
use super::camera::CameraPose;
use super::collision::find_first_hit;
use super::motion::RiderPose;
use super::score::ScoreOutcome;
use super::state::{GameEvent, GamePhase, GameState};

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Latest raw pointer sample (centred, scaled); `None` holds the last one
    pub pointer: Option<Vec2>,
    /// Idle/demo mode - autopilot steers
    pub idle_mode: bool,
}

/// Advance the game state by one tick.
///
/// Once the run has ended nothing is updated; the host keeps rendering the
/// final frame.
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.events.clear();

    if state.phase == GamePhase::Ended {
        return;
    }

    if input.idle_mode {
        let raw = autopilot::steer(state);
        state.steering.sample(raw);
    } else if let Some(raw) = input.pointer {
        state.steering.sample(raw);
    }

    let pool_size = state.field.len();
    state.time_ticks += 1;

    // Steering and motion
    let steering = state
        .steering
        .update(state.tuning.steer_gain_x, state.tuning.steer_gain_y);
    state.player.integrate(steering, &state.tuning);
    state.rider = RiderPose::from_roll(state.player.roll);

    // Collision must see this tick's motion and run before recycling
    resolve_collision(state);

    state.explosions.update(&state.tuning);

    let player_z = state.player.position.z;
    state
        .field
        .recycle(player_z, &state.tuning, &mut state.rng);

    state.camera = CameraPose::follow(&state.player, &state.tuning);
    state.scenery.follow(&state.player, &state.camera);

    debug_assert_eq!(state.field.len(), pool_size, "obstacle pool size drifted");
}

/// Process at most one hit this tick
fn resolve_collision(state: &mut GameState) {
    let player_pos = state.player.position;
    let Some(hit) = find_first_hit(player_pos, state.tuning.player_radius, state.field.iter())
    else {
        return;
    };

    let Some(rock) = state
        .field
        .remove(hit.obstacle_id, player_pos.z, &state.tuning, &mut state.rng)
    else {
        return;
    };

    state
        .explosions
        .trigger(rock.position, rock.material.color, &state.tuning, &mut state.rng);
    state.events.push(GameEvent::ObstacleDestroyed {
        id: rock.id,
        position: rock.position,
    });

    // Cooldown only gates the cue; scoring and effects always happen
    let now = state.time_secs();
    if now >= state.audio_cooldown_until {
        state.audio_cooldown_until = now + state.tuning.audio_cooldown_secs;
        state.events.push(GameEvent::HitCue);
    }

    let threshold = state.score.win_threshold;
    match state.score.on_obstacle_destroyed() {
        ScoreOutcome::Scored(score) => {
            state.events.push(GameEvent::ScoreChanged { score, threshold });
        }
        ScoreOutcome::Won(score) => {
            state.events.push(GameEvent::ScoreChanged { score, threshold });
            state.events.push(GameEvent::Won { score });
            state.phase = GamePhase::Ended;
            log::info!(
                "Run won with {score} rocks after {} ticks ({:.1}s)",
                state.time_ticks,
                state.time_secs()
            );
        }
    }
}
