//! Audio reaction bridge
//!
//! The simulation never touches audio directly. It emits `HitCue` events
//! (already cooldown-filtered) and the frame driver forwards them to an
//! `AudioReaction` implementation. Until the player's first gesture unlocks
//! audio there is no implementation at all and cues are simply dropped.

pub mod pattern;
#[cfg(target_arch = "wasm32")]
pub mod web;

#[cfg(target_arch = "wasm32")]
pub use web::WebAudio;

/// Starting gain of the soundtrack bus
pub const MUSIC_BASE_GAIN: f32 = 0.4;
/// Soundtrack gain while ducked under a hit
pub const DUCK_GAIN: f32 = 0.1;
/// Seconds to reach the ducked gain
pub const DUCK_ATTACK: f64 = 0.03;
/// Soundtrack gain after the duck recovers
pub const RESTORE_GAIN: f32 = 0.6;
/// Seconds from the hit until the gain is fully restored
pub const DUCK_RELEASE: f64 = 0.3;
/// Length of the hit cue (seconds)
pub const HIT_CUE_LENGTH: f64 = 0.2;

/// Operations the game needs from whatever plays sound
pub trait AudioReaction {
    /// Begin the looping soundtrack
    fn start_ambient_loop(&mut self);

    /// Low blip for a destroyed rock
    fn trigger_hit(&mut self);

    /// Dip the soundtrack and bring it back over roughly a third of a second
    fn duck_and_restore_gain(&mut self);

    /// Keep scheduled music ahead of the playhead. Called once per frame.
    fn pump(&mut self) {}

    /// Apply new volume preferences
    fn set_volumes(&mut self, _music: f32, _sfx: f32) {}
}

/// Gain of the soundtrack bus `t` seconds after a duck starts (relative to the
/// gain `from` at the moment of the hit). Linear ramps, matching what the web
/// backend schedules.
pub fn duck_envelope(from: f32, t: f64) -> f32 {
    if t <= 0.0 {
        from
    } else if t < DUCK_ATTACK {
        lerp(from, DUCK_GAIN, (t / DUCK_ATTACK) as f32)
    } else if t < DUCK_RELEASE {
        lerp(
            DUCK_GAIN,
            RESTORE_GAIN,
            ((t - DUCK_ATTACK) / (DUCK_RELEASE - DUCK_ATTACK)) as f32,
        )
    } else {
        RESTORE_GAIN
    }
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t.clamp(0.0, 1.0)
}
