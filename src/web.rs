//! Browser bindings
//!
//! The page owns the render loop and the 3D scene; it feeds pointer and frame
//! timing in and reads instance buffers and transforms back out each frame.

use wasm_bindgen::prelude::*;

use crate::audio::WebAudio;
use crate::consts::SIM_DT;
use crate::game::Game;
use crate::hud::DomHud;
use crate::settings::{FramePacing, QualityPreset, Settings};
use crate::tuning::Tuning;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Ocean Runner starting...");
}

/// Game handle exported to JavaScript
#[wasm_bindgen]
pub struct WebGame {
    game: Game,
    last_time: f64,
}

#[wasm_bindgen]
impl WebGame {
    /// New run. A `seed` of 0 picks one from the clock.
    #[wasm_bindgen(constructor)]
    pub fn new(seed: u64) -> WebGame {
        Self::build(seed, Tuning::default())
    }

    /// Like `new`, with balance values from a JSON document
    pub fn with_tuning(seed: u64, tuning_json: &str) -> Result<WebGame, JsValue> {
        let tuning =
            Tuning::from_json(tuning_json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self::build(seed, tuning))
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.game.resize(width, height);
    }

    pub fn pointer_move(&mut self, client_x: f32, client_y: f32) {
        self.game.pointer_move(client_x, client_y);
    }

    pub fn set_idle_mode(&mut self, idle: bool) {
        self.game.set_idle_mode(idle);
    }

    pub fn toggle_idle_mode(&mut self) {
        let idle = !self.game.idle_mode();
        self.game.set_idle_mode(idle);
    }

    /// Call from a user gesture (click/tap/key) so the browser allows audio
    pub fn unlock_audio(&mut self) {
        if self.game.has_audio() {
            return;
        }
        match WebAudio::new(self.game.settings()) {
            Some(audio) => {
                audio.resume();
                self.game.attach_audio(Box::new(audio));
                log::info!("Audio unlocked");
            }
            None => log::warn!("Audio unavailable; continuing silently"),
        }
    }

    /// "low", "medium" or "high"; unknown names are ignored
    pub fn set_quality(&mut self, name: &str) {
        let Some(quality) = QualityPreset::parse(name) else {
            log::warn!("Unknown quality preset: {name}");
            return;
        };
        self.update_settings(|s| s.quality = quality);
    }

    pub fn set_particles(&mut self, enabled: bool) {
        self.update_settings(|s| s.particles = enabled);
    }

    pub fn set_fixed_timestep(&mut self, fixed: bool) {
        let pacing = if fixed {
            FramePacing::FixedTimestep
        } else {
            FramePacing::PerDisplayFrame
        };
        self.update_settings(|s| s.frame_pacing = pacing);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.update_settings(|s| s.muted = muted);
    }

    pub fn restart(&mut self) {
        self.game.restart(js_sys::Date::now() as u64);
        self.last_time = 0.0;
    }

    /// Advance one animation frame; `time_ms` is the rAF timestamp
    pub fn frame(&mut self, time_ms: f64) -> u32 {
        let dt = if self.last_time > 0.0 {
            ((time_ms - self.last_time) / 1000.0) as f32
        } else {
            SIM_DT
        };
        self.last_time = time_ms;
        self.game.frame(dt)
    }

    /// Rock instances, 12 floats each: position, radius, rgba, surface
    pub fn rock_instances(&self) -> Vec<f32> {
        self.game.render_frame().rock_floats().to_vec()
    }

    /// Shard instances, 12 floats each: position, size, rotation, opacity, pad, rgba
    pub fn shard_instances(&self) -> Vec<f32> {
        self.game.render_frame().shard_floats().to_vec()
    }

    /// Board model matrix, column-major
    pub fn board_matrix(&self) -> Vec<f32> {
        self.game.render_frame().board.to_cols_array().to_vec()
    }

    /// Camera view matrix, column-major
    pub fn view_matrix(&self) -> Vec<f32> {
        self.game.render_frame().view.to_cols_array().to_vec()
    }

    /// Camera eye then look target
    pub fn camera(&self) -> Vec<f32> {
        let camera = self.game.render_frame().camera;
        [camera.eye.to_array(), camera.target.to_array()].concat()
    }

    /// Rider torso roll, knee bend, arm counter-rotation
    pub fn rider_pose(&self) -> Vec<f32> {
        let rider = self.game.render_frame().rider;
        vec![rider.torso_roll, rider.knee_bend, rider.arm_counter]
    }

    /// Island, water, sky positions then the water shader clock
    pub fn scenery(&self) -> Vec<f32> {
        let s = self.game.render_frame().scenery;
        let mut out = [s.island.to_array(), s.water.to_array(), s.sky.to_array()].concat();
        out.push(s.water_time);
        out
    }

    pub fn clear_color(&self) -> Vec<f32> {
        self.game.render_frame().clear_color.to_vec()
    }

    pub fn score(&self) -> u32 {
        self.game.score()
    }

    pub fn is_won(&self) -> bool {
        self.game.is_won()
    }
}

impl WebGame {
    fn build(seed: u64, tuning: Tuning) -> WebGame {
        let seed = if seed == 0 {
            js_sys::Date::now() as u64
        } else {
            seed
        };
        let mut game = Game::new(seed, tuning, Settings::load(), Box::new(DomHud));
        if let Some((width, height)) = viewport_size() {
            game.resize(width, height);
        }
        WebGame {
            game,
            last_time: 0.0,
        }
    }

    fn update_settings(&mut self, change: impl FnOnce(&mut Settings)) {
        let mut settings = self.game.settings().clone();
        change(&mut settings);
        settings.save();
        self.game.apply_settings(settings);
    }
}

/// Window inner size in CSS pixels
fn viewport_size() -> Option<(f32, f32)> {
    let window = web_sys::window()?;
    let width = window.inner_width().ok()?.as_f64()?;
    let height = window.inner_height().ok()?.as_f64()?;
    Some((width as f32, height as f32))
}
