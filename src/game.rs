//! Frame driver
//!
//! Owns the simulation plus its collaborators (HUD, audio, render snapshot)
//! and turns host frames into ticks. Hosts (the web bindings, the headless
//! runner) only talk to `Game`.

use crate::audio::AudioReaction;
use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};
use crate::hud::HudSink;
use crate::renderer::RenderFrame;
use crate::settings::{FramePacing, Settings};
use crate::sim::{GameEvent, GamePhase, GameState, PointerMapper, TickInput, tick};
use crate::tuning::Tuning;

/// Game instance holding all state
pub struct Game {
    pub state: GameState,
    tuning: Tuning,
    settings: Settings,
    input: TickInput,
    pointer: PointerMapper,
    accumulator: f32,
    hud: Box<dyn HudSink>,
    /// `None` until the first user gesture unlocks audio
    audio: Option<Box<dyn AudioReaction>>,
    frame: RenderFrame,
}

impl Game {
    pub fn new(seed: u64, tuning: Tuning, settings: Settings, hud: Box<dyn HudSink>) -> Self {
        let state = Self::fresh_state(seed, &tuning, &settings);
        let frame = RenderFrame::capture(&state);
        let mut game = Self {
            state,
            tuning,
            settings,
            input: TickInput::default(),
            pointer: PointerMapper::new(0.0, 0.0),
            accumulator: 0.0,
            hud,
            audio: None,
            frame,
        };
        game.show_initial_hud();
        log::info!("Game initialized with seed: {seed}");
        game
    }

    fn fresh_state(seed: u64, tuning: &Tuning, settings: &Settings) -> GameState {
        let mut state = GameState::with_tuning(seed, tuning.clone());
        state.explosions.set_budget(Some(settings.max_bursts()));
        state
    }

    fn show_initial_hud(&mut self) {
        let threshold = self.state.score.win_threshold;
        self.hud.set_score(self.state.score.score, threshold);
    }

    /// Reset game state for restart
    pub fn restart(&mut self, seed: u64) {
        self.state = Self::fresh_state(seed, &self.tuning, &self.settings);
        self.accumulator = 0.0;
        self.input = TickInput {
            idle_mode: self.input.idle_mode,
            ..TickInput::default()
        };
        self.frame.refresh(&self.state);
        self.show_initial_hud();
        log::info!("Game restarted with seed: {seed}");
    }

    /// Viewport changed size (pixels)
    pub fn resize(&mut self, width: f32, height: f32) {
        self.pointer.resize(width, height);
    }

    /// Pointer moved to client coordinates (pixels)
    pub fn pointer_move(&mut self, client_x: f32, client_y: f32) {
        self.input.pointer = Some(self.pointer.to_raw(client_x, client_y));
    }

    /// Toggle autopilot
    pub fn set_idle_mode(&mut self, idle: bool) {
        if self.input.idle_mode == idle {
            return;
        }
        log::info!("Idle mode: {idle}");
        if !idle {
            // The autopilot's last sample must not keep steering for the player
            self.state.steering.recentre();
            self.input.pointer = None;
        }
        self.input.idle_mode = idle;
    }

    pub fn idle_mode(&self) -> bool {
        self.input.idle_mode
    }

    /// Hand over an unlocked audio backend and start the soundtrack.
    /// Later calls are ignored.
    pub fn attach_audio(&mut self, mut audio: Box<dyn AudioReaction>) {
        if self.audio.is_some() {
            return;
        }
        audio.set_volumes(self.settings.music_gain(), self.settings.sfx_gain());
        audio.start_ambient_loop();
        self.audio = Some(audio);
    }

    pub fn has_audio(&self) -> bool {
        self.audio.is_some()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn apply_settings(&mut self, settings: Settings) {
        self.state
            .explosions
            .set_budget(Some(settings.max_bursts()));
        if let Some(audio) = self.audio.as_mut() {
            audio.set_volumes(settings.music_gain(), settings.sfx_gain());
        }
        self.settings = settings;
    }

    /// Advance for one host frame of `dt` seconds. Returns ticks run.
    pub fn frame(&mut self, dt: f32) -> u32 {
        let ticks = match self.settings.frame_pacing {
            FramePacing::PerDisplayFrame => {
                self.step();
                1
            }
            FramePacing::FixedTimestep => {
                let dt = if dt.is_finite() { dt.clamp(0.0, MAX_FRAME_DT) } else { 0.0 };
                self.accumulator += dt;

                let mut substeps = 0;
                while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                    self.step();
                    self.accumulator -= SIM_DT;
                    substeps += 1;
                }
                substeps
            }
        };

        if let Some(audio) = self.audio.as_mut() {
            audio.pump();
        }
        self.frame.refresh(&self.state);
        ticks
    }

    /// One tick plus event dispatch
    fn step(&mut self) {
        let was_running = self.state.phase == GamePhase::Running;
        tick(&mut self.state, &self.input);
        self.input.pointer = None;

        for event in &self.state.events {
            match *event {
                GameEvent::ObstacleDestroyed { id, position } => {
                    log::trace!("Rock {id} destroyed at {position:?}");
                }
                GameEvent::ScoreChanged { score, threshold } => {
                    self.hud.set_score(score, threshold);
                }
                GameEvent::HitCue => {
                    if let Some(audio) = self.audio.as_mut() {
                        audio.trigger_hit();
                        audio.duck_and_restore_gain();
                    }
                }
                GameEvent::Won { score } => {
                    self.hud.set_win();
                    log::info!("Win! {score} rocks destroyed");
                }
            }
        }

        if was_running && self.state.phase == GamePhase::Ended {
            log::info!("Simulation halted; rendering final frame");
        }
    }

    /// Snapshot from the last frame
    pub fn render_frame(&self) -> &RenderFrame {
        &self.frame
    }

    pub fn score(&self) -> u32 {
        self.state.score.score
    }

    pub fn is_won(&self) -> bool {
        self.state.score.game_over()
    }
}
