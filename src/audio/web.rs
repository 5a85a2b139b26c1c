//! Web Audio backend
//!
//! Procedurally synthesized soundtrack and hit cue - no external files needed!
//! Notes are scheduled a little ahead of the audio clock from `pump`, which
//! the frame driver calls once per animation frame.

use web_sys::{
    AudioContext, AudioNode, BiquadFilterNode, BiquadFilterType, GainNode, OscillatorNode,
    OscillatorType,
};

use super::pattern::{self, HIT_NOTE, KICK_NOTE, midi_to_freq};
use super::{
    AudioReaction, DUCK_ATTACK, DUCK_GAIN, DUCK_RELEASE, HIT_CUE_LENGTH, MUSIC_BASE_GAIN,
    RESTORE_GAIN,
};
use crate::settings::Settings;

/// How far ahead of the audio clock notes get scheduled (seconds)
const LOOKAHEAD: f64 = 0.15;

/// Audio manager for the game
pub struct WebAudio {
    ctx: AudioContext,
    /// Soundtrack bus; this is what gets ducked
    music_bus: GainNode,
    /// Soft lowpass in front of the melodic voices
    music_filter: BiquadFilterNode,
    /// Bus level before the volume preference is applied
    bus_level: f32,
    music_volume: f32,
    sfx_volume: f32,
    playing: bool,
    next_step: u64,
    next_step_time: f64,
}

impl WebAudio {
    /// Build the audio graph. Must run inside a user gesture on most browsers.
    pub fn new(settings: &Settings) -> Option<Self> {
        let ctx = match AudioContext::new() {
            Ok(ctx) => ctx,
            Err(e) => {
                log::warn!("Failed to create AudioContext - audio disabled ({e:?})");
                return None;
            }
        };

        let music_volume = settings.music_gain();
        let music_bus = ctx.create_gain().ok()?;
        music_bus.gain().set_value(MUSIC_BASE_GAIN * music_volume);
        music_bus
            .connect_with_audio_node(&ctx.destination())
            .ok()?;

        let music_filter = ctx.create_biquad_filter().ok()?;
        music_filter.set_type(BiquadFilterType::Lowpass);
        music_filter.frequency().set_value(1400.0);
        music_filter.connect_with_audio_node(&music_bus).ok()?;

        Some(Self {
            ctx,
            music_bus,
            music_filter,
            bus_level: MUSIC_BASE_GAIN,
            music_volume,
            sfx_volume: settings.sfx_gain(),
            playing: false,
            next_step: 0,
            next_step_time: 0.0,
        })
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        let _ = self.ctx.resume();
    }

    /// Oscillator through its own envelope gain into `dest`
    fn voice(
        &self,
        dest: &AudioNode,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = self.ctx.create_oscillator().ok()?;
        let gain = self.ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(dest).ok()?;

        Some((osc, gain))
    }

    /// Attack then exponential decay, starting at `t`
    fn pluck(&self, dest: &AudioNode, freq: f32, osc_type: OscillatorType, t: f64, peak: f32, decay: f64) {
        if peak <= 0.0 {
            return;
        }
        let Some((osc, gain)) = self.voice(dest, freq, osc_type) else {
            return;
        };
        gain.gain().set_value_at_time(0.0001, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(peak, t + 0.01)
            .ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.0001, t + 0.01 + decay)
            .ok();
        osc.start_with_when(t).ok();
        osc.stop_with_when(t + 0.05 + decay).ok();
    }

    fn schedule_step(&self, index: u64, t: f64) {
        let step = pattern::step(index);
        let filter: &AudioNode = &self.music_filter;
        let bus: &AudioNode = &self.music_bus;

        self.pluck(filter, midi_to_freq(step.arp), OscillatorType::Sine, t, 0.2, 0.25);

        if let Some(root) = step.bass {
            self.pluck(bus, midi_to_freq(root), OscillatorType::Sine, t, 0.25, 0.4);
        }

        if step.kick {
            if let Some((osc, gain)) = self.voice(bus, 150.0, OscillatorType::Sine) {
                gain.gain().set_value_at_time(0.35, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.0001, t + 0.18)
                    .ok();
                osc.frequency().set_value_at_time(150.0, t).ok();
                osc.frequency()
                    .exponential_ramp_to_value_at_time(midi_to_freq(KICK_NOTE), t + 0.02)
                    .ok();
                osc.start_with_when(t).ok();
                osc.stop_with_when(t + 0.2).ok();
            }
        }

        if step.hat {
            // Short high square burst stands in for filtered noise
            self.pluck(bus, 9000.0, OscillatorType::Square, t, 0.03, 0.03);
        }
    }
}

impl AudioReaction for WebAudio {
    fn start_ambient_loop(&mut self) {
        if self.playing {
            return;
        }
        self.resume();
        self.playing = true;
        self.next_step = 0;
        self.next_step_time = self.ctx.current_time() + 0.05;
        log::info!("Soundtrack started");
    }

    fn trigger_hit(&mut self) {
        if self.sfx_volume <= 0.0 {
            return;
        }
        let t = self.ctx.current_time();
        let Some(filter) = self.ctx.create_biquad_filter().ok() else {
            return;
        };
        filter.set_type(BiquadFilterType::Lowpass);
        filter.frequency().set_value(600.0);
        filter.q().set_value(2.0);
        if filter
            .connect_with_audio_node(&self.ctx.destination())
            .is_err()
        {
            return;
        }

        let Some((osc, gain)) = self.voice(&filter, midi_to_freq(HIT_NOTE), OscillatorType::Square)
        else {
            return;
        };
        gain.gain().set_value_at_time(0.0001, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(self.sfx_volume * 0.6, t + 0.005)
            .ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.0001, t + HIT_CUE_LENGTH)
            .ok();
        osc.start_with_when(t).ok();
        osc.stop_with_when(t + HIT_CUE_LENGTH + 0.1).ok();
    }

    fn duck_and_restore_gain(&mut self) {
        let t = self.ctx.current_time();
        let param = self.music_bus.gain();
        let current = param.value();
        param.cancel_scheduled_values(t).ok();
        param.set_value_at_time(current, t).ok();
        param
            .linear_ramp_to_value_at_time(DUCK_GAIN * self.music_volume, t + DUCK_ATTACK)
            .ok();
        param
            .linear_ramp_to_value_at_time(RESTORE_GAIN * self.music_volume, t + DUCK_RELEASE)
            .ok();
        self.bus_level = RESTORE_GAIN;
    }

    fn pump(&mut self) {
        if !self.playing {
            return;
        }
        let now = self.ctx.current_time();
        // Tab was suspended: skip ahead rather than flooding missed notes
        if self.next_step_time < now {
            self.next_step_time = now + 0.05;
        }
        let horizon = now + LOOKAHEAD;
        while self.next_step_time < horizon {
            self.schedule_step(self.next_step, self.next_step_time);
            self.next_step += 1;
            self.next_step_time += pattern::step_duration();
        }
    }

    fn set_volumes(&mut self, music: f32, sfx: f32) {
        self.music_volume = music.clamp(0.0, 1.0);
        self.sfx_volume = sfx.clamp(0.0, 1.0);
        let t = self.ctx.current_time();
        self.music_bus
            .gain()
            .set_value_at_time(self.bus_level * self.music_volume, t)
            .ok();
    }
}
