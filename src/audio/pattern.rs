//! Ambient soundtrack pattern
//!
//! A looping 125 bpm groove over Cmaj7 - Am7 - Fmaj7 - G7: an eighth-note
//! arpeggio, kick on beats 1 and 3, off-beat hats and a low root per bar.
//! Pure data so it can be scheduled by any backend.

/// Tempo in beats per minute
pub const BPM: f64 = 125.0;
/// Eighth notes per 4/4 bar
pub const STEPS_PER_BAR: u64 = 8;

/// MIDI notes of each chord, one chord per bar
pub const CHORDS: [[i32; 4]; 4] = [
    [60, 64, 67, 71], // Cmaj7: C4 E4 G4 B4
    [57, 60, 64, 67], // Am7:   A3 C4 E4 G4
    [65, 69, 72, 76], // Fmaj7: F4 A4 C5 E5
    [55, 59, 62, 65], // G7:    G3 B3 D4 F4
];

/// Kick drum pitch (C1)
pub const KICK_NOTE: i32 = 24;
/// Collision cue pitch (C2)
pub const HIT_NOTE: i32 = 36;
/// Octave the bass plays the chord root in
const BASS_OCTAVE: i32 = 2;

/// Seconds per eighth note
pub fn step_duration() -> f64 {
    60.0 / BPM / 2.0
}

/// Frequency of a MIDI note (A4 = 69 = 440 Hz)
pub fn midi_to_freq(note: i32) -> f32 {
    440.0 * 2f32.powf((note - 69) as f32 / 12.0)
}

/// Everything that sounds on one eighth-note step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    /// Arpeggio note
    pub arp: i32,
    /// Bass root, first step of each bar only
    pub bass: Option<i32>,
    pub kick: bool,
    pub hat: bool,
}

/// The step at `index` eighth notes from the start of the loop
pub fn step(index: u64) -> Step {
    let bar = index / STEPS_PER_BAR;
    let beat = index % STEPS_PER_BAR;
    let chord = &CHORDS[(bar % CHORDS.len() as u64) as usize];

    let bass = (beat == 0).then(|| chord[0].rem_euclid(12) + 12 * (BASS_OCTAVE + 1));

    Step {
        arp: chord[(index % chord.len() as u64) as usize],
        bass,
        kick: beat == 0 || beat == 4,
        hat: beat == 1 || beat == 3,
    }
}
