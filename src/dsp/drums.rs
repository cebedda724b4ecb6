//! Drum synthesizer — one cycle of decaying sine kicks and noise snares.

use std::f64::consts::TAU;

use rand::Rng;

use super::oscillator::time_axis;

/// A single hit in the drum pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrumHit {
    Kick,
    Snare,
}

/// 60 Hz sine at half amplitude with a fast exponential decay.
fn kick(t: &[f64]) -> Vec<f64> {
    t.iter()
        .map(|&t| 0.5 * (TAU * 60.0 * t).sin() * (-t * 10.0).exp())
        .collect()
}

/// Uniform noise in [-0.5, 0.5) with a faster decay than the kick.
fn snare<R: Rng + ?Sized>(t: &[f64], rng: &mut R) -> Vec<f64> {
    t.iter()
        .map(|&t| (rng.random::<f64>() - 0.5) * (-t * 15.0).exp())
        .collect()
}

/// Render one cycle of `pattern`, one hit every `unit_duration` seconds.
///
/// The kick and snare shapes are each rendered once (the snare draws fresh
/// noise from `rng` per call) and added into the cycle at
/// `floor(i * unit_duration * sample_rate)`. A hit that would run past the
/// end of the cycle is clipped.
pub fn generate_drum_pattern<R: Rng + ?Sized>(
    sample_rate: f64,
    unit_duration: f64,
    pattern: &[DrumHit],
    rng: &mut R,
) -> Vec<f64> {
    let t = time_axis(unit_duration, sample_rate);
    let kick = kick(&t);
    let snare = snare(&t, rng);

    let cycle_len = (sample_rate * unit_duration * pattern.len() as f64) as usize;
    let mut cycle = vec![0.0_f64; cycle_len];

    for (i, hit) in pattern.iter().enumerate() {
        let start = (i as f64 * sample_rate * unit_duration) as usize;
        if start >= cycle_len {
            break;
        }
        let voice = match hit {
            DrumHit::Kick => &kick,
            DrumHit::Snare => &snare,
        };
        for (out, s) in cycle[start..].iter_mut().zip(voice.iter()) {
            *out += s;
        }
    }

    cycle
}

/// Repeat `cycle` back to back and truncate to exactly `len` samples.
pub fn tile_to_length(cycle: &[f64], len: usize) -> Vec<f64> {
    if cycle.is_empty() {
        return vec![0.0; len];
    }
    cycle.iter().copied().cycle().take(len).collect()
}
