//! Tone generators — additive chord pads and sine bass.
//!
//! Both generators render a whole segment at once on a shared time axis, so
//! a chord pad and its bass note for the same duration always have the same
//! length.

use std::f64::consts::TAU;

use super::mixer::normalize;

/// Number of samples in a segment of `duration` seconds (truncated).
pub fn segment_len(duration: f64, sample_rate: f64) -> usize {
    (sample_rate * duration) as usize
}

/// `segment_len(duration)` evenly spaced instants in `[0, duration)`.
///
/// The step is `duration / n`, so the end point is never itself sampled.
pub fn time_axis(duration: f64, sample_rate: f64) -> Vec<f64> {
    let n = segment_len(duration, sample_rate);
    if n == 0 {
        return Vec::new();
    }
    let step = duration / n as f64;
    (0..n).map(|i| i as f64 * step).collect()
}

/// A chord pad: each partial plus its sub-octave at half amplitude, summed
/// and normalized to unit peak.
pub fn generate_chord(frequencies: &[f64], duration: f64, sample_rate: f64) -> Vec<f64> {
    let mut chord: Vec<f64> = time_axis(duration, sample_rate)
        .into_iter()
        .map(|t| {
            frequencies
                .iter()
                .map(|&f| (TAU * f * t).sin() + 0.5 * (TAU * (f / 2.0) * t).sin())
                .sum::<f64>()
        })
        .collect();
    normalize(&mut chord);
    chord
}

/// A bass note: a single sine at fixed 0.8 amplitude, not normalized.
pub fn generate_bass(root_frequency: f64, duration: f64, sample_rate: f64) -> Vec<f64> {
    time_axis(duration, sample_rate)
        .into_iter()
        .map(|t| (TAU * root_frequency * t).sin() * 0.8)
        .collect()
}
