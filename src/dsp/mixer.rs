//! Mixer — sums equal-length layers with per-layer gain, then normalizes and
//! quantizes the result to 16-bit PCM.

use crate::error::{Result, SynthError};

/// Full-scale value used when quantizing to `i16`.
pub const FULL_SCALE: f64 = 32767.0;

/// A summing mixer over a fixed number of samples.
///
/// Every layer must have exactly the mixer's length; a mismatch is rejected
/// instead of being silently truncated or padded.
#[derive(Debug, Clone)]
pub struct Mixer {
    buffer: Vec<f64>,
    layers: usize,
}

impl Mixer {
    /// A silent mix of `num_samples` samples.
    pub fn new(num_samples: usize) -> Self {
        Mixer {
            buffer: vec![0.0; num_samples],
            layers: 0,
        }
    }

    /// Add `samples × gain` into the mix.
    pub fn add_layer(&mut self, name: &str, samples: &[f64], gain: f64) -> Result<()> {
        if samples.len() != self.buffer.len() {
            return Err(SynthError::LengthMismatch {
                layer: name.to_string(),
                expected: self.buffer.len(),
                actual: samples.len(),
            });
        }
        for (out, &s) in self.buffer.iter_mut().zip(samples) {
            *out += s * gain;
        }
        self.layers += 1;
        tracing::debug!(layer = name, gain, "mixed layer");
        Ok(())
    }

    /// The mixed buffer, before normalization.
    pub fn output(&self) -> &[f64] {
        &self.buffer
    }

    /// Consume the mixer, normalize the sum to unit peak and quantize it.
    pub fn render_pcm_i16(mut self) -> Vec<i16> {
        normalize(&mut self.buffer);
        quantize_i16(&self.buffer)
    }

    /// Number of layers summed so far.
    pub fn layer_count(&self) -> usize {
        self.layers
    }

    /// Access the raw buffer length.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Is the buffer empty?
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}

/// Largest absolute sample value, 0.0 for an empty buffer.
pub fn peak(buffer: &[f64]) -> f64 {
    buffer.iter().fold(0.0_f64, |m, s| m.max(s.abs()))
}

/// Divide by the peak absolute value so the loudest sample sits at ±1.0.
///
/// A silent (all-zero) buffer is left as is.
pub fn normalize(buffer: &mut [f64]) {
    let peak = peak(buffer);
    if peak > 0.0 {
        for s in buffer.iter_mut() {
            *s /= peak;
        }
    }
}

/// Scale by 32767 and truncate toward zero into `i16`.
pub fn quantize_i16(buffer: &[f64]) -> Vec<i16> {
    buffer.iter().map(|&s| (s * FULL_SCALE) as i16).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_mix_is_silent() {
        let m = Mixer::new(128);
        assert_eq!(m.len(), 128);
        assert!(m.output().iter().all(|&s| s == 0.0));
        assert_eq!(m.render_pcm_i16(), vec![0; 128]);
    }

    #[test]
    fn accumulates_weighted_layers() {
        let mut m = Mixer::new(3);
        m.add_layer("chords", &[1.0, 0.0, -1.0], 1.0).unwrap();
        m.add_layer("drums", &[0.5, 0.5, 0.5], 0.5).unwrap();
        m.add_layer("bass", &[1.0, -1.0, 0.0], 0.7).unwrap();
        assert_eq!(m.layer_count(), 3);
        let want = [1.0 + 0.25 + 0.7, 0.25 - 0.7, -1.0 + 0.25];
        for (got, want) in m.output().iter().zip(want.iter()) {
            assert!((got - want).abs() < 1e-12);
        }
    }

    #[test]
    fn length_mismatch_is_rejected() {
        let mut m = Mixer::new(4);
        let err = m.add_layer("drums", &[0.0; 3], 0.5).unwrap_err();
        match err {
            SynthError::LengthMismatch {
                layer,
                expected,
                actual,
            } => {
                assert_eq!(layer, "drums");
                assert_eq!(expected, 4);
                assert_eq!(actual, 3);
            }
            other => panic!("expected LengthMismatch, got {other:?}"),
        }
        assert_eq!(m.layer_count(), 0);
        assert!(m.output().iter().all(|&s| s == 0.0));
    }

    #[test]
    fn summation_order_does_not_matter() {
        let chords: Vec<f64> = (0..500).map(|i| (i as f64 * 0.013).sin()).collect();
        let drums: Vec<f64> = (0..500).map(|i| (i as f64 * 0.37).cos() * 0.3).collect();
        let bass: Vec<f64> = (0..500).map(|i| (i as f64 * 0.002).sin() * 0.8).collect();

        let mut a = Mixer::new(500);
        a.add_layer("chords", &chords, 1.0).unwrap();
        a.add_layer("drums", &drums, 0.5).unwrap();
        a.add_layer("bass", &bass, 0.7).unwrap();

        let mut b = Mixer::new(500);
        b.add_layer("bass", &bass, 0.7).unwrap();
        b.add_layer("chords", &chords, 1.0).unwrap();
        b.add_layer("drums", &drums, 0.5).unwrap();

        for (x, y) in a.output().iter().zip(b.output()) {
            assert!((x - y).abs() < 1e-12);
        }
    }

    #[test]
    fn normalize_scales_to_unit_peak() {
        let mut buf = vec![0.5, -2.0, 1.0];
        normalize(&mut buf);
        assert_eq!(buf, vec![0.25, -1.0, 0.5]);
        assert_eq!(peak(&buf), 1.0);
    }

    #[test]
    fn normalize_skips_silence() {
        let mut buf = vec![0.0; 8];
        normalize(&mut buf);
        assert!(buf.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn quantize_truncates_toward_zero() {
        assert_eq!(
            quantize_i16(&[1.0, -1.0, 0.0, 0.5, -0.5, 0.99999]),
            vec![32767, -32767, 0, 16383, -16383, 32766]
        );
    }

    #[test]
    fn rendered_pcm_stays_in_range() {
        let mut m = Mixer::new(4);
        m.add_layer("a", &[3.0, -6.0, 1.5, 0.0], 1.0).unwrap();
        let pcm = m.render_pcm_i16();
        assert_eq!(pcm, vec![16383, -32767, 8191, 0]);
    }
}
