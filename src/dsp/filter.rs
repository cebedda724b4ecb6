//! Butterworth lowpass — bilinear-transform design run as cascaded biquads.
//!
//! An order-N filter is split into N/2 second-order sections plus one
//! first-order section when N is odd. Each section is prewarped so the
//! cascade has its -3 dB point exactly at the cutoff, and unity gain at DC.

use std::f64::consts::{FRAC_PI_2, PI};

use crate::error::{Result, SynthError};

/// One IIR section, normalized so `a0 == 1`.
///
/// Implements the Direct Form II Transposed structure. A first-order section
/// is a biquad with `b2 == a2 == 0`.
#[derive(Debug, Clone)]
pub struct Biquad {
    b0: f64,
    b1: f64,
    b2: f64,
    a1: f64,
    a2: f64,

    // State (Direct Form II Transposed)
    z1: f64,
    z2: f64,
}

impl Biquad {
    fn from_raw(b: [f64; 3], a: [f64; 3]) -> Self {
        let a0 = a[0];
        Biquad {
            b0: b[0] / a0,
            b1: b[1] / a0,
            b2: b[2] / a0,
            a1: a[1] / a0,
            a2: a[2] / a0,
            z1: 0.0,
            z2: 0.0,
        }
    }

    /// Process a single sample through the section.
    #[inline]
    pub fn process(&mut self, input: f64) -> f64 {
        let output = self.b0 * input + self.z1;
        self.z1 = self.b1 * input - self.a1 * output + self.z2;
        self.z2 = self.b2 * input - self.a2 * output;
        output
    }

    /// Reset section state.
    pub fn reset(&mut self) {
        self.z1 = 0.0;
        self.z2 = 0.0;
    }
}

/// A digital Butterworth lowpass of arbitrary order.
#[derive(Debug, Clone)]
pub struct Butterworth {
    sections: Vec<Biquad>,
}

impl Butterworth {
    /// Design an order-`order` lowpass with its cutoff at `cutoff_hz`.
    ///
    /// The cutoff must lie strictly between 0 and Nyquist.
    pub fn lowpass(order: usize, cutoff_hz: f64, sample_rate: f64) -> Result<Self> {
        if order == 0 {
            return Err(SynthError::InvalidConfig(
                "filter order must be at least 1".into(),
            ));
        }
        let nyquist = 0.5 * sample_rate;
        let normal_cutoff = cutoff_hz / nyquist;
        if !(normal_cutoff > 0.0 && normal_cutoff < 1.0) {
            return Err(SynthError::InvalidConfig(format!(
                "cutoff {cutoff_hz} Hz must lie in (0, {nyquist}) Hz"
            )));
        }

        // Prewarped analog cutoff, scaled by the bilinear constant 2·fs.
        let w = (FRAC_PI_2 * normal_cutoff).tan();
        let w2 = w * w;

        let mut sections = Vec::with_capacity(order.div_ceil(2));
        for k in 0..order / 2 {
            // Conjugate pole pair at angle θ from the imaginary axis.
            let theta = PI * (2 * k + 1) as f64 / (2 * order) as f64;
            let damping = 2.0 * theta.sin() * w;
            sections.push(Biquad::from_raw(
                [w2, 2.0 * w2, w2],
                [1.0 + damping + w2, 2.0 * (w2 - 1.0), 1.0 - damping + w2],
            ));
        }
        if order % 2 == 1 {
            // Real pole at -w.
            sections.push(Biquad::from_raw([w, w, 0.0], [1.0 + w, w - 1.0, 0.0]));
        }

        Ok(Butterworth { sections })
    }

    /// Run one sample through every section in turn.
    #[inline]
    pub fn process(&mut self, input: f64) -> f64 {
        self.sections
            .iter_mut()
            .fold(input, |x, section| section.process(x))
    }

    /// Filter a whole buffer from a zeroed state.
    pub fn process_buffer(&mut self, buffer: &[f64]) -> Vec<f64> {
        self.reset();
        buffer.iter().map(|&x| self.process(x)).collect()
    }

    pub fn reset(&mut self) {
        for section in &mut self.sections {
            section.reset();
        }
    }

    pub fn order(&self) -> usize {
        self.sections
            .iter()
            .map(|s| if s.b2 == 0.0 && s.a2 == 0.0 { 1 } else { 2 })
            .sum()
    }
}

/// Causal Butterworth lowpass over `buffer`.
///
/// The design is recomputed from the parameters each call and starts from
/// rest, so identical inputs always give identical outputs.
pub fn lowpass_filter(
    buffer: &[f64],
    cutoff_hz: f64,
    sample_rate: f64,
    order: usize,
) -> Result<Vec<f64>> {
    let mut filter = Butterworth::lowpass(order, cutoff_hz, sample_rate)?;
    Ok(filter.process_buffer(buffer))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::TAU;

    fn steady_state_peak(freq: f64, cutoff: f64, order: usize) -> f64 {
        let sr = 44100.0;
        let input: Vec<f64> = (0..44100)
            .map(|i| (TAU * freq * i as f64 / sr).sin())
            .collect();
        let out = lowpass_filter(&input, cutoff, sr, order).unwrap();
        out[22050..].iter().fold(0.0_f64, |m, s| m.max(s.abs()))
    }

    #[test]
    fn lowpass_passes_dc() {
        let out = lowpass_filter(&vec![1.0; 5000], 1200.0, 44100.0, 6).unwrap();
        let last = *out.last().unwrap();
        assert!((last - 1.0).abs() < 1e-6, "Lowpass should pass DC, got {last}");
    }

    #[test]
    fn cutoff_is_minus_3db() {
        let gain = steady_state_peak(1200.0, 1200.0, 6);
        assert!(
            (gain - std::f64::consts::FRAC_1_SQRT_2).abs() < 0.01,
            "gain at cutoff should be ~0.707, got {gain}"
        );
    }

    #[test]
    fn lowpass_attenuates_high_freq() {
        let gain = steady_state_peak(10000.0, 1200.0, 6);
        assert!(gain < 1e-4, "Lowpass@1200Hz should crush 10kHz, got {gain}");
    }

    #[test]
    fn passband_is_flat() {
        let gain = steady_state_peak(200.0, 1200.0, 6);
        assert!((gain - 1.0).abs() < 0.01, "200 Hz gain {gain}");
    }

    #[test]
    fn odd_order_design() {
        let f = Butterworth::lowpass(5, 1000.0, 44100.0).unwrap();
        assert_eq!(f.sections.len(), 3);
        assert_eq!(f.order(), 5);
        let gain = steady_state_peak(1000.0, 1000.0, 5);
        assert!((gain - std::f64::consts::FRAC_1_SQRT_2).abs() < 0.01);
    }

    #[test]
    fn repeated_calls_are_identical() {
        let input: Vec<f64> = (0..2000).map(|i| ((i * 7919) % 113) as f64 / 113.0 - 0.5).collect();
        let a = lowpass_filter(&input, 1200.0, 44100.0, 6).unwrap();
        let b = lowpass_filter(&input, 1200.0, 44100.0, 6).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn process_buffer_resets_state() {
        let mut f = Butterworth::lowpass(6, 1200.0, 44100.0).unwrap();
        let a = f.process_buffer(&[1.0, 0.5, -0.25]);
        let b = f.process_buffer(&[1.0, 0.5, -0.25]);
        assert_eq!(a, b);
    }

    #[test]
    fn output_is_causal() {
        let mut input = vec![0.0; 100];
        input[50] = 1.0;
        let out = lowpass_filter(&input, 1200.0, 44100.0, 6).unwrap();
        assert!(out[..50].iter().all(|&s| s == 0.0));
        assert!(out[50] != 0.0);
    }

    #[test]
    fn invalid_designs_rejected() {
        assert!(Butterworth::lowpass(0, 1000.0, 44100.0).is_err());
        assert!(Butterworth::lowpass(4, 0.0, 44100.0).is_err());
        assert!(Butterworth::lowpass(4, 22050.0, 44100.0).is_err());
        assert!(lowpass_filter(&[0.0], 30000.0, 44100.0, 6).is_err());
    }

    #[test]
    fn empty_buffer() {
        assert!(lowpass_filter(&[], 1200.0, 44100.0, 6).unwrap().is_empty());
    }
}
