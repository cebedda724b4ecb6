//! Reverb effect — convolution with a short exponentially decaying impulse.
//!
//! The impulse is geometric (`h[k] = h0 · r^k` for `k < L`), so the full
//! linear convolution truncated to the input length is computed with the
//! exact recurrence
//!
//! ```text
//! y[n] = r·y[n-1] + h0·x[n] − h0·r^L·x[n-L]
//! ```
//!
//! which keeps the cost linear in the track length.

/// A unity-gain exponential decay kernel.
#[derive(Debug, Clone)]
pub struct ImpulseResponse {
    /// First tap, after normalization.
    h0: f64,
    /// Ratio between consecutive taps.
    ratio: f64,
    len: usize,
}

impl ImpulseResponse {
    /// `len` taps shaped `e^{-u}` with `u` evenly spaced over `[0, decay]`
    /// (both ends included), scaled so the taps sum to 1.
    pub fn exponential(len: usize, decay: f64) -> Self {
        let ratio = if len > 1 {
            (-decay / (len - 1) as f64).exp()
        } else {
            0.0
        };
        let sum: f64 = (0..len).map(|k| ratio.powi(k as i32)).sum();
        let h0 = if sum > 0.0 { 1.0 / sum } else { 0.0 };
        ImpulseResponse { h0, ratio, len }
    }

    /// Impulse for a tail of `seconds` at `sample_rate`.
    pub fn for_tail(seconds: f64, decay: f64, sample_rate: f64) -> Self {
        Self::exponential((sample_rate * seconds) as usize, decay)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Materialized taps.
    pub fn taps(&self) -> Vec<f64> {
        (0..self.len)
            .map(|k| self.h0 * self.ratio.powi(k as i32))
            .collect()
    }

    /// `convolve(signal, taps)` truncated to `signal.len()`.
    pub fn convolve(&self, signal: &[f64]) -> Vec<f64> {
        if self.len == 0 {
            return vec![0.0; signal.len()];
        }
        let tail_gain = self.h0 * self.ratio.powi(self.len as i32);
        let mut out = Vec::with_capacity(signal.len());
        let mut acc = 0.0_f64;
        for (n, &x) in signal.iter().enumerate() {
            acc = self.ratio * acc + self.h0 * x;
            if n >= self.len {
                acc -= tail_gain * signal[n - self.len];
            }
            out.push(acc);
        }
        out
    }
}

/// Blend `buffer` with its convolution by a 0.3 s decaying impulse.
///
/// Output is `(1 - amount)·dry + amount·wet` and has the input's length.
pub fn add_reverb(buffer: &[f64], sample_rate: f64, amount: f64) -> Vec<f64> {
    let ir = ImpulseResponse::for_tail(0.3, 3.0, sample_rate);
    add_reverb_with(buffer, &ir, amount)
}

/// [`add_reverb`] with an explicit impulse.
pub fn add_reverb_with(buffer: &[f64], ir: &ImpulseResponse, amount: f64) -> Vec<f64> {
    let wet = ir.convolve(buffer);
    buffer
        .iter()
        .zip(wet.iter())
        .map(|(&dry, &wet)| (1.0 - amount) * dry + amount * wet)
        .collect()
}
