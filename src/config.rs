//! Render configuration — every constant of the loop in one immutable value.
//!
//! Built once with [`RenderConfig::default`] and passed by reference into the
//! engine. Nothing here is recomputed or mutated during a render.

use crate::dsp::drums::DrumHit;
use crate::error::{Result, SynthError};
use crate::score::Tempo;

/// Configuration for the chord-track lowpass.
#[derive(Debug, Clone, Copy)]
pub struct FilterConfig {
    /// Cutoff frequency in Hz.
    pub cutoff_hz: f64,
    /// Butterworth order.
    pub order: usize,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            cutoff_hz: 1200.0,
            order: 6,
        }
    }
}

/// Configuration for the convolution reverb.
#[derive(Debug, Clone, Copy)]
pub struct ReverbConfig {
    /// Dry/wet mix (0.0 = fully dry, 1.0 = fully wet).
    pub amount: f64,
    /// Impulse response length in seconds.
    pub tail_seconds: f64,
    /// Exponent reached at the end of the impulse (`e^{-decay}`).
    pub decay: f64,
}

impl Default for ReverbConfig {
    fn default() -> Self {
        Self {
            amount: 0.25,
            tail_seconds: 0.3,
            decay: 3.0,
        }
    }
}

/// Configuration for the additive white noise.
#[derive(Debug, Clone, Copy)]
pub struct NoiseConfig {
    /// Standard deviation of the Gaussian noise.
    pub level: f64,
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self { level: 0.005 }
    }
}

/// The repeating drum cycle; each hit occupies one beat.
#[derive(Debug, Clone, Copy)]
pub struct DrumConfig {
    pub pattern: &'static [DrumHit],
}

impl Default for DrumConfig {
    fn default() -> Self {
        Self {
            pattern: &[DrumHit::Kick, DrumHit::Snare, DrumHit::Kick, DrumHit::Snare],
        }
    }
}

/// Relative gains of the three layers in the final sum.
#[derive(Debug, Clone, Copy)]
pub struct MixLevels {
    pub chords: f64,
    pub drums: f64,
    pub bass: f64,
}

impl Default for MixLevels {
    fn default() -> Self {
        Self {
            chords: 1.0,
            drums: 0.5,
            bass: 0.7,
        }
    }
}

/// Everything the engine needs besides the score.
#[derive(Debug, Clone, Copy)]
pub struct RenderConfig {
    pub sample_rate: u32,
    pub tempo: Tempo,
    pub filter: FilterConfig,
    pub reverb: ReverbConfig,
    pub noise: NoiseConfig,
    pub drums: DrumConfig,
    pub mix: MixLevels,
    /// Seed for the snare and white-noise generators (None = OS entropy).
    pub seed: Option<u64>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            sample_rate: 44100,
            tempo: Tempo::default(),
            filter: FilterConfig::default(),
            reverb: ReverbConfig::default(),
            noise: NoiseConfig::default(),
            drums: DrumConfig::default(),
            mix: MixLevels::default(),
            seed: None,
        }
    }
}

impl RenderConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sample rate as `f64`, for time arithmetic.
    pub fn sample_rate_hz(&self) -> f64 {
        self.sample_rate as f64
    }

    /// Reject parameters that would make a stage meaningless.
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| Err(SynthError::InvalidConfig(msg));

        if self.sample_rate == 0 {
            return invalid("sample rate must be positive".into());
        }
        if !(self.tempo.bpm > 0.0) {
            return invalid(format!("bpm must be positive, got {}", self.tempo.bpm));
        }
        let nyquist = self.sample_rate_hz() / 2.0;
        if !(self.filter.cutoff_hz > 0.0 && self.filter.cutoff_hz < nyquist) {
            return invalid(format!(
                "cutoff {} Hz outside (0, {nyquist})",
                self.filter.cutoff_hz
            ));
        }
        if self.filter.order == 0 {
            return invalid("filter order must be at least 1".into());
        }
        if !(0.0..=1.0).contains(&self.reverb.amount) {
            return invalid(format!(
                "reverb amount {} outside [0, 1]",
                self.reverb.amount
            ));
        }
        if !(self.reverb.tail_seconds > 0.0) {
            return invalid("reverb tail must be positive".into());
        }
        if !(self.reverb.decay >= 0.0 && self.reverb.decay.is_finite()) {
            return invalid(format!(
                "reverb decay {} must be finite and non-negative",
                self.reverb.decay
            ));
        }
        if !(self.noise.level >= 0.0) {
            return invalid(format!("noise level {} is negative", self.noise.level));
        }
        if self.drums.pattern.is_empty() {
            return invalid("drum pattern is empty".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_loop() {
        let config = RenderConfig::default();
        assert_eq!(config.sample_rate, 44100);
        assert_eq!(config.tempo.bpm, 124.0);
        assert_eq!(config.filter.cutoff_hz, 1200.0);
        assert_eq!(config.filter.order, 6);
        assert_eq!(config.reverb.amount, 0.25);
        assert_eq!(config.noise.level, 0.005);
        assert_eq!(config.mix.drums, 0.5);
        assert_eq!(config.mix.bass, 0.7);
        assert!(config.seed.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn cutoff_above_nyquist_rejected() {
        let mut config = RenderConfig::default();
        config.filter.cutoff_hz = 30000.0;
        assert!(matches!(
            config.validate(),
            Err(SynthError::InvalidConfig(_))
        ));
    }

    #[test]
    fn reverb_amount_out_of_range_rejected() {
        let mut config = RenderConfig::default();
        config.reverb.amount = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn negative_or_infinite_reverb_decay_rejected() {
        let mut config = RenderConfig::default();
        config.reverb.decay = -3.0;
        assert!(matches!(
            config.validate(),
            Err(SynthError::InvalidConfig(_))
        ));
        config.reverb.decay = f64::INFINITY;
        assert!(config.validate().is_err());
        config.reverb.decay = 0.0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_bpm_rejected() {
        let mut config = RenderConfig::default();
        config.tempo.bpm = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn empty_drum_pattern_rejected() {
        let mut config = RenderConfig::default();
        config.drums.pattern = &[];
        assert!(config.validate().is_err());
    }

    #[test]
    fn with_seed_sets_seed() {
        let config = RenderConfig::default().with_seed(7);
        assert_eq!(config.seed, Some(7));
    }
}
