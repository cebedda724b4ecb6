//! Audio Engine — renders a [`Score`] to mono 16-bit PCM.
//!
//! The pipeline runs strictly forward: sequencer → tone generators →
//! lowpass → reverb → noise on the chord track, then drums and bass are
//! summed in by the mixer, which normalizes and quantizes the result.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::RenderConfig;
use crate::error::Result;
use crate::score::Score;

use super::drums::{generate_drum_pattern, tile_to_length};
use super::filter::lowpass_filter;
use super::mixer::Mixer;
use super::noise::add_white_noise;
use super::reverb::{ImpulseResponse, add_reverb_with};
use super::sequencer::Sequencer;

/// The offline rendering engine.
#[derive(Debug, Clone)]
pub struct LofiEngine {
    config: RenderConfig,
    score: Score,
}

impl LofiEngine {
    /// Validate `config` and pair it with `score`.
    pub fn new(config: RenderConfig, score: Score) -> Result<Self> {
        config.validate()?;
        Ok(LofiEngine { config, score })
    }

    /// The built-in loop with the default configuration.
    pub fn lofi() -> Result<Self> {
        Self::new(RenderConfig::default(), Score::lofi()?)
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn score(&self) -> &Score {
        &self.score
    }

    /// Render with an RNG seeded from the config (or the OS when unseeded).
    pub fn render(&self) -> Result<Vec<i16>> {
        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        self.render_with_rng(&mut rng)
    }

    /// Render drawing snare and hiss noise from `rng`.
    pub fn render_with_rng<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Vec<i16>> {
        let cfg = &self.config;
        let sr = cfg.sample_rate_hz();

        let tracks = Sequencer::new(&self.score, cfg.tempo, sr).render()?;
        tracing::debug!(samples = tracks.len(), "sequenced chord and bass tracks");

        let chords = self.process_chords(&tracks.chords, rng)?;

        let beat = cfg.tempo.seconds_per_beat();
        let cycle = generate_drum_pattern(sr, beat, cfg.drums.pattern, rng);
        let drums = tile_to_length(&cycle, chords.len());
        tracing::debug!(
            cycle = cycle.len(),
            repeats = chords.len() as f64 / cycle.len().max(1) as f64,
            "tiled drum cycle"
        );

        let mut mixer = Mixer::new(chords.len());
        mixer.add_layer("chords", &chords, cfg.mix.chords)?;
        mixer.add_layer("drums", &drums, cfg.mix.drums)?;
        mixer.add_layer("bass", &tracks.bass, cfg.mix.bass)?;
        let pcm = mixer.render_pcm_i16();

        tracing::info!(
            samples = pcm.len(),
            seconds = pcm.len() as f64 / sr,
            chords = self.score.progression().len(),
            "rendered loop"
        );
        Ok(pcm)
    }

    /// Lowpass, reverb and hiss, in that order.
    fn process_chords<R: Rng + ?Sized>(&self, chords: &[f64], rng: &mut R) -> Result<Vec<f64>> {
        let cfg = &self.config;
        let sr = cfg.sample_rate_hz();

        let filtered = lowpass_filter(chords, cfg.filter.cutoff_hz, sr, cfg.filter.order)?;
        let ir = ImpulseResponse::for_tail(cfg.reverb.tail_seconds, cfg.reverb.decay, sr);
        let wet = add_reverb_with(&filtered, &ir, cfg.reverb.amount);
        Ok(add_white_noise(&wet, cfg.noise.level, rng))
    }
}
