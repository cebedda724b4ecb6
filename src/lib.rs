pub mod config;
pub mod dsp;
pub mod error;
pub mod output;
pub mod score;

use crate::config::RenderConfig;
use crate::dsp::engine::LofiEngine;
use crate::error::Result;
use crate::score::Score;

/// The crate version, read from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Render the built-in progression with `config` to mono i16 samples.
pub fn render_loop(config: RenderConfig) -> Result<Vec<i16>> {
    LofiEngine::new(config, Score::lofi()?)?.render()
}

/// Render the built-in progression with `config` to a WAV byte array.
pub fn render_loop_wav(config: RenderConfig) -> Result<Vec<u8>> {
    let samples = render_loop(config)?;
    dsp::renderer::encode_wav(&samples, config.sample_rate)
}
