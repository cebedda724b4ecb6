//! Renders the lofi chord loop to `progression_lofi.wav` on the desktop.

use anyhow::{Context, Result};
use lofi_progression::dsp::engine::LofiEngine;
use lofi_progression::dsp::renderer::write_wav;
use lofi_progression::output::default_output_path;

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let output = default_output_path().context("locating the desktop directory")?;

    let engine = LofiEngine::lofi().context("building the lofi score")?;
    let samples = engine.render().context("rendering the loop")?;

    write_wav(&output, &samples, engine.config().sample_rate)
        .with_context(|| format!("writing {}", output.display()))?;

    tracing::info!("Saved {} ({} samples)", output.display(), samples.len());
    Ok(())
}
