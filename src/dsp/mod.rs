//! DSP Engine — offline synthesis, effects and mixing for the lofi loop.
//!
//! Every stage is a pure function over whole `f64` sample buffers except
//! for the two noise sources, which draw from an injected RNG.

pub mod drums;
pub mod engine;
pub mod filter;
pub mod mixer;
pub mod noise;
pub mod oscillator;
pub mod renderer;
pub mod reverb;
pub mod sequencer;
