//! White noise — zero-mean Gaussian hiss drawn from an injected RNG.

use rand::Rng;
use rand_distr::{Distribution, StandardNormal};

/// Add independent N(0, noise_level²) noise to every sample.
///
/// A level of zero returns the input unchanged without consuming randomness.
pub fn add_white_noise<R: Rng + ?Sized>(buffer: &[f64], noise_level: f64, rng: &mut R) -> Vec<f64> {
    if noise_level == 0.0 {
        return buffer.to_vec();
    }
    buffer
        .iter()
        .map(|&s| {
            let z: f64 = StandardNormal.sample(&mut *rng);
            s + noise_level * z
        })
        .collect()
}
