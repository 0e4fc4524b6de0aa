//! Poisson-distributed arrival counts.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Largest exponent folded into the running product at once by [`PoissonStrategy::Linear`].
const STEP: f64 = 500.0;

/// Above this rate `e^-λ` is too close to underflow for [`PoissonStrategy::Knuth`].
pub const KNUTH_MAX_LAMBDA: f64 = 700.0;

/// How arrival counts are sampled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PoissonStrategy {
    /// Multiplies uniform draws until the product drops to `e^-λ`.
    /// Fast for small λ; `e^-λ` underflows past [`KNUTH_MAX_LAMBDA`].
    #[default]
    Knuth,
    /// Same test, but `e^λ` is folded into the product in chunks of [`STEP`]
    /// so nothing underflows. Linear in λ.
    Linear,
}

impl PoissonStrategy {
    /// Draw one sample. Non-positive or NaN rates always yield 0.
    pub fn sample<R: Rng + ?Sized>(self, lambda: f64, rng: &mut R) -> u32 {
        if lambda.is_nan() || lambda <= 0.0 {
            return 0;
        }
        match self {
            PoissonStrategy::Knuth => knuth(lambda, rng),
            PoissonStrategy::Linear => linear(lambda, rng),
        }
    }
}

fn knuth<R: Rng + ?Sized>(lambda: f64, rng: &mut R) -> u32 {
    let threshold = (-lambda).exp();
    let mut k = 0u32;
    let mut p = 1.0;

    loop {
        k += 1;
        p *= rng.gen::<f64>();
        if p <= threshold {
            return k - 1;
        }
    }
}

fn linear<R: Rng + ?Sized>(lambda: f64, rng: &mut R) -> u32 {
    let mut remaining = lambda;
    let mut k = 0u32;
    let mut p = 1.0;

    loop {
        k += 1;
        p *= rng.gen::<f64>();

        while p < 1.0 && remaining > 0.0 {
            if remaining > STEP {
                p *= STEP.exp();
                remaining -= STEP;
            } else {
                p *= remaining.exp();
                remaining = 0.0;
            }
        }

        if p <= 1.0 {
            return k - 1;
        }
    }
}
