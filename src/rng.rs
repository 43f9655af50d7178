//! Sampling primitives over an injectable randomness source
//!
//! Every generator draws through these helpers from a caller-supplied
//! [`rand::Rng`], so seeding the source makes the whole engine reproducible.

use rand::Rng;

/// Uniform draw in `[min, max)`.
pub fn uniform_in<R: Rng + ?Sized>(rng: &mut R, min: f64, max: f64) -> f64 {
    rng.gen::<f64>() * (max - min) + min
}

/// Gaussian draw via the Box-Muller transform,
/// `sqrt(-2 ln u1) * cos(2π u2)` scaled to the requested moments.
pub fn gaussian<R: Rng + ?Sized>(rng: &mut R, mean: f64, std_dev: f64) -> f64 {
    // gen() is [0, 1); flip u1 into (0, 1] so ln never sees zero.
    let u1: f64 = 1.0 - rng.gen::<f64>();
    let u2: f64 = rng.gen();
    let z0 = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
    z0 * std_dev + mean
}

/// Bernoulli trial with probability `p`.
pub fn chance<R: Rng + ?Sized>(rng: &mut R, p: f64) -> bool {
    rng.gen::<f64>() < p
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_uniform_stays_in_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..10_000 {
            let v = uniform_in(&mut rng, 1000.0, 6000.0);
            assert!((1000.0..6000.0).contains(&v));
        }
    }

    #[test]
    fn test_gaussian_moments() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let n = 50_000;
        let samples: Vec<f64> = (0..n).map(|_| gaussian(&mut rng, 75.0, 10.0)).collect();
        let mean = samples.iter().sum::<f64>() / n as f64;
        let var = samples.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / n as f64;
        assert!((mean - 75.0).abs() < 0.5, "mean drifted: {mean}");
        assert!((var.sqrt() - 10.0).abs() < 0.5, "stddev drifted: {}", var.sqrt());
    }

    #[test]
    fn test_chance_rate() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let hits = (0..10_000).filter(|_| chance(&mut rng, 0.1)).count();
        assert!((800..1200).contains(&hits), "10% rate off: {hits}");
    }

    #[test]
    fn test_seeded_reproducibility() {
        let mut a = ChaCha8Rng::seed_from_u64(99);
        let mut b = ChaCha8Rng::seed_from_u64(99);
        for _ in 0..100 {
            assert_eq!(gaussian(&mut a, 0.0, 5.0), gaussian(&mut b, 0.0, 5.0));
        }
    }
}
