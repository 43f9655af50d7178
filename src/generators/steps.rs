//! Step count and derived distance generation

use chrono::{DateTime, Utc};
use rand::Rng;

use crate::archetype::MetricParams;
use crate::rng::{chance, uniform_in};
use crate::types::{DataSource, MetricSample, MetricType};

/// Average stride of ~0.7m expressed as kilometres per step.
pub const KM_PER_STEP: f64 = 0.0007;

/// Weekend activity damping.
const WEEKEND_FACTOR: f64 = 0.7;

/// Probability and size of an "active day" surge, applied after the weekend
/// factor so the two can combine.
const SURGE_PROBABILITY: f64 = 0.2;
const SURGE_FACTOR: f64 = 1.3;

/// Generate the daily step count.
pub fn generate_daily<R: Rng + ?Sized>(
    params: &MetricParams,
    date: DateTime<Utc>,
    source: DataSource,
    rng: &mut R,
) -> MetricSample {
    let mut steps = uniform_in(rng, params.min, params.max);

    if super::is_weekend(&date) {
        steps *= WEEKEND_FACTOR;
    }
    if chance(rng, SURGE_PROBABILITY) {
        steps *= SURGE_FACTOR;
    }

    // Modulation factors may push past the archetype range; the range is the
    // contract, so clamp before rounding.
    steps = params.clamp(steps);

    MetricSample::new(MetricType::Steps, steps.round(), date, source)
}

/// Derive distance (km, 2 decimals) from a step count.
///
/// Deterministic: `km = steps * 0.0007`, no randomness involved.
pub fn distance_from_steps(
    steps: f64,
    timestamp: DateTime<Utc>,
    source: DataSource,
) -> MetricSample {
    let km = (steps * KM_PER_STEP * 100.0).round() / 100.0;
    MetricSample::new(MetricType::Distance, km, timestamp, source)
}
