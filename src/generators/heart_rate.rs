//! Heart rate generation
//!
//! Produces 24 hourly readings per day. The base rate is modulated by a
//! time-of-day multiplier, jittered with Gaussian noise and clamped to the
//! archetype range. With 10% probability during waking hours a reading is
//! replaced by a "workout spike" drawn around `base + 30`, capped at
//! `max + 20` -- the one deliberate overshoot of the nominal range.

use chrono::{DateTime, Timelike, Utc};
use rand::Rng;

use crate::archetype::MetricParams;
use crate::rng::{chance, gaussian};
use crate::types::{DataSource, MetricSample, MetricType};

/// Probability of a workout spike in any waking-hour slot.
const SPIKE_PROBABILITY: f64 = 0.10;

/// Hours (inclusive) during which workout spikes may occur.
const SPIKE_HOURS: std::ops::RangeInclusive<u32> = 8..=20;

/// How far above the archetype max a spike may reach (bpm).
pub const SPIKE_OVERSHOOT: f64 = 20.0;

/// Activity multiplier for a given hour of day.
///
/// Morning [6,9): 0.9, day [9,18): 1.1, evening [18,22): 0.95, night: 0.85.
pub fn time_of_day_multiplier(hour: u32) -> f64 {
    match hour {
        6..=8 => 0.9,
        9..=17 => 1.1,
        18..=21 => 0.95,
        _ => 0.85,
    }
}

/// Generate the full day of hourly heart-rate samples.
pub fn generate_daily<R: Rng + ?Sized>(
    params: &MetricParams,
    date: DateTime<Utc>,
    source: DataSource,
    rng: &mut R,
) -> Vec<MetricSample> {
    let day = date.date_naive();
    let mut samples = Vec::with_capacity(24);

    for hour in 0..24u32 {
        let minute = rng.gen_range(0..60);
        let timestamp = super::at_time(day, hour, minute);

        let mut rate = params.base * time_of_day_multiplier(hour);
        rate += gaussian(rng, 0.0, 5.0);
        rate = params.clamp(rate);

        // Occasional workout: override with a high reading, bounded above.
        if chance(rng, SPIKE_PROBABILITY) && SPIKE_HOURS.contains(&hour) {
            rate = gaussian(rng, params.base + 30.0, 10.0).min(params.max + SPIKE_OVERSHOOT);
        }

        samples.push(MetricSample::new(
            MetricType::HeartRate,
            rate.round(),
            timestamp,
            source,
        ));
    }

    samples
}

/// Generate one heart-rate reading for the given instant.
///
/// Used by the continuous sampling tick; never spikes.
pub fn single_reading<R: Rng + ?Sized>(
    params: &MetricParams,
    at: DateTime<Utc>,
    source: DataSource,
    rng: &mut R,
) -> MetricSample {
    let mut rate = params.base * time_of_day_multiplier(at.hour());
    rate += gaussian(rng, 0.0, 5.0);
    rate = params.clamp(rate);

    MetricSample::new(MetricType::HeartRate, rate.round(), at, source)
}
