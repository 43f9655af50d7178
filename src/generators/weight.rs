//! Weight random walk and derived BMI
//!
//! The weight generator is the only one with memory: the walk's current
//! value carries across calls, so successive days drift instead of jumping.

use chrono::{DateTime, Utc};
use rand::Rng;

use crate::archetype::MetricParams;
use crate::rng::gaussian;
use crate::types::{DataSource, MetricSample, MetricType};

/// Daily fluctuation of the walk (kg).
const DAILY_STEP_STD_DEV: f64 = 0.3;

/// Fallback height when the user never set one.
pub const DEFAULT_HEIGHT_CM: f64 = 175.0;

/// Bounded random walk over body weight.
#[derive(Debug, Clone)]
pub struct WeightGenerator {
    params: MetricParams,
    current: f64,
}

impl WeightGenerator {
    /// Start the walk at the archetype base weight.
    pub fn new(params: MetricParams) -> Self {
        Self {
            params,
            current: params.base,
        }
    }

    /// Start the walk at a known weight (clamped into the archetype range).
    pub fn with_initial(params: MetricParams, initial: f64) -> Self {
        Self {
            params,
            current: params.clamp(initial),
        }
    }

    /// Advance the walk one step and emit the day's reading.
    pub fn generate<R: Rng + ?Sized>(
        &mut self,
        date: DateTime<Utc>,
        source: DataSource,
        rng: &mut R,
    ) -> MetricSample {
        self.current += gaussian(rng, 0.0, DAILY_STEP_STD_DEV);
        self.current = self.params.clamp(self.current);

        MetricSample::new(
            MetricType::Weight,
            (self.current * 10.0).round() / 10.0,
            date,
            source,
        )
    }

    /// The walk's current (unrounded) weight.
    pub fn current(&self) -> f64 {
        self.current
    }
}

/// Body mass index from weight (kg) and height (cm), rounded to 1 decimal.
pub fn bmi(weight_kg: f64, height_cm: f64) -> f64 {
    let height_m = height_cm / 100.0;
    (weight_kg / (height_m * height_m) * 10.0).round() / 10.0
}

/// Derived BMI sample for a weight reading.
pub fn bmi_sample(
    weight_kg: f64,
    height_cm: f64,
    timestamp: DateTime<Utc>,
    source: DataSource,
) -> MetricSample {
    MetricSample::new(MetricType::Bmi, bmi(weight_kg, height_cm), timestamp, source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archetype::Archetype;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn test_date() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 13, 8, 0, 0).unwrap()
    }

    #[test]
    fn test_walk_stays_in_range() {
        for archetype in Archetype::ALL {
            let params = archetype.profile().weight;
            let mut generator = WeightGenerator::new(params);
            let mut rng = ChaCha8Rng::seed_from_u64(13);
            for _ in 0..5000 {
                let sample = generator.generate(test_date(), DataSource::Simulation, &mut rng);
                assert!(
                    sample.value >= params.min && sample.value <= params.max,
                    "{archetype:?}: {} escaped [{}, {}]",
                    sample.value,
                    params.min,
                    params.max
                );
            }
        }
    }

    #[test]
    fn test_walk_is_stateful_and_bounded_step() {
        let params = Archetype::Active.profile().weight;
        let mut generator = WeightGenerator::new(params);
        let mut rng = ChaCha8Rng::seed_from_u64(21);

        let mut previous = generator.current();
        for _ in 0..1000 {
            generator.generate(test_date(), DataSource::Simulation, &mut rng);
            let delta = (generator.current() - previous).abs();
            // Gaussian(0, 0.3) beyond 6 sigma is effectively impossible, and
            // the clamp can only shrink a step further.
            assert!(delta < 1.8, "daily step {delta} implausibly large");
            previous = generator.current();
        }
    }

    #[test]
    fn test_next_reading_mutates_from_current() {
        let params = Archetype::Recovery.profile().weight;
        let mut generator = WeightGenerator::with_initial(params, 74.0);
        assert_eq!(generator.current(), 74.0);

        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let sample = generator.generate(test_date(), DataSource::Simulation, &mut rng);
        // Reported value is the rounded walk state.
        assert_eq!(sample.value, (generator.current() * 10.0).round() / 10.0);
    }

    #[test]
    fn test_initial_weight_clamped() {
        let params = Archetype::Active.profile().weight; // [68, 76]
        let generator = WeightGenerator::with_initial(params, 120.0);
        assert_eq!(generator.current(), 76.0);
    }

    #[test]
    fn test_bmi_formula() {
        // 72 kg at 1.75 m -> 23.510... -> 23.5
        assert_eq!(bmi(72.0, DEFAULT_HEIGHT_CM), 23.5);
        // 80 kg at 1.60 m -> 31.25 -> 31.3 (round half up away from zero)
        assert_eq!(bmi(80.0, 160.0), 31.3);
    }

    #[test]
    fn test_bmi_sample_type() {
        let sample = bmi_sample(70.0, 175.0, test_date(), DataSource::ImsitWatch);
        assert_eq!(sample.metric_type, MetricType::Bmi);
        assert_eq!(sample.source, DataSource::ImsitWatch);
        assert_eq!(sample.value, 22.9);
    }
}
