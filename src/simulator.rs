//! Daily orchestration
//!
//! [`VitalsSimulator`] composes every per-metric generator for one calendar
//! date into a complete sample set, and produces the lighter "current
//! readings" subset used by the continuous sampling tick.
//!
//! Generators are independent of each other except the weight walk (whose
//! state lives here across calls) and the derived distance/BMI samples,
//! which are computed from the steps and weight values of the same call.

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::archetype::Archetype;
use crate::generators::weight::{WeightGenerator, DEFAULT_HEIGHT_CM};
use crate::generators::{calories, heart_rate, sleep, steps, water, weight};
use crate::rng::uniform_in;
use crate::types::{DataSource, MetricSample, MetricType};

/// Breathing rate bounds (breaths/min), drawn uniformly with no archetype
/// dependence -- a documented simplification.
const BREATHING_RANGE: (f64, f64) = (12.0, 17.0);

/// Stress level bounds on a 0-100 scale, same simplification.
const STRESS_RANGE: (f64, f64) = (20.0, 60.0);

/// Synthesizes a full day of plausible metric samples for one archetype.
pub struct VitalsSimulator {
    archetype: Archetype,
    height_cm: f64,
    weight: WeightGenerator,
    rng: StdRng,
}

impl VitalsSimulator {
    /// Create a simulator with an OS-seeded randomness source.
    pub fn new(archetype: Archetype) -> Self {
        Self::with_rng(archetype, StdRng::from_entropy())
    }

    /// Create a simulator with a fixed seed for reproducible output.
    pub fn with_seed(archetype: Archetype, seed: u64) -> Self {
        Self::with_rng(archetype, StdRng::seed_from_u64(seed))
    }

    fn with_rng(archetype: Archetype, rng: StdRng) -> Self {
        Self {
            archetype,
            height_cm: DEFAULT_HEIGHT_CM,
            weight: WeightGenerator::new(archetype.profile().weight),
            rng,
        }
    }

    pub fn archetype(&self) -> Archetype {
        self.archetype
    }

    /// Swap the archetype, rebuilding all dependent generator state in one
    /// step so no generation mixes parameters from two archetypes.
    pub fn set_archetype(&mut self, archetype: Archetype) {
        self.archetype = archetype;
        self.weight = WeightGenerator::new(archetype.profile().weight);
    }

    /// Height used for the derived BMI sample.
    pub fn set_height_cm(&mut self, height_cm: f64) {
        self.height_cm = height_cm;
    }

    /// Generate the complete sample set for one calendar date.
    ///
    /// 24 hourly heart-rate samples, one sample per remaining daily metric,
    /// the distance and BMI values derived from this call's steps and weight,
    /// and the two direct uniform draws (breathing rate, stress level). Every
    /// sample is stamped with `source`.
    pub fn generate_daily(&mut self, date: DateTime<Utc>, source: DataSource) -> Vec<MetricSample> {
        let profile = self.archetype.profile();
        let mut samples = Vec::with_capacity(34);

        samples.extend(heart_rate::generate_daily(
            &profile.heart_rate,
            date,
            source,
            &mut self.rng,
        ));

        let steps_sample = steps::generate_daily(&profile.steps, date, source, &mut self.rng);
        samples.push(steps::distance_from_steps(steps_sample.value, date, source));
        samples.push(steps_sample);

        samples.extend(sleep::generate(&profile.sleep, date, source, &mut self.rng));

        let weight_sample = self.weight.generate(date, source, &mut self.rng);
        samples.push(weight::bmi_sample(
            weight_sample.value,
            self.height_cm,
            date,
            source,
        ));
        samples.push(weight_sample);

        samples.push(water::generate_daily(
            &profile.water,
            date,
            source,
            &mut self.rng,
        ));
        samples.push(calories::generate_daily(
            &profile.calories,
            date,
            source,
            &mut self.rng,
        ));

        samples.push(self.direct_draw(MetricType::BreathingRate, BREATHING_RANGE, date, source));
        samples.push(self.direct_draw(MetricType::StressLevel, STRESS_RANGE, date, source));

        samples
    }

    /// Generate the near-real-time subset: one heart-rate reading plus the
    /// day's steps, water and calories values, timestamped now.
    pub fn generate_current_readings(&mut self, source: DataSource) -> Vec<MetricSample> {
        self.generate_current_readings_at(Utc::now(), source)
    }

    /// Same as [`Self::generate_current_readings`] with an explicit instant.
    pub fn generate_current_readings_at(
        &mut self,
        now: DateTime<Utc>,
        source: DataSource,
    ) -> Vec<MetricSample> {
        let profile = self.archetype.profile();
        vec![
            heart_rate::single_reading(&profile.heart_rate, now, source, &mut self.rng),
            steps::generate_daily(&profile.steps, now, source, &mut self.rng),
            water::generate_daily(&profile.water, now, source, &mut self.rng),
            calories::generate_daily(&profile.calories, now, source, &mut self.rng),
        ]
    }

    fn direct_draw(
        &mut self,
        metric_type: MetricType,
        (min, max): (f64, f64),
        timestamp: DateTime<Utc>,
        source: DataSource,
    ) -> MetricSample {
        let value = uniform_in(&mut self.rng, min, max).round();
        MetricSample::new(metric_type, value, timestamp, source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn test_date() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 13, 12, 0, 0).unwrap()
    }

    fn count_of(samples: &[MetricSample], metric: MetricType) -> usize {
        samples.iter().filter(|s| s.metric_type == metric).count()
    }

    #[test]
    fn test_daily_sample_composition() {
        let mut sim = VitalsSimulator::with_seed(Archetype::Active, 1);
        let samples = sim.generate_daily(test_date(), DataSource::Simulation);

        assert_eq!(samples.len(), 34);
        assert_eq!(count_of(&samples, MetricType::HeartRate), 24);
        for metric in [
            MetricType::Steps,
            MetricType::Distance,
            MetricType::SleepDuration,
            MetricType::SleepQuality,
            MetricType::Weight,
            MetricType::Bmi,
            MetricType::Water,
            MetricType::Calories,
            MetricType::BreathingRate,
            MetricType::StressLevel,
        ] {
            assert_eq!(count_of(&samples, metric), 1, "{metric:?}");
        }
    }

    #[test]
    fn test_source_stamped_on_every_sample() {
        let mut sim = VitalsSimulator::with_seed(Archetype::Recovery, 2);
        let samples = sim.generate_daily(test_date(), DataSource::ImsitWatch);
        assert!(samples.iter().all(|s| s.source == DataSource::ImsitWatch));
    }

    #[test]
    fn test_distance_derived_from_this_days_steps() {
        let mut sim = VitalsSimulator::with_seed(Archetype::Athlete, 3);
        let samples = sim.generate_daily(test_date(), DataSource::Simulation);
        let steps = samples
            .iter()
            .find(|s| s.metric_type == MetricType::Steps)
            .unwrap();
        let distance = samples
            .iter()
            .find(|s| s.metric_type == MetricType::Distance)
            .unwrap();
        assert_eq!(distance.value, (steps.value * 0.0007 * 100.0).round() / 100.0);
    }

    #[test]
    fn test_seeded_runs_are_identical() {
        let mut a = VitalsSimulator::with_seed(Archetype::Active, 42);
        let mut b = VitalsSimulator::with_seed(Archetype::Active, 42);
        assert_eq!(
            a.generate_daily(test_date(), DataSource::Simulation),
            b.generate_daily(test_date(), DataSource::Simulation)
        );
    }

    #[test]
    fn test_weight_walk_persists_across_days() {
        let mut sim = VitalsSimulator::with_seed(Archetype::Active, 5);
        let first = sim.generate_daily(test_date(), DataSource::Simulation);
        let second = sim.generate_daily(test_date(), DataSource::Simulation);
        let weight_of = |samples: &[MetricSample]| {
            samples
                .iter()
                .find(|s| s.metric_type == MetricType::Weight)
                .unwrap()
                .value
        };
        // Bounded daily step, not a fresh draw from the whole range.
        assert!((weight_of(&first) - weight_of(&second)).abs() < 1.8);
    }

    #[test]
    fn test_set_archetype_resets_weight_walk() {
        let mut sim = VitalsSimulator::with_seed(Archetype::Sedentary, 6);
        sim.generate_daily(test_date(), DataSource::Simulation);
        sim.set_archetype(Archetype::Athlete);
        // Walk restarts from the new archetype's base.
        let profile = Archetype::Athlete.profile();
        let samples = sim.generate_daily(test_date(), DataSource::Simulation);
        let weight = samples
            .iter()
            .find(|s| s.metric_type == MetricType::Weight)
            .unwrap()
            .value;
        assert!(weight >= profile.weight.min && weight <= profile.weight.max);
        assert!((weight - profile.weight.base).abs() < 1.8);
    }

    #[test]
    fn test_current_readings_subset() {
        let mut sim = VitalsSimulator::with_seed(Archetype::Active, 7);
        let readings = sim.generate_current_readings_at(test_date(), DataSource::Device);
        let metrics: Vec<MetricType> = readings.iter().map(|s| s.metric_type).collect();
        assert_eq!(
            metrics,
            vec![
                MetricType::HeartRate,
                MetricType::Steps,
                MetricType::Water,
                MetricType::Calories
            ]
        );
        assert!(readings.iter().all(|s| s.timestamp == test_date()));
        assert!(readings.iter().all(|s| s.source == DataSource::Device));
    }

    #[test]
    fn test_breathing_and_stress_bounds() {
        let mut sim = VitalsSimulator::with_seed(Archetype::Sedentary, 8);
        for _ in 0..200 {
            let samples = sim.generate_daily(test_date(), DataSource::Simulation);
            let breathing = samples
                .iter()
                .find(|s| s.metric_type == MetricType::BreathingRate)
                .unwrap()
                .value;
            let stress = samples
                .iter()
                .find(|s| s.metric_type == MetricType::StressLevel)
                .unwrap()
                .value;
            assert!((12.0..=17.0).contains(&breathing));
            assert!((20.0..=60.0).contains(&stress));
        }
    }
}
