//! Sleep duration and quality generation
//!
//! Sleep reflects the prior night, so both samples are timestamped at the
//! previous calendar midnight relative to the input date.

use chrono::{DateTime, Days, Utc};
use rand::Rng;

use crate::archetype::MetricParams;
use crate::rng::gaussian;
use crate::types::{DataSource, MetricSample, MetricType};

const QUALITY_MEAN: f64 = 75.0;
const QUALITY_STD_DEV: f64 = 10.0;
const QUALITY_MIN: f64 = 50.0;
const QUALITY_MAX: f64 = 100.0;

/// Quality bonus when the night ran longer than the archetype base.
/// Applied after clamping, so quality may reach 105.
const LONG_SLEEP_BONUS: f64 = 5.0;

/// Generate the duration and quality samples for the night before `date`.
pub fn generate<R: Rng + ?Sized>(
    params: &MetricParams,
    date: DateTime<Utc>,
    source: DataSource,
    rng: &mut R,
) -> Vec<MetricSample> {
    let duration = params.clamp(gaussian(rng, params.base, 0.5));

    let mut quality = gaussian(rng, QUALITY_MEAN, QUALITY_STD_DEV).clamp(QUALITY_MIN, QUALITY_MAX);
    // Longer sleep correlates with better quality.
    if duration > params.base {
        quality += LONG_SLEEP_BONUS;
    }

    let night = date
        .date_naive()
        .checked_sub_days(Days::new(1))
        .unwrap_or_else(|| date.date_naive());
    let timestamp = super::midnight_utc(night);

    vec![
        MetricSample::new(
            MetricType::SleepDuration,
            (duration * 10.0).round() / 10.0,
            timestamp,
            source,
        ),
        MetricSample::new(MetricType::SleepQuality, quality.round(), timestamp, source),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archetype::Archetype;
    use chrono::{TimeZone, Timelike};
    use pretty_assertions::assert_eq;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn test_date() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 13, 15, 30, 0).unwrap()
    }

    #[test]
    fn test_two_samples_at_previous_midnight() {
        let params = Archetype::Active.profile().sleep;
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let samples = generate(&params, test_date(), DataSource::Simulation, &mut rng);
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].metric_type, MetricType::SleepDuration);
        assert_eq!(samples[1].metric_type, MetricType::SleepQuality);
        for sample in &samples {
            assert_eq!(
                sample.timestamp.date_naive(),
                test_date().date_naive().pred_opt().unwrap()
            );
            assert_eq!(sample.timestamp.hour(), 0);
            assert_eq!(sample.timestamp.minute(), 0);
        }
    }

    #[test]
    fn test_duration_bounded_quality_bounded_with_bonus() {
        for archetype in Archetype::ALL {
            let params = archetype.profile().sleep;
            let mut rng = ChaCha8Rng::seed_from_u64(31);
            for _ in 0..5000 {
                let samples = generate(&params, test_date(), DataSource::Simulation, &mut rng);
                let duration = samples[0].value;
                let quality = samples[1].value;
                assert!(
                    duration >= params.min && duration <= params.max,
                    "{archetype:?}: duration {duration} outside range"
                );
                assert!(
                    (QUALITY_MIN..=QUALITY_MAX + LONG_SLEEP_BONUS).contains(&quality),
                    "{archetype:?}: quality {quality} outside [50, 105]"
                );
            }
        }
    }

    #[test]
    fn test_duration_one_decimal() {
        let params = Archetype::Athlete.profile().sleep;
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        for _ in 0..100 {
            let duration = generate(&params, test_date(), DataSource::Simulation, &mut rng)[0].value;
            assert_eq!((duration * 10.0).round() / 10.0, duration);
        }
    }
}
