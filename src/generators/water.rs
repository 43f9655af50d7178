//! Water intake generation

use chrono::{DateTime, Utc};
use rand::Rng;

use crate::archetype::MetricParams;
use crate::rng::uniform_in;
use crate::types::{DataSource, MetricSample, MetricType};

/// Workdays carry slightly more intake.
const WEEKDAY_FACTOR: f64 = 1.1;

/// Generate the daily water intake (ml).
pub fn generate_daily<R: Rng + ?Sized>(
    params: &MetricParams,
    date: DateTime<Utc>,
    source: DataSource,
    rng: &mut R,
) -> MetricSample {
    let mut water = uniform_in(rng, params.min, params.max);

    if !super::is_weekend(&date) {
        water *= WEEKDAY_FACTOR;
    }
    water = params.clamp(water);

    MetricSample::new(MetricType::Water, water.round(), date, source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archetype::Archetype;
    use chrono::TimeZone;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_water_within_range() {
        let weekday = Utc.with_ymd_and_hms(2024, 3, 13, 9, 0, 0).unwrap();
        let sunday = Utc.with_ymd_and_hms(2024, 3, 17, 9, 0, 0).unwrap();
        for archetype in Archetype::ALL {
            let params = archetype.profile().water;
            let mut rng = ChaCha8Rng::seed_from_u64(19);
            for date in [weekday, sunday] {
                for _ in 0..2000 {
                    let sample = generate_daily(&params, date, DataSource::Simulation, &mut rng);
                    assert!(
                        sample.value >= params.min && sample.value <= params.max,
                        "{archetype:?}: {} outside range",
                        sample.value
                    );
                    assert_eq!(sample.value, sample.value.round());
                }
            }
        }
    }

    #[test]
    fn test_weekday_boost_shifts_mean() {
        let params = Archetype::Sedentary.profile().water;
        let mut rng = ChaCha8Rng::seed_from_u64(29);
        let weekday = Utc.with_ymd_and_hms(2024, 3, 13, 9, 0, 0).unwrap();
        let sunday = Utc.with_ymd_and_hms(2024, 3, 17, 9, 0, 0).unwrap();
        let n = 5000;
        let mean_of = |date, rng: &mut ChaCha8Rng| -> f64 {
            (0..n)
                .map(|_| generate_daily(&params, date, DataSource::Simulation, rng).value)
                .sum::<f64>()
                / f64::from(n)
        };
        assert!(mean_of(weekday, &mut rng) > mean_of(sunday, &mut rng));
    }
}
