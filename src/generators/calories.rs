//! Calorie expenditure generation

use chrono::{DateTime, Utc};
use rand::Rng;

use crate::archetype::MetricParams;
use crate::rng::uniform_in;
use crate::types::{DataSource, MetricSample, MetricType};

/// Weekends run slightly richer.
const WEEKEND_FACTOR: f64 = 1.05;

/// Generate the daily calorie total (kcal).
pub fn generate_daily<R: Rng + ?Sized>(
    params: &MetricParams,
    date: DateTime<Utc>,
    source: DataSource,
    rng: &mut R,
) -> MetricSample {
    let mut calories = uniform_in(rng, params.min, params.max);

    if super::is_weekend(&date) {
        calories *= WEEKEND_FACTOR;
    }
    calories = params.clamp(calories);

    MetricSample::new(MetricType::Calories, calories.round(), date, source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archetype::Archetype;
    use chrono::TimeZone;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_calories_within_range() {
        let weekday = Utc.with_ymd_and_hms(2024, 3, 14, 9, 0, 0).unwrap();
        let saturday = Utc.with_ymd_and_hms(2024, 3, 16, 9, 0, 0).unwrap();
        for archetype in Archetype::ALL {
            let params = archetype.profile().calories;
            let mut rng = ChaCha8Rng::seed_from_u64(37);
            for date in [weekday, saturday] {
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
}
