//! Per-metric sample generators
//!
//! One submodule per metric family. Every generator is a pure function of
//! `(archetype parameters, timestamp, randomness source)` and cannot fail;
//! the weight random walk is the single generator that carries state across
//! calls.
//!
//! All values are mathematically bounded: after modulation (time-of-day,
//! weekend/weekday factors, activity surges) a sample is clamped back into
//! its archetype range. The two documented exceptions are the heart-rate
//! workout spike (may exceed the range max by up to 20 bpm) and the sleep
//! quality bonus (may exceed 100 by up to 5 points).

pub mod calories;
pub mod heart_rate;
pub mod sleep;
pub mod steps;
pub mod water;
pub mod weight;

use chrono::{DateTime, Datelike, NaiveDate, Utc, Weekday};

/// Midnight UTC for a calendar date, as a timestamp.
pub(crate) fn midnight_utc(date: NaiveDate) -> DateTime<Utc> {
    date.and_hms_opt(0, 0, 0)
        .expect("midnight is a valid wall-clock time")
        .and_utc()
}

/// A specific wall-clock time on a calendar date, as a UTC timestamp.
///
/// Callers only pass `hour < 24` and `minute < 60`.
pub(crate) fn at_time(date: NaiveDate, hour: u32, minute: u32) -> DateTime<Utc> {
    date.and_hms_opt(hour, minute, 0)
        .expect("hour/minute within range")
        .and_utc()
}

/// Saturday or Sunday.
pub(crate) fn is_weekend(date: &DateTime<Utc>) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}
