//! Core types for the vitalsim engine
//!
//! This module defines the data that flows through the engine: metric samples
//! produced by the generators, goals and advisories consumed and emitted by
//! the recommendation rules, and the store-assigned record wrappers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Health metric identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricType {
    HeartRate,
    Steps,
    Distance,
    Weight,
    Bmi,
    Water,
    Calories,
    SleepDuration,
    SleepQuality,
    BreathingRate,
    StressLevel,
    Activity,
}

impl MetricType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricType::HeartRate => "heart_rate",
            MetricType::Steps => "steps",
            MetricType::Distance => "distance",
            MetricType::Weight => "weight",
            MetricType::Bmi => "bmi",
            MetricType::Water => "water",
            MetricType::Calories => "calories",
            MetricType::SleepDuration => "sleep_duration",
            MetricType::SleepQuality => "sleep_quality",
            MetricType::BreathingRate => "breathing_rate",
            MetricType::StressLevel => "stress_level",
            MetricType::Activity => "activity",
        }
    }

    /// Metrics that are re-inserted on intra-day scheduler ticks instead of
    /// deduplicated (they genuinely change over the course of a day).
    pub fn is_volatile(&self) -> bool {
        matches!(self, MetricType::HeartRate | MetricType::Steps)
    }
}

/// Label describing where a sample came from.
///
/// Stamped onto every generated sample; it does not change generator math.
/// `Device` and `ImsitWatch` exist as a seam for future real-device input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataSource {
    Simulation,
    Device,
    ImsitWatch,
}

impl DataSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataSource::Simulation => "simulation",
            DataSource::Device => "device",
            DataSource::ImsitWatch => "imsit_watch",
        }
    }

    /// Human-readable label for UI surfaces.
    pub fn display_name(&self) -> &'static str {
        match self {
            DataSource::Simulation => "Simulation",
            DataSource::Device => "Device",
            DataSource::ImsitWatch => "IMSIT Watch",
        }
    }
}

impl Default for DataSource {
    fn default() -> Self {
        DataSource::Simulation
    }
}

/// One timestamped metric reading.
///
/// Samples are immutable after creation; identity is assigned by the store
/// on insert (see [`StoredSample`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricSample {
    pub metric_type: MetricType,
    pub value: f64,
    pub timestamp: DateTime<Utc>,
    pub source: DataSource,
}

impl MetricSample {
    pub fn new(
        metric_type: MetricType,
        value: f64,
        timestamp: DateTime<Utc>,
        source: DataSource,
    ) -> Self {
        Self {
            metric_type,
            value,
            timestamp,
            source,
        }
    }
}

/// A metric sample as returned from the store, with its assigned identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredSample {
    pub id: Uuid,
    #[serde(flatten)]
    pub sample: MetricSample,
}

impl StoredSample {
    pub fn metric_type(&self) -> MetricType {
        self.sample.metric_type
    }

    pub fn value(&self) -> f64 {
        self.sample.value
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.sample.timestamp
    }
}

/// A user goal for one metric type.
///
/// One goal per metric type is the expected usage; the recommendation rules
/// look goals up by type, not by identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub metric_type: MetricType,
    pub target_value: f64,
    #[serde(default)]
    pub current_value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<DateTime<Utc>>,
    #[serde(default)]
    pub achieved: bool,
}

/// A goal as returned from the store, with its assigned identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredGoal {
    pub id: Uuid,
    #[serde(flatten)]
    pub goal: Goal,
}

/// Partial update for a stored goal.
///
/// Only progress fields are mutable; target and type are fixed at creation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GoalUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub achieved: Option<bool>,
}

/// Advisory category used for grouping and display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdvisoryCategory {
    Exercise,
    Nutrition,
    Sleep,
    General,
}

impl AdvisoryCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdvisoryCategory::Exercise => "exercise",
            AdvisoryCategory::Nutrition => "nutrition",
            AdvisoryCategory::Sleep => "sleep",
            AdvisoryCategory::General => "general",
        }
    }
}

/// A behavioral advisory produced by the recommendation engine.
///
/// Created only by the engine; after that the only mutation is flipping
/// `completed` through the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Advisory {
    pub title: String,
    pub description: String,
    pub category: AdvisoryCategory,
    /// Higher numbers sort first when listing.
    pub priority: i32,
    #[serde(default)]
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

/// An advisory as returned from the store, with its assigned identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredAdvisory {
    pub id: Uuid,
    #[serde(flatten)]
    pub advisory: Advisory,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_metric_type_serde_labels() {
        let json = serde_json::to_string(&MetricType::HeartRate).unwrap();
        assert_eq!(json, "\"heart_rate\"");
        let back: MetricType = serde_json::from_str("\"sleep_duration\"").unwrap();
        assert_eq!(back, MetricType::SleepDuration);
        assert_eq!(MetricType::SleepDuration.as_str(), "sleep_duration");
    }

    #[test]
    fn test_volatile_metrics() {
        assert!(MetricType::HeartRate.is_volatile());
        assert!(MetricType::Steps.is_volatile());
        assert!(!MetricType::Water.is_volatile());
        assert!(!MetricType::Weight.is_volatile());
    }

    #[test]
    fn test_data_source_labels() {
        assert_eq!(DataSource::ImsitWatch.as_str(), "imsit_watch");
        assert_eq!(DataSource::ImsitWatch.display_name(), "IMSIT Watch");
        assert_eq!(DataSource::default(), DataSource::Simulation);
    }

    #[test]
    fn test_sample_roundtrip() {
        let sample = MetricSample::new(
            MetricType::Water,
            1850.0,
            Utc::now(),
            DataSource::Simulation,
        );
        let json = serde_json::to_string(&sample).unwrap();
        let back: MetricSample = serde_json::from_str(&json).unwrap();
        assert_eq!(sample, back);
    }

    #[test]
    fn test_stored_sample_flattens() {
        let stored = StoredSample {
            id: Uuid::new_v4(),
            sample: MetricSample::new(MetricType::Steps, 8200.0, Utc::now(), DataSource::Device),
        };
        let value: serde_json::Value = serde_json::to_value(&stored).unwrap();
        // Flattened: sample fields sit next to the id, not nested.
        assert_eq!(value["metric_type"], "steps");
        assert_eq!(value["value"], 8200.0);
        assert!(value.get("sample").is_none());
    }
}
