//! Rule-based recommendation engine
//!
//! Five independent evaluators read trailing windows of stored history,
//! compute an aggregate and emit at most one advisory each. An empty window
//! is a normal "no signal" outcome, never an error; only genuine store
//! failures propagate. The engine persists nothing -- writing the returned
//! advisories to a store is the caller's concern.

use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;

use crate::error::StoreError;
use crate::store::{GoalStore, MetricStore};
use crate::types::{Advisory, AdvisoryCategory, MetricType, StoredSample};

/// Daily hydration target (ml).
const DAILY_WATER_TARGET_ML: f64 = 2000.0;

/// Recommended nightly sleep (hours).
const RECOMMENDED_SLEEP_HOURS: f64 = 7.5;

/// Baseline daily steps considered healthy without an explicit goal.
const BASELINE_DAILY_STEPS: f64 = 5000.0;

/// Weight change over the trend window that warrants attention (kg).
const WEIGHT_TREND_THRESHOLD_KG: f64 = 2.0;

/// Evaluates behavioral rules over recent metric history.
pub struct AdvisoryEngine {
    metrics: Arc<dyn MetricStore>,
    goals: Arc<dyn GoalStore>,
}

impl AdvisoryEngine {
    pub fn new(metrics: Arc<dyn MetricStore>, goals: Arc<dyn GoalStore>) -> Self {
        Self { metrics, goals }
    }

    /// Run all five evaluators against history ending now.
    ///
    /// Overlapping advisories are intentional: the plain low-activity rule
    /// and the combined activity rule may both fire for the same user, as
    /// independent signals.
    pub async fn generate(&self) -> Result<Vec<Advisory>, StoreError> {
        self.generate_at(Utc::now()).await
    }

    /// [`Self::generate`] with an explicit reference instant.
    pub async fn generate_at(&self, now: DateTime<Utc>) -> Result<Vec<Advisory>, StoreError> {
        let mut advisories = Vec::new();

        for advisory in [
            self.analyze_steps(now).await?,
            self.analyze_water(now).await?,
            self.analyze_sleep(now).await?,
            self.analyze_weight(now).await?,
            self.analyze_activity(now).await?,
        ] {
            advisories.extend(advisory);
        }

        Ok(advisories)
    }

    /// Mean daily steps over the past week against the steps goal, falling
    /// back to a generic low-activity advisory when no goal exists.
    async fn analyze_steps(&self, now: DateTime<Utc>) -> Result<Option<Advisory>, StoreError> {
        let samples = self
            .metrics
            .query(Some(MetricType::Steps), Some(now - Duration::days(7)), Some(now))
            .await?;
        let Some(avg_steps) = mean(&samples) else {
            return Ok(None);
        };

        let steps_goal = self
            .goals
            .list()
            .await?
            .into_iter()
            .find(|g| g.goal.metric_type == MetricType::Steps);

        if let Some(goal) = steps_goal {
            if avg_steps < goal.goal.target_value * 0.8 {
                let increase = (goal.goal.target_value * 0.15).round();
                return Ok(Some(Advisory {
                    title: "Increase your daily activity".into(),
                    description: format!(
                        "Your average activity is {} steps. An increase of {increase} steps \
                         would put the goal within reach.",
                        avg_steps.round()
                    ),
                    category: AdvisoryCategory::Exercise,
                    priority: 2,
                    completed: false,
                    created_at: now,
                }));
            }
        }

        if avg_steps < BASELINE_DAILY_STEPS {
            return Ok(Some(Advisory {
                title: "Move more".into(),
                description: format!(
                    "Your activity is below the recommended baseline. Aim for at least \
                     {BASELINE_DAILY_STEPS} steps a day."
                ),
                category: AdvisoryCategory::Exercise,
                priority: 3,
                completed: false,
                created_at: now,
            }));
        }

        Ok(None)
    }

    /// Today's total intake against the daily hydration target.
    async fn analyze_water(&self, now: DateTime<Utc>) -> Result<Option<Advisory>, StoreError> {
        let midnight = now
            .date_naive()
            .and_hms_opt(0, 0, 0)
            .expect("midnight is a valid wall-clock time")
            .and_utc();
        let samples = self
            .metrics
            .query(Some(MetricType::Water), Some(midnight), Some(now))
            .await?;
        if samples.is_empty() {
            return Ok(None);
        }

        let today_water: f64 = samples.iter().map(StoredSample::value).sum();
        if today_water < DAILY_WATER_TARGET_ML * 0.7 {
            let needed = DAILY_WATER_TARGET_ML - today_water;
            return Ok(Some(Advisory {
                title: "Drink more water".into(),
                description: format!(
                    "You drank {}ml today. Another {}ml would reach the daily target.",
                    today_water.round(),
                    needed.round()
                ),
                category: AdvisoryCategory::Nutrition,
                priority: 2,
                completed: false,
                created_at: now,
            }));
        }

        Ok(None)
    }

    /// Mean sleep duration over the past week against the recommended night.
    async fn analyze_sleep(&self, now: DateTime<Utc>) -> Result<Option<Advisory>, StoreError> {
        let samples = self
            .metrics
            .query(
                Some(MetricType::SleepDuration),
                Some(now - Duration::days(7)),
                Some(now),
            )
            .await?;
        let Some(avg_sleep) = mean(&samples) else {
            return Ok(None);
        };

        if avg_sleep < RECOMMENDED_SLEEP_HOURS - 1.0 {
            let shift_minutes = ((RECOMMENDED_SLEEP_HOURS - avg_sleep) * 60.0).round();
            return Ok(Some(Advisory {
                title: "Improve your sleep schedule".into(),
                description: format!(
                    "You average {avg_sleep:.1} hours of sleep. Going to bed {shift_minutes} \
                     minutes earlier would restore a full night."
                ),
                category: AdvisoryCategory::Sleep,
                priority: 2,
                completed: false,
                created_at: now,
            }));
        }

        Ok(None)
    }

    /// Oldest-vs-newest weight over the past month; needs at least two
    /// samples to call a trend.
    async fn analyze_weight(&self, now: DateTime<Utc>) -> Result<Option<Advisory>, StoreError> {
        let samples = self
            .metrics
            .query(
                Some(MetricType::Weight),
                Some(now - Duration::days(30)),
                Some(now),
            )
            .await?;
        if samples.len() < 2 {
            return Ok(None);
        }

        // Query returns newest first.
        let newest = samples.first().map(StoredSample::value).unwrap_or_default();
        let oldest = samples.last().map(StoredSample::value).unwrap_or_default();
        let change = newest - oldest;

        if change.abs() > WEIGHT_TREND_THRESHOLD_KG {
            let direction = if change > 0.0 { "gain" } else { "loss" };
            return Ok(Some(Advisory {
                title: format!("Weight trend: {direction}"),
                description: format!(
                    "Your weight changed by {:.1} kg over the last month. Consider \
                     checking in with a specialist.",
                    change.abs()
                ),
                category: AdvisoryCategory::General,
                priority: 1,
                completed: false,
                created_at: now,
            }));
        }

        Ok(None)
    }

    /// Combined low-steps, low-heart-rate signal over the past week.
    async fn analyze_activity(&self, now: DateTime<Utc>) -> Result<Option<Advisory>, StoreError> {
        let week_ago = now - Duration::days(7);
        let steps = self
            .metrics
            .query(Some(MetricType::Steps), Some(week_ago), Some(now))
            .await?;
        let heart_rate = self
            .metrics
            .query(Some(MetricType::HeartRate), Some(week_ago), Some(now))
            .await?;

        let (Some(avg_steps), Some(avg_heart_rate)) = (mean(&steps), mean(&heart_rate)) else {
            return Ok(None);
        };

        if avg_steps < 6000.0 && avg_heart_rate < 70.0 {
            return Ok(Some(Advisory {
                title: "Start regular training".into(),
                description: "Your readings point to low overall activity. Regular training \
                              improves both health and mood."
                    .into(),
                category: AdvisoryCategory::Exercise,
                priority: 2,
                completed: false,
                created_at: now,
            }));
        }

        Ok(None)
    }
}

fn mean(samples: &[StoredSample]) -> Option<f64> {
    if samples.is_empty() {
        return None;
    }
    Some(samples.iter().map(StoredSample::value).sum::<f64>() / samples.len() as f64)
}
