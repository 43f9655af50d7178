//! Store contracts and an in-memory reference implementation
//!
//! The engine consumes three narrow CRUD contracts; the real backing store
//! (SQLite, a sync service, ...) lives outside this crate. [`MemoryStore`]
//! implements all three over `RwLock`-protected vectors for tests, demos and
//! the CLI. Lock poisoning is surfaced as [`StoreError::Backend`] so it
//! propagates like any other backend failure.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::RwLock;
use uuid::Uuid;

use crate::error::StoreError;
use crate::types::{
    Advisory, Goal, GoalUpdate, MetricSample, MetricType, StoredAdvisory, StoredGoal, StoredSample,
};

/// Write/read contract for metric samples.
#[async_trait]
pub trait MetricStore: Send + Sync {
    /// Insert a sample and return its store-assigned identity.
    async fn insert(&self, sample: MetricSample) -> Result<Uuid, StoreError>;

    /// Query samples, newest first, optionally filtered by type and a
    /// `[start, end]` timestamp window (inclusive).
    async fn query(
        &self,
        metric_type: Option<MetricType>,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> Result<Vec<StoredSample>, StoreError>;

    /// Most recent sample of the given type, if any.
    async fn latest(&self, metric_type: MetricType) -> Result<Option<StoredSample>, StoreError>;

    /// Delete a sample by identity. Unknown ids are a no-op.
    async fn delete(&self, id: Uuid) -> Result<(), StoreError>;
}

/// Write/read contract for goals.
#[async_trait]
pub trait GoalStore: Send + Sync {
    async fn insert(&self, goal: Goal) -> Result<Uuid, StoreError>;

    /// All goals, ordered by metric type label.
    async fn list(&self) -> Result<Vec<StoredGoal>, StoreError>;

    /// Apply a partial update (progress fields only).
    async fn update(&self, id: Uuid, update: GoalUpdate) -> Result<(), StoreError>;

    async fn delete(&self, id: Uuid) -> Result<(), StoreError>;
}

/// Write/read contract for advisories.
#[async_trait]
pub trait RecommendationStore: Send + Sync {
    async fn insert(&self, advisory: Advisory) -> Result<Uuid, StoreError>;

    /// Advisories ordered by priority descending, then creation time
    /// descending; optionally filtered by completion state.
    async fn list(&self, completed: Option<bool>) -> Result<Vec<StoredAdvisory>, StoreError>;

    async fn update_completed(&self, id: Uuid, completed: bool) -> Result<(), StoreError>;

    async fn clear_all(&self) -> Result<(), StoreError>;
}

/// In-memory implementation of all three store contracts.
#[derive(Default)]
pub struct MemoryStore {
    samples: RwLock<Vec<StoredSample>>,
    goals: RwLock<Vec<StoredGoal>>,
    advisories: RwLock<Vec<StoredAdvisory>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn poisoned(which: &'static str) -> StoreError {
        StoreError::Backend(format!("RwLock poisoned: {which}"))
    }
}

#[async_trait]
impl MetricStore for MemoryStore {
    async fn insert(&self, sample: MetricSample) -> Result<Uuid, StoreError> {
        let id = Uuid::new_v4();
        self.samples
            .write()
            .map_err(|_| Self::poisoned("samples"))?
            .push(StoredSample { id, sample });
        Ok(id)
    }

    async fn query(
        &self,
        metric_type: Option<MetricType>,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> Result<Vec<StoredSample>, StoreError> {
        let mut matched: Vec<StoredSample> = self
            .samples
            .read()
            .map_err(|_| Self::poisoned("samples"))?
            .iter()
            .filter(|s| metric_type.map_or(true, |t| s.metric_type() == t))
            .filter(|s| start.map_or(true, |from| s.timestamp() >= from))
            .filter(|s| end.map_or(true, |to| s.timestamp() <= to))
            .cloned()
            .collect();

        matched.sort_by(|a, b| b.timestamp().cmp(&a.timestamp()));
        Ok(matched)
    }

    async fn latest(&self, metric_type: MetricType) -> Result<Option<StoredSample>, StoreError> {
        Ok(self
            .samples
            .read()
            .map_err(|_| Self::poisoned("samples"))?
            .iter()
            .filter(|s| s.metric_type() == metric_type)
            .max_by_key(|s| s.timestamp())
            .cloned())
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        self.samples
            .write()
            .map_err(|_| Self::poisoned("samples"))?
            .retain(|s| s.id != id);
        Ok(())
    }
}

#[async_trait]
impl GoalStore for MemoryStore {
    async fn insert(&self, goal: Goal) -> Result<Uuid, StoreError> {
        let id = Uuid::new_v4();
        self.goals
            .write()
            .map_err(|_| Self::poisoned("goals"))?
            .push(StoredGoal { id, goal });
        Ok(id)
    }

    async fn list(&self) -> Result<Vec<StoredGoal>, StoreError> {
        let mut goals = self
            .goals
            .read()
            .map_err(|_| Self::poisoned("goals"))?
            .clone();
        goals.sort_by_key(|g| g.goal.metric_type.as_str());
        Ok(goals)
    }

    async fn update(&self, id: Uuid, update: GoalUpdate) -> Result<(), StoreError> {
        let mut goals = self.goals.write().map_err(|_| Self::poisoned("goals"))?;
        let goal = goals
            .iter_mut()
            .find(|g| g.id == id)
            .ok_or_else(|| StoreError::NotFound(format!("goal {id}")))?;
        if let Some(current_value) = update.current_value {
            goal.goal.current_value = current_value;
        }
        if let Some(achieved) = update.achieved {
            goal.goal.achieved = achieved;
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        self.goals
            .write()
            .map_err(|_| Self::poisoned("goals"))?
            .retain(|g| g.id != id);
        Ok(())
    }
}

#[async_trait]
impl RecommendationStore for MemoryStore {
    async fn insert(&self, advisory: Advisory) -> Result<Uuid, StoreError> {
        let id = Uuid::new_v4();
        self.advisories
            .write()
            .map_err(|_| Self::poisoned("advisories"))?
            .push(StoredAdvisory { id, advisory });
        Ok(id)
    }

    async fn list(&self, completed: Option<bool>) -> Result<Vec<StoredAdvisory>, StoreError> {
        let mut advisories: Vec<StoredAdvisory> = self
            .advisories
            .read()
            .map_err(|_| Self::poisoned("advisories"))?
            .iter()
            .filter(|a| completed.map_or(true, |done| a.advisory.completed == done))
            .cloned()
            .collect();

        advisories.sort_by(|a, b| {
            b.advisory
                .priority
                .cmp(&a.advisory.priority)
                .then(b.advisory.created_at.cmp(&a.advisory.created_at))
        });
        Ok(advisories)
    }

    async fn update_completed(&self, id: Uuid, completed: bool) -> Result<(), StoreError> {
        let mut advisories = self
            .advisories
            .write()
            .map_err(|_| Self::poisoned("advisories"))?;
        let advisory = advisories
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| StoreError::NotFound(format!("advisory {id}")))?;
        advisory.advisory.completed = completed;
        Ok(())
    }

    async fn clear_all(&self) -> Result<(), StoreError> {
        self.advisories
            .write()
            .map_err(|_| Self::poisoned("advisories"))?
            .clear();
        Ok(())
    }
}
