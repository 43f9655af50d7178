//! Vitalsim - Synthetic health-data engine with rule-based recommendations
//!
//! Vitalsim generates realistic synthetic vitals for a chosen user archetype
//! (heart rate, steps, sleep, weight and friends), samples them on a schedule
//! into a pluggable store, and evaluates behavioral rules over the stored
//! history to produce advisories.
//!
//! ## Modules
//!
//! - **Generation**: archetype profiles and per-metric generators behind a
//!   seedable [`VitalsSimulator`]
//! - **Sampling**: the tokio-based [`SamplingScheduler`] with its intra-day
//!   merge policy
//! - **Advisories**: the [`AdvisoryEngine`] and its five evaluators

pub mod advisor;
pub mod archetype;
pub mod config;
pub mod error;
pub mod generators;
pub mod rng;
pub mod scheduler;
pub mod simulator;
pub mod store;
pub mod types;

pub use advisor::AdvisoryEngine;
pub use archetype::{Archetype, ArchetypeProfile, MetricParams};
pub use config::SimulationConfig;
pub use error::StoreError;
pub use scheduler::SamplingScheduler;
pub use simulator::VitalsSimulator;
pub use store::{GoalStore, MemoryStore, MetricStore, RecommendationStore};

// Type exports
pub use types::{
    Advisory, AdvisoryCategory, DataSource, Goal, GoalUpdate, MetricSample, MetricType,
    StoredAdvisory, StoredGoal, StoredSample,
};

/// Vitalsim version embedded in exported payloads
pub const VITALSIM_VERSION: &str = env!("CARGO_PKG_VERSION");
