//! Archetype registry
//!
//! Static parameter profiles keyed by user archetype. Each profile supplies
//! a base value and a valid `[min, max]` range per metric; the generators
//! never read anything else about the user.
//!
//! A profile lookup is pure and cannot fail. Swapping archetypes rebuilds
//! all generators in one step (see [`crate::simulator::VitalsSimulator`]),
//! so no generation ever mixes parameters from two archetypes.

use serde::{Deserialize, Serialize};

/// Named parameter profile for one user archetype.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Archetype {
    Sedentary,
    Active,
    Athlete,
    Recovery,
}

impl Archetype {
    pub const ALL: [Archetype; 4] = [
        Archetype::Sedentary,
        Archetype::Active,
        Archetype::Athlete,
        Archetype::Recovery,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Archetype::Sedentary => "sedentary",
            Archetype::Active => "active",
            Archetype::Athlete => "athlete",
            Archetype::Recovery => "recovery",
        }
    }

    /// Look up the static parameter profile for this archetype.
    pub fn profile(&self) -> &'static ArchetypeProfile {
        match self {
            Archetype::Sedentary => &SEDENTARY,
            Archetype::Active => &ACTIVE,
            Archetype::Athlete => &ATHLETE,
            Archetype::Recovery => &RECOVERY,
        }
    }
}

impl Default for Archetype {
    fn default() -> Self {
        Archetype::Active
    }
}

/// Base value and valid range for one metric.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricParams {
    pub base: f64,
    pub min: f64,
    pub max: f64,
}

impl MetricParams {
    pub const fn new(base: f64, min: f64, max: f64) -> Self {
        Self { base, min, max }
    }

    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }
}

/// Per-metric generation parameters for one archetype.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArchetypeProfile {
    /// Resting heart rate (bpm)
    pub heart_rate: MetricParams,
    /// Daily steps
    pub steps: MetricParams,
    /// Body weight (kg)
    pub weight: MetricParams,
    /// Sleep duration (hours)
    pub sleep: MetricParams,
    /// Water intake (ml)
    pub water: MetricParams,
    /// Calories burned (kcal)
    pub calories: MetricParams,
}

pub static SEDENTARY: ArchetypeProfile = ArchetypeProfile {
    heart_rate: MetricParams::new(72.0, 60.0, 85.0),
    steps: MetricParams::new(3000.0, 1000.0, 6000.0),
    weight: MetricParams::new(75.0, 70.0, 80.0),
    sleep: MetricParams::new(6.5, 5.0, 8.0),
    water: MetricParams::new(1500.0, 1000.0, 2000.0),
    calories: MetricParams::new(1800.0, 1500.0, 2200.0),
};

pub static ACTIVE: ArchetypeProfile = ArchetypeProfile {
    heart_rate: MetricParams::new(68.0, 55.0, 80.0),
    steps: MetricParams::new(8000.0, 5000.0, 12000.0),
    weight: MetricParams::new(72.0, 68.0, 76.0),
    sleep: MetricParams::new(7.5, 6.5, 8.5),
    water: MetricParams::new(2200.0, 1800.0, 2800.0),
    calories: MetricParams::new(2400.0, 2000.0, 3000.0),
};

pub static ATHLETE: ArchetypeProfile = ArchetypeProfile {
    heart_rate: MetricParams::new(58.0, 45.0, 70.0),
    steps: MetricParams::new(12000.0, 8000.0, 18000.0),
    weight: MetricParams::new(70.0, 65.0, 75.0),
    sleep: MetricParams::new(8.5, 7.0, 10.0),
    water: MetricParams::new(3000.0, 2500.0, 3500.0),
    calories: MetricParams::new(3000.0, 2500.0, 4000.0),
};

pub static RECOVERY: ArchetypeProfile = ArchetypeProfile {
    heart_rate: MetricParams::new(70.0, 60.0, 85.0),
    steps: MetricParams::new(5000.0, 3000.0, 8000.0),
    weight: MetricParams::new(73.0, 70.0, 76.0),
    sleep: MetricParams::new(8.0, 7.0, 9.0),
    water: MetricParams::new(2000.0, 1500.0, 2500.0),
    calories: MetricParams::new(2000.0, 1700.0, 2400.0),
};
