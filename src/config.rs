//! Simulation configuration
//!
//! Process-wide settings consumed by the scheduler and generators. The
//! settings themselves are persisted outside the engine; the JSON helpers
//! here are the seam for that external persistence.

use serde::{Deserialize, Serialize};

use crate::archetype::Archetype;
use crate::types::DataSource;

/// Configuration surface for the sampling engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub archetype: Archetype,
    /// 0-100 scale. Reserved; generator math does not read it yet.
    #[serde(default = "default_intensity")]
    pub intensity: u8,
    pub enabled: bool,
    /// Stamped onto generated samples as their `source` field.
    pub data_source: DataSource,
}

fn default_intensity() -> u8 {
    50
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            archetype: Archetype::default(),
            intensity: default_intensity(),
            enabled: true,
            data_source: DataSource::default(),
        }
    }
}

impl SimulationConfig {
    /// Load configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize configuration to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = SimulationConfig::default();
        assert_eq!(config.archetype, Archetype::Active);
        assert_eq!(config.intensity, 50);
        assert!(config.enabled);
        assert_eq!(config.data_source, DataSource::Simulation);
    }

    #[test]
    fn test_json_roundtrip() {
        let config = SimulationConfig {
            archetype: Archetype::Athlete,
            intensity: 80,
            enabled: false,
            data_source: DataSource::ImsitWatch,
        };
        let json = config.to_json().unwrap();
        assert_eq!(SimulationConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_intensity_defaults_when_absent() {
        let config = SimulationConfig::from_json(
            r#"{"archetype":"recovery","enabled":true,"data_source":"device"}"#,
        )
        .unwrap();
        assert_eq!(config.intensity, 50);
        assert_eq!(config.archetype, Archetype::Recovery);
        assert_eq!(config.data_source, DataSource::Device);
    }
}
