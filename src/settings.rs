use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

use crate::balancing::DownsampleBalancing;
use crate::error::{PipelineError, PipelineResult};
use crate::segmentation::SegmentationConfig;

/// Everything an experiment run can tune.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct PipelineConfig {
    pub segmentation: SegmentationConfig,

    /// Cross-validation folds; 0 skips cross-validation entirely
    pub folds: usize,

    pub false_positive_cost: f64,
    pub false_negative_cost: f64,

    /// Fixed seed for reproducible runs; entropy when absent
    pub seed: Option<u64>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            segmentation: SegmentationConfig::default(),
            folds: 10,
            false_positive_cost: 1.0,
            false_negative_cost: 1.0,
            seed: None,
        }
    }
}

impl PipelineConfig {
    /// Read settings from a JSON file, falling back to defaults when it does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read pipeline config from {}", path.display()))?;
        let config: Self = serde_json::from_str(&contents)
            .with_context(|| format!("Malformed pipeline config in {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let serialized = serde_json::to_string_pretty(self)?;
        fs::write(path, serialized)
            .with_context(|| format!("Failed to write pipeline config to {}", path.display()))
    }

    pub fn cross_validation_enabled(&self) -> bool {
        self.folds > 0
    }

    pub fn balancing(&self) -> PipelineResult<DownsampleBalancing> {
        DownsampleBalancing::new(self.false_positive_cost, self.false_negative_cost)
            .map_err(|err| PipelineError::configuration(err.to_string()))
    }

    pub fn validate(&self) -> PipelineResult<()> {
        let mut problems = self.segmentation.problems();
        if let Err(err) = self.balancing() {
            problems.push(err.to_string());
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(PipelineError::configuration(problems.join("; ")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_means_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = PipelineConfig::load(&dir.path().join("absent.json")).unwrap();
        assert_eq!(config, PipelineConfig::default());
        assert_eq!(config.folds, 10);
        assert!(config.cross_validation_enabled());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pipeline.json");
        fs::write(
            &path,
            r#"{ "folds": 0, "seed": 42, "falsePositiveCost": 2.0,
                 "segmentation": { "thresholdSecs": 600 } }"#,
        )
        .unwrap();

        let config = PipelineConfig::load(&path).unwrap();
        assert_eq!(config.folds, 0);
        assert!(!config.cross_validation_enabled());
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.false_positive_cost, 2.0);
        assert_eq!(config.false_negative_cost, 1.0);
        assert_eq!(config.segmentation.threshold_secs, 600);
        assert!(config.segmentation.by_participant);
    }

    #[test]
    fn invalid_costs_fail_validation() {
        let config = PipelineConfig {
            false_negative_cost: 0.0,
            ..PipelineConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(PipelineError::Configuration(_))
        ));
    }

    #[test]
    fn out_of_range_durations_fail_to_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pipeline.json");
        for segmentation in [
            r#"{ "thresholdSecs": 9223372036854775807 }"#,
            r#"{ "strategy": "heat", "heatWindowSecs": 9223372036854775807 }"#,
        ] {
            fs::write(&path, format!(r#"{{ "segmentation": {segmentation} }}"#)).unwrap();
            let err = PipelineConfig::load(&path).unwrap_err();
            assert!(matches!(
                err.downcast_ref::<PipelineError>(),
                Some(PipelineError::Configuration(_))
            ));
        }
    }

    #[test]
    fn zero_heat_participants_fail_validation() {
        let mut config = PipelineConfig::default();
        config.segmentation.strategy = crate::segmentation::SegmentationStrategy::Heat;
        config.segmentation.heat_min_participants = 0;
        assert!(matches!(
            config.validate(),
            Err(PipelineError::Configuration(_))
        ));
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pipeline.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(PipelineConfig::load(&path).is_err());
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pipeline.json");
        let config = PipelineConfig {
            seed: Some(7),
            folds: 5,
            ..PipelineConfig::default()
        };
        config.save(&path).unwrap();
        assert_eq!(PipelineConfig::load(&path).unwrap(), config);
    }
}
