use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::error::{PipelineError, PipelineResult};
use crate::segmentation::algorithm::Segmenter;
use crate::segmentation::resolution::LabelResolution;

/// Which gap policy splits the stream.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum SegmentationStrategy {
    #[default]
    Threshold,
    Heat,
}

/// Tunables for the heat policy. See [`crate::segmentation::heat`].
///
/// [`Segmenter::segment`] refuses a config with [`HeatConfig::problems`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeatConfig {
    /// A message stops contributing heat once it is this old. Must be positive.
    pub window: Duration,
    /// Segments with fewer active speakers than this cool proportionally faster.
    /// Must be at least 1.
    pub min_participants: usize,
    /// A new segment starts when effective heat is at or below this value.
    /// Must be finite and non-negative.
    pub floor: f64,
}

impl Default for HeatConfig {
    fn default() -> Self {
        Self {
            window: Duration::minutes(10),
            min_participants: 2,
            floor: 0.0,
        }
    }
}

/// Closed set of segmentation policies, chosen at configuration time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SegmentationPolicy {
    /// Split whenever the gap to the previous in-scope message exceeds `gap`.
    Threshold { gap: Duration, by_participant: bool },
    Heat(HeatConfig),
}

impl HeatConfig {
    pub fn problems(&self) -> Vec<String> {
        let mut problems = Vec::new();
        if self.window <= Duration::zero() {
            problems.push(format!(
                "heat window must be positive, got {}s",
                self.window.num_seconds()
            ));
        }
        if self.min_participants == 0 {
            problems.push("heat minimum participants must be at least 1".to_string());
        }
        if !self.floor.is_finite() || self.floor < 0.0 {
            problems.push(format!("heat floor must be >= 0, got {}", self.floor));
        }
        problems
    }
}

impl SegmentationPolicy {
    /// Threshold policy from a gap in seconds.
    ///
    /// Fails when `secs` does not fit a [`Duration`] (beyond `i64::MAX / 1000`).
    pub fn threshold_secs(secs: i64, by_participant: bool) -> PipelineResult<Self> {
        Ok(SegmentationPolicy::Threshold {
            gap: seconds("segmentation threshold", secs)?,
            by_participant,
        })
    }

    pub fn name(&self) -> &'static str {
        match self {
            SegmentationPolicy::Threshold { .. } => "threshold",
            SegmentationPolicy::Heat(_) => "heat",
        }
    }
}

/// Serializable segmentation settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct SegmentationConfig {
    pub strategy: SegmentationStrategy,

    /// How member labels collapse into the segment label
    pub resolution: LabelResolution,

    /// Threshold policy: maximum silence inside a segment
    pub threshold_secs: i64,

    /// Threshold policy: measure gaps per participant instead of across the stream
    pub by_participant: bool,

    /// Heat policy knobs
    pub heat_window_secs: i64,
    pub heat_min_participants: usize,
    pub heat_floor: f64,
}

impl Default for SegmentationConfig {
    fn default() -> Self {
        let heat = HeatConfig::default();
        Self {
            strategy: SegmentationStrategy::Threshold,
            resolution: LabelResolution::AnyPositive,
            threshold_secs: 30,
            by_participant: true,
            heat_window_secs: heat.window.num_seconds(),
            heat_min_participants: heat.min_participants,
            heat_floor: heat.floor,
        }
    }
}

fn seconds(what: &str, secs: i64) -> PipelineResult<Duration> {
    Duration::try_seconds(secs).ok_or_else(|| {
        PipelineError::configuration(format!("{what} of {secs}s is out of range"))
    })
}

impl SegmentationConfig {
    pub fn policy(&self) -> PipelineResult<SegmentationPolicy> {
        match self.strategy {
            SegmentationStrategy::Threshold => {
                SegmentationPolicy::threshold_secs(self.threshold_secs, self.by_participant)
            }
            SegmentationStrategy::Heat => Ok(SegmentationPolicy::Heat(HeatConfig {
                window: seconds("heat window", self.heat_window_secs)?,
                min_participants: self.heat_min_participants,
                floor: self.heat_floor,
            })),
        }
    }

    /// Segmenter for these settings, resolution strategy included.
    pub fn segmenter(&self) -> PipelineResult<Segmenter> {
        Ok(Segmenter::new(self.policy()?).with_resolution(self.resolution))
    }

    /// Human-readable problems with these settings, empty when usable.
    pub fn problems(&self) -> Vec<String> {
        let policy = match self.policy() {
            Ok(policy) => policy,
            Err(PipelineError::Configuration(problem) | PipelineError::InvalidArgument(problem)) => {
                return vec![problem]
            }
        };

        match policy {
            SegmentationPolicy::Threshold { gap, .. } if gap < Duration::zero() => vec![format!(
                "segmentation threshold must be non-negative, got {}s",
                self.threshold_secs
            )],
            SegmentationPolicy::Threshold { .. } => Vec::new(),
            SegmentationPolicy::Heat(heat) => heat.problems(),
        }
    }
}
