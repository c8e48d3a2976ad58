//! Cost-aware downsampling of the majority class.
//!
//! After balancing, `negatives / positives ≈ false_positive_cost / false_negative_cost`.
//! Only removal is used; minority segments are never duplicated or synthesized.

use rand::seq::index;
use serde::{Deserialize, Serialize};

use crate::error::{PipelineError, PipelineResult};
use crate::models::{Segment, SegmentSet};
use crate::random::RandomSource;

// Set to true to enable verbose logging in this module
const ENABLE_LOGS: bool = true;

use crate::{log_debug, log_info};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DownsampleBalancing {
    false_positive_cost: f64,
    false_negative_cost: f64,
}

impl DownsampleBalancing {
    pub fn new(false_positive_cost: f64, false_negative_cost: f64) -> PipelineResult<Self> {
        for (name, cost) in [
            ("false positive", false_positive_cost),
            ("false negative", false_negative_cost),
        ] {
            if !cost.is_finite() || cost <= 0.0 {
                return Err(PipelineError::invalid_argument(format!(
                    "{name} cost must be a positive number, got {cost}"
                )));
            }
        }
        Ok(Self {
            false_positive_cost,
            false_negative_cost,
        })
    }

    pub fn false_positive_cost(&self) -> f64 {
        self.false_positive_cost
    }

    pub fn false_negative_cost(&self) -> f64 {
        self.false_negative_cost
    }

    /// Desired negatives-per-positive after balancing.
    pub fn target_ratio(&self) -> f64 {
        self.false_positive_cost / self.false_negative_cost
    }

    /// Downsample whichever class is over-represented relative to the target ratio.
    ///
    /// Every segment must carry a resolved label. If either class is absent the
    /// input is returned as is.
    pub fn balance(&self, segments: &SegmentSet, rng: &mut RandomSource) -> PipelineResult<SegmentSet> {
        let unlabeled = segments.count_unlabeled();
        if unlabeled > 0 {
            return Err(PipelineError::invalid_argument(format!(
                "cannot balance {unlabeled} segment(s) without a resolved label"
            )));
        }

        let (positives, negatives): (Vec<&Segment>, Vec<&Segment>) = segments
            .iter()
            .partition(|s| s.true_label() == Some(true));
        let (p, n) = (positives.len(), negatives.len());

        if p == 0 || n == 0 {
            log_info!("Balancing skipped: {} positive, {} negative", p, n);
            return Ok(segments.clone());
        }

        let target = self.target_ratio();
        let current = n as f64 / p as f64;

        let (kept_positives, kept_negatives) = if current > target {
            let keep = clamp_count((target * p as f64).round(), n);
            (positives, sample(&negatives, keep, rng))
        } else if current < target {
            let keep = clamp_count((n as f64 / target).round(), p);
            (sample(&positives, keep, rng), negatives)
        } else {
            (positives, negatives)
        };

        log_info!(
            "Balanced ({}, {}) to ({}, {}) for cost ratio {:.3}",
            p,
            n,
            kept_positives.len(),
            kept_negatives.len(),
            target
        );

        Ok(kept_positives
            .into_iter()
            .chain(kept_negatives)
            .cloned()
            .collect())
    }
}

impl Default for DownsampleBalancing {
    fn default() -> Self {
        Self {
            false_positive_cost: 1.0,
            false_negative_cost: 1.0,
        }
    }
}

/// Rounded target size, never below one and never above what is available.
fn clamp_count(rounded: f64, available: usize) -> usize {
    (rounded as usize).clamp(1, available)
}

/// `amount` members drawn without replacement, kept in their original order.
fn sample<'a>(members: &[&'a Segment], amount: usize, rng: &mut RandomSource) -> Vec<&'a Segment> {
    let mut picked = index::sample(rng, members.len(), amount).into_vec();
    picked.sort_unstable();
    log_debug!("Sampled {} of {} segments", amount, members.len());
    picked.into_iter().map(|i| members[i]).collect()
}
