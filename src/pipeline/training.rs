use anyhow::{Context, Result};

use crate::balancing::DownsampleBalancing;
use crate::models::SegmentSet;
use crate::pipeline::backend::{ClassifierBackend, TrainedClassifier};
use crate::random::RandomSource;

// Set to true to enable verbose logging in this module
const ENABLE_LOGS: bool = true;

use crate::log_info;

/// Trains the final model on all (balanced) segments.
#[derive(Debug, Clone)]
pub struct TrainingController {
    balancing: DownsampleBalancing,
}

impl TrainingController {
    pub fn new(balancing: DownsampleBalancing) -> Self {
        Self { balancing }
    }

    pub fn run<B: ClassifierBackend>(
        &self,
        segments: &SegmentSet,
        backend: &B,
        rng: &mut RandomSource,
    ) -> Result<TrainedClassifier<B::FeatureSpec, B::Model>> {
        log_info!("== Training Final Model ==");

        let balanced = self.balancing.balance(segments, rng)?;
        let examples = balanced.basic_examples();

        let feature_spec = backend
            .generate_features(&examples)
            .context("feature generation failed for final model")?;
        let model = backend
            .train(&examples, &feature_spec)
            .context("training failed for final model")?;

        log_info!(
            "Final model trained on {} of {} segments",
            balanced.len(),
            segments.len()
        );

        Ok(TrainedClassifier {
            feature_spec,
            model,
        })
    }
}
