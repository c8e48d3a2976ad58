//! Orchestration: segmentation once, then cross-validation, final training or labeling.
//!
//! One [`RandomSource`] drives a whole run. The order in which randomized steps
//! draw from it is fixed: cross-validation shuffling, per-fold balancing in fold
//! order, then balancing for the final model.

pub mod backend;
pub mod cross_validation;
pub mod labeling;
pub mod training;

pub use backend::{ClassifierBackend, TrainedClassifier};
pub use cross_validation::CrossValidationController;
pub use labeling::{LabelingController, LabelingOutcome};
pub use training::TrainingController;

use anyhow::{Context, Result};
use std::sync::Arc;

use crate::metrics::EvaluationReport;
use crate::models::{Message, SegmentSet};
use crate::random::RandomSource;
use crate::segmentation::Segmenter;
use crate::settings::PipelineConfig;

// Set to true to enable verbose logging in this module
const ENABLE_LOGS: bool = true;

use crate::log_info;

/// What a training run produces.
#[derive(Debug, Clone)]
pub struct TrainingOutcome<S, M> {
    pub segments: SegmentSet,
    /// Present only when cross-validation ran
    pub report: Option<EvaluationReport>,
    pub classifier: TrainedClassifier<S, M>,
}

pub struct Pipeline {
    config: PipelineConfig,
    segmenter: Segmenter,
    rng: RandomSource,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Result<Self> {
        config.validate().context("invalid pipeline configuration")?;
        let segmenter = config
            .segmentation
            .segmenter()
            .context("invalid segmentation configuration")?;
        let rng = RandomSource::from_optional_seed(config.seed);
        Ok(Self {
            config,
            segmenter,
            rng,
        })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn segment<I, M>(&self, messages: I) -> Result<SegmentSet>
    where
        I: IntoIterator<Item = M>,
        M: Into<Arc<Message>>,
    {
        Ok(self.segmenter.segment(messages)?)
    }

    /// Segment, optionally cross-validate, then train the final model on everything.
    pub fn train<B, I, M>(
        &mut self,
        messages: I,
        backend: &B,
    ) -> Result<TrainingOutcome<B::FeatureSpec, B::Model>>
    where
        B: ClassifierBackend,
        I: IntoIterator<Item = M>,
        M: Into<Arc<Message>>,
    {
        log_info!("== Preparation ==");
        let segments = self.segment(messages)?;
        let balancing = self.config.balancing()?;

        let report = if self.config.cross_validation_enabled() {
            let controller = CrossValidationController::new(self.config.folds, balancing);
            Some(controller.run(&segments, backend, &mut self.rng)?)
        } else {
            log_info!("== Skipping Cross Validation ==");
            None
        };

        let classifier = TrainingController::new(balancing).run(&segments, backend, &mut self.rng)?;

        Ok(TrainingOutcome {
            segments,
            report,
            classifier,
        })
    }

    /// Segment new messages and label them with an already trained classifier.
    pub fn label<B, I, M>(
        &self,
        messages: I,
        backend: &B,
        classifier: &TrainedClassifier<B::FeatureSpec, B::Model>,
    ) -> Result<LabelingOutcome>
    where
        B: ClassifierBackend,
        I: IntoIterator<Item = M>,
        M: Into<Arc<Message>>,
    {
        let segments = self.segment(messages)?;
        LabelingController::new().run(segments, backend, classifier)
    }
}
