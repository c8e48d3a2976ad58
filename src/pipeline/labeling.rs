use anyhow::{Context, Result};

use crate::labels::PredictedLabels;
use crate::metrics::EvaluationReport;
use crate::models::SegmentSet;
use crate::pipeline::backend::{ClassifierBackend, TrainedClassifier};

// Set to true to enable verbose logging in this module
const ENABLE_LOGS: bool = true;

use crate::{log_info, log_warn};

/// Result of applying a trained classifier to new segments.
#[derive(Debug, Clone)]
pub struct LabelingOutcome {
    /// Input segments with aggregate predictions written back
    pub segments: SegmentSet,
    pub predictions: PredictedLabels,
    /// Scored over the segments that carry a ground-truth label
    pub report: EvaluationReport,
}

/// Labels segments with an existing model and maps predictions onto messages.
#[derive(Debug, Clone, Default)]
pub struct LabelingController;

impl LabelingController {
    pub fn new() -> Self {
        Self
    }

    pub fn run<B: ClassifierBackend>(
        &self,
        mut segments: SegmentSet,
        backend: &B,
        classifier: &TrainedClassifier<B::FeatureSpec, B::Model>,
    ) -> Result<LabelingOutcome> {
        log_info!("== Labeling {} segments ==", segments.len());

        let examples = segments.basic_examples();
        let predicted = backend
            .predict(&classifier.model, &examples, &classifier.feature_spec)
            .context("prediction failed while labeling")?;

        segments.apply_predictions(&predicted)?;
        let predictions = PredictedLabels::from_segments(&segments);

        let mut report = EvaluationReport::new();
        for segment in &segments {
            if let (Some(actual), Some(guess)) = (segment.true_label(), segment.predicted_label()) {
                report.record(actual, guess);
            }
        }

        let unlabeled = segments.count_unlabeled();
        if unlabeled == segments.len() && !segments.is_empty() {
            log_warn!("No ground-truth labels present; evaluation report is empty");
        }

        log_info!(
            "Labeled {} messages ({} predicted positive)",
            predictions.len(),
            predictions.count_positive()
        );

        Ok(LabelingOutcome {
            segments,
            predictions,
            report,
        })
    }
}
