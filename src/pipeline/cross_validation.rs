use anyhow::{Context, Result};

use crate::balancing::DownsampleBalancing;
use crate::error::PipelineError;
use crate::metrics::EvaluationReport;
use crate::models::SegmentSet;
use crate::pipeline::backend::ClassifierBackend;
use crate::random::RandomSource;
use crate::validation::{randomize, stratify, testing_for_fold, training_for_fold};

// Set to true to enable verbose logging in this module
const ENABLE_LOGS: bool = true;

use crate::{log_debug, log_info};

/// Runs k-fold cross-validation and accumulates one report across folds.
#[derive(Debug, Clone)]
pub struct CrossValidationController {
    folds: usize,
    balancing: DownsampleBalancing,
}

impl CrossValidationController {
    pub fn new(folds: usize, balancing: DownsampleBalancing) -> Self {
        Self { folds, balancing }
    }

    pub fn folds(&self) -> usize {
        self.folds
    }

    /// Shuffle and stratify once, then train and evaluate each fold in index order.
    ///
    /// Training sets are balanced before training; testing sets are evaluated
    /// as they are and must carry resolved labels.
    pub fn run<B: ClassifierBackend>(
        &self,
        segments: &SegmentSet,
        backend: &B,
        rng: &mut RandomSource,
    ) -> Result<EvaluationReport> {
        log_info!("== Cross Validation ({} folds) ==", self.folds);

        let shuffled = randomize(segments.segments(), rng);
        let stratified = stratify(&shuffled, self.folds)?;

        let mut report = EvaluationReport::new();
        for fold in 0..self.folds {
            let training = SegmentSet::from_segments(training_for_fold(&stratified, fold, self.folds)?);
            let testing = SegmentSet::from_segments(testing_for_fold(&stratified, fold, self.folds)?);

            let training = self.balancing.balance(&training, rng)?;
            let partial = self
                .evaluate_fold(&training, &testing, backend)
                .with_context(|| format!("cross-validation fold {} of {}", fold + 1, self.folds))?;

            log_debug!(
                "Fold {}: trained on {}, tested on {}, accuracy {:.3}",
                fold,
                training.len(),
                testing.len(),
                partial.accuracy()
            );
            report.add_partial(&partial);
        }

        log_info!(
            "Cross validation finished: accuracy {:.3}, precision {:.3}, recall {:.3}",
            report.accuracy(),
            report.precision(),
            report.recall()
        );

        Ok(report)
    }

    fn evaluate_fold<B: ClassifierBackend>(
        &self,
        training: &SegmentSet,
        testing: &SegmentSet,
        backend: &B,
    ) -> Result<EvaluationReport> {
        let training_examples = training.basic_examples();
        let testing_examples = testing.basic_examples();

        let spec = backend
            .generate_features(&training_examples)
            .context("feature generation failed")?;
        let model = backend
            .train(&training_examples, &spec)
            .context("training failed")?;
        let predicted = backend
            .predict(&model, &testing_examples, &spec)
            .context("evaluation failed")?;

        let truth = testing
            .true_labels()
            .into_iter()
            .collect::<Option<Vec<bool>>>()
            .ok_or_else(|| {
                PipelineError::invalid_argument("testing fold contains unlabeled segments")
            })?;

        Ok(EvaluationReport::from_predictions(&truth, &predicted)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Message, Segment};
    use crate::pipeline::backend::testing::KeywordBackend;
    use chrono::{Duration, TimeZone, Utc};
    use std::sync::Arc;

    fn segment(id: usize, text: &str, label: Option<bool>) -> Segment {
        let base = Utc.with_ymd_and_hms(2013, 2, 23, 12, 0, 0).unwrap();
        let message = Arc::new(Message {
            id: id as i64,
            timestamp: base + Duration::minutes(id as i64),
            participant: "alice".to_string(),
            text: text.to_string(),
            true_label: label,
        });
        Segment::new(id, vec![message], label).unwrap()
    }

    fn corpus(positives: usize, negatives: usize) -> SegmentSet {
        (0..positives)
            .map(|i| segment(i, "you idiot", Some(true)))
            .chain((0..negatives).map(|i| segment(positives + i, "you are nice", Some(false))))
            .collect()
    }

    #[test]
    fn every_segment_is_tested_exactly_once() {
        let controller = CrossValidationController::new(5, DownsampleBalancing::default());
        let segments = corpus(10, 40);
        let report = controller
            .run(&segments, &KeywordBackend, &mut RandomSource::seeded(11))
            .unwrap();

        assert_eq!(report.total(), 50);
        assert_eq!(report.true_positives, 10);
        assert_eq!(report.true_negatives, 40);
    }

    #[test]
    fn same_seed_same_report() {
        let controller = CrossValidationController::new(3, DownsampleBalancing::default());
        let segments = corpus(6, 20);
        let first = controller
            .run(&segments, &KeywordBackend, &mut RandomSource::seeded(9))
            .unwrap();
        let second = controller
            .run(&segments, &KeywordBackend, &mut RandomSource::seeded(9))
            .unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn too_few_positives_for_folds_fails() {
        let controller = CrossValidationController::new(10, DownsampleBalancing::default());
        let err = controller
            .run(&corpus(3, 40), &KeywordBackend, &mut RandomSource::seeded(1))
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PipelineError>(),
            Some(PipelineError::InvalidArgument(_))
        ));
    }

    #[test]
    fn unlabeled_segments_abort_the_run() {
        let controller = CrossValidationController::new(2, DownsampleBalancing::default());
        let mut segments = corpus(4, 4);
        segments.add(segment(100, "hello", None));
        assert!(controller
            .run(&segments, &KeywordBackend, &mut RandomSource::seeded(1))
            .is_err());
    }
}
