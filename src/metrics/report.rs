use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

use crate::error::{PipelineError, PipelineResult};

/// Confusion-matrix counts for a binary classifier.
///
/// Partial reports from different folds merge additively, so the merge order
/// never changes the cumulative result. Ratios are reported as `0.0` when their
/// denominator is zero.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationReport {
    pub true_positives: u64,
    pub false_positives: u64,
    pub true_negatives: u64,
    pub false_negatives: u64,
}

impl EvaluationReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tally predictions against ground truth, pairwise.
    pub fn from_predictions(truth: &[bool], predicted: &[bool]) -> PipelineResult<Self> {
        if truth.len() != predicted.len() {
            return Err(PipelineError::invalid_argument(format!(
                "{} predictions for {} labeled examples",
                predicted.len(),
                truth.len()
            )));
        }

        let mut report = Self::new();
        for (&actual, &guess) in truth.iter().zip(predicted) {
            report.record(actual, guess);
        }
        Ok(report)
    }

    pub fn record(&mut self, actual: bool, predicted: bool) {
        match (actual, predicted) {
            (true, true) => self.true_positives += 1,
            (false, true) => self.false_positives += 1,
            (false, false) => self.true_negatives += 1,
            (true, false) => self.false_negatives += 1,
        }
    }

    /// Fold one partial report into this cumulative one.
    pub fn add_partial(&mut self, partial: &EvaluationReport) {
        self.true_positives += partial.true_positives;
        self.false_positives += partial.false_positives;
        self.true_negatives += partial.true_negatives;
        self.false_negatives += partial.false_negatives;
    }

    pub fn total(&self) -> u64 {
        self.true_positives + self.false_positives + self.true_negatives + self.false_negatives
    }

    pub fn accuracy(&self) -> f64 {
        ratio(self.true_positives + self.true_negatives, self.total())
    }

    pub fn precision(&self) -> f64 {
        ratio(self.true_positives, self.true_positives + self.false_positives)
    }

    pub fn recall(&self) -> f64 {
        ratio(self.true_positives, self.true_positives + self.false_negatives)
    }

    pub fn false_positive_rate(&self) -> f64 {
        ratio(self.false_positives, self.false_positives + self.true_negatives)
    }

    pub fn f_measure(&self) -> f64 {
        let (precision, recall) = (self.precision(), self.recall());
        if precision + recall == 0.0 {
            return 0.0;
        }
        2.0 * precision * recall / (precision + recall)
    }

    /// Cohen's kappa between predictions and ground truth.
    pub fn kappa(&self) -> f64 {
        let total = self.total() as f64;
        if total == 0.0 {
            return 0.0;
        }
        let (tp, fp, tn, fn_) = (
            self.true_positives as f64,
            self.false_positives as f64,
            self.true_negatives as f64,
            self.false_negatives as f64,
        );
        let observed = (tp + tn) / total;
        let expected = ((tp + fp) * (tp + fn_) + (fn_ + tn) * (fp + tn)) / (total * total);
        if expected >= 1.0 {
            return if observed >= 1.0 { 1.0 } else { 0.0 };
        }
        (observed - expected) / (1.0 - expected)
    }

    /// Total misclassification cost under the given weights.
    pub fn cost(&self, false_positive_cost: f64, false_negative_cost: f64) -> f64 {
        self.false_positives as f64 * false_positive_cost
            + self.false_negatives as f64 * false_negative_cost
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let serialized = serde_json::to_string_pretty(self)?;
        fs::write(path, serialized)
            .with_context(|| format!("Failed to write evaluation report to {}", path.display()))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read evaluation report from {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("Malformed evaluation report in {}", path.display()))
    }
}

impl std::ops::AddAssign<&EvaluationReport> for EvaluationReport {
    fn add_assign(&mut self, partial: &EvaluationReport) {
        self.add_partial(partial);
    }
}

impl std::iter::Sum for EvaluationReport {
    fn sum<I: Iterator<Item = EvaluationReport>>(iter: I) -> Self {
        iter.fold(EvaluationReport::new(), |mut acc, partial| {
            acc.add_partial(&partial);
            acc
        })
    }
}

impl fmt::Display for EvaluationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "examples:   {}", self.total())?;
        writeln!(
            f,
            "confusion:  tp={} fp={} tn={} fn={}",
            self.true_positives, self.false_positives, self.true_negatives, self.false_negatives
        )?;
        writeln!(f, "accuracy:   {:.4}", self.accuracy())?;
        writeln!(f, "precision:  {:.4}", self.precision())?;
        writeln!(f, "recall:     {:.4}", self.recall())?;
        writeln!(f, "f-measure:  {:.4}", self.f_measure())?;
        write!(f, "kappa:      {:.4}", self.kappa())
    }
}

fn ratio(numerator: u64, denominator: u64) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}
