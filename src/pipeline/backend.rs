use anyhow::Result;

use crate::models::BasicExample;

/// The classification library the pipeline delegates to.
///
/// Feature generation, fitting and scoring stay on the far side of this trait;
/// the pipeline only hands over `(id, text, label)` rows and reads back one
/// boolean prediction per row.
pub trait ClassifierBackend {
    type FeatureSpec;
    type Model;

    /// Decide which features to extract, learned from training rows only.
    fn generate_features(&self, examples: &[BasicExample]) -> Result<Self::FeatureSpec>;

    fn train(&self, examples: &[BasicExample], spec: &Self::FeatureSpec) -> Result<Self::Model>;

    /// One prediction per example, in order.
    fn predict(
        &self,
        model: &Self::Model,
        examples: &[BasicExample],
        spec: &Self::FeatureSpec,
    ) -> Result<Vec<bool>>;
}

/// A fitted model together with the feature specification it was trained on.
#[derive(Debug, Clone)]
pub struct TrainedClassifier<S, M> {
    pub feature_spec: S,
    pub model: M,
}
