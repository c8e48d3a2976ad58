//! Segmentation, stratified cross-validation and cost-aware balancing for
//! conversational classifiers.
//!
//! A flat, time-ordered chat log becomes [`SegmentSet`]s of labeled
//! conversational units, which are then stratified into folds and downsampled
//! to a class ratio set by misclassification costs. Feature extraction and
//! model fitting are delegated to a [`ClassifierBackend`].

pub mod balancing;
pub mod error;
pub mod labels;
pub mod metrics;
pub mod models;
pub mod pipeline;
pub mod random;
pub mod segmentation;
pub mod settings;
pub mod utils;
pub mod validation;

pub use balancing::DownsampleBalancing;
pub use error::{PipelineError, PipelineResult};
pub use labels::PredictedLabels;
pub use metrics::EvaluationReport;
pub use models::{BasicExample, Labeled, Message, Segment, SegmentSet};
pub use pipeline::{
    ClassifierBackend, CrossValidationController, LabelingController, LabelingOutcome, Pipeline,
    TrainedClassifier, TrainingController, TrainingOutcome,
};
pub use random::RandomSource;
pub use segmentation::{
    HeatConfig, LabelResolution, SegmentationConfig, SegmentationPolicy, SegmentationStrategy,
    Segmenter,
};
pub use settings::PipelineConfig;

/// Initialize logging (reads RUST_LOG env var, defaults to info).
///
/// Safe to call more than once; later calls are ignored.
pub fn init_logging() {
    let _ = env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .try_init();
}
