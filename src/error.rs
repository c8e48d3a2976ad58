use thiserror::Error;

/// Errors raised synchronously by the segmentation, validation and balancing stages.
///
/// None of these are transient; callers decide whether to abort the run.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    /// A required strategy or collaborator was not supplied before use.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Out-of-range fold index/count, unresolved labels reaching balancing,
    /// or a stratification request that cannot be satisfied.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl PipelineError {
    pub fn configuration(message: impl Into<String>) -> Self {
        PipelineError::Configuration(message.into())
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        PipelineError::InvalidArgument(message.into())
    }
}

pub type PipelineResult<T> = Result<T, PipelineError>;
