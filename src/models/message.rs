use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One timestamped chat utterance, optionally carrying a ground-truth label.
///
/// Messages are immutable once loaded. Predictions live in
/// [`crate::labels::PredictedLabels`], keyed by `id`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: i64,
    pub timestamp: DateTime<Utc>,
    pub participant: String,
    pub text: String,
    pub true_label: Option<bool>,
}

impl Message {
    /// Unlabeled message.
    pub fn new(
        id: i64,
        timestamp: DateTime<Utc>,
        participant: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            id,
            timestamp,
            participant: participant.into(),
            text: text.into(),
            true_label: None,
        }
    }

    pub fn labeled(
        id: i64,
        timestamp: DateTime<Utc>,
        participant: impl Into<String>,
        text: impl Into<String>,
        label: bool,
    ) -> Self {
        Self {
            true_label: Some(label),
            ..Self::new(id, timestamp, participant, text)
        }
    }

    pub fn has_true_label(&self) -> bool {
        self.true_label.is_some()
    }
}
