use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{PipelineError, PipelineResult};
use crate::models::{Message, SegmentSet};

/// Per-message predictions, keyed by message id.
///
/// Owned by the labeling stage; messages themselves stay immutable.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PredictedLabels {
    by_message: BTreeMap<i64, bool>,
}

impl PredictedLabels {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spread one prediction per segment onto every member message.
    pub fn map(predictions: &[bool], segments: &SegmentSet) -> PipelineResult<Self> {
        if predictions.len() != segments.len() {
            return Err(PipelineError::invalid_argument(format!(
                "{} predictions for {} segments",
                predictions.len(),
                segments.len()
            )));
        }

        let mut labels = Self::new();
        for (segment, &prediction) in segments.iter().zip(predictions) {
            for message in segment.messages() {
                labels.set(message.id, prediction);
            }
        }
        Ok(labels)
    }

    /// Spread the aggregate predicted labels already written to `segments`.
    /// Segments without a prediction contribute nothing.
    pub fn from_segments(segments: &SegmentSet) -> Self {
        let mut labels = Self::new();
        for segment in segments {
            if let Some(prediction) = segment.predicted_label() {
                for message in segment.messages() {
                    labels.set(message.id, prediction);
                }
            }
        }
        labels
    }

    pub fn set(&mut self, message_id: i64, prediction: bool) {
        self.by_message.insert(message_id, prediction);
    }

    pub fn get(&self, message_id: i64) -> Option<bool> {
        self.by_message.get(&message_id).copied()
    }

    pub fn label_for(&self, message: &Message) -> Option<bool> {
        self.get(message.id)
    }

    pub fn len(&self) -> usize {
        self.by_message.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_message.is_empty()
    }

    pub fn count_positive(&self) -> usize {
        self.by_message.values().filter(|&&p| p).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = (i64, bool)> + '_ {
        self.by_message.iter().map(|(&id, &p)| (id, p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Segment;
    use chrono::Utc;
    use std::sync::Arc;

    fn messages() -> Vec<Arc<Message>> {
        let now = Utc::now();
        (1..=10)
            .map(|id| {
                let who = if id % 2 == 1 || id > 6 { "Alice" } else { "Bob" };
                Arc::new(Message::new(id, now, who, format!("Hello{id}")))
            })
            .collect()
    }

    /// Segments of sizes 1, 2, 3, 4 over messages 1..=10.
    fn segments(raw: &[Arc<Message>]) -> SegmentSet {
        let mut set = SegmentSet::new();
        let mut start = 0;
        for (id, size) in [1, 2, 3, 4].into_iter().enumerate() {
            set.add(Segment::new(id, raw[start..start + size].to_vec(), None).unwrap());
            start += size;
        }
        set
    }

    #[test]
    fn segment_prediction_reaches_every_member() {
        let raw = messages();
        let labels = PredictedLabels::map(&[true, false, true, false], &segments(&raw)).unwrap();

        let expected = [true, false, false, true, true, true, false, false, false, false];
        for (message, expected) in raw.iter().zip(expected) {
            assert_eq!(labels.label_for(message), Some(expected), "message {}", message.id);
        }
        assert_eq!(labels.len(), 10);
        assert_eq!(labels.count_positive(), 4);
    }

    #[test]
    fn prediction_count_must_match_segments() {
        let raw = messages();
        assert!(matches!(
            PredictedLabels::map(&[true], &segments(&raw)),
            Err(PipelineError::InvalidArgument(_))
        ));
    }

    #[test]
    fn reads_written_back_segment_predictions() {
        let raw = messages();
        let mut set = segments(&raw);
        assert!(PredictedLabels::from_segments(&set).is_empty());

        set.apply_predictions(&[false, true, false, true]).unwrap();
        let labels = PredictedLabels::from_segments(&set);
        assert_eq!(labels.get(2), Some(true));
        assert_eq!(labels.get(10), Some(true));
        assert_eq!(labels.get(1), Some(false));
        assert_eq!(labels.get(42), None);
    }
}
