use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::Arc;

use crate::error::{PipelineError, PipelineResult};
use crate::models::Message;

/// Anything that carries an optional binary ground-truth label.
///
/// Stratification groups on this; balancing requires it to be resolved.
pub trait Labeled {
    fn true_label(&self) -> Option<bool>;
}

/// A contiguous group of messages treated as one labeled unit.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    id: usize,
    messages: Vec<Arc<Message>>,
    true_label: Option<bool>,
    predicted_label: Option<bool>,
}

impl Segment {
    /// Build a segment from its member messages.
    ///
    /// Returns `None` for an empty message list; segments are never empty.
    pub fn new(id: usize, messages: Vec<Arc<Message>>, true_label: Option<bool>) -> Option<Self> {
        if messages.is_empty() {
            return None;
        }
        Some(Self {
            id,
            messages,
            true_label,
            predicted_label: None,
        })
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn messages(&self) -> &[Arc<Message>] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn first_timestamp(&self) -> DateTime<Utc> {
        self.messages[0].timestamp
    }

    pub fn last_timestamp(&self) -> DateTime<Utc> {
        self.messages[self.messages.len() - 1].timestamp
    }

    pub fn participants(&self) -> BTreeSet<&str> {
        self.messages.iter().map(|m| m.participant.as_str()).collect()
    }

    /// Member texts joined by newlines, as handed to feature extraction.
    pub fn concat_messages(&self) -> String {
        self.messages
            .iter()
            .map(|m| m.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn true_label(&self) -> Option<bool> {
        self.true_label
    }

    pub fn predicted_label(&self) -> Option<bool> {
        self.predicted_label
    }

    pub fn to_basic_example(&self) -> BasicExample {
        BasicExample {
            id: self.id,
            text: self.concat_messages(),
            label: self.true_label,
        }
    }
}

impl Labeled for Segment {
    fn true_label(&self) -> Option<bool> {
        self.true_label
    }
}

/// One row of the flat table handed to feature extraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BasicExample {
    pub id: usize,
    pub text: String,
    pub label: Option<bool>,
}

impl Labeled for BasicExample {
    fn true_label(&self) -> Option<bool> {
        self.label
    }
}

/// Ordered collection of segments; the unit of partitioning and balancing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SegmentSet {
    segments: Vec<Segment>,
}

impl SegmentSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_segments(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    pub fn add(&mut self, segment: Segment) {
        self.segments.push(segment);
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Segment> {
        self.segments.get(index)
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Segment> {
        self.segments.iter()
    }

    /// Number of segments whose aggregate true label equals `label`.
    pub fn count_with_true_label(&self, label: bool) -> usize {
        self.segments
            .iter()
            .filter(|s| s.true_label == Some(label))
            .count()
    }

    pub fn count_unlabeled(&self) -> usize {
        self.segments.iter().filter(|s| s.true_label.is_none()).count()
    }

    pub fn true_labels(&self) -> Vec<Option<bool>> {
        self.segments.iter().map(|s| s.true_label).collect()
    }

    /// Flat `(id, text, label)` table for the feature-extraction collaborator.
    pub fn basic_examples(&self) -> Vec<BasicExample> {
        self.segments.iter().map(Segment::to_basic_example).collect()
    }

    pub fn message_count(&self) -> usize {
        self.segments.iter().map(Segment::len).sum()
    }

    /// Write one aggregate prediction per segment, in order.
    pub fn apply_predictions(&mut self, predictions: &[bool]) -> PipelineResult<()> {
        if predictions.len() != self.segments.len() {
            return Err(PipelineError::invalid_argument(format!(
                "{} predictions for {} segments",
                predictions.len(),
                self.segments.len()
            )));
        }
        for (segment, &prediction) in self.segments.iter_mut().zip(predictions) {
            segment.predicted_label = Some(prediction);
        }
        Ok(())
    }
}

impl FromIterator<Segment> for SegmentSet {
    fn from_iter<I: IntoIterator<Item = Segment>>(iter: I) -> Self {
        Self {
            segments: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for SegmentSet {
    type Item = Segment;
    type IntoIter = std::vec::IntoIter<Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.into_iter()
    }
}

impl<'a> IntoIterator for &'a SegmentSet {
    type Item = &'a Segment;
    type IntoIter = std::slice::Iter<'a, Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}
