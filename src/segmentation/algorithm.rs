use std::sync::Arc;

use crate::error::{PipelineError, PipelineResult};
use crate::models::{Message, Segment, SegmentSet};
use crate::segmentation::config::SegmentationPolicy;
use crate::segmentation::heat::group_by_heat;
use crate::segmentation::resolution::LabelResolution;
use crate::segmentation::threshold::group_by_threshold;

// Set to true to enable verbose logging in this module
const ENABLE_LOGS: bool = true;

use crate::{log_debug, log_info};

/// Turns a message stream into labeled conversational segments.
///
/// The label resolution strategy must be supplied before [`Segmenter::segment`]
/// is called.
#[derive(Debug, Clone)]
pub struct Segmenter {
    policy: SegmentationPolicy,
    resolution: Option<LabelResolution>,
}

impl Segmenter {
    pub fn new(policy: SegmentationPolicy) -> Self {
        Self {
            policy,
            resolution: None,
        }
    }

    pub fn with_resolution(mut self, resolution: LabelResolution) -> Self {
        self.resolution = Some(resolution);
        self
    }

    /// Main segmentation function: sort, group by policy, resolve labels.
    ///
    /// Messages need not arrive sorted; ties keep their input order.
    pub fn segment<I, M>(&self, messages: I) -> PipelineResult<SegmentSet>
    where
        I: IntoIterator<Item = M>,
        M: Into<Arc<Message>>,
    {
        let resolution = self.resolution.ok_or_else(|| {
            PipelineError::configuration("segmentation requires a label resolution strategy")
        })?;
        if let SegmentationPolicy::Heat(heat) = &self.policy {
            let problems = heat.problems();
            if !problems.is_empty() {
                return Err(PipelineError::configuration(problems.join("; ")));
            }
        }

        let mut messages: Vec<Arc<Message>> = messages.into_iter().map(Into::into).collect();

        // Edge case: empty stream
        if messages.is_empty() {
            return Ok(SegmentSet::new());
        }

        messages.sort_by_key(|m| m.timestamp);

        let groups = match &self.policy {
            SegmentationPolicy::Threshold {
                gap,
                by_participant,
            } => group_by_threshold(&messages, *gap, *by_participant),
            SegmentationPolicy::Heat(heat) => group_by_heat(&messages, heat),
        };

        let mut segments = SegmentSet::new();
        for group in groups {
            let label = resolution.resolve(group.iter().map(|m| m.true_label));
            let id = segments.len();
            if let Some(segment) = Segment::new(id, group, label) {
                log_debug!(
                    "segment {} has {} messages, label={:?}",
                    id,
                    segment.len(),
                    label
                );
                segments.add(segment);
            }
        }

        log_info!(
            "Segmented {} messages into {} segments ({} policy, {} positive, {} negative, {} unlabeled)",
            messages.len(),
            segments.len(),
            self.policy.name(),
            segments.count_with_true_label(true),
            segments.count_with_true_label(false),
            segments.count_unlabeled()
        );

        Ok(segments)
    }
}
