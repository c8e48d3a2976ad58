//! Heat-based segmentation: a conversation stays together while it is "warm".
//!
//! Every message contributes `1 - age / window` heat until it is `window` old.
//! When a new message arrives, the open segment's heat is the sum of its
//! still-warm contributions, scaled by `min(1, speakers / min_participants)`
//! where `speakers` counts distinct participants among the warm messages plus
//! the arriving one. At or below `floor`, the message starts a new segment.
//!
//! With `floor = 0` this reduces to "some message of the segment is younger than
//! `window`"; raising the floor lets busy multi-party exchanges bridge longer
//! silences than monologues do.

use std::collections::{HashSet, VecDeque};
use std::sync::Arc;

use crate::models::Message;
use crate::segmentation::config::HeatConfig;

/// Group time-sorted messages by conversational heat.
///
/// `config` should have no [`HeatConfig::problems`]; [`crate::Segmenter`] checks
/// this before calling. A zero `min_participants` is read as 1 here.
pub fn group_by_heat(messages: &[Arc<Message>], config: &HeatConfig) -> Vec<Vec<Arc<Message>>> {
    let mut groups = Vec::new();
    let mut current: Vec<Arc<Message>> = Vec::new();
    let mut warm: VecDeque<&Message> = VecDeque::new();

    for message in messages {
        if !current.is_empty() && effective_heat(&mut warm, message, config) <= config.floor {
            groups.push(std::mem::take(&mut current));
            warm.clear();
        }
        current.push(Arc::clone(message));
        warm.push_back(&**message);
    }

    if !current.is_empty() {
        groups.push(current);
    }

    groups
}

/// Heat of the open segment as seen by `arriving`. Drops messages that went cold.
fn effective_heat(warm: &mut VecDeque<&Message>, arriving: &Message, config: &HeatConfig) -> f64 {
    while let Some(front) = warm.front() {
        if arriving.timestamp - front.timestamp >= config.window {
            warm.pop_front();
        } else {
            break;
        }
    }

    if warm.is_empty() {
        return 0.0;
    }

    let window_secs = config.window.num_milliseconds() as f64 / 1000.0;
    let heat: f64 = warm
        .iter()
        .map(|m| {
            let age_secs = (arriving.timestamp - m.timestamp).num_milliseconds() as f64 / 1000.0;
            1.0 - age_secs / window_secs
        })
        .sum();

    let required = config.min_participants.max(1);
    let mut speakers: HashSet<&str> = warm.iter().map(|m| m.participant.as_str()).collect();
    speakers.insert(arriving.participant.as_str());
    let participation = (speakers.len() as f64 / required as f64).min(1.0);

    heat * participation
}
