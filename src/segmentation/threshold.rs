use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::Arc;

use crate::models::Message;

/// Group time-sorted messages wherever the in-scope gap exceeds `gap`.
///
/// With `by_participant` each speaker keeps their own open group and the gap is
/// measured against that speaker's previous message; otherwise there is a single
/// open group and the gap is measured against the previous message in the stream.
/// Groups come out in the order of their first message.
pub fn group_by_threshold(
    messages: &[Arc<Message>],
    gap: Duration,
    by_participant: bool,
) -> Vec<Vec<Arc<Message>>> {
    let mut groups: Vec<Vec<Arc<Message>>> = Vec::new();
    // scope key -> (index of the open group, timestamp of its latest message)
    let mut open: HashMap<&str, (usize, DateTime<Utc>)> = HashMap::new();

    for message in messages {
        let scope = if by_participant {
            message.participant.as_str()
        } else {
            ""
        };

        match open.get(scope).copied() {
            Some((index, last_seen)) if message.timestamp - last_seen <= gap => {
                groups[index].push(Arc::clone(message));
                open.insert(scope, (index, message.timestamp));
            }
            _ => {
                groups.push(vec![Arc::clone(message)]);
                open.insert(scope, (groups.len() - 1, message.timestamp));
            }
        }
    }

    groups
}
