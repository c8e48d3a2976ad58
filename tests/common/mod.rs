#![allow(dead_code)]

use anyhow::Result;
use chrono::{DateTime, Duration, TimeZone, Utc};
use segfold::{BasicExample, ClassifierBackend, Message};
use std::collections::BTreeSet;

pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2013, 2, 23, 12, 0, 0).unwrap()
}

/// Eleven messages over ~44 minutes: one 601s gap, one 1000s gap, the rest under 600s.
pub fn heat_conversation() -> Vec<Message> {
    let now = base_time();
    let second = Duration::seconds(1);
    let minute = Duration::minutes(1);
    vec![
        Message::new(0, now, "Alice", "it's"),
        Message::new(1, now + second, "Bob", "cow"),
        Message::new(2, now + second * 2, "Bob", "time"),
        Message::new(3, now + minute, "Bob", "noooooooo"),
        Message::new(4, now + minute + second, "Bob", "once"),
        Message::new(5, now + minute * 10, "Alice", "upon"),
        Message::new(6, now + minute * 20 + second, "Alice", "a"),
        Message::new(7, now + minute * 23 + second * 3, "Alice", "time"),
        Message::labeled(8, now + minute * 25 + second * 7, "Alice", "CAT!", true),
        Message::labeled(9, now + minute * 27 + second * 20, "Alice", "BAT!", true),
        Message::labeled(10, now + minute * 44, "Bob", "Sat?", true),
    ]
}

/// `count` two-person exchanges an hour apart; every `hostile_every`-th one turns rude.
pub fn chat_log(count: usize, hostile_every: usize) -> Vec<Message> {
    let mut messages = Vec::new();
    for c in 0..count {
        let start = base_time() + Duration::hours(c as i64);
        let hostile = c % hostile_every == 0;
        let lines = [
            ("erin", "morning all", false),
            ("frank", "morning", false),
            ("erin", if hostile { "get lost frank" } else { "coffee anyone" }, hostile),
        ];
        for (i, (who, text, label)) in lines.into_iter().enumerate() {
            let id = (c * lines.len() + i) as i64;
            messages.push(Message::labeled(
                id,
                start + Duration::seconds(10 * i as i64),
                who,
                text,
                label,
            ));
        }
    }
    messages
}

/// Flags rows containing a word that only ever appeared in positive training rows.
pub struct KeywordBackend;

impl ClassifierBackend for KeywordBackend {
    type FeatureSpec = BTreeSet<String>;
    type Model = BTreeSet<String>;

    fn generate_features(&self, examples: &[BasicExample]) -> Result<Self::FeatureSpec> {
        let words = |label: bool| -> BTreeSet<String> {
            examples
                .iter()
                .filter(|e| e.label == Some(label))
                .flat_map(|e| e.text.split_whitespace().map(str::to_lowercase))
                .collect()
        };
        let negatives = words(false);
        Ok(words(true).difference(&negatives).cloned().collect())
    }

    fn train(&self, _examples: &[BasicExample], spec: &Self::FeatureSpec) -> Result<Self::Model> {
        Ok(spec.clone())
    }

    fn predict(
        &self,
        model: &Self::Model,
        examples: &[BasicExample],
        _spec: &Self::FeatureSpec,
    ) -> Result<Vec<bool>> {
        Ok(examples
            .iter()
            .map(|e| e.text.split_whitespace().any(|w| model.contains(&w.to_lowercase())))
            .collect())
    }
}
