use serde::{Deserialize, Serialize};

/// How a segment's aggregate label is derived from its members' labels.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum LabelResolution {
    /// Positive if any labeled member is positive, negative if members are
    /// labeled but none positive, unresolved if nothing is labeled.
    #[default]
    AnyPositive,
    /// Positive only when positive labels strictly outnumber negative ones.
    Majority,
}

impl LabelResolution {
    pub fn as_str(&self) -> &'static str {
        match self {
            LabelResolution::AnyPositive => "anyPositive",
            LabelResolution::Majority => "majority",
        }
    }

    pub fn resolve<I>(&self, labels: I) -> Option<bool>
    where
        I: IntoIterator<Item = Option<bool>>,
    {
        let (mut positives, mut negatives) = (0usize, 0usize);
        for label in labels.into_iter().flatten() {
            if label {
                positives += 1;
            } else {
                negatives += 1;
            }
        }

        if positives + negatives == 0 {
            return None;
        }

        match self {
            LabelResolution::AnyPositive => Some(positives > 0),
            LabelResolution::Majority => Some(positives > negatives),
        }
    }
}
