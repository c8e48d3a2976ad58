use rand::seq::SliceRandom;

use crate::error::{PipelineError, PipelineResult};
use crate::models::Labeled;
use crate::random::RandomSource;

/// Uniformly shuffled copy of `items`; the input is left untouched.
pub fn randomize<T: Clone>(items: &[T], rng: &mut RandomSource) -> Vec<T> {
    let mut shuffled = items.to_vec();
    shuffled.shuffle(rng);
    shuffled
}

/// Reorder already-shuffled items so that position `i` belongs to fold `i % folds`
/// and every fold gets its share of each class.
///
/// Items are laid out as positive, negative and unlabeled strata, each keeping
/// its incoming order. Consecutive items of a stratum then sit in consecutive
/// folds, so each class is dealt round-robin with the rotation carried from one
/// stratum into the next.
pub fn stratify<T: Labeled + Clone>(items: &[T], folds: usize) -> PipelineResult<Vec<T>> {
    if folds == 0 {
        return Err(PipelineError::invalid_argument(
            "fold count must be at least 1",
        ));
    }

    let stratum = |label: Option<bool>| items.iter().filter(move |t| t.true_label() == label);
    let positives = stratum(Some(true)).count();
    let negatives = stratum(Some(false)).count();

    if folds > positives || folds > negatives {
        return Err(PipelineError::invalid_argument(format!(
            "cannot stratify {positives} positive and {negatives} negative items into {folds} folds"
        )));
    }

    Ok(stratum(Some(true))
        .chain(stratum(Some(false)))
        .chain(stratum(None))
        .cloned()
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Item(usize, Option<bool>);

    impl Labeled for Item {
        fn true_label(&self) -> Option<bool> {
            self.1
        }
    }

    fn items(positives: usize, negatives: usize) -> Vec<Item> {
        (0..positives)
            .map(|i| Item(i, Some(true)))
            .chain((0..negatives).map(|i| Item(positives + i, Some(false))))
            .collect()
    }

    fn fold_counts(stratified: &[Item], folds: usize, label: bool) -> Vec<usize> {
        let mut counts = vec![0; folds];
        for (i, item) in stratified.iter().enumerate() {
            if item.1 == Some(label) {
                counts[i % folds] += 1;
            }
        }
        counts
    }

    #[test]
    fn randomize_is_a_permutation() {
        let input = items(10, 30);
        let mut rng = RandomSource::seeded(5);
        let mut shuffled = randomize(&input, &mut rng);

        assert_eq!(input, items(10, 30));
        assert_ne!(shuffled, input);
        shuffled.sort_by_key(|i| i.0);
        assert_eq!(shuffled, input);
    }

    #[test]
    fn folds_get_even_class_shares() {
        let stratified = stratify(&items(13, 47), 10).unwrap();
        assert_eq!(stratified.len(), 60);

        for label in [true, false] {
            let counts = fold_counts(&stratified, 10, label);
            let max = *counts.iter().max().unwrap();
            let min = *counts.iter().min().unwrap();
            assert!(max - min <= 1, "{label}: {counts:?}");
        }
        assert_eq!(fold_counts(&stratified, 10, true).iter().sum::<usize>(), 13);
    }

    #[test]
    fn every_item_is_kept_once() {
        let input = items(7, 12);
        let mut stratified = stratify(&input, 3).unwrap();
        stratified.sort_by_key(|i| i.0);
        assert_eq!(stratified, input);
    }

    #[test]
    fn unlabeled_items_are_carried_along() {
        let mut input = items(4, 4);
        input.push(Item(8, None));
        input.push(Item(9, None));
        let stratified = stratify(&input, 4).unwrap();
        assert_eq!(stratified.iter().filter(|i| i.1.is_none()).count(), 2);
    }

    #[test]
    fn zero_folds_is_rejected() {
        assert!(matches!(
            stratify(&items(5, 5), 0),
            Err(PipelineError::InvalidArgument(_))
        ));
    }

    #[test]
    fn more_folds_than_minority_items_is_rejected() {
        assert!(matches!(
            stratify(&items(3, 50), 5),
            Err(PipelineError::InvalidArgument(_))
        ));
        assert!(stratify(&items(5, 50), 5).is_ok());
    }
}
