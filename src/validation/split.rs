use crate::error::{PipelineError, PipelineResult};

fn check_fold(fold: usize, folds: usize) -> PipelineResult<()> {
    if folds == 0 {
        return Err(PipelineError::invalid_argument("fold count must be at least 1"));
    }
    if fold >= folds {
        return Err(PipelineError::invalid_argument(format!(
            "fold index {fold} out of range for {folds} folds"
        )));
    }
    Ok(())
}

/// Items at positions `i` with `i % folds != fold`.
pub fn training_for_fold<T: Clone>(items: &[T], fold: usize, folds: usize) -> PipelineResult<Vec<T>> {
    check_fold(fold, folds)?;
    Ok(items
        .iter()
        .enumerate()
        .filter(|(i, _)| i % folds != fold)
        .map(|(_, item)| item.clone())
        .collect())
}

/// Items at positions `i` with `i % folds == fold`.
pub fn testing_for_fold<T: Clone>(items: &[T], fold: usize, folds: usize) -> PipelineResult<Vec<T>> {
    check_fold(fold, folds)?;
    Ok(items.iter().skip(fold).step_by(folds).cloned().collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_and_train_partition_positions() {
        let items: Vec<usize> = (0..23).collect();
        for fold in 0..5 {
            let training = training_for_fold(&items, fold, 5).unwrap();
            let testing = testing_for_fold(&items, fold, 5).unwrap();

            assert_eq!(training.len() + testing.len(), items.len());
            assert!(testing.iter().all(|i| i % 5 == fold));
            assert!(training.iter().all(|i| i % 5 != fold));
        }
    }

    #[test]
    fn single_fold_tests_on_everything() {
        let items = vec!['a', 'b', 'c'];
        assert_eq!(testing_for_fold(&items, 0, 1).unwrap(), items);
        assert!(training_for_fold(&items, 0, 1).unwrap().is_empty());
    }

    #[test]
    fn out_of_range_fold_is_rejected() {
        let items = vec![1, 2, 3];
        assert!(matches!(
            training_for_fold(&items, 3, 3),
            Err(PipelineError::InvalidArgument(_))
        ));
        assert!(matches!(
            testing_for_fold(&items, 0, 0),
            Err(PipelineError::InvalidArgument(_))
        ));
    }
}
