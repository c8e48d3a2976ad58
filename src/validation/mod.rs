//! Stratified k-fold preparation and the modulo-based train/test split.

pub mod prep;
pub mod split;

pub use prep::{randomize, stratify};
pub use split::{testing_for_fold, training_for_fold};
