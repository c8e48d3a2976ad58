mod mapping;

pub use mapping::PredictedLabels;
