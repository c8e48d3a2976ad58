pub mod algorithm;
pub mod config;
pub mod heat;
pub mod resolution;
pub mod threshold;

pub use algorithm::Segmenter;
pub use config::{HeatConfig, SegmentationConfig, SegmentationPolicy, SegmentationStrategy};
pub use resolution::LabelResolution;
