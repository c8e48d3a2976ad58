pub mod message;
pub mod segment;

pub use message::Message;
pub use segment::{BasicExample, Labeled, Segment, SegmentSet};
