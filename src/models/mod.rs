pub mod priority;
pub mod sample;
pub mod span;

pub use priority::SourcePriority;
pub use sample::{Provenance, Sample};
pub use span::{seconds_between, TimeSpan};
