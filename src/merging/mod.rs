pub mod resolver;
pub mod types;

pub use resolver::{merge_total, resolve_regions, SampleMerger};
pub use types::{MergeResult, Resolution, ResolvedRegion};
