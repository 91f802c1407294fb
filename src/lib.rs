//! Deduplication and day bucketing for activity samples reported by several
//! devices at once.
//!
//! Samples are ranked by source ([`SourcePriority`]), the time axis is swept
//! so that each instant is counted once from the best source covering it,
//! and the resolved stream can be split across calendar days.

pub mod classifier;
pub mod daily;
pub mod merging;
pub mod models;
pub mod settings;
mod utils;

pub use classifier::{priority, ClassifierConfig, SourceClassifier};
pub use daily::{merge_daily_totals, DailyMergeResult, DayCalendar, ZonedCalendar};
pub use merging::{
    merge_total, resolve_regions, MergeResult, Resolution, ResolvedRegion, SampleMerger,
};
pub use models::{Provenance, Sample, SourcePriority, TimeSpan};
pub use settings::EngineSettings;
