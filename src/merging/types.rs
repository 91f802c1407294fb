use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::models::{SourcePriority, TimeSpan};

/// A maximal span with one winning sample.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedRegion {
    pub span: TimeSpan,
    /// Index of the winning sample in the caller's input slice.
    pub winner: usize,
    pub priority: SourcePriority,
    /// Value per second of the winning sample.
    pub rate: f64,
    pub value: f64,
    /// Sub-spans where more than one sample was present.
    pub contested: Vec<TimeSpan>,
}

impl ResolvedRegion {
    pub fn overlap_seconds(&self) -> f64 {
        self.contested.iter().map(TimeSpan::duration_seconds).sum()
    }

    /// Overlap seconds falling inside `window`.
    pub fn overlap_seconds_within(&self, window: &TimeSpan) -> f64 {
        self.contested
            .iter()
            .filter_map(|span| span.intersection(window))
            .map(|span| span.duration_seconds())
            .sum()
    }
}

/// Ordered, non-overlapping regions plus what went into them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resolution {
    pub regions: Vec<ResolvedRegion>,
    pub priorities_present: BTreeSet<SourcePriority>,
    /// Valid samples that took part in the sweep.
    pub segment_count: usize,
    /// Samples filtered out as degenerate.
    pub dropped_count: usize,
}

impl Resolution {
    pub fn total(&self) -> f64 {
        self.regions.iter().map(|region| region.value).sum()
    }

    pub fn overlap_seconds(&self) -> f64 {
        self.regions.iter().map(ResolvedRegion::overlap_seconds).sum()
    }

    pub fn summary(&self) -> MergeResult {
        let overlap_seconds = self.overlap_seconds();
        MergeResult {
            total: self.total(),
            overlap_seconds,
            merged_sources: overlap_seconds > 0.0,
            priorities_present: self.priorities_present.clone(),
            segment_count: self.segment_count,
            region_count: self.regions.len(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MergeResult {
    pub total: f64,
    pub overlap_seconds: f64,
    /// True when any lower-ranked data was suppressed.
    pub merged_sources: bool,
    pub priorities_present: BTreeSet<SourcePriority>,
    pub segment_count: usize,
    pub region_count: usize,
}

impl MergeResult {
    /// Whole counts for display; the only place rounding happens.
    pub fn rounded_total(&self) -> u64 {
        if self.total.is_finite() && self.total > 0.0 {
            self.total.round() as u64
        } else {
            0
        }
    }
}
