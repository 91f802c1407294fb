use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::daily::calendar::DayCalendar;
use crate::merging::resolver::build_resolution;
use crate::merging::SampleMerger;
use crate::models::{Sample, SourcePriority, TimeSpan};

// Set to true to enable verbose logging in this module
const ENABLE_LOGS: bool = true;

use crate::{log_debug, log_warn};

/// Deduplicated totals keyed by the start of each calendar day.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DailyMergeResult {
    /// Days with no covered time are absent.
    pub totals: BTreeMap<DateTime<Utc>, f64>,
    /// Seconds per day where more than one sample was present.
    pub overlap_seconds: BTreeMap<DateTime<Utc>, f64>,
    pub days_with_multiple_sources: usize,
    pub days_with_overlap: usize,
    /// Calendar days intersecting the window, covered or not.
    pub total_days: usize,
    pub segment_count: usize,
}

impl DailyMergeResult {
    pub fn total(&self) -> f64 {
        self.totals.values().sum()
    }

    pub fn total_for(&self, day_start: DateTime<Utc>) -> f64 {
        self.totals.get(&day_start).copied().unwrap_or(0.0)
    }
}

impl SampleMerger {
    /// Resolve samples over `[window_start, window_end)` and split each
    /// resolved region across the calendar days it touches, in proportion to
    /// elapsed time.
    pub fn merge_daily_totals<C>(
        &self,
        samples: &[Sample],
        calendar: &C,
        window_start: DateTime<Utc>,
        window_end: DateTime<Utc>,
    ) -> DailyMergeResult
    where
        C: DayCalendar + ?Sized,
    {
        let window = TimeSpan::new(window_start, window_end);
        if window.is_empty() {
            return DailyMergeResult::default();
        }

        let (segments, dropped_count) = self.prepare_segments(samples, Some(&window));
        let resolution = build_resolution(&segments, dropped_count);

        let mut totals: BTreeMap<DateTime<Utc>, f64> = BTreeMap::new();
        let mut overlap_seconds: BTreeMap<DateTime<Utc>, f64> = BTreeMap::new();

        for region in &resolution.regions {
            for (day_start, piece) in split_by_day(calendar, &region.span) {
                *totals.entry(day_start).or_insert(0.0) += region.rate * piece.duration_seconds();

                let overlap = region.overlap_seconds_within(&piece);
                if overlap > 0.0 {
                    *overlap_seconds.entry(day_start).or_insert(0.0) += overlap;
                }
            }
        }

        let mut priorities_by_day: BTreeMap<DateTime<Utc>, BTreeSet<SourcePriority>> =
            BTreeMap::new();
        for segment in &segments {
            for (day_start, _) in split_by_day(calendar, &segment.span) {
                priorities_by_day
                    .entry(day_start)
                    .or_default()
                    .insert(segment.priority);
            }
        }

        let total_days = calendar.days_in(&window).len();
        log_debug!(
            "split {} regions across {} of {} days",
            resolution.regions.len(),
            totals.len(),
            total_days
        );

        DailyMergeResult {
            days_with_multiple_sources: priorities_by_day
                .values()
                .filter(|priorities| priorities.len() > 1)
                .count(),
            days_with_overlap: overlap_seconds.len(),
            totals,
            overlap_seconds,
            total_days,
            segment_count: resolution.segment_count,
        }
    }
}

/// Cut `span` at every day boundary, pairing each piece with its day start.
fn split_by_day<C>(calendar: &C, span: &TimeSpan) -> Vec<(DateTime<Utc>, TimeSpan)>
where
    C: DayCalendar + ?Sized,
{
    let mut pieces = Vec::new();
    if span.is_empty() {
        return pieces;
    }

    let mut day_start = calendar.start_of_day(span.start);
    loop {
        let next = calendar.next_day_start(day_start).filter(|next| *next > day_start);
        if next.is_none() {
            log_warn!("calendar has no day after {day_start}; keeping the rest of the span on it");
        }
        // Without a usable next boundary the rest of the span stays on this day.
        let day_end = next.unwrap_or(span.end);
        let day = TimeSpan::new(day_start, day_end);
        if let Some(piece) = day.intersection(span) {
            pieces.push((day_start, piece));
        }

        match next {
            Some(next) if next < span.end => day_start = next,
            _ => break,
        }
    }
    pieces
}

/// Daily totals with the default classifier.
pub fn merge_daily_totals<C>(
    samples: &[Sample],
    calendar: &C,
    window_start: DateTime<Utc>,
    window_end: DateTime<Utc>,
) -> DailyMergeResult
where
    C: DayCalendar + ?Sized,
{
    SampleMerger::default().merge_daily_totals(samples, calendar, window_start, window_end)
}
