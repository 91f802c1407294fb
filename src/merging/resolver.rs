use std::cmp::Ordering;
use std::collections::BTreeSet;

use chrono::{DateTime, Utc};

use crate::classifier::SourceClassifier;
use crate::merging::types::{MergeResult, Resolution, ResolvedRegion};
use crate::models::{Sample, SourcePriority, TimeSpan};

// Set to true to enable verbose logging in this module
const ENABLE_LOGS: bool = true;

use crate::log_debug;

/// A valid sample, classified and optionally clipped to a window.
#[derive(Debug, Clone)]
pub(crate) struct Segment {
    pub index: usize,
    pub span: TimeSpan,
    pub rate: f64,
    pub priority: SourcePriority,
}

/// Ranking of samples present at the same instant; the greatest wins.
///
/// Higher priority first. Equal priorities fall back to the higher rate, then
/// the earlier start, then the later end, then the lower input index, so the
/// outcome never depends on the order samples were supplied in.
#[derive(Debug, Clone, Copy)]
struct Contender {
    priority: SourcePriority,
    rate: f64,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    index: usize,
}

impl From<&Segment> for Contender {
    fn from(segment: &Segment) -> Self {
        Self {
            priority: segment.priority,
            rate: segment.rate,
            start: segment.span.start,
            end: segment.span.end,
            index: segment.index,
        }
    }
}

impl Ord for Contender {
    fn cmp(&self, other: &Self) -> Ordering {
        self.priority
            .cmp(&other.priority)
            .then_with(|| self.rate.total_cmp(&other.rate))
            .then_with(|| other.start.cmp(&self.start))
            .then_with(|| self.end.cmp(&other.end))
            .then_with(|| other.index.cmp(&self.index))
    }
}

impl PartialOrd for Contender {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Contender {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Contender {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Boundary {
    // All events at one instant apply before the next piece is read.
    End,
    Start,
}

/// Deduplicates samples from several sources by source priority.
#[derive(Debug, Clone, Default)]
pub struct SampleMerger {
    classifier: SourceClassifier,
}

impl SampleMerger {
    pub fn new(classifier: SourceClassifier) -> Self {
        Self { classifier }
    }

    pub fn classifier(&self) -> &SourceClassifier {
        &self.classifier
    }

    pub fn merge_total(&self, samples: &[Sample]) -> MergeResult {
        let resolution = self.resolve_regions(samples, None);
        let result = resolution.summary();
        log_debug!(
            "merged {} samples into {} regions: total {:.3}, overlap {:.3}s",
            result.segment_count,
            result.region_count,
            result.total,
            result.overlap_seconds
        );
        result
    }

    /// Sweep the boundary instants and pick a winner for every covered
    /// sub-interval, compacting neighbours that share a winner.
    pub fn resolve_regions(&self, samples: &[Sample], window: Option<&TimeSpan>) -> Resolution {
        let (segments, dropped_count) = self.prepare_segments(samples, window);
        if dropped_count > 0 {
            log_debug!("dropped {dropped_count} degenerate samples before merge");
        }

        build_resolution(&segments, dropped_count)
    }

    /// Classify valid samples and clip them to `window`. Returns the segments
    /// and how many samples were degenerate.
    pub(crate) fn prepare_segments(
        &self,
        samples: &[Sample],
        window: Option<&TimeSpan>,
    ) -> (Vec<Segment>, usize) {
        let mut dropped = 0;
        let mut segments = Vec::with_capacity(samples.len());

        for (index, sample) in samples.iter().enumerate() {
            // Rate comes from the full interval even when the span is clipped.
            let Some(rate) = sample.rate() else {
                dropped += 1;
                continue;
            };
            let span = match window {
                Some(window) => match sample.span().intersection(window) {
                    Some(span) => span,
                    None => continue,
                },
                None => sample.span(),
            };
            segments.push(Segment {
                index,
                span,
                rate,
                priority: self.classifier.priority(&sample.provenance),
            });
        }

        (segments, dropped)
    }
}

pub(crate) fn build_resolution(segments: &[Segment], dropped_count: usize) -> Resolution {
    Resolution {
        regions: sweep(segments),
        priorities_present: segments.iter().map(|segment| segment.priority).collect(),
        segment_count: segments.len(),
        dropped_count,
    }
}

fn sweep(segments: &[Segment]) -> Vec<ResolvedRegion> {
    let mut events: Vec<(DateTime<Utc>, Boundary, usize)> = Vec::with_capacity(segments.len() * 2);
    for (position, segment) in segments.iter().enumerate() {
        events.push((segment.span.start, Boundary::Start, position));
        events.push((segment.span.end, Boundary::End, position));
    }
    events.sort();

    let mut active: BTreeSet<Contender> = BTreeSet::new();
    let mut regions: Vec<ResolvedRegion> = Vec::new();
    let mut cursor: Option<DateTime<Utc>> = None;
    let mut i = 0;

    while i < events.len() {
        let instant = events[i].0;

        if let (Some(from), Some(winner)) = (cursor, active.last()) {
            if from < instant {
                let piece = TimeSpan::new(from, instant);
                push_piece(&mut regions, piece, winner, active.len() > 1);
            }
        }

        while i < events.len() && events[i].0 == instant {
            let (_, boundary, position) = events[i];
            let contender = Contender::from(&segments[position]);
            match boundary {
                Boundary::Start => {
                    active.insert(contender);
                }
                Boundary::End => {
                    active.remove(&contender);
                }
            }
            i += 1;
        }

        cursor = Some(instant);
    }

    regions
}

fn push_piece(
    regions: &mut Vec<ResolvedRegion>,
    piece: TimeSpan,
    winner: &Contender,
    contested: bool,
) {
    let value = winner.rate * piece.duration_seconds();

    if let Some(last) = regions.last_mut() {
        if last.winner == winner.index && last.span.end == piece.start {
            last.span.end = piece.end;
            last.value += value;
            if contested {
                match last.contested.last_mut() {
                    Some(previous) if previous.end == piece.start => previous.end = piece.end,
                    _ => last.contested.push(piece),
                }
            }
            return;
        }
    }

    regions.push(ResolvedRegion {
        span: piece,
        winner: winner.index,
        priority: winner.priority,
        rate: winner.rate,
        value,
        contested: if contested { vec![piece] } else { Vec::new() },
    });
}

/// Merge with the default classifier.
pub fn merge_total(samples: &[Sample]) -> MergeResult {
    SampleMerger::default().merge_total(samples)
}

/// Resolve regions with the default classifier.
pub fn resolve_regions(samples: &[Sample], window: Option<&TimeSpan>) -> Resolution {
    SampleMerger::default().resolve_regions(samples, window)
}
