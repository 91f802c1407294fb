//! Calendar abstraction for day bucketing.
//!
//! The engine never reads the process time zone. Callers hand in a
//! [`DayCalendar`] that decides where each day starts.

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, TimeZone, Utc};

use crate::models::TimeSpan;

/// Largest local-clock gap stepped over when midnight does not exist.
const MAX_MIDNIGHT_GAP_HOURS: i64 = 3;

pub trait DayCalendar: Send + Sync {
    /// First instant of the day containing `instant`.
    fn start_of_day(&self, instant: DateTime<Utc>) -> DateTime<Utc>;

    /// First instant of the day after the one starting at `day_start`.
    fn next_day_start(&self, day_start: DateTime<Utc>) -> Option<DateTime<Utc>>;

    fn end_of_day(&self, instant: DateTime<Utc>) -> Option<DateTime<Utc>> {
        self.next_day_start(self.start_of_day(instant))
    }

    fn day_span(&self, instant: DateTime<Utc>) -> Option<TimeSpan> {
        let start = self.start_of_day(instant);
        self.next_day_start(start).map(|end| TimeSpan::new(start, end))
    }

    fn is_same_day(&self, a: DateTime<Utc>, b: DateTime<Utc>) -> bool {
        self.start_of_day(a) == self.start_of_day(b)
    }

    fn did_cross_midnight(&self, previous: DateTime<Utc>, current: DateTime<Utc>) -> bool {
        !self.is_same_day(previous, current)
    }

    /// Start of every day intersecting `window`, oldest first.
    fn days_in(&self, window: &TimeSpan) -> Vec<DateTime<Utc>> {
        let mut days = Vec::new();
        if window.is_empty() {
            return days;
        }

        let mut current = self.start_of_day(window.start);
        while current < window.end {
            days.push(current);
            match self.next_day_start(current) {
                Some(next) if next > current => current = next,
                _ => break,
            }
        }
        days
    }

    /// Spans of the last `days` days, the final one containing `ending_on`.
    fn daily_ranges(&self, days: usize, ending_on: DateTime<Utc>) -> Vec<TimeSpan> {
        let mut ranges = Vec::with_capacity(days);
        let mut day_start = self.start_of_day(ending_on);

        for _ in 0..days {
            let Some(day_end) = self.next_day_start(day_start) else {
                break;
            };
            ranges.push(TimeSpan::new(day_start, day_end));

            let previous = self.start_of_day(day_start - Duration::seconds(1));
            if previous >= day_start {
                break;
            }
            day_start = previous;
        }

        ranges.reverse();
        ranges
    }
}

/// Day boundaries at local midnight in a chrono time zone.
#[derive(Debug, Clone)]
pub struct ZonedCalendar<Tz: TimeZone> {
    tz: Tz,
}

impl<Tz: TimeZone> ZonedCalendar<Tz> {
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }

    pub fn time_zone(&self) -> &Tz {
        &self.tz
    }

    /// Earliest instant of local midnight on `date`. Midnights skipped by a
    /// clock change resolve to the first whole local hour that exists.
    fn local_midnight(&self, date: NaiveDate) -> Option<DateTime<Utc>> {
        let midnight = date.and_hms_opt(0, 0, 0)?;
        (0..=MAX_MIDNIGHT_GAP_HOURS).find_map(|hour| {
            self.tz
                .from_local_datetime(&(midnight + Duration::hours(hour)))
                .earliest()
                .map(|local| local.with_timezone(&Utc))
        })
    }
}

impl ZonedCalendar<Utc> {
    pub fn utc() -> Self {
        Self::new(Utc)
    }
}

impl ZonedCalendar<FixedOffset> {
    /// `None` when the offset is out of range (beyond ±24h).
    pub fn fixed_offset(seconds_east: i32) -> Option<Self> {
        FixedOffset::east_opt(seconds_east).map(Self::new)
    }
}

impl<Tz> DayCalendar for ZonedCalendar<Tz>
where
    Tz: TimeZone + Send + Sync,
{
    fn start_of_day(&self, instant: DateTime<Utc>) -> DateTime<Utc> {
        let date = instant.with_timezone(&self.tz).date_naive();
        match self.local_midnight(date) {
            Some(start) if start <= instant => start,
            _ => instant,
        }
    }

    fn next_day_start(&self, day_start: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let date = day_start.with_timezone(&self.tz).date_naive();
        let next = self.local_midnight(date.succ_opt()?)?;
        (next > day_start).then_some(next)
    }
}
