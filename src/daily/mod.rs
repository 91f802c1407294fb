pub mod calendar;
pub mod splitter;

pub use calendar::{DayCalendar, ZonedCalendar};
pub use splitter::{merge_daily_totals, DailyMergeResult};
