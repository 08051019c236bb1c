//! Fixed-offset game calendar.
//!
//! All day arithmetic runs under a single fixed UTC offset with no DST
//! adjustment. Two instants belong to the same [`LocalDay`] iff they fall in
//! the same offset-local 24h date. The daily claim window opens at local
//! midday rather than midnight, so crossing local midnight alone never makes
//! a second claim possible.

use std::fmt;

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveTime, Offset, Utc};
use serde::{Deserialize, Serialize};

/// Local hour (0-23) at which the daily claim window opens.
pub const CLAIM_WINDOW_HOUR: i64 = 12;

/// A calendar date in the game's fixed-offset local time.
///
/// Serialized as `YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocalDay(NaiveDate);

impl LocalDay {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// The following calendar day, with correct month/year rollover.
    pub fn next(&self) -> LocalDay {
        // succ_opt is None only at NaiveDate::MAX.
        LocalDay(self.0.succ_opt().unwrap_or(self.0))
    }

    /// Whole-day difference `self - earlier` in the local calendar.
    pub fn days_since(&self, earlier: &LocalDay) -> i64 {
        self.0.signed_duration_since(earlier.0).num_days()
    }
}

impl fmt::Display for LocalDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

/// Converts absolute instants to local calendar days and back to the
/// absolute instants at which claim windows open.
///
/// Stateless; construct once from validated configuration.
#[derive(Debug, Clone, Copy)]
pub struct GameClock {
    offset: FixedOffset,
}

impl GameClock {
    /// Clock for a whole-hour offset east of UTC (negative for west).
    ///
    /// Returns `None` when the offset is outside the representable range;
    /// config validation rejects such values before a clock is built.
    pub fn from_east_hours(hours: i32) -> Option<Self> {
        FixedOffset::east_opt(hours * 3600).map(|offset| Self { offset })
    }

    pub fn utc() -> Self {
        Self { offset: Utc.fix() }
    }

    /// The local calendar day containing `instant`.
    pub fn local_day(&self, instant: DateTime<Utc>) -> LocalDay {
        LocalDay(instant.with_timezone(&self.offset).date_naive())
    }

    /// Absolute instant at which `day`'s claim window opens (local midday).
    pub fn window_open_instant(&self, day: LocalDay) -> DateTime<Utc> {
        let local_midday = day.date().and_time(NaiveTime::MIN) + Duration::hours(CLAIM_WINDOW_HOUR);
        // Shift the offset back out to recover the absolute instant.
        let utc_naive = local_midday - Duration::seconds(i64::from(self.offset.local_minus_utc()));
        DateTime::from_naive_utc_and_offset(utc_naive, Utc)
    }

    /// The next window-open instant at or after `now`: today's opening if it
    /// has not passed yet, otherwise tomorrow's.
    pub fn next_window_open(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        let today = self.local_day(now);
        let today_open = self.window_open_instant(today);
        if now < today_open {
            today_open
        } else {
            self.window_open_instant(today.next())
        }
    }
}
