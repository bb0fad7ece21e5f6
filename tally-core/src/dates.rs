//! Relative date resolution ("yesterday", "this week", "this month"),
//! anchored to one fixed timezone regardless of where the sender is.

use anyhow::Result;
use chrono::{Datelike, Days, NaiveDate, Utc};
use chrono_tz::Tz;

use crate::classify::contains_any;
use crate::entry::DateRange;
use crate::lexicon::Lexicon;

/// Source of "today" as a calendar day.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Today according to the system clock in a fixed IANA timezone.
#[derive(Debug, Clone, Copy)]
pub struct ZonedClock {
    tz: Tz,
}

impl ZonedClock {
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }

    pub fn from_name(tz: &str) -> Result<Self> {
        Ok(Self::new(parse_timezone(tz)?))
    }

    pub fn timezone(&self) -> Tz {
        self.tz
    }
}

impl Clock for ZonedClock {
    fn today(&self) -> NaiveDate {
        Utc::now().with_timezone(&self.tz).date_naive()
    }
}

/// A clock stuck on one day.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Parse an IANA timezone name like "America/Santiago".
pub fn parse_timezone(tz: &str) -> Result<Tz> {
    tz.parse()
        .map_err(|_| anyhow::anyhow!("invalid timezone: {tz}"))
}

/// Day a record belongs to: yesterday if the message says so, else today.
pub fn record_date(text: &str, today: NaiveDate, lexicon: &Lexicon) -> NaiveDate {
    if contains_any(&text.to_lowercase(), lexicon.yesterday) {
        today.pred_opt().unwrap_or(today)
    } else {
        today
    }
}

/// Range a query covers. "week" starts on the latest Monday, "month" on the
/// 1st; both end today. Anything else is today only.
pub fn query_range(text: &str, today: NaiveDate, lexicon: &Lexicon) -> DateRange {
    let msg = text.to_lowercase();
    if contains_any(&msg, lexicon.week) {
        DateRange::new(week_start(today), today)
    } else if contains_any(&msg, lexicon.month) {
        DateRange::new(month_start(today), today)
    } else {
        DateRange::single(today)
    }
}

fn week_start(today: NaiveDate) -> NaiveDate {
    let back = u64::from(today.weekday().num_days_from_monday());
    today.checked_sub_days(Days::new(back)).unwrap_or(today)
}

fn month_start(today: NaiveDate) -> NaiveDate {
    today.with_day(1).unwrap_or(today)
}
