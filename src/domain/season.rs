use anyhow::Result;
use chrono::{Datelike, Days, NaiveDate};

/// Days after a month ends before its feed is treated as final. Late games
/// of the last evening are often posted after midnight.
pub const SETTLE_DAYS: u64 = 2;

const MONTH_NAMES: [&str; 12] = [
    "january", "february", "march", "april", "may", "june",
    "july", "august", "september", "october", "november", "december",
];

/// Calendar month inside a season
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SeasonMonth {
    pub year: i32,
    pub month: u32,
}

impl SeasonMonth {
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Lowercase English month name, as used in schedule feed URLs
    pub fn name(&self) -> &'static str {
        MONTH_NAMES[(self.month - 1) as usize]
    }

    pub fn next(self) -> Self {
        if self.month == 12 {
            Self { year: self.year + 1, month: 1 }
        } else {
            Self { year: self.year, month: self.month + 1 }
        }
    }

    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    /// Whether the month ended at least `SETTLE_DAYS` before `today`, so its
    /// results will not change any more
    pub fn is_settled(&self, today: NaiveDate) -> bool {
        self.next()
            .first_day()
            .and_then(|d| d.checked_add_days(Days::new(SETTLE_DAYS)))
            .is_some_and(|settled_on| settled_on <= today)
    }

    pub fn cache_key(&self) -> String {
        format!("schedule-{}-{:02}", self.year, self.month)
    }
}

/// First and last day of the tracked season
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeasonWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl SeasonWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if end < start {
            anyhow::bail!("Season ends ({}) before it starts ({})", end, start);
        }
        Ok(Self { start, end })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Months from the season start up to `today`, never past the season end
    pub fn months_through(&self, today: NaiveDate) -> Vec<SeasonMonth> {
        if today < self.start {
            return Vec::new();
        }

        let last = SeasonMonth::of(today.min(self.end));
        let mut months = Vec::new();
        let mut current = SeasonMonth::of(self.start);

        while current <= last {
            months.push(current);
            current = current.next();
        }

        months
    }
}
