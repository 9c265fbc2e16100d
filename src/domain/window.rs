//! Temporal windows over local calendar dates.
//!
//! Every boundary is computed on the evaluator's wall clock. Pickup instants
//! are stored in UTC and converted into the timezone of `now` (or an explicit
//! `&Tz`) before their date is taken, so a window test is a plain inclusive
//! comparison of local dates. That is equivalent to comparing against
//! `start_of_day .. end_of_day` instants without any DST edge cases.
//!
//! Weeks start on Sunday.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Days, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use super::error::DomainError;

/// An inclusive range of local dates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateWindow {
    /// Start date (inclusive).
    pub start: NaiveDate,
    /// End date (inclusive).
    pub end: NaiveDate,
    /// Human-readable label for the window.
    pub label: String,
}

impl DateWindow {
    /// The single day `date`.
    #[must_use]
    pub fn today(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: date,
            label: "Today".to_string(),
        }
    }

    /// The Sunday-to-Saturday week containing `date`.
    #[must_use]
    pub fn week_of(date: NaiveDate) -> Self {
        let back = u64::from(date.weekday().num_days_from_sunday());
        let start = date - Days::new(back);
        Self {
            start,
            end: start + Days::new(6),
            label: "This Week".to_string(),
        }
    }

    /// The calendar month containing `date`.
    #[must_use]
    pub fn month_of(date: NaiveDate) -> Self {
        let month = CalendarMonth::containing(date);
        Self {
            start: month.first_day(),
            end: month.last_day(),
            label: month.to_string(),
        }
    }

    /// The last `days` days up to and including `date`.
    #[must_use]
    pub fn trailing_days(date: NaiveDate, days: u32) -> Self {
        Self {
            start: date - Days::new(u64::from(days)),
            end: date,
            label: format!("Last {days} Days"),
        }
    }

    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Today, this week, and this month, all anchored on the same date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Windows {
    pub today: DateWindow,
    pub week: DateWindow,
    pub month: DateWindow,
}

impl Windows {
    /// Windows anchored on a local date.
    #[must_use]
    pub fn at(date: NaiveDate) -> Self {
        Self {
            today: DateWindow::today(date),
            week: DateWindow::week_of(date),
            month: DateWindow::month_of(date),
        }
    }

    /// Windows anchored on the local date of `now`.
    #[must_use]
    pub fn around<Tz: TimeZone>(now: &DateTime<Tz>) -> Self {
        Self::at(now.date_naive())
    }

    /// Classify a local date against all three windows.
    #[must_use]
    pub fn membership(&self, date: NaiveDate) -> WindowMembership {
        WindowMembership {
            in_today: self.today.contains(date),
            in_this_week: self.week.contains(date),
            in_this_month: self.month.contains(date),
        }
    }
}

/// Which of the three standard windows a pickup falls into.
///
/// The flags are independent: a pickup today is also in this week and this
/// month.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct WindowMembership {
    pub in_today: bool,
    pub in_this_week: bool,
    pub in_this_month: bool,
}

/// Classify a pickup instant relative to `now`, on `now`'s wall clock.
#[must_use]
pub fn classify<Tz: TimeZone>(now: &DateTime<Tz>, pickup: &DateTime<Utc>) -> WindowMembership {
    let date = pickup.with_timezone(&now.timezone()).date_naive();
    Windows::around(now).membership(date)
}

/// A target calendar month, e.g. for the attendance grid or a statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CalendarMonth {
    year: i32,
    month: u32,
}

impl CalendarMonth {
    /// Create a month; `month` is 1-based.
    pub fn new(year: i32, month: u32) -> Result<Self, DomainError> {
        if !(1..=12).contains(&month) || NaiveDate::from_ymd_opt(year, month, 1).is_none() {
            return Err(DomainError::InvalidMonth {
                input: format!("{year}-{month:02}"),
            });
        }
        Ok(Self { year, month })
    }

    /// The month containing `date`.
    #[must_use]
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The month containing `now` on its own wall clock.
    #[must_use]
    pub fn current<Tz: TimeZone>(now: &DateTime<Tz>) -> Self {
        Self::containing(now.date_naive())
    }

    #[must_use]
    pub const fn year(&self) -> i32 {
        self.year
    }

    #[must_use]
    pub const fn month(&self) -> u32 {
        self.month
    }

    #[must_use]
    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    #[must_use]
    pub fn last_day(&self) -> NaiveDate {
        self.next()
            .first_day()
            .pred_opt()
            .unwrap_or(NaiveDate::MAX)
    }

    /// Number of days in the month.
    #[must_use]
    pub fn len_days(&self) -> u32 {
        self.last_day().day()
    }

    /// Every day of the month in order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let first = self.first_day();
        let last = self.last_day();
        first.iter_days().take_while(move |d| *d <= last)
    }

    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// The following month.
    #[must_use]
    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// The preceding month.
    #[must_use]
    pub fn previous(&self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// Compact `YYYY-MM` key, used in file names and CLI arguments.
    #[must_use]
    pub fn key(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }
}

impl fmt::Display for CalendarMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.first_day().format("%B %Y"))
    }
}

impl FromStr for CalendarMonth {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DomainError::InvalidMonth {
            input: s.to_string(),
        };
        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.is_empty() || month.len() > 2 {
            return Err(invalid());
        }
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        Self::new(year, month).map_err(|_| invalid())
    }
}

impl TryFrom<String> for CalendarMonth {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CalendarMonth> for String {
    fn from(month: CalendarMonth) -> Self {
        month.key()
    }
}
