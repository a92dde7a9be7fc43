//! Half-open time windows over record creation timestamps.

use chrono::{DateTime, NaiveDate, Utc};

use tarragona_core::{DomainError, DomainResult};

/// `[start, end)` window. A missing bound is unbounded on that side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateRange {
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
}

impl DateRange {
    /// Everything.
    pub fn all() -> Self {
        Self::default()
    }

    /// Build a window. `end` must not precede `start`; equal bounds make an empty window.
    pub fn new(start: Option<DateTime<Utc>>, end: Option<DateTime<Utc>>) -> DomainResult<Self> {
        if let (Some(s), Some(e)) = (start, end) {
            if e < s {
                return Err(DomainError::validation("end must not precede start"));
            }
        }
        Ok(Self { start, end })
    }

    /// The calendar month `year-month` in UTC.
    pub fn month(year: i32, month: u32) -> DomainResult<Self> {
        if !(1..=12).contains(&month) {
            return Err(DomainError::validation("month must be between 1 and 12"));
        }
        let (next_year, next_month) = if month == 12 {
            (year.checked_add(1), 1)
        } else {
            (Some(year), month + 1)
        };

        let start = first_of_month(year, month);
        let end = next_year.and_then(|y| first_of_month(y, next_month));
        match (start, end) {
            (Some(start), Some(end)) => Ok(Self {
                start: Some(start),
                end: Some(end),
            }),
            _ => Err(DomainError::validation(format!("year {year} is out of range"))),
        }
    }

    pub fn start(&self) -> Option<DateTime<Utc>> {
        self.start
    }

    pub fn end(&self) -> Option<DateTime<Utc>> {
        self.end
    }

    pub fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.start.is_none_or(|s| at >= s) && self.end.is_none_or(|e| at < e)
    }
}

fn first_of_month(year: i32, month: u32) -> Option<DateTime<Utc>> {
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}
