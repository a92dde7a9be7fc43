use chrono::{DateTime, Utc};
use serde::Deserialize;

use tarragona_core::{DomainError, DomainResult};
use tarragona_reporting::DateRange;

// -------------------------
// Request DTOs
// -------------------------

/// Query string of `GET /api/parties/report`.
///
/// Either an explicit `start`/`end` window (RFC 3339, both optional) or a
/// calendar month given as `year` + `month`. Every value is kept as text
/// so malformed input becomes a validation error.
#[derive(Debug, Default, Deserialize)]
pub struct ReportQuery {
    pub start: Option<String>,
    pub end: Option<String>,
    pub year: Option<String>,
    pub month: Option<String>,
}

impl ReportQuery {
    pub fn to_range(&self) -> DomainResult<DateRange> {
        let explicit = self.start.is_some() || self.end.is_some();

        match (self.year.as_deref(), self.month.as_deref()) {
            (None, None) => DateRange::new(
                parse_timestamp("start", self.start.as_deref())?,
                parse_timestamp("end", self.end.as_deref())?,
            ),
            _ if explicit => Err(DomainError::validation(
                "use either start/end or year/month, not both",
            )),
            (Some(year), Some(month)) => {
                DateRange::month(parse_number("year", year)?, parse_number("month", month)?)
            }
            _ => Err(DomainError::validation(
                "year and month must be given together",
            )),
        }
    }
}

fn parse_number<T: std::str::FromStr>(field: &str, raw: &str) -> DomainResult<T> {
    raw.trim()
        .parse()
        .map_err(|_| DomainError::validation(format!("{field} must be a whole number")))
}

fn parse_timestamp(field: &str, raw: Option<&str>) -> DomainResult<Option<DateTime<Utc>>> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };

    DateTime::parse_from_rfc3339(raw)
        .map(|t| Some(t.with_timezone(&Utc)))
        .map_err(|_| DomainError::validation(format!("{field} must be an RFC 3339 timestamp")))
}
