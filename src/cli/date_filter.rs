//! Date filter parsing for CLI commands.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};

/// Which end of a date window a bound closes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Edge {
    Since,
    Until,
}

/// An inclusive window of last-update times.
///
/// Notes without a last update never match a non-empty filter.
#[derive(Debug, Clone, Default)]
pub struct DateFilter {
    since: Option<DateTime<Utc>>,
    until: Option<DateTime<Utc>>,
}

impl DateFilter {
    /// Builds a filter from optional `--since` / `--until` values.
    ///
    /// Each accepts:
    /// - RFC 3339: "2024-01-15T10:00:00Z"
    /// - Absolute: "2024-01-15" (YYYY-MM-DD, UTC; `until` includes the whole day)
    /// - Relative: "7d", "30d" (days ago from now)
    pub fn parse(since: Option<&str>, until: Option<&str>) -> Result<Self, String> {
        Ok(Self {
            since: since.map(|s| parse_bound(s, Edge::Since)).transpose()?,
            until: until.map(|s| parse_bound(s, Edge::Until)).transpose()?,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.since.is_none() && self.until.is_none()
    }

    /// Returns true if `timestamp` lies in the window.
    pub fn matches(&self, timestamp: Option<DateTime<Utc>>) -> bool {
        if self.is_empty() {
            return true;
        }
        let Some(timestamp) = timestamp else {
            return false;
        };

        self.since.is_none_or(|since| timestamp >= since)
            && self.until.is_none_or(|until| timestamp <= until)
    }

    pub fn since(&self) -> Option<DateTime<Utc>> {
        self.since
    }

    pub fn until(&self) -> Option<DateTime<Utc>> {
        self.until
    }
}

fn parse_bound(s: &str, edge: Edge) -> Result<DateTime<Utc>, String> {
    let s = s.trim();

    // Relative format: Nd (e.g., "7d", "30d")
    if let Some(days_str) = s.strip_suffix('d') {
        let days: i64 = days_str
            .parse()
            .map_err(|_| format!("invalid relative date: {}", s))?;
        if days < 0 {
            return Err(format!("days must be non-negative: {}", s));
        }
        return Ok(Utc::now() - Duration::days(days));
    }

    if let Ok(instant) = DateTime::parse_from_rfc3339(s) {
        return Ok(instant.with_timezone(&Utc));
    }

    let date = NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| format!("invalid date (expected RFC 3339, YYYY-MM-DD or Nd): {}", s))?;

    let time = match edge {
        Edge::Since => NaiveTime::MIN,
        Edge::Until => NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN),
    };

    Utc.from_local_datetime(&date.and_time(time))
        .single()
        .ok_or_else(|| format!("invalid date: {}", s))
}
