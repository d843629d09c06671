// An extension trait to provide the `graphemes` method on `String` and `&str`
use unicode_segmentation::UnicodeSegmentation;

use crate::analytics::filter::ALL;
use chrono::{Days, NaiveDate};

/// A dashboard filter: either the "All" sentinel or one concrete value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterValue(String);

impl FilterValue {
    pub fn all() -> Self {
        Self(ALL.to_string())
    }

    /// Absent or "All" means no filtering; anything else must be a
    /// reasonable display value.
    pub fn parse(s: Option<String>) -> std::result::Result<FilterValue, String> {
        let Some(s) = s else {
            return Ok(Self::all());
        };
        if s == ALL {
            return Ok(Self::all());
        }
        let is_empty_or_whitespace = s.trim().is_empty();
        let is_too_long = s.graphemes(true).count() > 256;
        let forbidden_characters = ['/', '(', ')', '"', '<', '>', '\\', '{', '}'];
        let contains_forbidden_characters = s.chars().any(|c| forbidden_characters.contains(&c));

        if is_empty_or_whitespace || is_too_long || contains_forbidden_characters {
            Err(format!("{} is not a valid filter value.", s))
        } else {
            Ok(Self(s))
        }
    }

    pub fn is_all(&self) -> bool {
        self.0 == ALL
    }
}

impl AsRef<str> for FilterValue {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// The time-period selector of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimePeriod {
    Last30Days,
    Last60Days,
    Last90Days,
    Custom {
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    },
}

impl TimePeriod {
    /// `period` is one of `last_30_days` (default), `last_60_days`,
    /// `last_90_days` or `custom`; `start`/`end` are ISO dates and only
    /// count for `custom`.
    pub fn parse(
        period: Option<&str>,
        start: Option<&str>,
        end: Option<&str>,
    ) -> std::result::Result<TimePeriod, String> {
        match period.map(|p| p.trim().to_ascii_lowercase()).as_deref() {
            None | Some("last_30_days") => Ok(TimePeriod::Last30Days),
            Some("last_60_days") => Ok(TimePeriod::Last60Days),
            Some("last_90_days") => Ok(TimePeriod::Last90Days),
            Some("custom") => Ok(TimePeriod::Custom {
                start: start.map(parse_date).transpose()?,
                end: end.map(parse_date).transpose()?,
            }),
            Some(other) => Err(format!("{} is not a valid time period.", other)),
        }
    }

    /// Inclusive `(start, end)` relative to `today`. A custom range
    /// defaults to the last 90 days.
    pub fn resolve(self, today: NaiveDate) -> (NaiveDate, NaiveDate) {
        let days_back = |n: u64| today.checked_sub_days(Days::new(n)).unwrap_or(NaiveDate::MIN);
        match self {
            TimePeriod::Last30Days => (days_back(30), today),
            TimePeriod::Last60Days => (days_back(60), today),
            TimePeriod::Last90Days => (days_back(90), today),
            TimePeriod::Custom { start, end } => {
                (start.unwrap_or_else(|| days_back(90)), end.unwrap_or(today))
            }
        }
    }
}

fn parse_date(s: &str) -> std::result::Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| format!("{} is not a valid date, expected YYYY-MM-DD.", s))
}
