//! Validation options.

use crate::enums::DateFormat;
use regex::Regex;
use std::sync::LazyLock;

static YEAR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]{4}$").unwrap());

static YEAR_MONTH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}$").unwrap());

static YEAR_MONTH_DAY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").unwrap());

impl DateFormat {
    pub fn matches(self, value: &str) -> bool {
        match self {
            DateFormat::Year => YEAR_RE.is_match(value),
            DateFormat::YearMonth => YEAR_MONTH_RE.is_match(value),
            DateFormat::YearMonthDay => YEAR_MONTH_DAY_RE.is_match(value),
        }
    }
}

/// Knobs for a validation pass.
///
/// The default accepts only full `YYYY-MM-DD` dates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationOptions {
    /// Date layouts a `DATE` field may use
    pub date_formats: Vec<DateFormat>,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            date_formats: vec![DateFormat::YearMonthDay],
        }
    }
}

impl ValidationOptions {
    /// Strict `YYYY-MM-DD` dates only
    pub fn strict() -> Self {
        Self::default()
    }

    /// Also accept `YYYY` and `YYYY-MM`
    pub fn partial_dates() -> Self {
        Self {
            date_formats: vec![
                DateFormat::Year,
                DateFormat::YearMonth,
                DateFormat::YearMonthDay,
            ],
        }
    }

    /// Replace the accepted date layouts
    pub fn with_date_formats<I>(mut self, formats: I) -> Self
    where
        I: IntoIterator<Item = DateFormat>,
    {
        self.date_formats = formats.into_iter().collect();
        self
    }

    pub fn accepts_date(&self, value: &str) -> bool {
        self.date_formats.iter().any(|f| f.matches(value))
    }

    /// Accepted layouts as shown to users, e.g. `YYYY-MM-DD` or `YYYY, YYYY-MM or YYYY-MM-DD`.
    pub fn describe_date_formats(&self) -> String {
        let names: Vec<&str> = self.date_formats.iter().map(|f| f.as_str()).collect();
        match names.split_last() {
            None => String::new(),
            Some((last, [])) => last.to_string(),
            Some((last, rest)) => format!("{} or {}", rest.join(", "), last),
        }
    }
}
