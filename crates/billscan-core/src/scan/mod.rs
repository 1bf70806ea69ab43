//! Line scanning: named patterns, captured field accumulation and the scanning engine.

pub mod numeric;
mod scanner;

pub use numeric::{decimal, quantity};
pub use scanner::{ItemLayout, LineScanner};

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use regex::{Captures, Regex};

use crate::error::{ConversionError, ParseError, Result};

/// A regex with a human-readable name used in error reports.
#[derive(Debug, Clone)]
pub struct Pattern {
    name: &'static str,
    regex: Regex,
}

impl Pattern {
    pub fn new(name: &'static str, regex: Regex) -> Self {
        Self { name, regex }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn captures<'t>(&self, line: &'t str) -> Option<Captures<'t>> {
        self.regex.captures(line)
    }

    pub fn is_match(&self, line: &str) -> bool {
        self.regex.is_match(line)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} /{}/", self.name, self.regex.as_str())
    }
}

/// Named values captured by one or more pattern matches.
///
/// A name keeps the first value captured for it; later matches never overwrite it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fields {
    values: BTreeMap<String, String>,
}

impl Fields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge the named groups that participated in `caps`.
    pub fn merge(&mut self, pattern: &Pattern, caps: &Captures<'_>) {
        for name in pattern.regex.capture_names().flatten() {
            if let Some(m) = caps.name(name) {
                self.values
                    .entry(name.to_string())
                    .or_insert_with(|| m.as_str().to_string());
            }
        }
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.entry(name.into()).or_insert_with(|| value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Value of a field the caller cannot do without.
    pub fn require(&self, name: &str) -> std::result::Result<&str, ParseError> {
        self.get(name)
            .ok_or_else(|| ParseError::MissingField(name.to_string()))
    }

    /// Calendar date assembled from `{prefix}_day`, `{prefix}_month` and `{prefix}_year`.
    pub fn date(&self, prefix: &str) -> Result<NaiveDate> {
        let day = self.require(&format!("{}_day", prefix))?;
        let month = self.require(&format!("{}_month", prefix))?;
        let year = self.require(&format!("{}_year", prefix))?;

        let invalid = || ConversionError::Date {
            field: prefix.to_string(),
            value: format!("{}.{}.{}", day, month, year),
        };

        let (Ok(d), Ok(m), Ok(y)) = (day.parse::<u32>(), month.parse::<u32>(), year.parse::<i32>())
        else {
            return Err(invalid().into());
        };

        NaiveDate::from_ymd_opt(y, m, d).ok_or_else(|| invalid().into())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
