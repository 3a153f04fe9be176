use super::dto::{non_empty_str, EventRecord};
use chrono::{DateTime, Datelike, Days, NaiveDate, NaiveDateTime, Utc};
use itertools::Itertools;
use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use serde_json::{Number, Value};
use std::fmt::{self, Display};
use tracing::debug;

/// Every event in the feed lasts three days, so it ends two days after it starts
pub const EVENT_DURATION_DAYS: u64 = 2;

const PERIOD_SEPARATOR: &str = "–";
const START_DATE_FORMAT: &str = "%B %-d";
const SAME_MONTH_END_DATE_FORMAT: &str = "%-d";
const DEFAULT_SCHEME: &str = "http://";

lazy_static! {
    static ref HTTP_SCHEME: Regex = Regex::new(r"(?i)^http://").unwrap();
}

/// Display-ready fields of one eligible event.
///
/// Never holds an error: a field that could not be derived is empty (or `false`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EventView {
    pub location: String,
    pub period: String,
    pub has_website: bool,
    /// Only meaningful when `has_website` is set
    pub website_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewError {
    MissingField(&'static str),
    InvalidField(&'static str),
    InvalidDate(String),
}

impl Display for ViewError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewError::MissingField(field) => write!(f, "missing field '{}'", field),
            ViewError::InvalidField(field) => write!(f, "field '{}' has an unexpected type", field),
            ViewError::InvalidDate(date) => write!(f, "'{}' is not a valid date", date),
        }
    }
}

impl std::error::Error for ViewError {}

impl EventView {
    pub fn from_record(record: &EventRecord) -> Self {
        let has_website = has_website(record);
        let website_url = if has_website {
            or_empty("website", website(record))
        } else {
            String::new()
        };

        Self {
            location: or_empty("location", location(record)),
            period: or_empty("period", event_period(record)),
            has_website,
            website_url,
        }
    }
}

impl From<&EventRecord> for EventView {
    fn from(record: &EventRecord) -> Self {
        Self::from_record(record)
    }
}

impl Display for EventView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} | {}", self.location, self.period)?;

        if self.has_website {
            write!(f, " | {}", self.website_url)?;
        }

        Ok(())
    }
}

fn or_empty(field: &str, derived: Result<String, ViewError>) -> String {
    derived.unwrap_or_else(|err| {
        debug!("Leaving {} empty: {}", field, err);
        String::new()
    })
}

/// City, state and country, skipping an empty state or country.
/// The city is always present, even if blank.
pub fn location(record: &EventRecord) -> Result<String, ViewError> {
    let city = match &record.city {
        Value::Null => String::new(),
        Value::String(city) => city.to_string(),
        Value::Number(city) => number_text(city),
        Value::Bool(city) => city.to_string(),
        Value::Array(_) | Value::Object(_) => return Err(ViewError::InvalidField("city")),
    };

    let parts = [Some(city.as_str()), non_empty_str(&record.state), non_empty_str(&record.country)];

    let joined = parts.into_iter().flatten().join(", ");
    Ok(joined)
}

/// Whole floats lose their fraction (`10.0` is "10"), as feed clients print them
fn number_text(number: &Number) -> String {
    match number.as_f64() {
        Some(value) if number.is_f64() && value.fract() == 0.0 && value.abs() < 1e15 => {
            format!("{:.0}", value + 0.0)
        }
        _ => number.to_string(),
    }
}

pub fn has_website(record: &EventRecord) -> bool {
    non_empty_str(&record.website).is_some()
}

/// The website as an absolute URL, defaulting to `http://` when it has no such scheme
pub fn website(record: &EventRecord) -> Result<String, ViewError> {
    let website = match &record.website {
        Value::String(website) => website,
        Value::Null => return Err(ViewError::MissingField("website")),
        _ => return Err(ViewError::InvalidField("website")),
    };

    if HTTP_SCHEME.is_match(website) {
        Ok(website.to_string())
    } else {
        Ok(format!("{}{}", DEFAULT_SCHEME, website))
    }
}

/// Humanized period of the event, e.g. "January 30 – February 1" or "March 1 – 3"
pub fn event_period(record: &EventRecord) -> Result<String, ViewError> {
    let start_date = parse_start_date(&record.start_date)?;
    let end_date = start_date
        .checked_add_days(Days::new(EVENT_DURATION_DAYS))
        .ok_or_else(|| ViewError::InvalidDate(start_date.to_string()))?;

    let end_date_format = if start_date.month() == end_date.month() {
        SAME_MONTH_END_DATE_FORMAT
    } else {
        START_DATE_FORMAT
    };

    Ok(format!(
        "{} {} {}",
        start_date.format(START_DATE_FORMAT),
        PERIOD_SEPARATOR,
        end_date.format(end_date_format)
    ))
}

/// UTC calendar date of the event start.
/// Accepts plain dates, RFC 3339 timestamps, naive timestamps (as UTC) and epoch milliseconds.
fn parse_start_date(start_date: &Value) -> Result<NaiveDate, ViewError> {
    match start_date {
        Value::String(date) => parse_date_str(date.trim()),
        Value::Number(millis) => millis
            .as_i64()
            .and_then(DateTime::<Utc>::from_timestamp_millis)
            .map(|date| date.date_naive())
            .ok_or_else(|| ViewError::InvalidDate(millis.to_string())),
        Value::Null => Err(ViewError::MissingField("start_date")),
        _ => Err(ViewError::InvalidField("start_date")),
    }
}

fn parse_date_str(date: &str) -> Result<NaiveDate, ViewError> {
    if let Ok(date) = NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        return Ok(date);
    }

    if let Ok(date) = DateTime::parse_from_rfc3339(date) {
        return Ok(date.with_timezone(&Utc).date_naive());
    }

    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(date, format).ok())
        .map(|date| date.date())
        .ok_or_else(|| ViewError::InvalidDate(date.to_string()))
}
