use crate::feed::filter::{EventFilter, UsableEvent};
use chrono::{Months, NaiveDate, Utc};
use std::collections::BTreeMap;
use std::fmt::{self, Debug};
use std::sync::Arc;

pub const DEFAULT_FEED_URL: &str = "http://swoop.up.co/events";
const QUERY_DATE_FORMAT: &str = "%Y-%m-%d";

pub type SharedFilter = Arc<dyn EventFilter + Send + Sync>;

/// Settings of one rotator, resolved from the defaults and the user options
#[derive(Clone)]
pub struct RotatorConfig {
    pub url: String,
    pub query: BTreeMap<String, String>,
    pub filter: SharedFilter,
}

/// Options given by the user, each one replacing its default as a whole
#[derive(Clone, Default)]
pub struct RotatorOptions {
    pub url: Option<String>,
    pub query: Option<BTreeMap<String, String>>,
    pub filter: Option<SharedFilter>,
}

impl RotatorConfig {
    /// Defaults for events happening between `today` and a month later.
    ///
    /// The default filter also requires coordinates (`UsableEvent`), unlike the
    /// status-only filter older rotators fell back to; pass `HealthyStatus` for that.
    pub fn with_defaults(today: NaiveDate) -> Self {
        Self {
            url: DEFAULT_FEED_URL.to_string(),
            query: default_query(today),
            filter: Arc::new(UsableEvent),
        }
    }

    pub fn from_options(options: RotatorOptions) -> Self {
        Self::default().merge(options)
    }

    pub fn merge(self, options: RotatorOptions) -> Self {
        Self {
            url: options.url.unwrap_or(self.url),
            query: options.query.unwrap_or(self.query),
            filter: options.filter.unwrap_or(self.filter),
        }
    }
}

impl Default for RotatorConfig {
    fn default() -> Self {
        Self::with_defaults(Utc::now().date_naive())
    }
}

impl Debug for RotatorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RotatorConfig")
            .field("url", &self.url)
            .field("query", &self.query)
            .finish_non_exhaustive()
    }
}

/// `since` today and `until` one month later (clamped to the end of a shorter month)
pub fn default_query(today: NaiveDate) -> BTreeMap<String, String> {
    let until = today.checked_add_months(Months::new(1)).unwrap_or(today);

    BTreeMap::from([
        ("since".to_string(), today.format(QUERY_DATE_FORMAT).to_string()),
        ("until".to_string(), until.format(QUERY_DATE_FORMAT).to_string()),
    ])
}
