use crate::config::model::{RotatorConfig, RotatorOptions, SharedFilter};
use crate::feed::filter::FilterKind;
use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::env;
use std::sync::Arc;

pub fn load_config() -> RotatorConfig {
    RotatorConfig::from_options(load_options())
}

pub fn load_options() -> RotatorOptions {
    RotatorOptions {
        url: env::var("FEED_URL").ok(),
        query: load_query_config(),
        filter: load_filter_config("FEED_FILTER"),
    }
}

/// Replaces the default query only if one of its dates is set
fn load_query_config() -> Option<BTreeMap<String, String>> {
    let since = load_date_config("FEED_SINCE");
    let until = load_date_config("FEED_UNTIL");

    if since.is_none() && until.is_none() {
        return None;
    }

    let defaults = RotatorConfig::default().query;
    let mut query = BTreeMap::new();

    for (key, date) in [("since", since), ("until", until)] {
        let value = date
            .map(|date| date.format("%Y-%m-%d").to_string())
            .or_else(|| defaults.get(key).cloned());

        if let Some(value) = value {
            query.insert(key.to_string(), value);
        }
    }

    Some(query)
}

fn load_date_config(name: &str) -> Option<NaiveDate> {
    match env::var(name) {
        Ok(value) => Some(NaiveDate::parse_from_str(&value, "%Y-%m-%d").unwrap_or_else(|_| {
            panic!("Invalid config '{}'. Expected a date as YYYY-MM-DD.", name)
        })),
        Err(_) => None,
    }
}

fn load_filter_config(name: &str) -> Option<SharedFilter> {
    match env::var(name) {
        Ok(value) => {
            let kind: FilterKind = value.parse().unwrap_or_else(|_| {
                panic!(
                    "Invalid config '{}'. Expected either 'usable' or 'status'",
                    name
                )
            });

            Some(Arc::new(kind))
        }
        Err(_) => None,
    }
}

pub fn load_bool_config(name: &str, default: bool) -> bool {
    env::var(name)
        .unwrap_or_else(|_| default.to_string())
        .parse()
        .unwrap_or_else(|_| {
            panic!(
                "Invalid config '{}'. Expected either 'true' or 'false'",
                name
            )
        })
}
