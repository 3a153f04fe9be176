use itertools::Itertools;
use std::collections::BTreeMap;

/**
   Builds the feed endpoint with the query appended as URL parameters.
   * base_url: the feed URL, including the protocol. A single trailing '/' is dropped
   * query: key-value pairs, serialized as-is (values are dates and plain tokens)
*/
pub fn build_query_url(base_url: &str, query: &BTreeMap<String, String>) -> String {
    let base_url = base_url.strip_suffix('/').unwrap_or(base_url);

    if query.is_empty() {
        return base_url.to_string();
    }

    let query_terms = query
        .iter()
        .map(|(key, value)| format!("{}={}", key, value))
        .join("&");

    format!("{}?{}", base_url, query_terms)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }

    #[test_log::test]
    fn should_strip_trailing_slash_and_append_query() {
        let url = build_query_url("http://x/", &query(&[("since", "2024-01-01")]));

        assert_eq!(url, "http://x?since=2024-01-01");
    }

    #[test_log::test]
    fn when_query_is_empty_should_return_base_url_without_question_mark() {
        assert_eq!(build_query_url("http://x/events/", &BTreeMap::new()), "http://x/events");
        assert_eq!(build_query_url("http://x/events", &BTreeMap::new()), "http://x/events");
    }

    #[test_log::test]
    fn should_only_strip_one_trailing_slash() {
        assert_eq!(build_query_url("http://x//", &BTreeMap::new()), "http://x/");
    }

    #[test_log::test]
    fn should_join_every_pair_with_ampersand() {
        let url = build_query_url(
            "http://swoop.up.co/events",
            &query(&[("since", "2024-01-01"), ("until", "2024-02-01")]),
        );

        let (base, terms) = url.split_once('?').unwrap();
        let mut terms: Vec<&str> = terms.split('&').collect();
        terms.sort();

        assert_eq!(base, "http://swoop.up.co/events");
        assert_eq!(terms, vec!["since=2024-01-01", "until=2024-02-01"]);
    }

    #[test_log::test]
    fn when_given_a_built_url_and_no_query_should_keep_it() {
        let built = build_query_url("http://x/", &query(&[("since", "2024-01-01")]));

        assert_eq!(build_query_url(&built, &BTreeMap::new()), built);
    }
}
