use serde::Deserialize;
use serde_json::Value;
use tracing::trace;

/// One element of the feed batch, kept as loosely typed as it arrives.
///
/// Any JSON value deserializes: fields that are missing are `Value::Null`, and
/// elements that are not objects produce a record with every field missing.
// Note: fields are interpreted where they are used, so a wrong type never fails the batch
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "Value")]
pub struct EventRecord {
    pub city: Value,
    pub state: Value,
    pub country: Value,
    pub website: Value,
    pub start_date: Value,
    pub event_status: Value,
    pub location: Value,
}

impl From<Value> for EventRecord {
    fn from(value: Value) -> Self {
        let mut fields = match value {
            Value::Object(fields) => fields,
            other => {
                trace!("Feed element is not an object: {}", other);
                return Self::default();
            }
        };

        let mut take = |name: &str| fields.remove(name).unwrap_or(Value::Null);

        Self {
            city: take("city"),
            state: take("state"),
            country: take("country"),
            website: take("website"),
            start_date: take("start_date"),
            event_status: take("event_status"),
            location: take("location"),
        }
    }
}

impl EventRecord {
    /// Latitude and longitude, only when `location` is an object
    pub fn coordinates(&self) -> (Option<&Value>, Option<&Value>) {
        match &self.location {
            Value::Object(location) => (location.get("lat"), location.get("lng")),
            _ => (None, None),
        }
    }

    pub fn status(&self) -> Option<&str> {
        self.event_status.as_str()
    }
}

/// Loose truthiness of a feed value: empty strings, zero, NaN, `false` and null are falsy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Non-empty string content, if any.
pub fn non_empty_str(value: &Value) -> Option<&str> {
    value.as_str().filter(|text| !text.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test_log::test]
    fn should_deserialize_feed_batch() {
        let records = serde_json::from_str::<Vec<EventRecord>>(
            r##"
              [{
                "id": 4512,
                "city": "Lisbon",
                "state": "",
                "country": "Portugal",
                "website": "lisbon.startupweekend.org",
                "start_date": "2024-01-30",
                "event_status": "G",
                "location": { "lat": 38.72, "lng": -9.14 }
              },
              {
                "city": "Porto"
              }]"##,
        );

        assert!(records.is_ok(), "{:?}", records);

        let records = records.unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].city, json!("Lisbon"));
        assert_eq!(records[0].status(), Some("G"));
        assert_eq!(
            records[0].coordinates(),
            (Some(&json!(38.72)), Some(&json!(-9.14)))
        );
        assert_eq!(records[1].event_status, Value::Null);
        assert_eq!(records[1].coordinates(), (None, None));
    }

    #[test_log::test]
    fn when_element_is_not_an_object_should_get_an_empty_record() {
        let records =
            serde_json::from_str::<Vec<EventRecord>>(r#"[42, "G", null, [1, 2]]"#).unwrap();

        assert_eq!(records.len(), 4);
        assert!(records.iter().all(|record| *record == EventRecord::default()));
    }

    #[test_log::test]
    fn when_location_is_not_an_object_should_have_no_coordinates() {
        let record = EventRecord::from(json!({ "location": "38.72,-9.14" }));

        assert_eq!(record.coordinates(), (None, None));
    }

    #[test_log::test]
    fn should_follow_loose_truthiness() {
        assert!(!is_truthy(&Value::Null));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!(0.0)));
        assert!(!is_truthy(&json!("")));
        assert!(!is_truthy(&json!(false)));

        assert!(is_truthy(&json!(-9.14)));
        assert!(is_truthy(&json!("0")));
        assert!(is_truthy(&json!({})));
        assert!(is_truthy(&json!([])));
    }
}
