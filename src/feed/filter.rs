use super::dto::{is_truthy, EventRecord};
use strum::EnumString;

/// Status codes of events that can be displayed (Good and Working)
pub const HEALTHY_STATUSES: [&str; 2] = ["G", "W"];

/// Decides whether a feed record is eligible for display.
///
/// Implementations must not panic on malformed records, those are just ineligible.
pub trait EventFilter {
    fn is_eligible(&self, record: &EventRecord) -> bool;
}

impl<F> EventFilter for F
where
    F: Fn(&EventRecord) -> bool,
{
    fn is_eligible(&self, record: &EventRecord) -> bool {
        self(record)
    }
}

/// Eligible when the event is in a healthy state, location is not required.
#[derive(Debug, Clone, Copy, Default)]
pub struct HealthyStatus;

impl EventFilter for HealthyStatus {
    fn is_eligible(&self, record: &EventRecord) -> bool {
        is_truthy(&record.event_status)
            && record
                .status()
                .is_some_and(|status| HEALTHY_STATUSES.contains(&status))
    }
}

/// Eligible when the event is healthy and can be placed on a map.
#[derive(Debug, Clone, Copy, Default)]
pub struct UsableEvent;

impl EventFilter for UsableEvent {
    fn is_eligible(&self, record: &EventRecord) -> bool {
        let (lat, lng) = record.coordinates();

        HealthyStatus.is_eligible(record)
            && is_truthy(&record.location)
            && lat.is_some_and(is_truthy)
            && lng.is_some_and(is_truthy)
    }
}

/// Named predicates, as selectable from configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum FilterKind {
    Usable,
    Status,
}

impl EventFilter for FilterKind {
    fn is_eligible(&self, record: &EventRecord) -> bool {
        match self {
            FilterKind::Usable => UsableEvent.is_eligible(record),
            FilterKind::Status => HealthyStatus.is_eligible(record),
        }
    }
}

/// Returns the eligible records, in the order they were given
pub fn filter_events<'a, P>(records: &'a [EventRecord], predicate: &P) -> Vec<&'a EventRecord>
where
    P: EventFilter + ?Sized,
{
    records
        .iter()
        .filter(|record| predicate.is_eligible(record))
        .collect()
}
