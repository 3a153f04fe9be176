use eventrotator::feed::api::parse_batch;
use eventrotator::feed::dto::EventRecord;
use eventrotator::feed::filter::{filter_events, HealthyStatus, UsableEvent};
use eventrotator::feed::model::EventView;
use eventrotator::pipeline;

const EVENTS_FIXTURE: &str = include_str!("fixtures/events.json");

fn load_batch() -> Vec<EventRecord> {
    parse_batch(EVENTS_FIXTURE).expect("Fixture should be a valid batch")
}

#[test_log::test]
fn should_display_usable_events_in_feed_order() {
    let views = pipeline::run(&load_batch(), None);

    assert_eq!(
        views,
        vec![
            EventView {
                location: "Austin, TX, USA".to_string(),
                period: "January 30 – February 1".to_string(),
                has_website: true,
                website_url: "http://austin.startupweekend.org".to_string(),
            },
            EventView {
                location: "Lisbon, Portugal".to_string(),
                period: "March 1 – 3".to_string(),
                has_website: true,
                website_url: "HTTP://lisbon.startupweekend.org".to_string(),
            },
            EventView {
                location: "Tokyo, Japan".to_string(),
                period: "".to_string(),
                has_website: false,
                website_url: "".to_string(),
            },
        ]
    );
}

#[test_log::test]
fn should_display_unmapped_events_with_status_filter() {
    let views = pipeline::run(&load_batch(), Some(&HealthyStatus));

    let locations: Vec<&str> = views.iter().map(|view| view.location.as_str()).collect();

    assert_eq!(
        locations,
        vec![
            "Austin, TX, USA",
            "Lisbon, Portugal",
            "Reykjavik, Iceland",
            "Tokyo, Japan",
            "Null Island"
        ]
    );
    assert_eq!(views[2].period, "February 16 – 18");
}

#[test_log::test]
fn should_keep_every_record_of_the_batch() {
    let batch = load_batch();

    assert_eq!(batch.len(), 7);
    assert_eq!(filter_events(&batch, &UsableEvent).len(), 3);
    assert_eq!(filter_events(&batch, &HealthyStatus).len(), 5);
}

#[test_log::test]
fn when_run_twice_should_display_the_same_events() {
    let batch = load_batch();

    assert_eq!(pipeline::run(&batch, None), pipeline::run(&batch, None));
}
