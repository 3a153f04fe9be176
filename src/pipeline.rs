use crate::feed::dto::EventRecord;
use crate::feed::filter::{filter_events, EventFilter, UsableEvent};
use crate::feed::model::EventView;
use tracing::info;

/**
   Turns a fetched batch into the views to display, keeping the batch order.
   * predicate: defaults to healthy events with coordinates
*/
pub fn run(batch: &[EventRecord], predicate: Option<&dyn EventFilter>) -> Vec<EventView> {
    let eligible = match predicate {
        Some(predicate) => filter_events(batch, predicate),
        None => filter_events(batch, &UsableEvent),
    };

    info!(
        "{} of {} events are eligible for display",
        eligible.len(),
        batch.len()
    );

    eligible.into_iter().map(EventView::from).collect()
}
