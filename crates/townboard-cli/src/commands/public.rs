//! Public listing and detail views.

use chrono::NaiveDateTime;
use townboard_store::EventStore;

use crate::error::CliResult;
use crate::render;

/// Upcoming active events, soonest first.
pub fn list(store: &EventStore, json: bool, now: NaiveDateTime) -> CliResult<()> {
    let events = store.upcoming(now)?;
    render::print_events(&events, json)
}

/// One event by id; hidden events read as not found.
pub fn show(store: &EventStore, id: i64, json: bool) -> CliResult<()> {
    let event = store.public_event(id)?;
    render::print_event(&event, json)
}
