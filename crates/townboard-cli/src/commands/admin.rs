//! Administrative actions: the add/edit forms, the toggle, and deletion.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use townboard_core::{Event, EventDraft, Schedule};
use townboard_store::EventStore;

use crate::cli::{AddArgs, EditArgs};
use crate::error::{CliError, CliResult};
use crate::render;

/// All events, newest first, optionally filtered.
pub fn list(
    store: &EventStore,
    filter: Option<&str>,
    json: bool,
    now: NaiveDateTime,
) -> CliResult<()> {
    let events = store.admin_index(filter, now)?;
    render::print_events(&events, json)
}

/// Creates a new event from the submitted fields.
pub fn add(store: &EventStore, args: &AddArgs, now: NaiveDateTime) -> CliResult<()> {
    let schedule = Schedule {
        date: parse_date(&args.date)?,
        time: args.time.as_deref().map(parse_time).transpose()?,
    };
    let mut draft = EventDraft::new(&args.title, schedule, &args.location, &args.description);
    if let Some(url) = &args.image_url {
        draft = draft.with_image_url(url);
    }
    if args.inactive {
        draft = draft.with_active(false);
    }

    let event = store.create(&draft, now)?;
    println!("created event #{}: {}", event.id, event.title);
    Ok(())
}

/// Merges the flag overrides over the stored record and saves the result.
/// The whole record is validated again, not just the changed fields.
pub fn edit(store: &EventStore, id: i64, fields: &EditArgs, now: NaiveDateTime) -> CliResult<()> {
    let existing = store.get(id)?;
    let draft = merge(&existing, fields)?;
    let event = store.update(id, &draft, now)?;
    println!("updated event #{}: {}", event.id, event.title);
    Ok(())
}

/// Flips an event's visibility.
pub fn toggle(store: &EventStore, id: i64, now: NaiveDateTime) -> CliResult<()> {
    let event = store.toggle(id, now)?;
    if event.is_active {
        println!("event #{id} is now visible");
    } else {
        println!("event #{id} is now hidden");
    }
    Ok(())
}

/// Deletes an event permanently. Requires `--yes`.
pub fn delete(store: &EventStore, id: i64, yes: bool) -> CliResult<()> {
    if !yes {
        return Err(CliError::ConfirmationRequired);
    }
    store.delete(id)?;
    println!("deleted event #{id}");
    Ok(())
}

fn merge(existing: &Event, fields: &EditArgs) -> CliResult<EventDraft> {
    let date = match &fields.date {
        Some(raw) => parse_date(raw)?,
        None => existing.schedule.date,
    };
    let time = if fields.clear_time {
        None
    } else {
        match &fields.time {
            Some(raw) => Some(parse_time(raw)?),
            None => existing.schedule.time,
        }
    };
    let image_url = if fields.clear_image_url {
        None
    } else {
        fields
            .image_url
            .clone()
            .or_else(|| existing.image_url.clone())
    };

    Ok(EventDraft {
        title: fields.title.clone().unwrap_or_else(|| existing.title.clone()),
        schedule: Schedule { date, time },
        location: fields
            .location
            .clone()
            .unwrap_or_else(|| existing.location.clone()),
        description: fields
            .description
            .clone()
            .unwrap_or_else(|| existing.description.clone()),
        image_url,
        is_active: fields.active.unwrap_or(existing.is_active),
    })
}

fn parse_date(raw: &str) -> CliResult<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| CliError::InvalidDate(raw.to_string()))
}

fn parse_time(raw: &str) -> CliResult<NaiveTime> {
    NaiveTime::parse_from_str(raw, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
        .map_err(|_| CliError::InvalidTime(raw.to_string()))
}
