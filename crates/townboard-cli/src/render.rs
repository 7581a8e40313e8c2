//! Text and JSON rendering for events.

use townboard_core::Event;

use crate::error::CliResult;

/// Prints a listing, one event per line, or the whole set as JSON.
pub fn print_events(events: &[Event], json: bool) -> CliResult<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(events)?);
        return Ok(());
    }
    if events.is_empty() {
        println!("No events.");
        return Ok(());
    }
    for event in events {
        println!("{}", event_line(event));
    }
    Ok(())
}

/// Prints one event in full, or as JSON.
pub fn print_event(event: &Event, json: bool) -> CliResult<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(event)?);
        return Ok(());
    }
    println!("{}", event.title);
    println!("when:     {}", when(event));
    println!("where:    {}", event.location);
    if let Some(url) = &event.image_url {
        println!("image:    {url}");
    }
    if !event.is_active {
        println!("status:   hidden from the public listing");
    }
    println!();
    println!("{}", event.description);
    Ok(())
}

/// One-line summary used by the listings.
pub fn event_line(event: &Event) -> String {
    let flag = if event.is_active { "" } else { "  [hidden]" };
    format!(
        "#{:<4} {}  {} @ {}{}",
        event.id,
        when(event),
        event.title,
        event.location,
        flag
    )
}

fn when(event: &Event) -> String {
    match event.schedule.time {
        Some(time) => format!("{} {}", event.schedule.date, time.format("%H:%M")),
        None => format!("{} all day", event.schedule.date),
    }
}
