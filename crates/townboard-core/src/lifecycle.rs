//! Event lifecycle policy.
//!
//! One authoritative answer to "has this event already happened?", and the
//! deactivation stage that every persist path and every listing sweep runs.
//! The stage only ever clears the active flag; nothing here reactivates an
//! event.

use chrono::NaiveDateTime;
use tracing::debug;

use crate::event::Event;

/// Returns `true` if the event's schedule is at or before `now`.
///
/// See [`crate::Schedule::is_past`] for the boundary rule.
pub fn is_past(event: &Event, now: NaiveDateTime) -> bool {
    event.schedule.is_past(now)
}

/// Forces a past event inactive.
///
/// Leaves future events and already-inactive events untouched. Idempotent:
/// applying it twice yields the same flag as applying it once. Returns `true`
/// when this call cleared the flag.
pub fn apply_deactivation(event: &mut Event, now: NaiveDateTime) -> bool {
    if event.is_active && is_past(event, now) {
        event.is_active = false;
        debug!(id = event.id, title = %event.title, "deactivated past event");
        return true;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventDraft;
    use crate::schedule::Schedule;
    use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        day(y, m, d).and_time(NaiveTime::from_hms_opt(h, min, 0).unwrap())
    }

    fn event_on(date: NaiveDate, active: bool) -> Event {
        EventDraft::new("Night Market", Schedule::on(date), "Harbour", "Food stalls by the water.")
            .with_active(active)
            .into_event(1, at(2025, 6, 1, 8, 0))
    }

    #[test]
    fn deactivates_past_active_event() {
        let now = at(2025, 6, 15, 12, 0);
        let mut event = event_on(day(2025, 6, 10), true);

        assert!(apply_deactivation(&mut event, now));
        assert!(!event.is_active);
    }

    #[test]
    fn is_idempotent() {
        let now = at(2025, 6, 15, 12, 0);
        let mut event = event_on(day(2025, 6, 10), true);

        apply_deactivation(&mut event, now);
        let after_once = event.is_active;
        assert!(!apply_deactivation(&mut event, now));
        assert_eq!(event.is_active, after_once);
    }

    #[test]
    fn leaves_future_event_untouched() {
        let now = at(2025, 6, 15, 12, 0);
        let mut event = event_on(day(2025, 6, 20), true);

        assert!(!apply_deactivation(&mut event, now));
        assert!(event.is_active);
    }

    #[test]
    fn never_activates() {
        let now = at(2025, 6, 15, 12, 0);
        let mut future_inactive = event_on(day(2025, 6, 20), false);

        assert!(!apply_deactivation(&mut future_inactive, now));
        assert!(!future_inactive.is_active);

        let mut past_inactive = event_on(day(2025, 6, 10), false);
        assert!(!apply_deactivation(&mut past_inactive, now));
        assert!(!past_inactive.is_active);
    }
}
