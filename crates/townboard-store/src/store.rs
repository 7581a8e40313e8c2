//! The event store.
//!
//! One SQLite table holds the listing. All policy lives in
//! `townboard-core`; this module's job is to make sure the policy runs at
//! every mutation point and before every listing query (the lazy sweep), and
//! to own ordering, filtering, and the not-found semantics.

use std::path::Path;

use chrono::NaiveDateTime;
use rusqlite::{Connection, OptionalExtension, Row, ToSql, params, params_from_iter};
use tracing::debug;

use townboard_core::{Event, EventDraft, Schedule, lifecycle, validate};

use crate::error::{StoreError, StoreResult};

const COLUMNS: &str =
    "id, title, date, time, location, description, image_url, is_active, created_at, updated_at";

/// SQLite-backed store for listed events.
pub struct EventStore {
    conn: Connection,
}

impl EventStore {
    /// Opens (creating if necessary) the store at the given path.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.init_schema()?;
        Ok(store)
    }

    /// Opens an in-memory store. Mainly for tests.
    pub fn open_in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> StoreResult<()> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS events(
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                date TEXT NOT NULL,
                time TEXT,
                location TEXT NOT NULL,
                description TEXT NOT NULL,
                image_url TEXT,
                is_active INTEGER NOT NULL DEFAULT 1,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );",
        )?;
        Ok(())
    }

    /// Validates and stores a new event.
    ///
    /// The deactivation stage runs before the insert, like on every other
    /// persist path.
    pub fn create(&self, draft: &EventDraft, now: NaiveDateTime) -> StoreResult<Event> {
        validate(draft, now).map_err(StoreError::Rejected)?;

        let mut event = draft.clone().into_event(0, now);
        lifecycle::apply_deactivation(&mut event, now);

        self.conn.execute(
            "INSERT INTO events
                 (title, date, time, location, description, image_url, is_active, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                event.title,
                event.schedule.date,
                event.schedule.time,
                event.location,
                event.description,
                event.image_url,
                event.is_active,
                event.created_at,
                event.updated_at,
            ],
        )?;
        event.id = self.conn.last_insert_rowid();
        debug!(id = event.id, title = %event.title, "created event");
        Ok(event)
    }

    /// Validates the full draft and rewrites an existing event.
    ///
    /// `created_at` is preserved; `updated_at` is stamped from `now`.
    pub fn update(&self, id: i64, draft: &EventDraft, now: NaiveDateTime) -> StoreResult<Event> {
        let existing = self.get(id)?;
        validate(draft, now).map_err(StoreError::Rejected)?;

        let mut event = draft.clone().into_event(id, now);
        event.created_at = existing.created_at;
        lifecycle::apply_deactivation(&mut event, now);

        self.persist(&event)?;
        debug!(id, "updated event");
        Ok(event)
    }

    /// Fetches an event by id for administration.
    pub fn get(&self, id: i64) -> StoreResult<Event> {
        self.conn
            .query_row(
                &format!("SELECT {COLUMNS} FROM events WHERE id = ?1"),
                params![id],
                row_to_event,
            )
            .optional()?
            .ok_or(StoreError::NotFound { id })
    }

    /// Fetches an event by id for the public detail view.
    ///
    /// Inactive events are indistinguishable from missing ones here.
    pub fn public_event(&self, id: i64) -> StoreResult<Event> {
        self.conn
            .query_row(
                &format!("SELECT {COLUMNS} FROM events WHERE id = ?1 AND is_active = 1"),
                params![id],
                row_to_event,
            )
            .optional()?
            .ok_or(StoreError::NotFound { id })
    }

    /// Public listing: active events ordered by `(date, time)` ascending.
    ///
    /// Runs the sweep first, so an active row always means an upcoming event.
    pub fn upcoming(&self, now: NaiveDateTime) -> StoreResult<Vec<Event>> {
        self.sweep(now)?;
        self.select_events(
            &format!("SELECT {COLUMNS} FROM events WHERE is_active = 1 ORDER BY date ASC, time ASC"),
            params![],
        )
    }

    /// Administration index: every event, newest first, optionally filtered
    /// by a case-insensitive substring over title and location.
    pub fn admin_index(&self, filter: Option<&str>, now: NaiveDateTime) -> StoreResult<Vec<Event>> {
        self.sweep(now)?;
        match filter.map(str::trim).filter(|needle| !needle.is_empty()) {
            Some(needle) => {
                let pattern = format!("%{}%", needle.to_lowercase());
                self.select_events(
                    &format!(
                        "SELECT {COLUMNS} FROM events
                         WHERE lower(title) LIKE ?1 OR lower(location) LIKE ?1
                         ORDER BY date DESC, time DESC"
                    ),
                    params![pattern],
                )
            }
            None => self.select_events(
                &format!("SELECT {COLUMNS} FROM events ORDER BY date DESC, time DESC"),
                params![],
            ),
        }
    }

    /// Flips an event's visibility.
    ///
    /// Reactivating a past event is refused with [`StoreError::PastEvent`];
    /// hiding an event is always allowed.
    pub fn toggle(&self, id: i64, now: NaiveDateTime) -> StoreResult<Event> {
        let mut event = self.get(id)?;
        if !event.is_active && event.is_past(now) {
            return Err(StoreError::past_event(id));
        }

        event.is_active = !event.is_active;
        lifecycle::apply_deactivation(&mut event, now);
        event.updated_at = now;
        self.persist(&event)?;
        debug!(id, is_active = event.is_active, "toggled event");
        Ok(event)
    }

    /// Deletes an event permanently.
    pub fn delete(&self, id: i64) -> StoreResult<()> {
        let deleted = self
            .conn
            .execute("DELETE FROM events WHERE id = ?1", params![id])?;
        if deleted == 0 {
            return Err(StoreError::not_found(id));
        }
        debug!(id, "deleted event");
        Ok(())
    }

    /// Best-effort bulk deactivation of past events.
    ///
    /// Loads the currently active rows, recomputes the lifecycle check with
    /// the core policy, and clears the flag for the qualifying ids in one
    /// bulk UPDATE. Idempotent: a second application finds nothing to do.
    /// Returns the number of rows deactivated.
    pub fn sweep(&self, now: NaiveDateTime) -> StoreResult<usize> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, date, time FROM events WHERE is_active = 1")?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                Schedule {
                    date: row.get(1)?,
                    time: row.get(2)?,
                },
            ))
        })?;

        let mut expired = Vec::new();
        for row in rows {
            let (id, schedule) = row?;
            if schedule.is_past(now) {
                expired.push(id);
            }
        }
        if expired.is_empty() {
            return Ok(0);
        }

        let mut values: Vec<Box<dyn ToSql>> = Vec::with_capacity(expired.len() + 1);
        values.push(Box::new(now));
        for id in &expired {
            values.push(Box::new(*id));
        }
        let placeholders: Vec<String> = (2..=expired.len() + 1).map(|i| format!("?{i}")).collect();
        let sql = format!(
            "UPDATE events SET is_active = 0, updated_at = ?1 WHERE id IN ({})",
            placeholders.join(", ")
        );
        let changed = self
            .conn
            .execute(&sql, params_from_iter(values.iter().map(|v| v.as_ref())))?;

        debug!(deactivated = changed, "swept past events");
        Ok(changed)
    }

    fn persist(&self, event: &Event) -> StoreResult<()> {
        self.conn.execute(
            "UPDATE events
             SET title = ?2, date = ?3, time = ?4, location = ?5, description = ?6,
                 image_url = ?7, is_active = ?8, updated_at = ?9
             WHERE id = ?1",
            params![
                event.id,
                event.title,
                event.schedule.date,
                event.schedule.time,
                event.location,
                event.description,
                event.image_url,
                event.is_active,
                event.updated_at,
            ],
        )?;
        Ok(())
    }

    fn select_events<P: rusqlite::Params>(&self, sql: &str, params: P) -> StoreResult<Vec<Event>> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map(params, row_to_event)?;
        let mut events = Vec::new();
        for row in rows {
            events.push(row?);
        }
        Ok(events)
    }
}

fn row_to_event(row: &Row<'_>) -> rusqlite::Result<Event> {
    Ok(Event {
        id: row.get(0)?,
        title: row.get(1)?,
        schedule: Schedule {
            date: row.get(2)?,
            time: row.get(3)?,
        },
        location: row.get(4)?,
        description: row.get(5)?,
        image_url: row.get(6)?,
        is_active: row.get(7)?,
        created_at: row.get(8)?,
        updated_at: row.get(9)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};
    use townboard_core::ErrorKind;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn clock(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        day(y, m, d).and_time(clock(h, min))
    }

    /// The instant most tests evaluate against.
    fn now() -> NaiveDateTime {
        at(2025, 6, 15, 12, 0)
    }

    /// An earlier instant for creating events that are past by `now()`.
    fn creation() -> NaiveDateTime {
        at(2025, 6, 1, 8, 0)
    }

    fn store() -> EventStore {
        EventStore::open_in_memory().unwrap()
    }

    fn draft(title: &str, schedule: Schedule) -> EventDraft {
        EventDraft::new(
            title,
            schedule,
            "Main Square",
            "An open-air gathering for the whole town.",
        )
    }

    #[test]
    fn create_and_get_roundtrip() {
        let store = store();
        let created = store
            .create(
                &draft("Summer Fair", Schedule::on(day(2025, 6, 20)))
                    .with_image_url("https://example.com/fair.jpg"),
                now(),
            )
            .unwrap();

        assert!(created.id > 0);
        assert_eq!(created.created_at, now());
        assert_eq!(created.updated_at, now());

        let fetched = store.get(created.id).unwrap();
        assert_eq!(fetched, created);
    }

    #[test]
    fn create_rejects_past_date() {
        let store = store();
        let err = store
            .create(&draft("Old News", Schedule::on(day(2025, 6, 1))), now())
            .unwrap_err();
        match err {
            StoreError::Rejected(errors) => {
                assert!(errors.iter().any(|e| e.kind == ErrorKind::PastDate));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn update_rejects_unsafe_description() {
        let store = store();
        let event = store
            .create(&draft("Summer Fair", Schedule::on(day(2025, 6, 20))), now())
            .unwrap();

        let mut changed = draft("Summer Fair", Schedule::on(day(2025, 6, 20)));
        changed.description = "New details <script>alert(1)</script>".to_string();
        let err = store.update(event.id, &changed, now()).unwrap_err();
        match err {
            StoreError::Rejected(errors) => {
                assert!(errors.iter().any(|e| e.kind == ErrorKind::UnsafeContent));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn update_preserves_created_at() {
        let store = store();
        let event = store
            .create(&draft("Summer Fair", Schedule::on(day(2025, 6, 20))), creation())
            .unwrap();

        let updated = store
            .update(
                event.id,
                &draft("Summer Fair (moved)", Schedule::on(day(2025, 6, 21))),
                now(),
            )
            .unwrap();

        assert_eq!(updated.title, "Summer Fair (moved)");
        assert_eq!(updated.created_at, creation());
        assert_eq!(updated.updated_at, now());
        assert_eq!(store.get(event.id).unwrap(), updated);
    }

    #[test]
    fn update_missing_event_is_not_found() {
        let store = store();
        let err = store
            .update(99, &draft("Ghost", Schedule::on(day(2025, 6, 20))), now())
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound { id: 99 }));
    }

    #[test]
    fn public_event_hides_inactive() {
        let store = store();
        let hidden = store
            .create(
                &draft("Secret Gig", Schedule::on(day(2025, 6, 20))).with_active(false),
                now(),
            )
            .unwrap();

        assert!(matches!(
            store.public_event(hidden.id),
            Err(StoreError::NotFound { .. })
        ));
        // Administration still sees it.
        assert!(!store.get(hidden.id).unwrap().is_active);

        assert!(matches!(
            store.public_event(12345),
            Err(StoreError::NotFound { .. })
        ));
    }

    #[test]
    fn upcoming_orders_ascending_and_skips_inactive() {
        let store = store();
        store
            .create(&draft("Third", Schedule::on(day(2025, 6, 25))), now())
            .unwrap();
        store
            .create(
                &draft("Second", Schedule::at(day(2025, 6, 17), clock(19, 30))),
                now(),
            )
            .unwrap();
        store
            .create(&draft("First", Schedule::on(day(2025, 6, 17))), now())
            .unwrap();
        store
            .create(
                &draft("Hidden", Schedule::on(day(2025, 6, 18))).with_active(false),
                now(),
            )
            .unwrap();

        let titles: Vec<String> = store
            .upcoming(now())
            .unwrap()
            .into_iter()
            .map(|e| e.title)
            .collect();
        assert_eq!(titles, vec!["First", "Second", "Third"]);
    }

    #[test]
    fn upcoming_sweeps_stale_active_rows() {
        let store = store();
        // Valid and active when created; past by the listing instant.
        let stale = store
            .create(
                &draft("Morning Yoga", Schedule::at(day(2025, 6, 14), clock(9, 0))),
                creation(),
            )
            .unwrap();
        assert!(stale.is_active);

        assert!(store.upcoming(now()).unwrap().is_empty());
        assert!(!store.get(stale.id).unwrap().is_active);
    }

    #[test]
    fn sweep_deactivates_exactly_the_past_events() {
        let store = store();
        let past = [
            Schedule::on(day(2025, 6, 5)),
            Schedule::at(day(2025, 6, 14), clock(19, 30)),
            Schedule::at(day(2025, 6, 15), clock(9, 0)),
        ];
        let upcoming = [
            Schedule::on(day(2025, 6, 15)),
            Schedule::at(day(2025, 6, 15), clock(13, 0)),
            Schedule::on(day(2025, 6, 16)),
            Schedule::on(day(2025, 6, 17)),
            Schedule::at(day(2025, 6, 18), clock(10, 0)),
            Schedule::on(day(2025, 6, 19)),
            Schedule::on(day(2025, 6, 20)),
        ];
        for (i, schedule) in past.iter().chain(upcoming.iter()).enumerate() {
            store
                .create(&draft(&format!("Event {i}"), *schedule), creation())
                .unwrap();
        }

        assert_eq!(store.sweep(now()).unwrap(), 3);

        let events = store.admin_index(None, now()).unwrap();
        assert_eq!(events.len(), 10);
        assert_eq!(events.iter().filter(|e| e.is_active).count(), 7);
        for event in &events {
            assert_eq!(event.is_active, !event.is_past(now()));
        }
    }

    #[test]
    fn sweep_is_idempotent() {
        let store = store();
        store
            .create(&draft("Gone", Schedule::on(day(2025, 6, 10))), creation())
            .unwrap();

        assert_eq!(store.sweep(now()).unwrap(), 1);
        assert_eq!(store.sweep(now()).unwrap(), 0);
    }

    #[test]
    fn toggle_hides_and_reshows_upcoming_events() {
        let store = store();
        let event = store
            .create(&draft("Summer Fair", Schedule::on(day(2025, 6, 20))), now())
            .unwrap();

        let hidden = store.toggle(event.id, now()).unwrap();
        assert!(!hidden.is_active);

        let visible = store.toggle(event.id, now()).unwrap();
        assert!(visible.is_active);
    }

    #[test]
    fn toggle_refuses_reactivating_past_events() {
        let store = store();
        let event = store
            .create(
                &draft("Morning Yoga", Schedule::at(day(2025, 6, 14), clock(9, 0))),
                creation(),
            )
            .unwrap();
        store.sweep(now()).unwrap();

        let err = store.toggle(event.id, now()).unwrap_err();
        assert!(matches!(err, StoreError::PastEvent { .. }));
        assert!(!store.get(event.id).unwrap().is_active);
    }

    #[test]
    fn toggle_missing_event_is_not_found() {
        let store = store();
        assert!(matches!(
            store.toggle(7, now()),
            Err(StoreError::NotFound { id: 7 })
        ));
    }

    #[test]
    fn admin_index_orders_descending_and_includes_inactive() {
        let store = store();
        store
            .create(&draft("Oldest", Schedule::on(day(2025, 6, 16))), now())
            .unwrap();
        store
            .create(
                &draft("Hidden", Schedule::on(day(2025, 6, 18))).with_active(false),
                now(),
            )
            .unwrap();
        store
            .create(&draft("Newest", Schedule::on(day(2025, 6, 20))), now())
            .unwrap();

        let titles: Vec<String> = store
            .admin_index(None, now())
            .unwrap()
            .into_iter()
            .map(|e| e.title)
            .collect();
        assert_eq!(titles, vec!["Newest", "Hidden", "Oldest"]);
    }

    #[test]
    fn admin_filter_matches_title_and_location() {
        let store = store();
        store
            .create(&draft("Summer Fair", Schedule::on(day(2025, 6, 20))), now())
            .unwrap();
        let mut elsewhere = draft("Jazz Night", Schedule::on(day(2025, 6, 21)));
        elsewhere.location = "Riverside Hall".to_string();
        store.create(&elsewhere, now()).unwrap();

        let by_title = store.admin_index(Some("FAIR"), now()).unwrap();
        assert_eq!(by_title.len(), 1);
        assert_eq!(by_title[0].title, "Summer Fair");

        let by_location = store.admin_index(Some("riverside"), now()).unwrap();
        assert_eq!(by_location.len(), 1);
        assert_eq!(by_location[0].title, "Jazz Night");

        let blank = store.admin_index(Some("   "), now()).unwrap();
        assert_eq!(blank.len(), 2);
    }

    #[test]
    fn delete_is_permanent() {
        let store = store();
        let event = store
            .create(&draft("Summer Fair", Schedule::on(day(2025, 6, 20))), now())
            .unwrap();

        store.delete(event.id).unwrap();
        assert!(matches!(
            store.get(event.id),
            Err(StoreError::NotFound { .. })
        ));
        assert!(matches!(store.delete(event.id), Err(StoreError::NotFound { .. })));
    }

    #[test]
    fn file_backed_store_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.db3");

        let id = {
            let store = EventStore::open(&path).unwrap();
            store
                .create(&draft("Summer Fair", Schedule::on(day(2025, 6, 20))), now())
                .unwrap()
                .id
        };

        let reopened = EventStore::open(&path).unwrap();
        assert_eq!(reopened.get(id).unwrap().title, "Summer Fair");
    }
}
