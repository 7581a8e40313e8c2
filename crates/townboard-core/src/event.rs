//! The event record and its submission form.
//!
//! [`Event`] is a stored listing entry; [`EventDraft`] carries the candidate
//! field values an administrator submits for a create or an edit. Drafts are
//! checked by [`crate::validate`] before they reach storage.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::schedule::Schedule;

/// How much of the description the short announcement keeps.
const SHORT_DESCRIPTION_LIMIT: usize = 100;

/// A listed local event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Storage-assigned identifier.
    pub id: i64,
    /// Event title.
    pub title: String,
    /// Date and optional start time.
    pub schedule: Schedule,
    /// Venue or address.
    pub location: String,
    /// Full description.
    pub description: String,
    /// Optional absolute HTTP(S) image URL.
    pub image_url: Option<String>,
    /// Whether the event is visible on the public listing. Must be false
    /// whenever the schedule is past; enforced at every mutation point.
    pub is_active: bool,
    /// When the record was created. System-managed.
    pub created_at: NaiveDateTime,
    /// When the record was last written. System-managed.
    pub updated_at: NaiveDateTime,
}

impl Event {
    /// Returns `true` if the event has already taken place at `now`.
    pub fn is_past(&self, now: NaiveDateTime) -> bool {
        self.schedule.is_past(now)
    }

    /// Short announcement text: the first 100 characters of the description,
    /// with `...` appended when truncated.
    pub fn short_description(&self) -> String {
        if self.description.chars().count() > SHORT_DESCRIPTION_LIMIT {
            let cut: String = self.description.chars().take(SHORT_DESCRIPTION_LIMIT).collect();
            format!("{cut}...")
        } else {
            self.description.clone()
        }
    }
}

/// Candidate field values submitted for a create or an edit.
///
/// A draft always carries the full record; validation checks every field on
/// every save, not just the ones that changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDraft {
    /// Event title.
    pub title: String,
    /// Date and optional start time.
    pub schedule: Schedule,
    /// Venue or address.
    pub location: String,
    /// Full description.
    pub description: String,
    /// Optional absolute HTTP(S) image URL.
    pub image_url: Option<String>,
    /// Requested visibility. Defaults to `true`.
    pub is_active: bool,
}

impl EventDraft {
    /// Creates a draft with the required fields; the event starts out active
    /// and without an image.
    pub fn new(
        title: impl Into<String>,
        schedule: Schedule,
        location: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            schedule,
            location: location.into(),
            description: description.into(),
            image_url: None,
            is_active: true,
        }
    }

    /// Builder method to set the image URL.
    pub fn with_image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    /// Builder method to set the requested visibility.
    pub fn with_active(mut self, active: bool) -> Self {
        self.is_active = active;
        self
    }

    /// Materializes the draft into a record, stamping both timestamps from
    /// the evaluation instant. Callers updating an existing record keep its
    /// original `created_at`.
    pub fn into_event(self, id: i64, now: NaiveDateTime) -> Event {
        Event {
            id,
            title: self.title,
            schedule: self.schedule,
            location: self.location,
            description: self.description,
            image_url: self.image_url,
            is_active: self.is_active,
            created_at: now,
            updated_at: now,
        }
    }
}
