//! Field validation for submitted event drafts.
//!
//! A single pipeline checks the whole record on every save and aggregates
//! the failures, so the administrator sees all offending fields at once
//! rather than one exception at a time. Every rule is a pure function of the
//! draft and the evaluation instant.
//!
//! # Example
//!
//! ```
//! use chrono::{NaiveDate, NaiveTime};
//! use townboard_core::{EventDraft, Schedule, validate};
//!
//! let date = NaiveDate::from_ymd_opt(2025, 6, 20).unwrap();
//! let now = NaiveDate::from_ymd_opt(2025, 6, 15)
//!     .unwrap()
//!     .and_time(NaiveTime::from_hms_opt(12, 0, 0).unwrap());
//! let draft = EventDraft::new("Summer Fair", Schedule::on(date), "Main Square", "Stalls and music.");
//! assert!(validate(&draft, now).is_ok());
//! ```

use std::sync::LazyLock;

use chrono::NaiveDateTime;
use regex::Regex;
use thiserror::Error;
use url::Url;

use crate::event::EventDraft;

/// Case-insensitive substrings that mark a description as unsafe.
///
/// A shallow defense-in-depth check; the rendering layer is still expected
/// to escape all output.
const UNSAFE_MARKUP: [&str; 5] = ["<script", "</script>", "javascript:", "onerror=", "onclick="];

/// Accepted shape for image URLs: http/https scheme, then a dotted domain
/// name, `localhost`, or a dotted IPv4 address, an optional port, and an
/// optional path/query.
static IMAGE_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?i)^https?://",
        r"(?:(?:[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?\.)+[a-z]{2,6}\.?",
        r"|localhost",
        r"|\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3})",
        r"(?::\d+)?",
        r"(?:/?|[/?]\S+)$",
    ))
    .expect("valid image URL regex")
});

/// What went wrong with a single field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ErrorKind {
    /// A required field was left blank.
    #[error("this field is required")]
    Required,

    /// The event date is before today.
    #[error("the date must not be in the past")]
    PastDate,

    /// The image URL is not an absolute HTTP(S) URL.
    #[error("enter a valid image URL")]
    InvalidUrl,

    /// The description contains markup from the denylist.
    #[error("the description contains disallowed markup")]
    UnsafeContent,

    /// An event that has already taken place cannot be made active.
    #[error("an event that has already taken place cannot be active")]
    CannotActivatePast,
}

/// A validation failure attached to one input field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {kind}")]
pub struct FieldError {
    /// Name of the offending field.
    pub field: &'static str,
    /// Machine-readable failure kind; `Display` yields the message.
    pub kind: ErrorKind,
}

impl FieldError {
    /// Creates a field error.
    pub fn new(field: &'static str, kind: ErrorKind) -> Self {
        Self { field, kind }
    }
}

/// Checks a submitted draft against every rule and aggregates the failures.
///
/// All rules run even when earlier ones fail, so the result lists every
/// offending field. Returns `Ok(())` when the draft is acceptable.
pub fn validate(draft: &EventDraft, now: NaiveDateTime) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();

    if draft.title.trim().is_empty() {
        errors.push(FieldError::new("title", ErrorKind::Required));
    }

    if draft.schedule.date < now.date() {
        errors.push(FieldError::new("date", ErrorKind::PastDate));
    }

    if draft.location.trim().is_empty() {
        errors.push(FieldError::new("location", ErrorKind::Required));
    }

    if draft.description.trim().is_empty() {
        errors.push(FieldError::new("description", ErrorKind::Required));
    }
    if contains_unsafe_markup(&draft.description) {
        errors.push(FieldError::new("description", ErrorKind::UnsafeContent));
    }

    if let Some(raw) = draft.image_url.as_deref() {
        if !raw.is_empty() && !is_valid_image_url(raw) {
            errors.push(FieldError::new("image_url", ErrorKind::InvalidUrl));
        }
    }

    if draft.is_active && draft.schedule.is_past(now) {
        errors.push(FieldError::new("is_active", ErrorKind::CannotActivatePast));
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

fn contains_unsafe_markup(text: &str) -> bool {
    let lowered = text.to_lowercase();
    UNSAFE_MARKUP.iter().any(|pattern| lowered.contains(pattern))
}

fn is_valid_image_url(raw: &str) -> bool {
    IMAGE_URL.is_match(raw) && Url::parse(raw).is_ok()
}
