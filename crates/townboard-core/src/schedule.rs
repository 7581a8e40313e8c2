//! When an event takes place.
//!
//! This module provides [`Schedule`]: a calendar date plus an optional start
//! time. Events without a start time are "all day" (or simply unannounced);
//! they sort before timed events on the same date and are never considered
//! past while their date is still today.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// The date and optional start time of a listed event.
///
/// Ordering is by `(date, time)`; an absent time sorts before any
/// time-of-day on the same date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Schedule {
    /// Calendar date the event takes place on.
    pub date: NaiveDate,
    /// Start time, if one was announced.
    pub time: Option<NaiveTime>,
}

impl Schedule {
    /// Creates an all-day schedule for the given date.
    pub fn on(date: NaiveDate) -> Self {
        Self { date, time: None }
    }

    /// Creates a schedule with a start time.
    pub fn at(date: NaiveDate, time: NaiveTime) -> Self {
        Self {
            date,
            time: Some(time),
        }
    }

    /// Returns `true` if no start time was announced.
    pub fn is_all_day(&self) -> bool {
        self.time.is_none()
    }

    /// Returns `true` if this schedule is at or before the evaluation instant.
    ///
    /// The rule:
    /// - a date before today is always past, regardless of time;
    /// - today's date with a start time is past once the clock reaches that
    ///   time (the boundary is closed: an event starting exactly now counts
    ///   as past);
    /// - today's date without a start time is never past by time-of-day.
    pub fn is_past(&self, now: NaiveDateTime) -> bool {
        if self.date < now.date() {
            return true;
        }
        match self.time {
            Some(start) if self.date == now.date() => start <= now.time(),
            _ => false,
        }
    }
}
