//! Core types: events, schedules, lifecycle policy, validation

pub mod event;
pub mod lifecycle;
pub mod logging;
pub mod schedule;
pub mod validate;

pub use event::{Event, EventDraft};
pub use lifecycle::{apply_deactivation, is_past};
pub use logging::{LogConfig, LogFormat, LoggingError, init_logging};
pub use schedule::Schedule;
pub use validate::{ErrorKind, FieldError, validate};
