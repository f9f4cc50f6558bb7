//! Calendar domain models.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::errors::{Result, ValidationError};
use crate::validation::ensure_valid_id;

/// An event that has not been stored yet.
///
/// The value validates itself on construction and cannot be changed
/// afterwards; an update replaces the stored record with a new value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCalendarEvent {
    user_id: i32,
    subject: String,
    description: String,
    begin: NaiveDateTime,
    end: NaiveDateTime,
}

impl NewCalendarEvent {
    /// Creates a new event value.
    ///
    /// Fails with `OutOfRange` when `user_id` is not positive or when `end`
    /// is not strictly after `begin`. Empty subject and description are
    /// accepted here; their content rules belong to the input validators.
    pub fn new(
        user_id: i32,
        subject: impl Into<String>,
        description: impl Into<String>,
        begin: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Self> {
        if user_id < 1 {
            return Err(ValidationError::out_of_range(
                "userId",
                user_id,
                "userId must be greater than 0.",
            )
            .into());
        }
        if end <= begin {
            return Err(ValidationError::out_of_range(
                "end",
                end,
                "end is less than or equal to begin",
            )
            .into());
        }

        Ok(Self {
            user_id,
            subject: subject.into(),
            description: description.into(),
            begin,
            end,
        })
    }

    pub fn user_id(&self) -> i32 {
        self.user_id
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn begin(&self) -> NaiveDateTime {
        self.begin
    }

    pub fn end(&self) -> NaiveDateTime {
        self.end
    }
}

/// A stored event: the event value plus the id assigned by the repository.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    id: i32,
    #[serde(flatten)]
    details: NewCalendarEvent,
}

impl CalendarEvent {
    /// Creates an event with identity.
    ///
    /// The embedded value is validated first, so an invalid `user_id` is
    /// reported before an invalid `id`.
    pub fn new(
        id: i32,
        user_id: i32,
        subject: impl Into<String>,
        description: impl Into<String>,
        begin: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Self> {
        let details = NewCalendarEvent::new(user_id, subject, description, begin, end)?;
        Self::from_parts(id, details)
    }

    /// Attaches an id to an already validated event value.
    pub fn from_parts(id: i32, details: NewCalendarEvent) -> Result<Self> {
        ensure_valid_id(id, "id")?;
        Ok(Self { id, details })
    }

    pub fn id(&self) -> i32 {
        self.id
    }

    /// The identity-free part of the event.
    pub fn details(&self) -> &NewCalendarEvent {
        &self.details
    }

    pub fn into_details(self) -> NewCalendarEvent {
        self.details
    }

    pub fn user_id(&self) -> i32 {
        self.details.user_id
    }

    pub fn subject(&self) -> &str {
        &self.details.subject
    }

    pub fn description(&self) -> &str {
        &self.details.description
    }

    pub fn begin(&self) -> NaiveDateTime {
        self.details.begin
    }

    pub fn end(&self) -> NaiveDateTime {
        self.details.end
    }
}

/// A span of time used for period queries.
///
/// Unlike an event, a range may be empty (`begin == end`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DateTimeRange {
    begin: NaiveDateTime,
    end: NaiveDateTime,
}

impl DateTimeRange {
    pub fn new(begin: NaiveDateTime, end: NaiveDateTime) -> Result<Self> {
        if end < begin {
            return Err(
                ValidationError::out_of_range("end", end, "end is less than begin").into(),
            );
        }
        Ok(Self { begin, end })
    }

    pub fn begin(&self) -> NaiveDateTime {
        self.begin
    }

    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    /// Half-open membership test: `begin <= instant < end`.
    ///
    /// Period queries select events whose begin lies in the range.
    pub fn contains(&self, instant: NaiveDateTime) -> bool {
        self.begin <= instant && instant < self.end
    }
}

/// Outcome of creating an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventResult {
    /// `true` when an equal event was already stored and nothing was created.
    pub already_exists: bool,
    /// Id of the created event, `0` when `already_exists` is set.
    pub id: i32,
}

impl CreateEventResult {
    pub fn created(id: i32) -> Self {
        Self {
            already_exists: false,
            id,
        }
    }

    pub fn already_exists() -> Self {
        Self {
            already_exists: true,
            id: 0,
        }
    }
}

/// Outcome of updating an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UpdateEventResult {
    /// The stored event has been replaced.
    Success,
    /// No event with that id exists for the user.
    NotFound,
    /// An equal event is already stored.
    AlreadyExists,
}
