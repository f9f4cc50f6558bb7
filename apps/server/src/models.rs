//! Request and response shapes of the HTTP API.
//!
//! Text fields are optional on the wire so that a missing `subject` or
//! `description` is reported as a null argument instead of a JSON error.

use calendar_core::calendar::{CalendarEvent, DateTimeRange, NewCalendarEvent};
use calendar_core::errors::ValidationError;
use calendar_core::validation::{ensure_max_length, ensure_not_empty, ensure_valid_id};
use calendar_core::Result;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

pub const SUBJECT_MAX_LENGTH: usize = 100;
pub const DESCRIPTION_MAX_LENGTH: usize = 500;

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewEventModel {
    pub subject: Option<String>,
    pub description: Option<String>,
    pub begin: NaiveDateTime,
    pub end: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventModel {
    pub id: i32,
    pub subject: Option<String>,
    pub description: Option<String>,
    pub begin: NaiveDateTime,
    pub end: NaiveDateTime,
}

#[derive(Debug, Clone, Copy, Deserialize, ToSchema, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct DateTimeRangeModel {
    pub begin: NaiveDateTime,
    pub end: NaiveDateTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewEventInfoModel {
    pub id: i32,
}

fn validate_text<'a>(
    value: &'a Option<String>,
    name: &'static str,
    max: usize,
) -> Result<&'a str> {
    let value = value
        .as_deref()
        .ok_or(ValidationError::NullArgument(name))?;
    ensure_not_empty(value, name)?;
    ensure_max_length(value, max, name)?;
    Ok(value)
}

fn validate_period(begin: NaiveDateTime, end: NaiveDateTime) -> Result<()> {
    if end <= begin {
        return Err(ValidationError::InvalidInput(
            "'End' must be greater than 'Begin'.".to_string(),
        )
        .into());
    }
    Ok(())
}

impl NewEventModel {
    /// Validates the payload and builds the domain event owned by `user_id`.
    pub fn into_domain(self, user_id: i32) -> Result<NewCalendarEvent> {
        let subject = validate_text(&self.subject, "subject", SUBJECT_MAX_LENGTH)?;
        let description =
            validate_text(&self.description, "description", DESCRIPTION_MAX_LENGTH)?;
        validate_period(self.begin, self.end)?;
        NewCalendarEvent::new(user_id, subject, description, self.begin, self.end)
    }
}

impl EventModel {
    pub fn into_domain(self, user_id: i32) -> Result<CalendarEvent> {
        ensure_valid_id(self.id, "id")?;
        let subject = validate_text(&self.subject, "subject", SUBJECT_MAX_LENGTH)?;
        let description =
            validate_text(&self.description, "description", DESCRIPTION_MAX_LENGTH)?;
        validate_period(self.begin, self.end)?;
        CalendarEvent::new(
            self.id,
            user_id,
            subject,
            description,
            self.begin,
            self.end,
        )
    }
}

impl From<CalendarEvent> for EventModel {
    fn from(event: CalendarEvent) -> Self {
        let id = event.id();
        let details = event.into_details();
        Self {
            id,
            subject: Some(details.subject().to_string()),
            description: Some(details.description().to_string()),
            begin: details.begin(),
            end: details.end(),
        }
    }
}

impl DateTimeRangeModel {
    pub fn into_domain(self) -> Result<DateTimeRange> {
        validate_period(self.begin, self.end)?;
        DateTimeRange::new(self.begin, self.end)
    }
}
