//! Specification used to look for an event equal to a given one.

use chrono::NaiveDateTime;

use super::calendar_model::{CalendarEvent, NewCalendarEvent};

/// Matches stored events whose user, subject, description, begin and end are
/// all equal to the captured event. The stored id is not compared.
///
/// Repositories either evaluate [`is_satisfied_by`](Self::is_satisfied_by)
/// in memory or translate the criteria into a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EqualEventSpecification {
    user_id: i32,
    subject: String,
    description: String,
    begin: NaiveDateTime,
    end: NaiveDateTime,
}

impl EqualEventSpecification {
    pub fn new(event: &NewCalendarEvent) -> Self {
        Self {
            user_id: event.user_id(),
            subject: event.subject().to_string(),
            description: event.description().to_string(),
            begin: event.begin(),
            end: event.end(),
        }
    }

    /// Ordinal string comparison and exact timestamp comparison.
    pub fn is_satisfied_by(&self, event: &CalendarEvent) -> bool {
        event.user_id() == self.user_id
            && event.subject() == self.subject
            && event.description() == self.description
            && event.begin() == self.begin
            && event.end() == self.end
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

impl From<&NewCalendarEvent> for EqualEventSpecification {
    fn from(event: &NewCalendarEvent) -> Self {
        Self::new(event)
    }
}
