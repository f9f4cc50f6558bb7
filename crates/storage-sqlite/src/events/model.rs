//! Database models for calendar events.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use calendar_core::calendar::{CalendarEvent, NewCalendarEvent};
use calendar_core::Result;

/// Database model for a stored event
#[derive(Queryable, Identifiable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::events)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct EventDB {
    pub id: i32,
    pub user_id: i32,
    pub subject: String,
    pub description: String,
    pub begin_at: NaiveDateTime,
    pub end_at: NaiveDateTime,
}

/// Database model for inserting or replacing an event
#[derive(Insertable, AsChangeset, Debug, Clone)]
#[diesel(table_name = crate::schema::events)]
pub struct NewEventDB {
    pub user_id: i32,
    pub subject: String,
    pub description: String,
    pub begin_at: NaiveDateTime,
    pub end_at: NaiveDateTime,
}

// Stored rows are re-validated on the way out, so a row that violates the
// event invariants surfaces as an error instead of an invalid value.
impl TryFrom<EventDB> for CalendarEvent {
    type Error = calendar_core::Error;

    fn try_from(db: EventDB) -> Result<Self> {
        CalendarEvent::new(
            db.id,
            db.user_id,
            db.subject,
            db.description,
            db.begin_at,
            db.end_at,
        )
    }
}

impl From<&NewCalendarEvent> for NewEventDB {
    fn from(domain: &NewCalendarEvent) -> Self {
        Self {
            user_id: domain.user_id(),
            subject: domain.subject().to_string(),
            description: domain.description().to_string(),
            begin_at: domain.begin(),
            end_at: domain.end(),
        }
    }
}

impl From<NewCalendarEvent> for NewEventDB {
    fn from(domain: NewCalendarEvent) -> Self {
        Self::from(&domain)
    }
}
