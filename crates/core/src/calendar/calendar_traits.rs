//! Event repository and calendar service traits.
//!
//! These traits define the contract for event operations without any
//! database-specific types, allowing for different storage implementations.

use async_trait::async_trait;

use super::calendar_model::{
    CalendarEvent, CreateEventResult, DateTimeRange, NewCalendarEvent, UpdateEventResult,
};
use super::calendar_specification::EqualEventSpecification;
use crate::errors::Result;

/// Trait defining the contract for event persistence.
///
/// Implementations are trusted to run queries and mutations faithfully; all
/// argument checks happen in the calendar service before a call reaches
/// the repository.
#[async_trait]
pub trait EventRepositoryTrait: Send + Sync {
    /// Lists the user's events whose begin lies in `range` (`begin <= b < end`).
    fn find_in_range(&self, user_id: i32, range: &DateTimeRange) -> Result<Vec<CalendarEvent>>;

    /// Retrieves a user's event by id, `None` if it does not exist.
    fn find_by_id(&self, user_id: i32, event_id: i32) -> Result<Option<CalendarEvent>>;

    /// Lists events satisfying the specification.
    fn find_by_specification(
        &self,
        specification: &EqualEventSpecification,
    ) -> Result<Vec<CalendarEvent>>;

    /// Determines whether any event satisfies the specification.
    fn exists(&self, specification: &EqualEventSpecification) -> Result<bool>;

    /// Stores a new event and returns the id assigned to it.
    async fn create(&self, new_event: NewCalendarEvent) -> Result<i32>;

    /// Replaces a stored event.
    ///
    /// Returns `false` if no event with that id exists for the event's user.
    async fn update(&self, event: CalendarEvent) -> Result<bool>;

    /// Deletes a user's event.
    ///
    /// Returns `false` if no such event was found.
    async fn delete(&self, user_id: i32, event_id: i32) -> Result<bool>;
}

/// Trait defining the calendar operations exposed to the API layer.
#[async_trait]
pub trait CalendarServiceTrait: Send + Sync {
    /// Finds the user's events in a range.
    fn find_in_range(&self, user_id: i32, range: &DateTimeRange) -> Result<Vec<CalendarEvent>>;

    /// Finds a user's event by id.
    fn find_by_id(&self, user_id: i32, event_id: i32) -> Result<Option<CalendarEvent>>;

    /// Finds events satisfying a specification.
    fn find_by_specification(
        &self,
        specification: &EqualEventSpecification,
    ) -> Result<Vec<CalendarEvent>>;

    /// Determines whether any event satisfies a specification.
    fn exists(&self, specification: &EqualEventSpecification) -> Result<bool>;

    /// Creates an event unless an equal one is already stored.
    async fn create_event(&self, new_event: NewCalendarEvent) -> Result<CreateEventResult>;

    /// Replaces an event unless an equal one is already stored.
    async fn update_event(&self, event: CalendarEvent) -> Result<UpdateEventResult>;

    /// Deletes a user's event; `false` if it was not found.
    async fn delete_event(&self, user_id: i32, event_id: i32) -> Result<bool>;
}
