use log::debug;
use std::sync::Arc;

use super::calendar_model::{
    CalendarEvent, CreateEventResult, DateTimeRange, NewCalendarEvent, UpdateEventResult,
};
use super::calendar_specification::EqualEventSpecification;
use super::calendar_traits::{CalendarServiceTrait, EventRepositoryTrait};
use crate::errors::Result;
use crate::validation::ensure_valid_id;

/// Service enforcing id validity and the duplicate-event policy in front of
/// an event repository.
///
/// The service keeps no state between calls. A write issues at most two
/// sequential repository calls (existence check, then the write) without a
/// transaction around them, so a concurrent insert of the same event can slip
/// between the two.
pub struct CalendarService {
    repository: Arc<dyn EventRepositoryTrait>,
}

impl CalendarService {
    /// Creates a new CalendarService instance
    pub fn new(repository: Arc<dyn EventRepositoryTrait>) -> Self {
        Self { repository }
    }

    fn has_equal_event(&self, event: &NewCalendarEvent) -> Result<bool> {
        self.repository.exists(&EqualEventSpecification::new(event))
    }
}

#[async_trait::async_trait]
impl CalendarServiceTrait for CalendarService {
    fn find_in_range(&self, user_id: i32, range: &DateTimeRange) -> Result<Vec<CalendarEvent>> {
        ensure_valid_id(user_id, "userId")?;
        self.repository.find_in_range(user_id, range)
    }

    fn find_by_id(&self, user_id: i32, event_id: i32) -> Result<Option<CalendarEvent>> {
        ensure_valid_id(user_id, "userId")?;
        ensure_valid_id(event_id, "eventId")?;
        self.repository.find_by_id(user_id, event_id)
    }

    fn find_by_specification(
        &self,
        specification: &EqualEventSpecification,
    ) -> Result<Vec<CalendarEvent>> {
        self.repository.find_by_specification(specification)
    }

    fn exists(&self, specification: &EqualEventSpecification) -> Result<bool> {
        self.repository.exists(specification)
    }

    async fn create_event(&self, new_event: NewCalendarEvent) -> Result<CreateEventResult> {
        if self.has_equal_event(&new_event)? {
            debug!(
                "Skipping event creation for user {}: an equal event already exists",
                new_event.user_id()
            );
            return Ok(CreateEventResult::already_exists());
        }

        let id = self.repository.create(new_event).await?;
        debug!("Created event {}", id);
        Ok(CreateEventResult::created(id))
    }

    async fn update_event(&self, event: CalendarEvent) -> Result<UpdateEventResult> {
        // An unchanged event matches itself here and is reported as a duplicate.
        if self.has_equal_event(event.details())? {
            debug!(
                "Skipping update of event {}: an equal event already exists",
                event.id()
            );
            return Ok(UpdateEventResult::AlreadyExists);
        }

        let event_id = event.id();
        if self.repository.update(event).await? {
            debug!("Updated event {}", event_id);
            Ok(UpdateEventResult::Success)
        } else {
            Ok(UpdateEventResult::NotFound)
        }
    }

    async fn delete_event(&self, user_id: i32, event_id: i32) -> Result<bool> {
        ensure_valid_id(user_id, "userId")?;
        ensure_valid_id(event_id, "eventId")?;
        self.repository.delete(user_id, event_id).await
    }
}
