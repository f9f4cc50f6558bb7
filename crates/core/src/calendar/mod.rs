//! Calendar module - event values, duplicate detection, services, and traits.

mod calendar_model;
mod calendar_service;
mod calendar_specification;
mod calendar_traits;



pub use calendar_model::{
    CalendarEvent, CreateEventResult, DateTimeRange, NewCalendarEvent, UpdateEventResult,
};
pub use calendar_service::CalendarService;
pub use calendar_specification::EqualEventSpecification;
pub use calendar_traits::{CalendarServiceTrait, EventRepositoryTrait};
