//! SQLite storage implementation for calendar events.

mod model;
mod repository;
mod seed;

pub use model::{EventDB, NewEventDB};
pub use repository::EventRepository;
pub use seed::seed_demo_event;
