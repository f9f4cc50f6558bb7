use calendar_core::calendar::{
    CalendarEvent, DateTimeRange, EqualEventSpecification, EventRepositoryTrait, NewCalendarEvent,
};
use calendar_core::Result;

use super::model::{EventDB, NewEventDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::events;
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::sqlite::Sqlite;
use diesel::SqliteConnection;

use std::sync::Arc;

pub struct EventRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl EventRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        EventRepository { pool, writer }
    }

    fn specification_query(
        specification: &EqualEventSpecification,
    ) -> events::BoxedQuery<'static, Sqlite> {
        events::table
            .filter(events::user_id.eq(specification.user_id()))
            .filter(events::subject.eq(specification.subject().to_string()))
            .filter(events::description.eq(specification.description().to_string()))
            .filter(events::begin_at.eq(specification.begin()))
            .filter(events::end_at.eq(specification.end()))
            .into_boxed()
    }

    fn to_domain(rows: Vec<EventDB>) -> Result<Vec<CalendarEvent>> {
        rows.into_iter().map(CalendarEvent::try_from).collect()
    }
}

#[async_trait]
impl EventRepositoryTrait for EventRepository {
    fn find_in_range(&self, user_id: i32, range: &DateTimeRange) -> Result<Vec<CalendarEvent>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = events::table
            .filter(events::user_id.eq(user_id))
            .filter(events::begin_at.ge(range.begin()))
            .filter(events::begin_at.lt(range.end()))
            .order((events::begin_at.asc(), events::id.asc()))
            .select(EventDB::as_select())
            .load::<EventDB>(&mut conn)
            .into_core()?;
        Self::to_domain(rows)
    }

    fn find_by_id(&self, user_id: i32, event_id: i32) -> Result<Option<CalendarEvent>> {
        let mut conn = get_connection(&self.pool)?;
        events::table
            .filter(events::id.eq(event_id))
            .filter(events::user_id.eq(user_id))
            .select(EventDB::as_select())
            .first::<EventDB>(&mut conn)
            .optional()
            .into_core()?
            .map(CalendarEvent::try_from)
            .transpose()
    }

    fn find_by_specification(
        &self,
        specification: &EqualEventSpecification,
    ) -> Result<Vec<CalendarEvent>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = Self::specification_query(specification)
            .order(events::id.asc())
            .select(EventDB::as_select())
            .load::<EventDB>(&mut conn)
            .into_core()?;
        Self::to_domain(rows)
    }

    fn exists(&self, specification: &EqualEventSpecification) -> Result<bool> {
        let mut conn = get_connection(&self.pool)?;
        diesel::select(diesel::dsl::exists(
            Self::specification_query(specification).select(events::id),
        ))
        .get_result::<bool>(&mut conn)
        .into_core()
    }

    async fn create(&self, new_event: NewCalendarEvent) -> Result<i32> {
        let new_event_db = NewEventDB::from(new_event);
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<i32> {
                diesel::insert_into(events::table)
                    .values(&new_event_db)
                    .returning(events::id)
                    .get_result::<i32>(conn)
                    .into_core()
            })
            .await
    }

    async fn update(&self, event: CalendarEvent) -> Result<bool> {
        let event_id = event.id();
        let owner_id = event.user_id();
        let changes = NewEventDB::from(event.details());

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<bool> {
                let affected = diesel::update(
                    events::table
                        .filter(events::id.eq(event_id))
                        .filter(events::user_id.eq(owner_id)),
                )
                .set(&changes)
                .execute(conn)
                .into_core()?;
                Ok(affected > 0)
            })
            .await
    }

    async fn delete(&self, user_id: i32, event_id: i32) -> Result<bool> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<bool> {
                let affected = diesel::delete(
                    events::table
                        .filter(events::id.eq(event_id))
                        .filter(events::user_id.eq(user_id)),
                )
                .execute(conn)
                .into_core()?;
                Ok(affected > 0)
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_pool, init, run_migrations, spawn_writer};
    use chrono::{NaiveDate, NaiveDateTime};
    use tempfile::TempDir;

    fn at(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2022, 2, 1)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    fn new_event(user_id: i32, subject: &str, begin: NaiveDateTime) -> NewCalendarEvent {
        NewCalendarEvent::new(
            user_id,
            subject,
            "D",
            begin,
            begin + chrono::Duration::minutes(30),
        )
        .unwrap()
    }

    fn setup() -> (TempDir, EventRepository) {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("calendar.db");
        let db_path = init(db_path.to_str().unwrap()).unwrap();
        let pool = create_pool(&db_path).unwrap();
        run_migrations(&pool).unwrap();
        let writer = spawn_writer((*pool).clone());
        (dir, EventRepository::new(pool, writer))
    }

    #[tokio::test]
    async fn test_create_assigns_sequential_ids() {
        let (_dir, repository) = setup();

        let first = repository.create(new_event(1, "A", at(9, 0))).await.unwrap();
        let second = repository.create(new_event(1, "B", at(10, 0))).await.unwrap();

        assert_eq!(first, 1);
        assert_eq!(second, 2);
    }

    #[tokio::test]
    async fn test_find_by_id_is_scoped_to_user() {
        let (_dir, repository) = setup();
        let id = repository.create(new_event(1, "A", at(9, 0))).await.unwrap();

        let found = repository.find_by_id(1, id).unwrap().unwrap();
        assert_eq!(found.id(), id);
        assert_eq!(found.subject(), "A");
        assert_eq!(found.begin(), at(9, 0));
        assert_eq!(found.end(), at(9, 30));

        assert_eq!(repository.find_by_id(2, id).unwrap(), None);
        assert_eq!(repository.find_by_id(1, 999).unwrap(), None);
    }

    #[tokio::test]
    async fn test_find_in_range_selects_by_begin() {
        let (_dir, repository) = setup();
        repository.create(new_event(1, "Before", at(8, 0))).await.unwrap();
        repository.create(new_event(1, "Start", at(9, 0))).await.unwrap();
        repository.create(new_event(1, "Inside", at(11, 45))).await.unwrap();
        repository.create(new_event(1, "AtEnd", at(12, 0))).await.unwrap();
        repository.create(new_event(2, "OtherUser", at(10, 0))).await.unwrap();

        let range = DateTimeRange::new(at(9, 0), at(12, 0)).unwrap();
        let subjects: Vec<String> = repository
            .find_in_range(1, &range)
            .unwrap()
            .iter()
            .map(|e| e.subject().to_string())
            .collect();

        assert_eq!(subjects, vec!["Start", "Inside"]);
    }

    #[tokio::test]
    async fn test_specification_matches_all_fields() {
        let (_dir, repository) = setup();
        let event = new_event(1, "A", at(9, 0));
        let id = repository.create(event.clone()).await.unwrap();
        repository.create(new_event(1, "B", at(9, 0))).await.unwrap();

        let specification = EqualEventSpecification::new(&event);
        assert!(repository.exists(&specification).unwrap());

        let found = repository.find_by_specification(&specification).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id(), id);

        let other_user = EqualEventSpecification::new(&new_event(2, "A", at(9, 0)));
        assert!(!repository.exists(&other_user).unwrap());

        let case_differs = EqualEventSpecification::new(&new_event(1, "a", at(9, 0)));
        assert!(!repository.exists(&case_differs).unwrap());
    }

    #[tokio::test]
    async fn test_update_replaces_stored_values() {
        let (_dir, repository) = setup();
        let id = repository.create(new_event(1, "A", at(9, 0))).await.unwrap();

        let replacement =
            CalendarEvent::from_parts(id, new_event(1, "Renamed", at(14, 0))).unwrap();
        assert!(repository.update(replacement.clone()).await.unwrap());
        assert_eq!(repository.find_by_id(1, id).unwrap(), Some(replacement));
    }

    #[tokio::test]
    async fn test_update_reports_missing_or_foreign_event() {
        let (_dir, repository) = setup();
        let id = repository.create(new_event(1, "A", at(9, 0))).await.unwrap();

        let missing = CalendarEvent::from_parts(999, new_event(1, "A", at(9, 0))).unwrap();
        assert!(!repository.update(missing).await.unwrap());

        let foreign = CalendarEvent::from_parts(id, new_event(2, "Hijack", at(9, 0))).unwrap();
        assert!(!repository.update(foreign).await.unwrap());
        assert_eq!(repository.find_by_id(1, id).unwrap().unwrap().subject(), "A");
    }

    #[tokio::test]
    async fn test_delete_removes_only_owned_event() {
        let (_dir, repository) = setup();
        let id = repository.create(new_event(1, "A", at(9, 0))).await.unwrap();

        assert!(!repository.delete(2, id).await.unwrap());
        assert!(repository.delete(1, id).await.unwrap());
        assert!(!repository.delete(1, id).await.unwrap());
        assert_eq!(repository.find_by_id(1, id).unwrap(), None);
    }
}
