use chrono::{Duration, NaiveDate, NaiveTime};
use diesel::prelude::*;
use diesel::SqliteConnection;
use log::{error, info};

use calendar_core::calendar::NewCalendarEvent;
use calendar_core::Result;

use super::model::NewEventDB;
use crate::db::WriteHandle;
use crate::errors::IntoCore;
use crate::schema::events;

const DEMO_USER_ID: i32 = 1;
const DEMO_SUBJECT: &str = "DemoCalendar";
const DEMO_DESCRIPTION: &str = "Check out the DemoCalendar";

/// Inserts a demo event for user 1 at 15:00 on `today`, lasting 15 minutes,
/// when the events table is empty.
///
/// Returns whether the event was inserted. Seeding is best effort: failures
/// are logged and reported as `false`.
pub async fn seed_demo_event(writer: &WriteHandle, today: NaiveDate) -> bool {
    match try_seed(writer, today).await {
        Ok(inserted) => inserted,
        Err(e) => {
            error!("Failed to seed demo event: {}", e);
            false
        }
    }
}

async fn try_seed(writer: &WriteHandle, today: NaiveDate) -> Result<bool> {
    let begin = today.and_time(NaiveTime::MIN) + Duration::hours(15);
    let demo = NewCalendarEvent::new(
        DEMO_USER_ID,
        DEMO_SUBJECT,
        DEMO_DESCRIPTION,
        begin,
        begin + Duration::minutes(15),
    )?;
    let demo_db = NewEventDB::from(demo);

    writer
        .exec(move |conn: &mut SqliteConnection| -> Result<bool> {
            let existing: i64 = events::table.count().get_result(conn).into_core()?;
            if existing > 0 {
                return Ok(false);
            }
            diesel::insert_into(events::table)
                .values(&demo_db)
                .execute(conn)
                .into_core()?;
            info!("Seeded demo event for user {}", DEMO_USER_ID);
            Ok(true)
        })
        .await
}
