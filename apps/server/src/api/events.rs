use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    routing::get,
    Json, Router,
};
use calendar_core::calendar::UpdateEventResult;
use calendar_core::validation::ensure_valid_id;

use crate::{
    auth::CurrentUser,
    error::{ApiError, ApiResult},
    main_lib::AppState,
    models::{DateTimeRangeModel, EventModel, NewEventInfoModel, NewEventModel},
};

/// Runs a request handler, logging when it starts and how long it took.
async fn handle<T, F>(request: String, fut: F) -> ApiResult<T>
where
    F: Future<Output = ApiResult<T>>,
{
    tracing::info!("Handling {}", request);
    let started = Instant::now();
    let result = fut.await;
    tracing::info!(
        "Handled {} in {} ms",
        request,
        started.elapsed().as_millis()
    );
    result
}

fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> ApiResult<T> {
    payload
        .map(|Json(body)| body)
        .map_err(|e| ApiError::BadRequest(e.body_text()))
}

fn path_id(id: Result<Path<i32>, PathRejection>) -> ApiResult<i32> {
    let Path(id) = id.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    ensure_valid_id(id, "id")?;
    Ok(id)
}

#[utoipa::path(
    get,
    path = "/api/v1/events",
    params(DateTimeRangeModel),
    responses(
        (status = 200, body = [EventModel]),
        (status = 400, description = "Invalid range"),
        (status = 401, description = "Missing or invalid token")
    )
)]
pub async fn get_events(
    State(state): State<Arc<AppState>>,
    CurrentUser(user_id): CurrentUser,
    query: Result<Query<DateTimeRangeModel>, QueryRejection>,
) -> ApiResult<Json<Vec<EventModel>>> {
    let Query(query) = query.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let request = format!(
        "GetEventsInRange {{ userId: {}, begin: {}, end: {} }}",
        user_id, query.begin, query.end
    );
    handle(request, async {
        let range = query.into_domain()?;
        let events = state.calendar_service.find_in_range(user_id, &range)?;
        let models: Vec<EventModel> = events.into_iter().map(EventModel::from).collect();
        Ok::<_, ApiError>(Json(models))
    })
    .await
}

#[utoipa::path(
    get,
    path = "/api/v1/events/{id}",
    params(("id" = i32, Path, description = "Event id")),
    responses(
        (status = 200, body = EventModel),
        (status = 400, description = "Invalid id"),
        (status = 404, description = "Event not found")
    )
)]
pub async fn get_event(
    State(state): State<Arc<AppState>>,
    CurrentUser(user_id): CurrentUser,
    id: Result<Path<i32>, PathRejection>,
) -> ApiResult<Json<EventModel>> {
    let id = path_id(id)?;
    let request = format!("GetEventById {{ userId: {}, eventId: {} }}", user_id, id);
    handle(request, async {
        state
            .calendar_service
            .find_by_id(user_id, id)?
            .map(|event| Json(EventModel::from(event)))
            .ok_or(ApiError::NotFound)
    })
    .await
}

#[utoipa::path(
    post,
    path = "/api/v1/events",
    request_body = NewEventModel,
    responses(
        (status = 200, body = NewEventInfoModel),
        (status = 400, description = "Invalid event"),
        (status = 409, description = "An equal event already exists")
    )
)]
pub async fn create_event(
    State(state): State<Arc<AppState>>,
    CurrentUser(user_id): CurrentUser,
    payload: Result<Json<NewEventModel>, JsonRejection>,
) -> ApiResult<Json<NewEventInfoModel>> {
    let payload = json_body(payload)?;
    let request = format!("CreateEvent {{ userId: {} }}", user_id);
    handle(request, async {
        let new_event = payload.into_domain(user_id)?;
        let result = state.calendar_service.create_event(new_event).await?;
        if result.already_exists {
            return Err(ApiError::Conflict);
        }
        Ok(Json(NewEventInfoModel { id: result.id }))
    })
    .await
}

#[utoipa::path(
    put,
    path = "/api/v1/events",
    request_body = EventModel,
    responses(
        (status = 204, description = "Event updated"),
        (status = 400, description = "Invalid event"),
        (status = 404, description = "Event not found"),
        (status = 409, description = "An equal event already exists")
    )
)]
pub async fn update_event(
    State(state): State<Arc<AppState>>,
    CurrentUser(user_id): CurrentUser,
    payload: Result<Json<EventModel>, JsonRejection>,
) -> ApiResult<StatusCode> {
    let payload = json_body(payload)?;
    let request = format!(
        "UpdateEvent {{ userId: {}, eventId: {} }}",
        user_id, payload.id
    );
    handle(request, async {
        let event = payload.into_domain(user_id)?;
        match state.calendar_service.update_event(event).await? {
            UpdateEventResult::Success => Ok(StatusCode::NO_CONTENT),
            UpdateEventResult::NotFound => Err(ApiError::NotFound),
            UpdateEventResult::AlreadyExists => Err(ApiError::Conflict),
        }
    })
    .await
}

#[utoipa::path(
    delete,
    path = "/api/v1/events/{id}",
    params(("id" = i32, Path, description = "Event id")),
    responses(
        (status = 204, description = "Event deleted"),
        (status = 400, description = "Invalid id"),
        (status = 404, description = "Event not found")
    )
)]
pub async fn delete_event(
    State(state): State<Arc<AppState>>,
    CurrentUser(user_id): CurrentUser,
    id: Result<Path<i32>, PathRejection>,
) -> ApiResult<StatusCode> {
    let id = path_id(id)?;
    let request = format!("DeleteEvent {{ userId: {}, eventId: {} }}", user_id, id);
    handle(request, async {
        if state.calendar_service.delete_event(user_id, id).await? {
            Ok(StatusCode::NO_CONTENT)
        } else {
            Err(ApiError::NotFound)
        }
    })
    .await
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/events",
            get(get_events).post(create_event).put(update_event),
        )
        .route("/events/{id}", get(get_event).delete(delete_event))
}
