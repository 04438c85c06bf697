use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::Router;

use super::ValidatedJson;
use crate::error::AppError;
use crate::models::{
    Course, NewCourseRequest, NewScheduleRequest, Schedule, UpdateCourseRequest,
    UpdateScheduleRequest,
};
use crate::state::AppState;

pub(super) fn routes() -> Router<AppState> {
    Router::new()
        .route("/course", get(list_courses).post(create_course))
        .route("/course/all", get(list_courses))
        .route("/course/create", post(create_course))
        .route(
            "/course/{course_id}",
            get(get_course).put(update_course).delete(delete_course),
        )
        .route(
            "/course/{course_id}/schedule",
            get(list_schedules).post(create_schedule),
        )
        .route(
            "/course/{course_id}/schedule/{schedule_id}",
            get(get_schedule).put(update_schedule).delete(delete_schedule),
        )
}

async fn list_courses(State(state): State<AppState>) -> Result<Json<Vec<Course>>, AppError> {
    Ok(Json(state.catalog().list_courses().await?))
}

async fn create_course(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<NewCourseRequest>,
) -> Result<(StatusCode, Json<Course>), AppError> {
    let course = state.catalog().create_course(req).await?;
    Ok((StatusCode::CREATED, Json(course)))
}

async fn get_course(
    State(state): State<AppState>,
    Path(course_id): Path<String>,
) -> Result<Json<Course>, AppError> {
    Ok(Json(state.catalog().find_course(&course_id).await?))
}

async fn update_course(
    State(state): State<AppState>,
    Path(course_id): Path<String>,
    ValidatedJson(req): ValidatedJson<UpdateCourseRequest>,
) -> Result<Json<Course>, AppError> {
    let course = state.catalog().update_course(&course_id, req).await?;
    Ok(Json(course))
}

async fn delete_course(
    State(state): State<AppState>,
    Path(course_id): Path<String>,
) -> Result<Json<Course>, AppError> {
    Ok(Json(state.catalog().delete_course(&course_id).await?))
}

async fn list_schedules(
    State(state): State<AppState>,
    Path(course_id): Path<String>,
) -> Result<Json<Vec<Schedule>>, AppError> {
    Ok(Json(state.catalog().list_schedules(&course_id).await?))
}

async fn create_schedule(
    State(state): State<AppState>,
    Path(course_id): Path<String>,
    ValidatedJson(req): ValidatedJson<NewScheduleRequest>,
) -> Result<(StatusCode, Json<Schedule>), AppError> {
    let schedule = state.catalog().add_schedule(&course_id, req).await?;
    Ok((StatusCode::CREATED, Json(schedule)))
}

async fn get_schedule(
    State(state): State<AppState>,
    Path((course_id, schedule_id)): Path<(String, String)>,
) -> Result<Json<Schedule>, AppError> {
    Ok(Json(state.catalog().get_schedule(&course_id, &schedule_id).await?))
}

async fn update_schedule(
    State(state): State<AppState>,
    Path((course_id, schedule_id)): Path<(String, String)>,
    ValidatedJson(req): ValidatedJson<UpdateScheduleRequest>,
) -> Result<Json<Schedule>, AppError> {
    let schedule = state
        .catalog()
        .update_schedule(&course_id, &schedule_id, req)
        .await?;
    Ok(Json(schedule))
}

async fn delete_schedule(
    State(state): State<AppState>,
    Path((course_id, schedule_id)): Path<(String, String)>,
) -> Result<Json<Schedule>, AppError> {
    Ok(Json(state.catalog().delete_schedule(&course_id, &schedule_id).await?))
}
