use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;

use super::ValidatedJson;
use crate::db::repository::assignment;
use crate::error::AppError;
use crate::models::{Assignment, NewAssignmentRequest, UpdateAssignmentRequest};
use crate::state::AppState;

pub(super) fn routes() -> Router<AppState> {
    Router::new()
        .route("/Assignment", get(list_assignments).post(create_assignment))
        .route(
            "/Assignment/{assignment_id}",
            get(get_assignment).put(update_assignment).delete(delete_assignment),
        )
}

async fn list_assignments(State(state): State<AppState>) -> Result<Json<Vec<Assignment>>, AppError> {
    Ok(Json(assignment::fetch_all(&state.db).await?))
}

async fn create_assignment(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<NewAssignmentRequest>,
) -> Result<(StatusCode, Json<Assignment>), AppError> {
    let created = assignment::insert(&state.db, req).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn get_assignment(
    State(state): State<AppState>,
    Path(assignment_id): Path<String>,
) -> Result<Json<Assignment>, AppError> {
    let found = assignment::find_by_id(&state.db, &assignment_id)
        .await?
        .ok_or_else(|| AppError::not_found("assignment"))?;
    Ok(Json(found))
}

async fn update_assignment(
    State(state): State<AppState>,
    Path(assignment_id): Path<String>,
    ValidatedJson(req): ValidatedJson<UpdateAssignmentRequest>,
) -> Result<Json<Assignment>, AppError> {
    let updated = assignment::update(&state.db, &assignment_id, req)
        .await?
        .ok_or_else(|| AppError::not_found("assignment"))?;
    Ok(Json(updated))
}

async fn delete_assignment(
    State(state): State<AppState>,
    Path(assignment_id): Path<String>,
) -> Result<Json<Assignment>, AppError> {
    let deleted = assignment::delete(&state.db, &assignment_id)
        .await?
        .ok_or_else(|| AppError::not_found("assignment"))?;
    Ok(Json(deleted))
}
