use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::Router;

use super::ValidatedJson;
use crate::db::repository::doubt;
use crate::error::AppError;
use crate::models::{Doubt, NewDoubtAnswerRequest, NewDoubtRequest, UpdateDoubtRequest};
use crate::state::AppState;

pub(super) fn routes() -> Router<AppState> {
    Router::new()
        .route("/doubt", get(list_doubts).post(create_doubt))
        .route(
            "/doubt/{doubt_id}",
            get(get_doubt).put(update_doubt).delete(delete_doubt),
        )
        .route("/doubt/{doubt_id}/answer", post(answer_doubt))
}

async fn list_doubts(State(state): State<AppState>) -> Result<Json<Vec<Doubt>>, AppError> {
    Ok(Json(doubt::fetch_all(&state.db).await?))
}

async fn create_doubt(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<NewDoubtRequest>,
) -> Result<(StatusCode, Json<Doubt>), AppError> {
    let created = doubt::insert(&state.db, req).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn get_doubt(
    State(state): State<AppState>,
    Path(doubt_id): Path<String>,
) -> Result<Json<Doubt>, AppError> {
    let found = doubt::find_by_id(&state.db, &doubt_id)
        .await?
        .ok_or_else(|| AppError::not_found("doubt"))?;
    Ok(Json(found))
}

async fn update_doubt(
    State(state): State<AppState>,
    Path(doubt_id): Path<String>,
    ValidatedJson(req): ValidatedJson<UpdateDoubtRequest>,
) -> Result<Json<Doubt>, AppError> {
    let updated = doubt::update(&state.db, &doubt_id, req)
        .await?
        .ok_or_else(|| AppError::not_found("doubt"))?;
    Ok(Json(updated))
}

async fn delete_doubt(
    State(state): State<AppState>,
    Path(doubt_id): Path<String>,
) -> Result<Json<Doubt>, AppError> {
    let deleted = doubt::delete(&state.db, &doubt_id)
        .await?
        .ok_or_else(|| AppError::not_found("doubt"))?;
    Ok(Json(deleted))
}

async fn answer_doubt(
    State(state): State<AppState>,
    Path(doubt_id): Path<String>,
    ValidatedJson(req): ValidatedJson<NewDoubtAnswerRequest>,
) -> Result<(StatusCode, Json<Doubt>), AppError> {
    let answered = doubt::add_answer(&state.db, &doubt_id, req)
        .await?
        .ok_or_else(|| AppError::not_found("doubt"))?;
    Ok((StatusCode::CREATED, Json(answered)))
}
