use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;

use super::ValidatedJson;
use crate::db::repository::announcement;
use crate::error::AppError;
use crate::models::{Announcement, NewAnnouncementRequest, UpdateAnnouncementRequest};
use crate::state::AppState;

pub(super) fn routes() -> Router<AppState> {
    Router::new()
        .route("/Announcement", get(list_announcements).post(create_announcement))
        .route(
            "/Announcement/{announcement_id}",
            get(get_announcement)
                .put(update_announcement)
                .delete(delete_announcement),
        )
}

async fn list_announcements(
    State(state): State<AppState>,
) -> Result<Json<Vec<Announcement>>, AppError> {
    Ok(Json(announcement::fetch_all(&state.db).await?))
}

async fn create_announcement(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<NewAnnouncementRequest>,
) -> Result<(StatusCode, Json<Announcement>), AppError> {
    let created = announcement::insert(&state.db, req).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn get_announcement(
    State(state): State<AppState>,
    Path(announcement_id): Path<String>,
) -> Result<Json<Announcement>, AppError> {
    let found = announcement::find_by_id(&state.db, &announcement_id)
        .await?
        .ok_or_else(|| AppError::not_found("announcement"))?;
    Ok(Json(found))
}

async fn update_announcement(
    State(state): State<AppState>,
    Path(announcement_id): Path<String>,
    ValidatedJson(req): ValidatedJson<UpdateAnnouncementRequest>,
) -> Result<Json<Announcement>, AppError> {
    let updated = announcement::update(&state.db, &announcement_id, req)
        .await?
        .ok_or_else(|| AppError::not_found("announcement"))?;
    Ok(Json(updated))
}

async fn delete_announcement(
    State(state): State<AppState>,
    Path(announcement_id): Path<String>,
) -> Result<Json<Announcement>, AppError> {
    let deleted = announcement::delete(&state.db, &announcement_id)
        .await?
        .ok_or_else(|| AppError::not_found("announcement"))?;
    Ok(Json(deleted))
}
