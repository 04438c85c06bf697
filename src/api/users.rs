use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{delete, get};
use axum::Router;

use super::ValidatedJson;
use crate::db::repository::user;
use crate::error::AppError;
use crate::models::{
    EnrolledCourse, NewEnrollmentRequest, NewUserRequest, UpdateEnrollmentRequest,
    UpdateUserRequest, User, WishlistRequest,
};
use crate::state::AppState;

pub(super) fn routes() -> Router<AppState> {
    Router::new()
        .route("/user", get(list_users).post(create_user))
        .route(
            "/user/{user_id}",
            get(get_user).put(update_user).delete(delete_user),
        )
        .route(
            "/user/enrolledCourses/{user_id}",
            get(get_first_enrollment).post(enroll),
        )
        .route(
            "/user/enrolledCourses/{user_id}/{course_id}",
            get(get_enrollment).put(update_enrollment).delete(delete_enrollment),
        )
        .route(
            "/user/wishlist/{user_id}",
            get(get_wishlist).put(add_to_wishlist).post(add_to_wishlist),
        )
        .route("/user/wishlist/{user_id}/{wish_id}", delete(remove_from_wishlist))
}

async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<User>>, AppError> {
    Ok(Json(user::fetch_all(&state.db).await?))
}

async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<NewUserRequest>,
) -> Result<(StatusCode, Json<User>), AppError> {
    let created = user::insert(&state.db, req).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<User>, AppError> {
    let found = user::find_by_id(&state.db, &user_id)
        .await?
        .ok_or_else(|| AppError::not_found("user"))?;
    Ok(Json(found))
}

async fn update_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    ValidatedJson(req): ValidatedJson<UpdateUserRequest>,
) -> Result<Json<User>, AppError> {
    let updated = user::update(&state.db, &user_id, req)
        .await?
        .ok_or_else(|| AppError::not_found("user"))?;
    Ok(Json(updated))
}

async fn delete_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<User>, AppError> {
    let deleted = user::delete(&state.db, &user_id)
        .await?
        .ok_or_else(|| AppError::not_found("user"))?;
    Ok(Json(deleted))
}

/// Responds with `null` when the user has no enrollment.
async fn get_first_enrollment(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Option<EnrolledCourse>>, AppError> {
    Ok(Json(state.enrollments().get_enrollment(&user_id, None).await?))
}

async fn enroll(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    ValidatedJson(req): ValidatedJson<NewEnrollmentRequest>,
) -> Result<(StatusCode, Json<EnrolledCourse>), AppError> {
    let enrolled = state.enrollments().enroll(&user_id, req).await?;
    Ok((StatusCode::CREATED, Json(enrolled)))
}

async fn get_enrollment(
    State(state): State<AppState>,
    Path((user_id, course_id)): Path<(String, String)>,
) -> Result<Json<Option<EnrolledCourse>>, AppError> {
    let found = state
        .enrollments()
        .get_enrollment(&user_id, Some(&course_id))
        .await?;
    Ok(Json(found))
}

async fn update_enrollment(
    State(state): State<AppState>,
    Path((user_id, course_id)): Path<(String, String)>,
    ValidatedJson(req): ValidatedJson<UpdateEnrollmentRequest>,
) -> Result<Json<EnrolledCourse>, AppError> {
    let updated = state
        .enrollments()
        .update_enrollment(&user_id, &course_id, req)
        .await?;
    Ok(Json(updated))
}

async fn delete_enrollment(
    State(state): State<AppState>,
    Path((user_id, course_id)): Path<(String, String)>,
) -> Result<Json<EnrolledCourse>, AppError> {
    Ok(Json(state.enrollments().delete_enrollment(&user_id, &course_id).await?))
}

async fn get_wishlist(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<String>>, AppError> {
    Ok(Json(state.enrollments().wishlist(&user_id).await?))
}

async fn add_to_wishlist(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    ValidatedJson(req): ValidatedJson<WishlistRequest>,
) -> Result<Json<User>, AppError> {
    let updated = state
        .enrollments()
        .add_to_wishlist(&user_id, &req.course_id)
        .await?;
    Ok(Json(updated))
}

async fn remove_from_wishlist(
    State(state): State<AppState>,
    Path((user_id, wish_id)): Path<(String, String)>,
) -> Result<Json<User>, AppError> {
    let updated = state
        .enrollments()
        .remove_from_wishlist(&user_id, &wish_id)
        .await?;
    Ok(Json(updated))
}
