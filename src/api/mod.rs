mod announcements;
mod assignments;
mod courses;
mod doubts;
mod extract;
mod users;

pub use extract::ValidatedJson;

use axum::{Router, extract::State, http::StatusCode, routing::get};
use tower_http::trace::TraceLayer;

use crate::error::AppError;
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(courses::routes())
        .merge(users::routes())
        .merge(doubts::routes())
        .merge(assignments::routes())
        .merge(announcements::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    sqlx::query("select 1").execute(&state.db).await?;
    Ok(StatusCode::OK)
}
