use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use http::StatusCode;
use tracing::info;

use crate::errors::AppError;
use crate::models::{CreateUser, User};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_user))
        .route("/:id", get(get_user))
}

pub async fn create_user(
    State(state): State<AppState>,
    Json(data): Json<CreateUser>,
) -> Result<(StatusCode, Json<User>), AppError> {
    info!("POST /api/users - Creating user");
    let user = state.users.create(data).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<User>, AppError> {
    info!("GET /api/users/{} - Fetching user", id);
    Ok(Json(state.users.get_user_by_id(id).await?))
}
