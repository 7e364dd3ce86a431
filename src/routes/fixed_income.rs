use axum::extract::{Path, Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use http::StatusCode;
use tracing::{error, info};

use crate::errors::{AppError, USER_NOT_INFORMED};
use crate::models::{CreateFixedIncome, FixedIncome, FixedIncomeQuery, FixedIncomeResponse};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_fixed_income).get(list_fixed_income))
        .route(
            "/:id",
            get(get_fixed_income)
                .put(update_fixed_income)
                .delete(delete_fixed_income),
        )
}

// Resolves the owner (when given) and builds a transient asset from the request payload.
// A missing owner is left for the lifecycle rules to reject.
async fn to_fixed_income(state: &AppState, data: CreateFixedIncome) -> Result<FixedIncome, AppError> {
    if data.description.trim().is_empty() {
        return Err(AppError::Validation("Description cannot be empty".into()));
    }
    let owner_id = match data.user {
        Some(user_id) => Some(state.users.get_user_by_id(user_id).await?.id),
        None => None,
    };
    Ok(FixedIncome::new(
        data.description,
        owner_id,
        data.daily_yield,
        data.monthly_yield,
        data.maturity_date,
        data.price,
    ))
}

pub async fn create_fixed_income(
    State(state): State<AppState>,
    Json(data): Json<CreateFixedIncome>,
) -> Result<(StatusCode, Json<FixedIncomeResponse>), AppError> {
    info!("POST /api/fixed-income - Creating fixed income for user {:?}", data.user);
    let asset = to_fixed_income(&state, data).await?;
    let saved = state.fixed_income.create(asset).await.map_err(|e| {
        error!("Failed to create fixed income: {}", e);
        e
    })?;
    Ok((StatusCode::CREATED, Json(saved.into())))
}

pub async fn list_fixed_income(
    State(state): State<AppState>,
    Query(query): Query<FixedIncomeQuery>,
) -> Result<Json<Vec<FixedIncomeResponse>>, AppError> {
    info!("GET /api/fixed-income?user={} - Listing fixed income", query.user);
    state.users.get_user_by_id(query.user).await?;
    let assets = state.fixed_income.list_by_owner(query.user).await?;
    Ok(Json(assets.into_iter().map(FixedIncomeResponse::from).collect()))
}

pub async fn get_fixed_income(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<FixedIncomeResponse>, AppError> {
    info!("GET /api/fixed-income/{} - Fetching fixed income", id);
    let asset = state.fixed_income.fetch_one(id).await?;
    Ok(Json(asset.into()))
}

pub async fn update_fixed_income(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(data): Json<CreateFixedIncome>,
) -> Result<Json<FixedIncomeResponse>, AppError> {
    info!("PUT /api/fixed-income/{} - Updating fixed income", id);
    let mut asset = to_fixed_income(&state, data).await?;
    if asset.owner_id.is_none() {
        return Err(AppError::BusinessRule(USER_NOT_INFORMED.to_string()));
    }
    asset.id = Some(id);
    let updated = state.fixed_income.update(asset).await.map_err(|e| {
        error!("Failed to update fixed income {}: {}", id, e);
        e
    })?;
    Ok(Json(updated.into()))
}

pub async fn delete_fixed_income(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    info!("DELETE /api/fixed-income/{} - Deleting fixed income", id);
    let asset = state.fixed_income.fetch_one(id).await?;
    state.fixed_income.delete(&asset).await.map_err(|e| {
        error!("Failed to delete fixed income {}: {}", id, e);
        e
    })?;
    Ok(StatusCode::NO_CONTENT)
}
