//! User lifecycle routes.

use std::collections::BTreeSet;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use roster_service::{CreateUserInput, UpdateUserInput, UserView};
use uuid::Uuid;

use crate::auth::AuthenticatedActor;
use crate::error::ApiError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users))
        .route("/create", post(create_user))
        .route("/profile/{username}", get(get_profile))
        .route("/{id}", put(update_user).delete(remove_user))
        .route("/{id}/assign-roles", post(assign_roles))
        .route("/{id}/approve", post(approve_user))
}

async fn create_user(
    State(state): State<AppState>,
    AuthenticatedActor(actor): AuthenticatedActor,
    Json(input): Json<CreateUserInput>,
) -> Result<(StatusCode, Json<UserView>), ApiError> {
    let view = state.users.create_user(input, &actor).await?;
    Ok((StatusCode::CREATED, Json(view)))
}

async fn assign_roles(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    AuthenticatedActor(actor): AuthenticatedActor,
    Json(roles): Json<BTreeSet<String>>,
) -> Result<Json<UserView>, ApiError> {
    let view = state.users.assign_roles(id, roles, &actor).await?;
    Ok(Json(view))
}

async fn approve_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    AuthenticatedActor(actor): AuthenticatedActor,
) -> Result<Json<UserView>, ApiError> {
    let view = state.users.approve_user(id, &actor).await?;
    Ok(Json(view))
}

async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    AuthenticatedActor(actor): AuthenticatedActor,
    Json(input): Json<UpdateUserInput>,
) -> Result<Json<UserView>, ApiError> {
    let view = state.users.update_user(id, input, &actor).await?;
    Ok(Json(view))
}

async fn remove_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    AuthenticatedActor(actor): AuthenticatedActor,
) -> Result<StatusCode, ApiError> {
    state.users.remove_user(id, &actor).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn list_users(
    State(state): State<AppState>,
    AuthenticatedActor(actor): AuthenticatedActor,
) -> Result<Json<Vec<UserView>>, ApiError> {
    let views = state.users.list_users(&actor).await?;
    Ok(Json(views))
}

async fn get_profile(
    State(state): State<AppState>,
    Path(username): Path<String>,
    AuthenticatedActor(actor): AuthenticatedActor,
) -> Result<Json<UserView>, ApiError> {
    let view = state.users.get_user_profile(&username, &actor).await?;
    Ok(Json(view))
}
