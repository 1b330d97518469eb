//! Role registration routes.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use roster_service::{CreateRoleInput, RoleView};

use crate::auth::AuthenticatedActor;
use crate::error::ApiError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/create", post(create_role))
        .route("/create-multiple", post(create_roles))
}

async fn create_role(
    State(state): State<AppState>,
    AuthenticatedActor(actor): AuthenticatedActor,
    Json(input): Json<CreateRoleInput>,
) -> Result<(StatusCode, Json<RoleView>), ApiError> {
    let view = state.roles.create_role(input, &actor).await?;
    Ok((StatusCode::CREATED, Json(view)))
}

async fn create_roles(
    State(state): State<AppState>,
    AuthenticatedActor(actor): AuthenticatedActor,
    Json(inputs): Json<Vec<CreateRoleInput>>,
) -> Result<(StatusCode, Json<Vec<RoleView>>), ApiError> {
    let views = state.roles.create_roles(inputs, &actor).await?;
    Ok((StatusCode::CREATED, Json(views)))
}
