//! HTTP routing.

use axum::Router;

use crate::state::AppState;

mod roles;
mod users;

pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/api/users", users::router())
        .nest("/api/roles", roles::router())
}
