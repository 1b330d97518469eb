//! Basic-auth extraction against the credential store.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::TypedHeader;
use axum_extra::headers::Authorization;
use axum_extra::headers::authorization::Basic;
use roster_service::Actor;
use roster_service::credentials::authenticate;

use crate::error::ApiError;
use crate::state::AppState;

/// The authenticated principal for one request.
pub struct AuthenticatedActor(pub Actor);

impl FromRequestParts<AppState> for AuthenticatedActor {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(basic)) =
            TypedHeader::<Authorization<Basic>>::from_request_parts(parts, state)
                .await
                .map_err(|_| ApiError::Unauthorized)?;

        let actor = authenticate(state.credentials.as_ref(), basic.username(), basic.password())
            .await?
            .ok_or(ApiError::Unauthorized)?;

        Ok(Self(actor))
    }
}
