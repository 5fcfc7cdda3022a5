//! Basic-auth extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use loadwatch_core::error::CoreError;

use crate::error::AppError;
use crate::state::AppState;

/// Caller authenticated with HTTP Basic credentials from the `Authorization`
/// header.
///
/// Use this as an extractor parameter in any handler that requires
/// authentication:
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(username = %user.username, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub username: String,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Authorization header missing or malformed".into(),
                ))
            })?;

        let username = state
            .config
            .auth
            .verify_header(header)
            .map_err(|e| AppError::Core(CoreError::Unauthorized(e.to_string())))?;

        Ok(AuthUser { username })
    }
}
