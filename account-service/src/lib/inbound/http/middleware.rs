use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::extract::Request;
use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;

use super::handlers::ApiError;
use crate::domain::user::models::UserId;
use crate::inbound::http::router::AppState;

/// Identity of the caller, placed in request extensions by [`authenticate`].
///
/// Handlers take it as an extractor argument. Reaching a handler without it is
/// an authentication failure, never an anonymous request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| {
                tracing::error!("Handler requires an authenticated caller but none was attached");
                ApiError::unauthorized()
            })
    }
}

/// Middleware that verifies the bearer token and attaches the caller's identity.
///
/// Every failure yields the same 401 body; the reason is only logged.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer_token(req.headers())?;

    let subject = state.authenticator.verify_token(token).map_err(|e| {
        tracing::warn!(reason = e.kind(), "Bearer token rejected");
        ApiError::unauthorized()
    })?;

    let user_id = UserId::from_string(&subject).map_err(|e| {
        tracing::warn!(error = %e, "Token subject is not a user id");
        ApiError::unauthorized()
    })?;

    req.extensions_mut().insert(AuthenticatedUser { user_id });

    Ok(next.run(req).await)
}

fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, ApiError> {
    let header = headers.get(AUTHORIZATION).ok_or_else(|| {
        tracing::debug!("Missing Authorization header");
        ApiError::unauthorized()
    })?;

    let value = header.to_str().map_err(|_| {
        tracing::debug!("Authorization header is not valid ASCII");
        ApiError::unauthorized()
    })?;

    match value.split_once(' ') {
        Some((scheme, token)) if scheme.eq_ignore_ascii_case("bearer") && !token.trim().is_empty() => {
            Ok(token.trim())
        }
        _ => {
            tracing::debug!("Authorization header is not a bearer credential");
            Err(ApiError::unauthorized())
        }
    }
}
