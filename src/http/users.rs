//! Handlers for the `/api/users` endpoints.
//!
//! Each handler decodes the inbound body where there is one, makes exactly
//! one upstream call and relays the result.

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::Response,
    Json,
};
use reqwest::Method;

use crate::http::response::{relay_json, ApiError};
use crate::http::server::AppState;
use crate::users::User;

/// `GET /api/users`: fetch, project onto [`User`], re-encode.
///
/// An upstream `null` is relayed as `null`.
pub async fn list_users(
    State(state): State<AppState>,
) -> Result<Json<Option<Vec<User>>>, ApiError> {
    let upstream = state
        .upstream
        .call(Method::GET, state.upstream.users_path(), None)
        .await
        .map_err(|e| ApiError::from_upstream(e, ApiError::Fetch))?;

    let users = User::list_from_json(&upstream.body).map_err(ApiError::Parse)?;

    tracing::debug!(
        upstream_status = %upstream.status,
        count = users.as_ref().map_or(0, Vec::len),
        "Listed users"
    );
    Ok(Json(users))
}

/// `POST /api/users`: forward the decoded record, answer 201 with the
/// upstream body as-is.
pub async fn create_user(State(state): State<AppState>, body: Bytes) -> Result<Response, ApiError> {
    let user = User::from_json(&body).map_err(ApiError::InvalidPayload)?;

    let upstream = state
        .upstream
        .call(Method::POST, state.upstream.users_path(), Some(&user))
        .await
        .map_err(|e| ApiError::from_upstream(e, ApiError::Send))?;

    tracing::debug!(upstream_status = %upstream.status, "Created user");
    Ok(relay_json(StatusCode::CREATED, upstream.body))
}

/// `PUT /api/users/{id}`: forward the decoded record to `/users/{id}`.
///
/// The local status is always 200, whatever the upstream answered.
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let user = User::from_json(&body).map_err(ApiError::InvalidPayload)?;

    let request = state
        .upstream
        .prepare(Method::PUT, &state.upstream.user_path(&id), Some(&user))
        .map_err(ApiError::BuildRequest)?;

    let upstream = state
        .upstream
        .execute(request)
        .await
        .map_err(|e| ApiError::from_upstream(e, ApiError::Send))?;

    if !upstream.status.is_success() {
        tracing::warn!(id = %id, upstream_status = %upstream.status, "Upstream rejected update");
    }
    Ok(relay_json(StatusCode::OK, upstream.body))
}
