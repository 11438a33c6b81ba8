//! Login, protected-resource, and logout handlers.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::HeaderMap;
use axum_extra::extract::cookie::CookieJar;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::errors::ApiError;
use crate::server::AppState;

const LOGIN_OK: &str = "Login successful";
const ACCESS_GRANTED: &str = "Access granted";
const SECRET_DATA: &str = "secret information";
const LOGGED_OUT: &str = "Logged out";

/// `POST /login` body.
#[derive(Clone, Deserialize)]
pub struct LoginRequest {
    /// Claimed username.
    pub username: String,
    /// Claimed password.
    pub password: String,
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

/// `POST /login` success body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Always `"Login successful"`.
    pub message: String,
    /// The user that logged in.
    pub username: String,
}

/// `GET /api/protected` success body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtectedResponse {
    /// Always `"Access granted"`.
    pub message: String,
    /// Owner of the presented session.
    pub user: String,
    /// Always `"secret information"`.
    pub data: String,
}

/// `POST /logout` body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogoutResponse {
    /// Always `"Logged out"`.
    pub message: String,
}

/// POST /login
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<(CookieJar, Json<LoginResponse>), ApiError> {
    let Json(req) = payload.map_err(|rejection| {
        debug!(reason = %rejection.body_text(), "malformed login request");
        ApiError::from(rejection)
    })?;

    if req.username != state.auth.username || req.password != state.auth.password {
        warn!(username = %req.username, "login rejected: invalid credentials");
        return Err(ApiError::InvalidCredentials);
    }

    let id = state.sessions.create(req.username.as_str());
    info!(
        username = %req.username,
        active_sessions = state.sessions.len(),
        "session created"
    );

    let jar = jar
        .add(state.cookies.session_cookie(&id))
        .add(state.cookies.preference_cookie());

    Ok((
        jar,
        Json(LoginResponse {
            message: LOGIN_OK.into(),
            username: req.username,
        }),
    ))
}

/// GET /api/protected
pub async fn protected(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<ProtectedResponse>, ApiError> {
    let Some(record) = state
        .cookies
        .session_id(&headers)
        .and_then(|id| state.sessions.get(&id))
    else {
        debug!("protected access without a live session");
        return Err(ApiError::Unauthorized);
    };

    Ok(Json(ProtectedResponse {
        message: ACCESS_GRANTED.into(),
        user: record.username,
        data: SECRET_DATA.into(),
    }))
}

/// POST /logout
///
/// Always succeeds and always clears the session cookie, whether or not the
/// request named a live session.
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
    jar: CookieJar,
) -> (CookieJar, Json<LogoutResponse>) {
    match state
        .cookies
        .session_id(&headers)
        .and_then(|id| state.sessions.remove(&id))
    {
        Some(record) => info!(
            username = %record.username,
            active_sessions = state.sessions.len(),
            "session ended"
        ),
        None => debug!("logout without a live session"),
    }

    let jar = jar.add(state.cookies.session_removal());
    (
        jar,
        Json(LogoutResponse {
            message: LOGGED_OUT.into(),
        }),
    )
}

/// Fallback for a known path hit with an unsupported method.
pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}
