//! Session authentication endpoints.
//!
//! Login and registration store the user in the server-side session; the
//! browser only holds the `HttpOnly` session cookie.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use serde::Deserialize;
use serde_json::{Value, json};
use tower_sessions::Session;
use tracing::instrument;

use elegant_core::UserRole;

use super::ApiJson;
use crate::error::{AppError, Result, clear_sentry_user, set_sentry_user};
use crate::middleware::{RequireAuth, auth_rate_limiter, clear_current_user, set_current_user};
use crate::models::{CurrentUser, User, UserResponse};
use crate::services::auth::{AuthService, Registration};
use crate::state::AppState;

/// Login request body.
#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Create the auth API router. Login and registration are rate limited.
pub fn router() -> Router<AppState> {
    let limited = Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .layer(auth_rate_limiter());

    Router::new()
        .route("/logout", post(logout))
        .route("/me", get(me))
        .merge(limited)
}

async fn start_session(session: &Session, user: &User) -> Result<()> {
    set_current_user(session, &CurrentUser::from(user)).await?;
    set_sentry_user(&user.id, Some(user.email.as_str()));
    Ok(())
}

/// Create a customer account and log it in.
///
/// POST /api/auth/register
#[instrument(skip(state, session, registration))]
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    ApiJson(registration): ApiJson<Registration>,
) -> Result<(StatusCode, Json<UserResponse>)> {
    let user = AuthService::new(state.pool())
        .register(&registration, UserRole::Customer)
        .await?;
    start_session(&session, &user).await?;
    Ok((StatusCode::CREATED, Json(UserResponse::from(&user))))
}

/// Log in with email and password.
///
/// POST /api/auth/login
#[instrument(skip(state, session, request))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    ApiJson(request): ApiJson<LoginRequest>,
) -> Result<Json<UserResponse>> {
    let user = AuthService::new(state.pool())
        .login(&request.email, &request.password)
        .await
        .inspect_err(|e| tracing::warn!("Login failed: {e}"))?;
    start_session(&session, &user).await?;
    tracing::info!(user_id = %user.id, "Logged in");
    Ok(Json(UserResponse::from(&user)))
}

/// End the session.
///
/// POST /api/auth/logout
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Result<Json<Value>> {
    clear_current_user(&session).await?;
    clear_sentry_user();
    Ok(Json(json!({ "message": "Logged out" })))
}

/// The logged-in user, reloaded from the database.
///
/// GET /api/auth/me
#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn me(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<UserResponse>> {
    let user = AuthService::new(state.pool())
        .get_user(user.id)
        .await
        .map_err(|_| AppError::Unauthorized)?;
    Ok(Json(UserResponse::from(&user)))
}
