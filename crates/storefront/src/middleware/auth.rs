//! Authentication extractors.
//!
//! The logged-in user lives in the session under [`keys::CURRENT_USER`].
//! API routes reject with a JSON error; page routes redirect to the login
//! page under the request's locale.

use axum::{
    Json,
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use elegant_core::Locale;
use serde_json::json;
use tower_sessions::Session;

use super::locale::request_locale;
use crate::models::{CurrentUser, session::keys};

/// Extractor that requires a logged-in user.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAuth(user): RequireAuth,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", user.display_name())
/// }
/// ```
pub struct RequireAuth(pub CurrentUser);

/// Extractor that requires a logged-in administrator.
pub struct RequireAdmin(pub CurrentUser);

/// Rejection for the authentication extractors.
#[derive(Debug)]
pub enum AuthRejection {
    /// Not logged in, page request.
    RedirectToLogin(Locale),
    /// Logged in without the admin role, page request.
    RedirectHome(Locale),
    /// Not logged in, API request.
    Unauthorized,
    /// Logged in without the admin role, API request.
    Forbidden,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToLogin(locale) => {
                Redirect::to(&locale.prefix("/auth/login")).into_response()
            }
            Self::RedirectHome(locale) => Redirect::to(&locale.prefix("/")).into_response(),
            Self::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": "Authentication required" })),
            )
                .into_response(),
            Self::Forbidden => (
                StatusCode::FORBIDDEN,
                Json(json!({ "error": "Admin access required" })),
            )
                .into_response(),
        }
    }
}

fn is_api(parts: &Parts) -> bool {
    parts.uri.path().starts_with("/api/")
}

async fn session_user(parts: &Parts) -> Option<CurrentUser> {
    let session = parts.extensions.get::<Session>()?;
    session
        .get::<CurrentUser>(keys::CURRENT_USER)
        .await
        .ok()
        .flatten()
}

fn unauthenticated(parts: &Parts) -> AuthRejection {
    if is_api(parts) {
        AuthRejection::Unauthorized
    } else {
        AuthRejection::RedirectToLogin(request_locale(parts))
    }
}

impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        session_user(parts)
            .await
            .map(Self)
            .ok_or_else(|| unauthenticated(parts))
    }
}

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = session_user(parts)
            .await
            .ok_or_else(|| unauthenticated(parts))?;

        if user.is_admin() {
            Ok(Self(user))
        } else if is_api(parts) {
            Err(AuthRejection::Forbidden)
        } else {
            Err(AuthRejection::RedirectHome(request_locale(parts)))
        }
    }
}

/// Extractor that optionally gets the current user.
///
/// Unlike `RequireAuth`, this does not reject the request if nobody is logged in.
pub struct OptionalAuth(pub Option<CurrentUser>);

impl<S> FromRequestParts<S> for OptionalAuth
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(session_user(parts).await))
    }
}

/// Store the logged-in user, rotating the session ID first.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_user(
    session: &Session,
    user: &CurrentUser,
) -> Result<(), tower_sessions::session::Error> {
    session.cycle_id().await?;
    session.insert(keys::CURRENT_USER, user).await
}

/// Forget the logged-in user (logout).
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_current_user(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session.flush().await
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::http::{Request, header::LOCATION};

    use super::*;

    fn parts(path: &str, locale: Option<Locale>) -> Parts {
        let (mut parts, ()) = Request::get(path).body(()).unwrap().into_parts();
        if let Some(locale) = locale {
            parts.extensions.insert(locale);
        }
        parts
    }

    #[tokio::test]
    async fn test_api_request_without_session_is_unauthorized() {
        let mut parts = parts("/api/cart", None);
        let Err(rejection) = RequireAuth::from_request_parts(&mut parts, &()).await else {
            panic!("expected rejection");
        };
        assert_eq!(rejection.into_response().status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_page_request_redirects_to_localized_login() {
        let mut parts = parts("/cart", Some(Locale::En));
        let Err(rejection) = RequireAuth::from_request_parts(&mut parts, &()).await else {
            panic!("expected rejection");
        };
        let response = rejection.into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers().get(LOCATION).unwrap(), "/en/auth/login");
    }

    #[tokio::test]
    async fn test_optional_auth_without_session() {
        let mut parts = parts("/", None);
        let OptionalAuth(user) = OptionalAuth::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        assert!(user.is_none());
    }

    #[test]
    fn test_forbidden_body() {
        let response = AuthRejection::Forbidden.into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        let response = AuthRejection::RedirectHome(Locale::Ar).into_response();
        assert_eq!(response.headers().get(LOCATION).unwrap(), "/ar");
    }
}
