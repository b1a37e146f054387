//! Login, registration and logout pages.
//!
//! Successful login and registration store the user in the session and go to
//! the account page. Failures redirect back with an `?error=` code.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use elegant_core::UserRole;

use crate::error::{clear_sentry_user, set_sentry_user};
use crate::filters;
use crate::middleware::{clear_current_user, set_current_user};
use crate::models::{CurrentUser, User};
use crate::routes::page::PageContext;
use crate::services::auth::{AuthService, Registration};
use crate::state::AppState;

// =============================================================================
// Form Types
// =============================================================================

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Registration form data.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub password_confirm: String,
}

impl RegisterForm {
    fn into_registration(self) -> Registration {
        Registration {
            email: self.email,
            password: self.password,
            first_name: self.first_name,
            last_name: self.last_name,
            phone: self.phone,
        }
    }
}

// =============================================================================
// Templates
// =============================================================================

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub page: PageContext,
}

/// Register page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/register.html")]
pub struct RegisterTemplate {
    pub page: PageContext,
}

async fn start_session(session: &Session, user: &User) -> bool {
    if let Err(e) = set_current_user(session, &CurrentUser::from(user)).await {
        tracing::error!("Failed to set session: {e}");
        return false;
    }
    set_sentry_user(&user.id, Some(user.email.as_str()));
    true
}

// =============================================================================
// Login
// =============================================================================

/// Display the login page. Logged-in users go straight to their account.
pub async fn login_page(page: PageContext) -> Response {
    if page.user.is_some() {
        return page.redirect("/account");
    }
    LoginTemplate { page }.into_response()
}

/// Handle login form submission.
#[instrument(skip(state, page, session, form))]
pub async fn login(
    State(state): State<AppState>,
    page: PageContext,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Response {
    match AuthService::new(state.pool())
        .login(&form.email, &form.password)
        .await
    {
        Ok(user) => {
            if !start_session(&session, &user).await {
                return page.redirect_error("/auth/login", "server_error");
            }
            tracing::info!(user_id = %user.id, "Logged in");
            page.redirect("/account")
        }
        Err(e) => {
            tracing::warn!("Login failed: {e}");
            page.redirect_error("/auth/login", e.code())
        }
    }
}

// =============================================================================
// Registration
// =============================================================================

/// Display the registration page.
pub async fn register_page(page: PageContext) -> Response {
    if page.user.is_some() {
        return page.redirect("/account");
    }
    RegisterTemplate { page }.into_response()
}

/// Handle registration form submission.
#[instrument(skip(state, page, session, form))]
pub async fn register(
    State(state): State<AppState>,
    page: PageContext,
    session: Session,
    Form(form): Form<RegisterForm>,
) -> Response {
    if form.password != form.password_confirm {
        return page.redirect_error("/auth/register", "password_mismatch");
    }

    match AuthService::new(state.pool())
        .register(&form.into_registration(), UserRole::Customer)
        .await
    {
        Ok(user) => {
            if !start_session(&session, &user).await {
                return page.redirect_error("/auth/login", "server_error");
            }
            page.redirect("/account")
        }
        Err(e) => {
            tracing::warn!("Registration failed: {e}");
            page.redirect_error("/auth/register", e.code())
        }
    }
}

// =============================================================================
// Logout
// =============================================================================

/// Handle logout.
#[instrument(skip(page, session))]
pub async fn logout(page: PageContext, session: Session) -> Response {
    if let Err(e) = clear_current_user(&session).await {
        tracing::error!("Failed to clear session: {e}");
    }
    clear_sentry_user();
    page.redirect("/")
}
