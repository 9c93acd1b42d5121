//! Authentication route handlers.
//!
//! Login and signup go through the [`AuthService`] boundary. Validation
//! failures re-render the form with the message and the entered values
//! (passwords are never echoed back).

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{Result, add_breadcrumb, clear_sentry_user, set_sentry_user};
use crate::filters;
use crate::middleware::{OptionalAuth, PageContext, clear_current_user, set_current_user};
use crate::models::User;
use crate::services::auth::validate_signup;
use crate::services::{AuthError, AuthService};
use crate::state::AppState;

// =============================================================================
// Form Types
// =============================================================================

/// Login form data.
#[derive(Debug, Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Signup form data.
#[derive(Debug, Default, Deserialize)]
pub struct SignupForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub confirm_password: String,
}

// =============================================================================
// Templates
// =============================================================================

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub page: PageContext,
    pub email: String,
    pub error: Option<String>,
}

/// Signup page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/signup.html")]
pub struct SignupTemplate {
    pub page: PageContext,
    pub name: String,
    pub email: String,
    pub error: Option<String>,
}

/// Message shown for a rejected login.
const fn login_error_message(err: &AuthError) -> &'static str {
    match err {
        AuthError::MissingFields => "Please fill in all fields",
    }
}

/// Record the signed-in user in the session and Sentry scope.
async fn sign_in(session: &Session, user: &User) -> Result<()> {
    // New identity, new session id.
    session.cycle_id().await?;
    set_current_user(session, user).await?;
    set_sentry_user(&user.name, &user.email);
    Ok(())
}

// =============================================================================
// Login Routes
// =============================================================================

/// Display the login page.
#[instrument(skip(page))]
pub async fn login_page(page: PageContext) -> impl IntoResponse {
    LoginTemplate {
        page,
        email: String::new(),
        error: None,
    }
}

/// Handle login form submission.
#[instrument(skip(state, session, page, form))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    page: PageContext,
    Form(form): Form<LoginForm>,
) -> Result<Response> {
    match state.auth().login(&form.email, &form.password).await {
        Ok(user) => {
            sign_in(&session, &user).await?;
            add_breadcrumb("auth", "Logged in", None);
            tracing::info!(user = %user.name, "visitor logged in");
            Ok(Redirect::to("/").into_response())
        }
        Err(e) => {
            tracing::debug!(error = %e, "login rejected");
            Ok(LoginTemplate {
                page,
                email: form.email,
                error: Some(login_error_message(&e).to_string()),
            }
            .into_response())
        }
    }
}

// =============================================================================
// Signup Routes
// =============================================================================

/// Display the signup page.
#[instrument(skip(page))]
pub async fn signup_page(page: PageContext) -> impl IntoResponse {
    SignupTemplate {
        page,
        name: String::new(),
        email: String::new(),
        error: None,
    }
}

/// Handle signup form submission.
#[instrument(skip(state, session, page, form))]
pub async fn signup(
    State(state): State<AppState>,
    session: Session,
    page: PageContext,
    Form(form): Form<SignupForm>,
) -> Result<Response> {
    let rejected = |page, form: SignupForm, message: &str| {
        SignupTemplate {
            page,
            name: form.name,
            email: form.email,
            error: Some(message.to_string()),
        }
        .into_response()
    };

    if let Err(message) = validate_signup(
        &form.name,
        &form.email,
        &form.password,
        &form.confirm_password,
    ) {
        tracing::debug!(reason = message, "signup rejected");
        return Ok(rejected(page, form, message));
    }

    match state
        .auth()
        .signup(&form.name, &form.email, &form.password)
        .await
    {
        Ok(user) => {
            sign_in(&session, &user).await?;
            add_breadcrumb("auth", "Signed up", None);
            tracing::info!(user = %user.name, "visitor signed up");
            Ok(Redirect::to("/").into_response())
        }
        Err(e) => {
            tracing::debug!(error = %e, "signup failed");
            Ok(rejected(page, form, "Failed to create account"))
        }
    }
}

// =============================================================================
// Logout
// =============================================================================

/// Sign out and return home.
#[instrument(skip(session, user))]
pub async fn logout(OptionalAuth(user): OptionalAuth, session: Session) -> Result<Redirect> {
    clear_current_user(&session).await?;
    if let Some(user) = user {
        tracing::info!(user = %user.name, "visitor logged out");
    }
    clear_sentry_user();
    add_breadcrumb("auth", "Logged out", None);
    Ok(Redirect::to("/"))
}
