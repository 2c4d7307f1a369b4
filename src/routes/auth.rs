//! Login and logout handlers.
//!
//! Routes:
//! - POST /login - validate the submitted token, set the credential cookie
//! - /login (any other method) - redirect back to the gated root
//! - /logout - clear the credential cookie and redirect to the gated root

use axum::{
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use axum_extra::extract::{CookieJar, Host};
use serde::Deserialize;
use tracing::instrument;

use crate::auth::LoginOutcome;
use crate::error::AppError;
use crate::state::AppState;
use crate::templates::LOGIN_TEMPLATE;

/// Form data for the login transition
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    /// The submitted token. A missing field is treated as an empty
    /// submission, which is simply rejected.
    #[serde(default)]
    pub token: String,
}

/// Render the login view.
///
/// Used by the gate middleware for unauthenticated requests (no warning)
/// and by the login handler for rejected submissions (with warning). Always
/// a 200: wrong credentials are routine, not an HTTP error.
pub fn render_login(state: &AppState, show_warning: bool) -> Result<Html<String>, AppError> {
    let mut context = tera::Context::new();
    context.insert("config", &state.config.ui);
    context.insert("show_warning", &show_warning);

    let html = state.tera.render(LOGIN_TEMPLATE, &context)?;
    Ok(Html(html))
}

/// Validate a submitted token and issue the credential cookie.
#[instrument(name = "auth::login", skip_all)]
pub async fn login(
    State(state): State<AppState>,
    Host(host): Host,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    match state.issuer.login(&form.token, &host) {
        LoginOutcome::CredentialIssued(cookie) => {
            tracing::info!("Login accepted, credential issued");
            Ok((jar.add(cookie), Redirect::to("/")).into_response())
        }
        LoginOutcome::Rejected => {
            tracing::info!("Login rejected: token mismatch");
            Ok(render_login(&state, true)?.into_response())
        }
    }
}

/// Fallback for non-POST requests to /login: back to the gated root.
pub async fn login_redirect() -> Redirect {
    Redirect::to("/")
}

/// Clear the credential cookie and redirect to the gated root.
///
/// Idempotent: clearing an absent cookie is a no-op for the client.
#[instrument(name = "auth::logout", skip_all)]
pub async fn logout(
    State(state): State<AppState>,
    Host(host): Host,
    jar: CookieJar,
) -> (CookieJar, Redirect) {
    tracing::info!("Logout, clearing credential");
    (jar.add(state.issuer.logout(&host)), Redirect::to("/"))
}
