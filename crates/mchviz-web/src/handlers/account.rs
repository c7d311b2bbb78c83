//! Login and logout.

use axum::{
    extract::{rejection::FormRejection, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Extension, Form,
};
use axum_extra::extract::cookie::CookieJar;
use minijinja::context;
use serde::{Deserialize, Serialize};

use mchviz_common::ApiError;
use mchviz_security::User;
use crate::auth::{found, removal_cookie, session_cookie, CurrentSession};
use crate::state::SharedState;

pub const INVALID_CREDENTIALS: &str = "Invalid email or password.";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pub remember: Option<String>,
}

#[derive(Debug, Default, Serialize)]
pub struct LoginErrors {
    pub email: Option<&'static str>,
    pub password: Option<&'static str>,
}

impl LoginErrors {
    fn is_empty(&self) -> bool {
        self.email.is_none() && self.password.is_none()
    }
}

#[derive(Debug, Serialize)]
pub struct Flash {
    pub category: &'static str,
    pub message: &'static str,
}

impl LoginForm {
    pub fn validate(&self) -> LoginErrors {
        let email = self.email.trim();
        LoginErrors {
            email: if email.is_empty() {
                Some("Email is required.")
            } else if !email.contains('@') {
                Some("Invalid email address.")
            } else {
                None
            },
            password: self.password.is_empty().then_some("Password is required."),
        }
    }

    /// Checkbox values browsers and form libraries send for "checked".
    pub fn remember(&self) -> bool {
        matches!(self.remember.as_deref(), Some("y" | "on" | "true" | "1"))
    }
}

fn render_login(
    state: &SharedState,
    email: &str,
    errors: &LoginErrors,
    flashes: &[Flash],
) -> Result<Response, ApiError> {
    let html = state
        .templates
        .render("account/login.html", context! { email, errors, flashes })?;
    Ok(html.into_response())
}

/// GET /login
pub async fn login_page(State(state): State<SharedState>) -> Result<Response, ApiError> {
    render_login(&state, "", &LoginErrors::default(), &[])
}

/// Argon2 verification is CPU-bound; keep it off the async workers.
async fn verify_off_thread(user: User, password: String) -> Result<Option<User>, ApiError> {
    tokio::task::spawn_blocking(move || user.verify_password(&password).then_some(user))
        .await
        .map_err(|e| ApiError::Internal(format!("password check failed: {e}")))
}

/// POST /login
pub async fn login_submit(
    State(state): State<SharedState>,
    jar: CookieJar,
    form: Result<Form<LoginForm>, FormRejection>,
) -> Result<Response, ApiError> {
    let form = match form {
        Ok(Form(form)) => form,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "unreadable login form");
            LoginForm::default()
        }
    };

    let errors = form.validate();
    if !errors.is_empty() {
        return render_login(&state, &form.email, &errors, &[]);
    }

    let email = form.email.trim();
    let user = match state.users.find_by_email(email).await {
        Some(user) => verify_off_thread(user, form.password.clone()).await?,
        None => None,
    };

    match user {
        Some(user) => {
            let session = state.sessions.login(&user, form.remember());
            let jar = jar.add(session_cookie(&session));
            Ok((StatusCode::FOUND, jar, [(header::LOCATION, "/")]).into_response())
        }
        None => {
            tracing::info!(email, "failed login");
            let flash = Flash { category: "form-error", message: INVALID_CREDENTIALS };
            render_login(&state, email, &LoginErrors::default(), &[flash])
        }
    }
}

/// GET /logout, behind the session gate.
pub async fn logout(
    State(state): State<SharedState>,
    Extension(CurrentSession(session)): Extension<CurrentSession>,
    jar: CookieJar,
) -> Response {
    state.sessions.logout(&session.id);
    (jar.remove(removal_cookie()), found("/")).into_response()
}
