//! Session cookie handling and the login-required gate.

use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use mchviz_security::{Session, sessions::REMEMBER_DURATION_DAYS};

use crate::state::SharedState;

pub const SESSION_COOKIE: &str = "session";
pub const LOGIN_PATH: &str = "/login";

/// Session resolved by [`require_session`], available to gated handlers.
#[derive(Debug, Clone)]
pub struct CurrentSession(pub Session);

/// 302 redirect, the status the site has always used for its redirects.
pub fn found(location: &'static str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location)]).into_response()
}

pub fn session_cookie(session: &Session) -> Cookie<'static> {
    let mut cookie = Cookie::build((SESSION_COOKIE, session.id.clone()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax);
    if session.remember {
        cookie = cookie.max_age(time::Duration::days(REMEMBER_DURATION_DAYS));
    }
    cookie.build()
}

pub fn removal_cookie() -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE).path("/").build()
}

/// Reject requests without an active session before the handler runs.
pub async fn require_session(
    State(state): State<SharedState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    let session = jar
        .get(SESSION_COOKIE)
        .and_then(|cookie| state.sessions.get(cookie.value()));

    match session {
        Some(session) => {
            request.extensions_mut().insert(CurrentSession(session));
            next.run(request).await
        }
        None => {
            tracing::info!(path = %request.uri().path(), "login required");
            found(LOGIN_PATH)
        }
    }
}
