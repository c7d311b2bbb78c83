//! Shared harness for the router integration tests.
#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use tempfile::TempDir;
use tower::ServiceExt;

use mchviz_security::InMemoryUserStore;
use mchviz_test_utils::{data_dir_with, fixture_user, RecordingContent};
use mchviz_web::cache::{ResponseCache, DEFAULT_MAX_ENTRIES};
use mchviz_web::navigation::Navigation;
use mchviz_web::router::build_router;
use mchviz_web::state::AppState;

pub const EMAIL: &str = "curator@example.org";
pub const PASSWORD: &str = "correct horse battery staple";

pub struct TestApp {
    pub router: Router,
    pub content: Arc<RecordingContent>,
    pub cache: Arc<ResponseCache>,
    _data_dir: TempDir,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    pub fn header(&self, name: header::HeaderName) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn content_type(&self) -> &str {
        self.header(header::CONTENT_TYPE).unwrap_or_default()
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).expect("response body is JSON")
    }
}

pub fn app() -> TestApp {
    app_with(RecordingContent::new())
}

pub fn app_with(content: RecordingContent) -> TestApp {
    app_with_cache(content, ResponseCache::new(Duration::from_secs(3600), DEFAULT_MAX_ENTRIES))
}

pub fn app_with_cache(content: RecordingContent, cache: ResponseCache) -> TestApp {
    let data_dir = data_dir_with(&["hsa", "mmu"]);
    let content = Arc::new(content);
    let users = InMemoryUserStore::new([fixture_user(EMAIL, PASSWORD)]);
    let navigation = Navigation::scan(data_dir.path()).unwrap();
    let state = AppState::new(content.clone(), Arc::new(users), navigation, cache).unwrap();
    let cache = state.cache.clone();
    let router = build_router(state, data_dir.path());
    TestApp { router, content, cache, _data_dir: data_dir }
}

impl TestApp {
    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        TestResponse { status, headers, body: String::from_utf8(bytes.to_vec()).unwrap() }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send(Request::get(uri).body(Body::empty()).unwrap()).await
    }

    pub async fn get_with_cookie(&self, uri: &str, cookie: &str) -> TestResponse {
        let request = Request::get(uri)
            .header(header::COOKIE, cookie)
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    pub async fn post_form(&self, uri: &str, form: &str) -> TestResponse {
        let request = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(form.to_string()))
            .unwrap();
        self.send(request).await
    }
}

/// `name=value` part of a Set-Cookie header, ready to send back as Cookie.
pub fn cookie_pair(set_cookie: &str) -> &str {
    set_cookie.split(';').next().unwrap_or_default().trim()
}
