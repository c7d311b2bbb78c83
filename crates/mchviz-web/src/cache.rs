//! Response cache for the plot and gene-search endpoints.
//!
//! Wraps handlers as axum middleware. The key is the request path plus query
//! string; a hit replays the stored status, headers and body without calling
//! the handler. Anything the handler returned with a 2xx status is stored,
//! including the plain-text apology bodies plot routes send on failure.
//!
//! The number of entries is capped. Once full, an insert first drops expired
//! entries and then, if still full, the entry closest to expiry.

use axum::{
    body::{Body, Bytes},
    extract::{Request, State},
    http::{HeaderMap, StatusCode, Uri},
    middleware::Next,
    response::{IntoResponse, Response},
};
use dashmap::DashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct CachedResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl IntoResponse for CachedResponse {
    fn into_response(self) -> Response {
        let mut response = Response::new(Body::from(self.body));
        *response.status_mut() = self.status;
        *response.headers_mut() = self.headers;
        response
    }
}

struct CacheEntry {
    response: CachedResponse,
    expires_at: Instant,
}

pub const DEFAULT_MAX_ENTRIES: usize = 500;

/// Thread-safe response cache with a single TTL for every entry.
pub struct ResponseCache {
    entries: DashMap<String, CacheEntry>,
    ttl: Duration,
    max_entries: usize,
}

impl ResponseCache {
    pub fn new(ttl: Duration, max_entries: usize) -> Self {
        Self { entries: DashMap::new(), ttl, max_entries: max_entries.max(1) }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    pub fn key(uri: &Uri) -> String {
        match uri.query() {
            Some(q) => format!("{}?{}", uri.path(), q),
            None => uri.path().to_string(),
        }
    }

    pub fn get(&self, key: &str) -> Option<CachedResponse> {
        if let Some(entry) = self.entries.get(key) {
            if entry.expires_at > Instant::now() {
                return Some(entry.response.clone());
            }
            drop(entry);
            self.entries.remove(key);
        }
        None
    }

    pub fn insert(&self, key: String, response: CachedResponse) {
        if !self.entries.contains_key(&key) && self.entries.len() >= self.max_entries {
            self.make_room();
        }
        let entry = CacheEntry { response, expires_at: Instant::now() + self.ttl };
        self.entries.insert(key, entry);
    }

    fn make_room(&self) {
        self.purge_expired();
        while self.entries.len() >= self.max_entries {
            let oldest = self
                .entries
                .iter()
                .min_by_key(|entry| entry.expires_at)
                .map(|entry| entry.key().clone());
            match oldest {
                Some(key) => {
                    tracing::debug!(%key, "cache evict");
                    self.entries.remove(&key);
                }
                None => break,
            }
        }
    }

    /// Drop every expired entry.
    pub fn purge_expired(&self) {
        let now = Instant::now();
        self.entries.retain(|_, entry| entry.expires_at > now);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Middleware: serve from cache or run the handler and remember its output.
pub async fn cache_responses(
    State(cache): State<Arc<ResponseCache>>,
    request: Request,
    next: Next,
) -> Response {
    let key = ResponseCache::key(request.uri());
    if let Some(hit) = cache.get(&key) {
        tracing::debug!(%key, "cache hit");
        return hit.into_response();
    }

    let response = next.run(request).await;
    if !response.status().is_success() {
        return response;
    }

    let (parts, body) = response.into_parts();
    let body = match axum::body::to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::error!(%key, error = %e, "failed to buffer response body");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    tracing::debug!(%key, bytes = body.len(), "cache store");
    cache.insert(
        key,
        CachedResponse { status: parts.status, headers: parts.headers.clone(), body: body.clone() },
    );
    Response::from_parts(parts, Body::from(body))
}
