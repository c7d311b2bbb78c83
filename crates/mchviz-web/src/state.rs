//! Shared application state for the web server.

use std::sync::Arc;

use mchviz_common::ContentService;
use mchviz_security::{SessionStore, UserStore};

use crate::cache::ResponseCache;
use crate::navigation::Navigation;
use crate::templates::Templates;

/// Shared state injected into every Axum handler.
pub struct AppState {
    pub content: Arc<dyn ContentService>,
    pub users: Arc<dyn UserStore>,
    pub sessions: SessionStore,
    pub templates: Templates,
    pub navigation: Arc<Navigation>,
    pub cache: Arc<ResponseCache>,
}

impl AppState {
    pub fn new(
        content: Arc<dyn ContentService>,
        users: Arc<dyn UserStore>,
        navigation: Navigation,
        cache: ResponseCache,
    ) -> Result<Self, minijinja::Error> {
        let templates = Templates::new(&navigation)?;
        Ok(Self {
            content,
            users,
            sessions: SessionStore::new(),
            templates,
            navigation: Arc::new(navigation),
            cache: Arc::new(cache),
        })
    }
}

pub type SharedState = Arc<AppState>;
