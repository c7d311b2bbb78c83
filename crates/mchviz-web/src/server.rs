//! Startup: turn a resolved [`Config`] into a ready router and serve it.

use axum::Router;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use mchviz_common::ContentService;
use mchviz_config::Config;
use mchviz_security::{InMemoryUserStore, SecurityError};

use crate::cache::ResponseCache;
use crate::navigation::{Navigation, NavigationError};
use crate::router::build_router;
use crate::state::AppState;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Navigation(#[from] NavigationError),

    #[error(transparent)]
    Users(#[from] SecurityError),

    #[error("Template setup failed: {0}")]
    Templates(#[from] minijinja::Error),
}

/// Everything that must succeed before the listener is bound.
pub fn build_app(config: &Config, content: Arc<dyn ContentService>) -> Result<Router, StartupError> {
    let navigation = Navigation::scan(&config.data_dir)?;

    let users = match &config.users_file {
        Some(path) => InMemoryUserStore::from_file(path)?,
        None => {
            tracing::warn!("no users file configured; nobody can log in");
            InMemoryUserStore::default()
        }
    };

    let state = AppState::new(
        content,
        Arc::new(users),
        navigation,
        ResponseCache::new(Duration::from_secs(config.cache_ttl_secs), config.cache_max_entries),
    )?;
    Ok(build_router(state, &config.static_dir))
}

pub async fn serve(config: Config, content: Arc<dyn ContentService>) -> anyhow::Result<()> {
    let app = build_app(&config, content)?;

    let listener = tokio::net::TcpListener::bind(config.listen).await?;
    tracing::info!("Server listening on http://{}", config.listen);

    axum::serve(listener, app).await?;
    Ok(())
}
