//! Routing layer for the brain methylome browser.
//! Provides:
//!   - Species, standalone gene, and comparison pages
//!   - Plot data endpoints (cluster, mCH scatter/box/heatmap) with response caching
//!   - Gene name/id search, orthologs, and correlated genes
//!   - Login/logout with a session-gated logout route

pub mod auth;
pub mod cache;
pub mod handlers;
pub mod navigation;
pub mod router;
pub mod server;
pub mod state;
pub mod templates;
