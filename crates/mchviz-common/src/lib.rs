//! Shared types, errors, and collaborator traits used across the mchviz crates.

pub mod content;
pub mod error;
pub mod species;

pub use content::{ContentService, UnavailableContent};
pub use error::{ApiError, ContentError, ContentResult};
pub use species::{OrthologQuery, Species};

/// Query value handed to the content backend when a request carries no `q`.
pub const NO_QUERY: &str = "MustHaveAQueryString";
