//! Path and query parameter conventions shared by the API routes.

use axum::{
    extract::{FromRequestParts, Query},
    http::{request::Parts, Uri},
};
use mchviz_common::NO_QUERY;
use std::convert::Infallible;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
#[error("{name} is not a number: {value:?}")]
pub struct ParamError {
    pub name: &'static str,
    pub value: String,
}

/// Parse a percentile bound from a path segment.
pub fn percentile(name: &'static str, raw: &str) -> Result<f64, ParamError> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| ParamError { name, value: raw.to_string() })
}

pub fn percentile_bounds(start: &str, end: &str) -> Result<(f64, f64), ParamError> {
    Ok((percentile("ptile_start", start)?, percentile("ptile_end", end)?))
}

/// Outliers are shown only for the exact segment `outliers`.
pub fn outliers_flag(toggle: &str) -> bool {
    toggle == "outliers"
}

/// Drop a version suffix: `ENSG0001.3` → `ENSG0001`.
pub fn strip_version(gene_id: &str) -> &str {
    gene_id.split('.').next().unwrap_or(gene_id)
}

/// `?q=` on the gene search and heatmap routes.
///
/// Extraction never fails: a repeated `q` keeps the first value and an
/// unreadable query string counts as no `q` at all.
#[derive(Debug, Default, PartialEq)]
pub struct GeneQuery {
    pub q: Option<String>,
}

impl GeneQuery {
    pub fn from_uri(uri: &Uri) -> Self {
        let pairs = Query::<Vec<(String, String)>>::try_from_uri(uri)
            .map(|Query(pairs)| pairs)
            .unwrap_or_else(|e| {
                tracing::debug!(error = %e, "unreadable query string");
                Vec::new()
            });
        let q = pairs.into_iter().find(|(key, _)| key == "q").map(|(_, value)| value);
        Self { q }
    }

    /// The query text, or the no-query marker when `q` was not supplied.
    pub fn text(&self) -> &str {
        self.q.as_deref().unwrap_or(NO_QUERY)
    }
}

impl<S: Send + Sync> FromRequestParts<S> for GeneQuery {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_uri(&parts.uri))
    }
}
