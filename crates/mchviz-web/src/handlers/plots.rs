//! Plot data endpoints.
//!
//! Plot failures never become HTTP errors: the client gets a 200 with a
//! fixed apology text instead of plot JSON, and the cause is logged.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::Value;
use std::fmt::Display;

use mchviz_common::{ApiError, ContentResult};
use crate::handlers::params::{outliers_flag, percentile_bounds, GeneQuery};
use crate::state::SharedState;

pub const CLUSTER_APOLOGY: &str = "Failed to produce cluster plot. Contact maintainer.";
pub const SCATTER_APOLOGY: &str = "Failed to produce mCH levels scatter plot. Contact maintainer.";
pub const BOX_APOLOGY: &str = "Failed to produce mCH levels box plot. Contact maintainer.";
pub const HEATMAP_APOLOGY: &str = "Failed to produce mCH heatmap. Contact maintainer.";

fn apology(text: &'static str, plot: &str, err: impl Display) -> Response {
    tracing::warn!(plot, error = %err, "plot generation failed");
    text.into_response()
}

fn plot_or_apology(result: ContentResult<Value>, plot: &str, text: &'static str) -> Response {
    match result {
        Ok(value) => Json(value).into_response(),
        Err(e) => apology(text, plot, e),
    }
}

/// GET /plot/cluster/{species}/{grouping}
pub async fn plot_cluster(
    State(state): State<SharedState>,
    Path((species, grouping)): Path<(String, String)>,
) -> Response {
    let result = state.content.cluster_plot(&species, &grouping).await;
    plot_or_apology(result, "cluster", CLUSTER_APOLOGY)
}

#[derive(Debug, Deserialize)]
pub struct ScatterPath {
    pub species: String,
    pub gene: String,
    pub level: String,
    pub ptile_start: String,
    pub ptile_end: String,
}

/// GET /plot/mch/{species}/{gene}/{level}/{ptile_start}/{ptile_end}
pub async fn plot_mch_scatter(State(state): State<SharedState>, Path(p): Path<ScatterPath>) -> Response {
    let (start, end) = match percentile_bounds(&p.ptile_start, &p.ptile_end) {
        Ok(bounds) => bounds,
        Err(e) => return apology(SCATTER_APOLOGY, "mch_scatter", e),
    };

    let result = state.content.mch_scatter(&p.species, &p.gene, &p.level, start, end).await;
    plot_or_apology(result, "mch_scatter", SCATTER_APOLOGY)
}

#[derive(Debug, Deserialize)]
pub struct BoxPath {
    pub species: String,
    pub gene: String,
    pub level: String,
    pub outliers_toggle: String,
}

/// GET /plot/box/{species}/{gene}/{level}/{outliers_toggle}
pub async fn plot_mch_box(State(state): State<SharedState>, Path(p): Path<BoxPath>) -> Response {
    let outliers = outliers_flag(&p.outliers_toggle);
    let result = state.content.mch_box(&p.species, &p.gene, &p.level, outliers).await;
    plot_or_apology(result, "mch_box", BOX_APOLOGY)
}

#[derive(Debug, Deserialize)]
pub struct CombinedBoxPath {
    pub species: String,
    pub gene_mmu: String,
    pub gene_hsa: String,
    pub level: String,
    pub outliers_toggle: String,
}

/// GET /plot/box_combined/{species}/{gene_mmu}/{gene_hsa}/{level}/{outliers_toggle}
pub async fn plot_mch_box_two_species(
    State(state): State<SharedState>,
    Path(p): Path<CombinedBoxPath>,
) -> Response {
    let outliers = outliers_flag(&p.outliers_toggle);
    let result = state
        .content
        .mch_box_two_species(&p.species, &p.gene_mmu, &p.gene_hsa, &p.level, outliers)
        .await;
    plot_or_apology(result, "mch_box_combined", BOX_APOLOGY)
}

#[derive(Debug, Deserialize)]
pub struct HeatmapPath {
    pub species: String,
    pub level: String,
    pub ptile_start: String,
    pub ptile_end: String,
}

/// GET /plot/heat/{species}/{level}/{ptile_start}/{ptile_end}?q=
pub async fn plot_mch_heatmap(
    State(state): State<SharedState>,
    Path(p): Path<HeatmapPath>,
    query: GeneQuery,
) -> Response {
    let (start, end) = match percentile_bounds(&p.ptile_start, &p.ptile_end) {
        Ok(bounds) => bounds,
        Err(e) => return apology(HEATMAP_APOLOGY, "mch_heatmap", e),
    };

    let result = state
        .content
        .mch_heatmap(&p.species, &p.level, start, end, query.text())
        .await;
    plot_or_apology(result, "mch_heatmap", HEATMAP_APOLOGY)
}

/// GET /plot/randomize_colors
pub async fn randomize_colors(State(state): State<SharedState>) -> Result<Json<Value>, ApiError> {
    Ok(Json(state.content.randomize_cluster_colors().await?))
}
