//! Gene search, ortholog, and correlation endpoints.

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::Value;

use mchviz_common::{ApiError, OrthologQuery, Species};
use crate::handlers::params::{strip_version, GeneQuery};
use crate::state::SharedState;

/// GET /gene/names/{species}?q=
pub async fn search_gene_by_name(
    State(state): State<SharedState>,
    Path(species): Path<String>,
    query: GeneQuery,
) -> Result<Json<Value>, ApiError> {
    Ok(Json(state.content.search_gene_names(&species, query.text()).await?))
}

/// GET /gene/id/{species}?q=
pub async fn search_gene_by_id(
    State(state): State<SharedState>,
    Path(species): Path<String>,
    query: GeneQuery,
) -> Result<Json<Value>, ApiError> {
    Ok(Json(state.content.gene_id_to_name(&species, query.text()).await?))
}

/// GET /gene/orthologs/{species}/{gene_id}
pub async fn orthologs(
    State(state): State<SharedState>,
    Path((species, gene_id)): Path<(String, String)>,
) -> Result<Json<Value>, ApiError> {
    let query = OrthologQuery::new(Species::from_code(&species), strip_version(&gene_id));
    Ok(Json(state.content.find_orthologs(query).await?))
}

/// GET /gene/corr/{species}/{gene_id}
pub async fn correlated_genes(
    State(state): State<SharedState>,
    Path((species, gene_id)): Path<(String, String)>,
) -> Result<Json<Value>, ApiError> {
    Ok(Json(state.content.corr_genes(&species, &gene_id).await?))
}
