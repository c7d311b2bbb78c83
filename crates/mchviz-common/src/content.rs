//! Content backend contract.
//!
//! The web layer never builds plots or searches genes itself. Everything it
//! serves besides templates comes from an implementation of
//! [`ContentService`].

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::error::{ContentError, ContentResult};
use crate::species::OrthologQuery;

#[async_trait]
pub trait ContentService: Send + Sync {
    /// Cluster scatter plot for a species, coloured by `grouping`.
    async fn cluster_plot(&self, species: &str, grouping: &str) -> ContentResult<Value>;

    /// Per-cell mCH levels for one gene, clipped to the given percentiles.
    async fn mch_scatter(
        &self,
        species: &str,
        gene: &str,
        level: &str,
        ptile_start: f64,
        ptile_end: f64,
    ) -> ContentResult<Value>;

    async fn mch_box(
        &self,
        species: &str,
        gene: &str,
        level: &str,
        outliers: bool,
    ) -> ContentResult<Value>;

    async fn mch_box_two_species(
        &self,
        species: &str,
        gene_mmu: &str,
        gene_hsa: &str,
        level: &str,
        outliers: bool,
    ) -> ContentResult<Value>;

    /// Name matches for `query`. [`NO_QUERY`](crate::NO_QUERY) means no
    /// query was supplied and should yield an empty result.
    async fn search_gene_names(&self, species: &str, query: &str) -> ContentResult<Value>;

    async fn gene_id_to_name(&self, species: &str, query: &str) -> ContentResult<Value>;

    async fn find_orthologs(&self, query: OrthologQuery) -> ContentResult<Value>;

    async fn corr_genes(&self, species: &str, gene_id: &str) -> ContentResult<Value>;

    /// Reshuffle the shared cluster colour assignment and return it.
    async fn randomize_cluster_colors(&self) -> ContentResult<Value>;

    async fn mch_heatmap(
        &self,
        species: &str,
        level: &str,
        ptile_start: f64,
        ptile_end: f64,
        query: &str,
    ) -> ContentResult<Value>;
}

/// Backend used when no dataset is wired in: plots fail, searches are empty.
#[derive(Debug, Default, Clone)]
pub struct UnavailableContent;

impl UnavailableContent {
    fn no_data(what: &str) -> ContentError {
        ContentError::FailToGraph(format!("no content backend configured for {what}"))
    }
}

#[async_trait]
impl ContentService for UnavailableContent {
    async fn cluster_plot(&self, _species: &str, _grouping: &str) -> ContentResult<Value> {
        Err(Self::no_data("cluster plot"))
    }

    async fn mch_scatter(
        &self,
        _species: &str,
        _gene: &str,
        _level: &str,
        _ptile_start: f64,
        _ptile_end: f64,
    ) -> ContentResult<Value> {
        Err(Self::no_data("mCH scatter"))
    }

    async fn mch_box(&self, _: &str, _: &str, _: &str, _: bool) -> ContentResult<Value> {
        Err(Self::no_data("mCH box plot"))
    }

    async fn mch_box_two_species(
        &self,
        _: &str,
        _: &str,
        _: &str,
        _: &str,
        _: bool,
    ) -> ContentResult<Value> {
        Err(Self::no_data("combined mCH box plot"))
    }

    async fn search_gene_names(&self, _species: &str, _query: &str) -> ContentResult<Value> {
        Ok(json!([]))
    }

    async fn gene_id_to_name(&self, _species: &str, _query: &str) -> ContentResult<Value> {
        Ok(json!({}))
    }

    async fn find_orthologs(&self, query: OrthologQuery) -> ContentResult<Value> {
        Ok(match query {
            OrthologQuery::Human { gene_id } => json!({ "hsa_gid": gene_id, "mmu_gid": Value::Null }),
            OrthologQuery::Mouse { gene_id } => json!({ "mmu_gid": gene_id, "hsa_gid": Value::Null }),
        })
    }

    async fn corr_genes(&self, _species: &str, _gene_id: &str) -> ContentResult<Value> {
        Ok(json!([]))
    }

    async fn randomize_cluster_colors(&self) -> ContentResult<Value> {
        Ok(json!({}))
    }

    async fn mch_heatmap(&self, _: &str, _: &str, _: f64, _: f64, _: &str) -> ContentResult<Value> {
        Err(Self::no_data("mCH heatmap"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn unavailable_backend_fails_plots() {
        let content = UnavailableContent;
        let err = content.cluster_plot("hsa", "biccn").await.unwrap_err();
        assert!(matches!(err, ContentError::FailToGraph(_)));
    }

    #[tokio::test]
    async fn unavailable_backend_returns_empty_searches() {
        let content = UnavailableContent;
        assert_eq!(content.search_gene_names("hsa", crate::NO_QUERY).await.unwrap(), json!([]));
        assert_eq!(content.gene_id_to_name("mmu", "Gad1").await.unwrap(), json!({}));
    }

    #[tokio::test]
    async fn unavailable_backend_echoes_ortholog_side() {
        let content = UnavailableContent;
        let value = content
            .find_orthologs(OrthologQuery::Mouse { gene_id: "ENSMUSG1".into() })
            .await
            .unwrap();
        assert_eq!(value, json!({ "mmu_gid": "ENSMUSG1", "hsa_gid": null }));
    }
}
