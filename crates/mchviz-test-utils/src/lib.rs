//! Shared test fixtures: a recording content backend, cheap-to-hash users,
//! and throwaway data directories.

use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Mutex;

use argon2::{Algorithm, Argon2, Params, Version};
use async_trait::async_trait;
use serde_json::{json, Value};
use tempfile::TempDir;

use mchviz_common::{ContentError, ContentResult, ContentService, OrthologQuery};
use mchviz_security::{password::hash_with, User};

/// One call made against [`RecordingContent`].
#[derive(Debug, Clone, PartialEq)]
pub enum ContentCall {
    ClusterPlot { species: String, grouping: String },
    MchScatter { species: String, gene: String, level: String, ptile_start: f64, ptile_end: f64 },
    MchBox { species: String, gene: String, level: String, outliers: bool },
    MchBoxTwoSpecies { species: String, gene_mmu: String, gene_hsa: String, level: String, outliers: bool },
    SearchGeneNames { species: String, query: String },
    GeneIdToName { species: String, query: String },
    FindOrthologs(OrthologQuery),
    CorrGenes { species: String, gene_id: String },
    RandomizeColors,
    MchHeatmap { species: String, level: String, ptile_start: f64, ptile_end: f64, query: String },
}

/// Content backend that records every call and answers with small JSON
/// documents describing the call. Plots can be switched to fail.
#[derive(Debug, Default)]
pub struct RecordingContent {
    calls: Mutex<Vec<ContentCall>>,
    fail_plots: AtomicBool,
    fail_lookups: AtomicBool,
    color_seed: AtomicU64,
}

impl RecordingContent {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every plot call fails with a graphing error.
    pub fn failing_plots() -> Self {
        let content = Self::default();
        content.fail_plots.store(true, Ordering::SeqCst);
        content
    }

    /// Every search/lookup call fails as unavailable.
    pub fn failing_lookups() -> Self {
        let content = Self::default();
        content.fail_lookups.store(true, Ordering::SeqCst);
        content
    }

    pub fn calls(&self) -> Vec<ContentCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn record(&self, call: ContentCall) {
        self.calls.lock().unwrap().push(call);
    }

    fn plot(&self, call: ContentCall, kind: &str) -> ContentResult<Value> {
        self.record(call);
        if self.fail_plots.load(Ordering::SeqCst) {
            return Err(ContentError::FailToGraph(format!("{kind} fixture failure")));
        }
        Ok(json!({ "plot": kind, "data": [] }))
    }

    fn lookup(&self, call: ContentCall, value: Value) -> ContentResult<Value> {
        self.record(call);
        if self.fail_lookups.load(Ordering::SeqCst) {
            return Err(ContentError::Unavailable("fixture lookup failure".into()));
        }
        Ok(value)
    }
}

#[async_trait]
impl ContentService for RecordingContent {
    async fn cluster_plot(&self, species: &str, grouping: &str) -> ContentResult<Value> {
        self.plot(
            ContentCall::ClusterPlot { species: species.into(), grouping: grouping.into() },
            "cluster",
        )
    }

    async fn mch_scatter(
        &self,
        species: &str,
        gene: &str,
        level: &str,
        ptile_start: f64,
        ptile_end: f64,
    ) -> ContentResult<Value> {
        self.plot(
            ContentCall::MchScatter {
                species: species.into(),
                gene: gene.into(),
                level: level.into(),
                ptile_start,
                ptile_end,
            },
            "mch_scatter",
        )
    }

    async fn mch_box(&self, species: &str, gene: &str, level: &str, outliers: bool) -> ContentResult<Value> {
        self.plot(
            ContentCall::MchBox { species: species.into(), gene: gene.into(), level: level.into(), outliers },
            "mch_box",
        )
    }

    async fn mch_box_two_species(
        &self,
        species: &str,
        gene_mmu: &str,
        gene_hsa: &str,
        level: &str,
        outliers: bool,
    ) -> ContentResult<Value> {
        self.plot(
            ContentCall::MchBoxTwoSpecies {
                species: species.into(),
                gene_mmu: gene_mmu.into(),
                gene_hsa: gene_hsa.into(),
                level: level.into(),
                outliers,
            },
            "mch_box_combined",
        )
    }

    async fn search_gene_names(&self, species: &str, query: &str) -> ContentResult<Value> {
        self.lookup(
            ContentCall::SearchGeneNames { species: species.into(), query: query.into() },
            json!([{ "gene_name": query }]),
        )
    }

    async fn gene_id_to_name(&self, species: &str, query: &str) -> ContentResult<Value> {
        self.lookup(
            ContentCall::GeneIdToName { species: species.into(), query: query.into() },
            json!({ "gene_id": query, "gene_name": "name" }),
        )
    }

    async fn find_orthologs(&self, query: OrthologQuery) -> ContentResult<Value> {
        let value = match &query {
            OrthologQuery::Human { gene_id } => json!({ "hsa_gid": gene_id, "mmu_gid": "ortholog" }),
            OrthologQuery::Mouse { gene_id } => json!({ "mmu_gid": gene_id, "hsa_gid": "ortholog" }),
        };
        self.lookup(ContentCall::FindOrthologs(query), value)
    }

    async fn corr_genes(&self, species: &str, gene_id: &str) -> ContentResult<Value> {
        self.lookup(
            ContentCall::CorrGenes { species: species.into(), gene_id: gene_id.into() },
            json!([{ "gene_id": gene_id, "corr": 1.0 }]),
        )
    }

    async fn randomize_cluster_colors(&self) -> ContentResult<Value> {
        let seed = self.color_seed.fetch_add(1, Ordering::SeqCst);
        self.lookup(ContentCall::RandomizeColors, json!({ "seed": seed }))
    }

    async fn mch_heatmap(
        &self,
        species: &str,
        level: &str,
        ptile_start: f64,
        ptile_end: f64,
        query: &str,
    ) -> ContentResult<Value> {
        self.plot(
            ContentCall::MchHeatmap {
                species: species.into(),
                level: level.into(),
                ptile_start,
                ptile_end,
                query: query.into(),
            },
            "mch_heatmap",
        )
    }
}

/// User whose password hash uses minimal Argon2 cost so tests stay fast.
pub fn fixture_user(email: &str, password: &str) -> User {
    let params = Params::new(1024, 1, 1, None).expect("valid argon2 params");
    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);
    User {
        email: email.to_string(),
        password_hash: Some(hash_with(&argon2, password).expect("hash fixture password")),
    }
}

/// Temporary data directory containing one subdirectory per name.
pub fn data_dir_with(datasets: &[&str]) -> TempDir {
    let dir = tempfile::tempdir().expect("create temp data dir");
    for name in datasets {
        std::fs::create_dir(dir.path().join(name)).expect("create dataset dir");
    }
    dir
}

/// Path that is guaranteed not to exist inside `dir`.
pub fn missing_path(dir: &Path) -> std::path::PathBuf {
    dir.join("does-not-exist")
}
