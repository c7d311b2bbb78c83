//! Plot endpoints: parameter conventions, apology responses, and caching.

mod common;

use std::time::Duration;

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;

use common::{app, app_with, app_with_cache};
use mchviz_common::NO_QUERY;
use mchviz_test_utils::{ContentCall, RecordingContent};
use mchviz_web::cache::ResponseCache;
use mchviz_web::handlers::plots::{BOX_APOLOGY, CLUSTER_APOLOGY, HEATMAP_APOLOGY, SCATTER_APOLOGY};

#[tokio::test]
async fn cluster_plot_is_served_as_json() {
    let app = app();
    let res = app.get("/plot/cluster/hsa/biccn").await;

    assert_eq!(res.status, StatusCode::OK);
    assert!(res.content_type().starts_with("application/json"));
    assert_eq!(res.json(), json!({ "plot": "cluster", "data": [] }));
    assert_eq!(
        app.content.calls(),
        vec![ContentCall::ClusterPlot { species: "hsa".into(), grouping: "biccn".into() }]
    );
}

#[tokio::test]
async fn cluster_failure_is_an_apology_with_ok_status() {
    let app = app_with(RecordingContent::failing_plots());
    let res = app.get("/plot/cluster/hsa/biccn").await;

    assert_eq!(res.status, StatusCode::OK);
    assert!(res.content_type().starts_with("text/plain"));
    assert_eq!(res.body, CLUSTER_APOLOGY);
}

#[tokio::test]
async fn scatter_passes_percentiles_as_floats() {
    let app = app();
    let res = app.get("/plot/mch/mmu/ENSMUSG00000070880/mCH/10/90.5").await;

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(
        app.content.calls(),
        vec![ContentCall::MchScatter {
            species: "mmu".into(),
            gene: "ENSMUSG00000070880".into(),
            level: "mCH".into(),
            ptile_start: 10.0,
            ptile_end: 90.5,
        }]
    );
}

#[tokio::test]
async fn scatter_with_unparseable_percentile_apologizes_without_calling_backend() {
    let app = app();
    let res = app.get("/plot/mch/hsa/GENE1/mCH/10/notanumber").await;

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body, SCATTER_APOLOGY);
    assert_eq!(app.content.call_count(), 0);
}

#[tokio::test]
async fn scatter_failure_is_an_apology() {
    let app = app_with(RecordingContent::failing_plots());
    let res = app.get("/plot/mch/hsa/GENE1/mCH/10/90").await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body, SCATTER_APOLOGY);
}

#[tokio::test]
async fn box_outliers_only_for_exact_literal() {
    let app = app();
    for toggle in ["outliers", "Outliers", "no", "false"] {
        let res = app.get(&format!("/plot/box/hsa/GENE1/mCH/{toggle}")).await;
        assert_eq!(res.status, StatusCode::OK, "{toggle}");
    }

    let flags: Vec<bool> = app
        .content
        .calls()
        .into_iter()
        .map(|call| match call {
            ContentCall::MchBox { outliers, .. } => outliers,
            other => panic!("unexpected call {other:?}"),
        })
        .collect();
    assert_eq!(flags, vec![true, false, false, false]);
}

#[tokio::test]
async fn combined_box_forwards_both_genes() {
    let app = app();
    app.get("/plot/box_combined/mmu/ENSMUSG1/ENSG1/mCH/outliers").await;
    app.get("/plot/box_combined/mmu/ENSMUSG1/ENSG1/mCH/none").await;

    assert_eq!(
        app.content.calls(),
        vec![
            ContentCall::MchBoxTwoSpecies {
                species: "mmu".into(),
                gene_mmu: "ENSMUSG1".into(),
                gene_hsa: "ENSG1".into(),
                level: "mCH".into(),
                outliers: true,
            },
            ContentCall::MchBoxTwoSpecies {
                species: "mmu".into(),
                gene_mmu: "ENSMUSG1".into(),
                gene_hsa: "ENSG1".into(),
                level: "mCH".into(),
                outliers: false,
            },
        ]
    );
}

#[tokio::test]
async fn box_failure_is_an_apology() {
    let app = app_with(RecordingContent::failing_plots());
    assert_eq!(app.get("/plot/box/hsa/GENE1/mCH/outliers").await.body, BOX_APOLOGY);
    assert_eq!(app.get("/plot/box_combined/hsa/A/B/mCH/outliers").await.body, BOX_APOLOGY);
}

#[tokio::test]
async fn repeated_plot_request_hits_cache() {
    let app = app();
    let first = app.get("/plot/mch/hsa/GENE1/mCH/10/90").await;
    let second = app.get("/plot/mch/hsa/GENE1/mCH/10/90").await;

    assert_eq!(app.content.call_count(), 1);
    assert_eq!(first.body, second.body);
    assert_eq!(first.content_type(), second.content_type());
}

#[tokio::test]
async fn apologies_are_cached_too() {
    let app = app_with(RecordingContent::failing_plots());
    let first = app.get("/plot/cluster/mmu/cluster").await;
    let second = app.get("/plot/cluster/mmu/cluster").await;

    assert_eq!(first.body, CLUSTER_APOLOGY);
    assert_eq!(second.body, CLUSTER_APOLOGY);
    assert_eq!(app.content.call_count(), 1);
}

#[tokio::test]
async fn distinct_paths_are_cached_separately() {
    let app = app();
    app.get("/plot/cluster/hsa/biccn").await;
    app.get("/plot/cluster/mmu/biccn").await;
    app.get("/plot/cluster/hsa/biccn").await;
    assert_eq!(app.content.call_count(), 2);
}

#[tokio::test]
async fn heatmap_defaults_query_and_is_not_cached() {
    let app = app();
    app.get("/plot/heat/hsa/mCH/10/90").await;
    app.get("/plot/heat/hsa/mCH/10/90").await;
    app.get("/plot/heat/hsa/mCH/10/90?q=Gad1,Gad2").await;

    let expected = |query: &str| ContentCall::MchHeatmap {
        species: "hsa".into(),
        level: "mCH".into(),
        ptile_start: 10.0,
        ptile_end: 90.0,
        query: query.into(),
    };
    assert_eq!(
        app.content.calls(),
        vec![expected(NO_QUERY), expected(NO_QUERY), expected("Gad1,Gad2")]
    );
}

#[tokio::test]
async fn heatmap_takes_first_of_repeated_query() {
    let app = app();
    let res = app.get("/plot/heat/hsa/mCH/10/90?q=a&q=b").await;

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(
        app.content.calls(),
        vec![ContentCall::MchHeatmap {
            species: "hsa".into(),
            level: "mCH".into(),
            ptile_start: 10.0,
            ptile_end: 90.0,
            query: "a".into(),
        }]
    );
}

#[tokio::test]
async fn heatmap_with_bad_percentile_apologizes() {
    let app = app();
    let res = app.get("/plot/heat/hsa/mCH/low/90").await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body, HEATMAP_APOLOGY);
    assert_eq!(app.content.call_count(), 0);
}

#[tokio::test]
async fn randomize_colors_runs_every_time() {
    let app = app();
    let first = app.get("/plot/randomize_colors").await;
    let second = app.get("/plot/randomize_colors").await;

    assert_eq!(first.json(), json!({ "seed": 0 }));
    assert_eq!(second.json(), json!({ "seed": 1 }));
    assert_eq!(app.content.calls(), vec![ContentCall::RandomizeColors, ContentCall::RandomizeColors]);
}

#[tokio::test]
async fn cache_stays_within_entry_limit() {
    let app = app_with_cache(RecordingContent::new(), ResponseCache::new(Duration::from_secs(3600), 8));
    for i in 0..50 {
        app.get(&format!("/plot/cluster/hsa/grouping{i}")).await;
    }
    assert_eq!(app.cache.len(), 8);

    // Most recent responses survive eviction.
    app.get("/plot/cluster/hsa/grouping49").await;
    assert_eq!(app.content.call_count(), 50);
}

#[tokio::test]
async fn expired_responses_are_dropped_when_cache_fills() {
    let app = app_with_cache(RecordingContent::new(), ResponseCache::new(Duration::from_millis(5), 100));
    for i in 0..100 {
        app.get(&format!("/gene/names/hsa?q=gene{i}")).await;
    }
    tokio::time::sleep(Duration::from_millis(50)).await;
    app.get("/gene/names/hsa?q=fresh").await;
    assert_eq!(app.cache.len(), 1);
}
