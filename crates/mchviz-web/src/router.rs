//! Axum router: maps every URL path to its handler.

use axum::{
    middleware,
    routing::get,
    Router,
};
use std::path::Path;
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    services::ServeDir,
    trace::TraceLayer,
};

use crate::auth::require_session;
use crate::cache::cache_responses;
use crate::handlers::{
    account::{login_page, login_submit, logout},
    genes::{correlated_genes, orthologs, search_gene_by_id, search_gene_by_name},
    pages::{box_combined, compare, index, species, standalone, tabular_ensemble},
    plots::{
        plot_cluster, plot_mch_box, plot_mch_box_two_species, plot_mch_heatmap,
        plot_mch_scatter, randomize_colors,
    },
};
use crate::state::{AppState, SharedState};

/// Build and return the full Axum router.
pub fn build_router(state: AppState, static_dir: &Path) -> Router {
    let shared: SharedState = Arc::new(state);

    // Responses memoized per path + query for the cache TTL.
    let cached = Router::new()
        .route("/plot/cluster/{species}/{grouping}", get(plot_cluster))
        .route(
            "/plot/mch/{species}/{gene}/{level}/{ptile_start}/{ptile_end}",
            get(plot_mch_scatter),
        )
        .route("/plot/box/{species}/{gene}/{level}/{outliers_toggle}", get(plot_mch_box))
        .route(
            "/plot/box_combined/{species}/{gene_mmu}/{gene_hsa}/{level}/{outliers_toggle}",
            get(plot_mch_box_two_species),
        )
        .route("/gene/names/{species}", get(search_gene_by_name))
        .route("/gene/id/{species}", get(search_gene_by_id))
        .route_layer(middleware::from_fn_with_state(shared.cache.clone(), cache_responses));

    let gated = Router::new()
        .route("/logout", get(logout))
        .route_layer(middleware::from_fn_with_state(shared.clone(), require_session));

    Router::new()
        // Pages
        .route("/",                               get(index))
        .route("/{species}",                      get(species))
        .route("/standalone/{species}/{gene}",    get(standalone))
        .route("/compare/{mmu_gid}/{hsa_gid}",    get(compare))
        .route("/box_combined/{mmu_gid}/{hsa_gid}", get(box_combined))
        .route("/tabular/ensemble",               get(tabular_ensemble))
        .route("/login",                          get(login_page).post(login_submit))

        // Uncached API endpoints
        .route("/gene/orthologs/{species}/{gene_id}", get(orthologs))
        .route("/gene/corr/{species}/{gene_id}",      get(correlated_genes))
        .route("/plot/randomize_colors",              get(randomize_colors))
        .route("/plot/heat/{species}/{level}/{ptile_start}/{ptile_end}", get(plot_mch_heatmap))

        .merge(cached)
        .merge(gated)

        // Static files
        .nest_service("/static", ServeDir::new(static_dir))

        // Middleware
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(shared)
}
