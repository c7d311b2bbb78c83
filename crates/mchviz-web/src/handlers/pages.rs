//! Server-rendered pages. Species and gene ids are passed to the templates
//! as given; the page scripts resolve them against the API.

use axum::{
    extract::{Path, State},
    response::Html,
};
use minijinja::context;

use mchviz_common::ApiError;
use crate::state::SharedState;

/// The site is embedded in a frame behind a reverse proxy, so the index
/// redirects with a relative script redirect instead of an HTTP redirect.
pub const INDEX_HTML: &str = r#"To be redirected manually, click <a href="./hsa">here</a>.
    <script>
        window.location = "./hsa";
        window.location.replace("./hsa");
    </script>
    "#;

/// GET /
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// GET /{species}
pub async fn species(
    State(state): State<SharedState>,
    Path(species): Path<String>,
) -> Result<Html<String>, ApiError> {
    state.templates.render("speciesview.html", context! { species })
}

/// GET /standalone/{species}/{gene}
pub async fn standalone(
    State(state): State<SharedState>,
    Path((species, gene)): Path<(String, String)>,
) -> Result<Html<String>, ApiError> {
    state.templates.render("mch_standalone.html", context! { species, gene })
}

/// GET /compare/{mmu_gid}/{hsa_gid}
pub async fn compare(
    State(state): State<SharedState>,
    Path((mmu_gid, hsa_gid)): Path<(String, String)>,
) -> Result<Html<String>, ApiError> {
    state.templates.render("compareview.html", context! { mmu_gid, hsa_gid })
}

/// GET /box_combined/{mmu_gid}/{hsa_gid}
pub async fn box_combined(
    State(state): State<SharedState>,
    Path((mmu_gid, hsa_gid)): Path<(String, String)>,
) -> Result<Html<String>, ApiError> {
    state
        .templates
        .render("combined_box_standalone.html", context! { mmu_gid, hsa_gid })
}

/// GET /tabular/ensemble
pub async fn tabular_ensemble(State(state): State<SharedState>) -> Result<Html<String>, ApiError> {
    state.templates.render("tabular_ensemble.html", context! {})
}
