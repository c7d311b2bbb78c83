//! Page templates. Sources are compiled into the binary; the navigation bar is
//! injected once as a global so every page renders the same menu.

use axum::response::Html;
use minijinja::{Environment, Value};
use serde::Serialize;

use mchviz_common::ApiError;
use crate::navigation::Navigation;

const TEMPLATES: &[(&str, &str)] = &[
    ("base.html", include_str!("../templates/base.html")),
    ("speciesview.html", include_str!("../templates/speciesview.html")),
    ("mch_standalone.html", include_str!("../templates/mch_standalone.html")),
    ("compareview.html", include_str!("../templates/compareview.html")),
    ("combined_box_standalone.html", include_str!("../templates/combined_box_standalone.html")),
    ("tabular_ensemble.html", include_str!("../templates/tabular_ensemble.html")),
    ("account/login.html", include_str!("../templates/account/login.html")),
];

pub struct Templates {
    env: Environment<'static>,
}

impl Templates {
    pub fn new(navigation: &Navigation) -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        for &(name, source) in TEMPLATES {
            env.add_template(name, source)?;
        }
        env.add_global("nav", Value::from_serialize(navigation));
        Ok(Self { env })
    }

    pub fn render<S: Serialize>(&self, name: &str, ctx: S) -> Result<Html<String>, ApiError> {
        self.env
            .get_template(name)
            .and_then(|tmpl| tmpl.render(ctx))
            .map(Html)
            .map_err(|e| ApiError::Template(format!("{name}: {e}")))
    }
}
