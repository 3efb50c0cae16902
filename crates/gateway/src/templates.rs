//! Template environment
//!
//! Templates are compiled into the binary so the gateway has no runtime
//! filesystem dependency.

use minijinja::Environment;
use scholargraph_common::errors::{AppError, Result};

/// Build the minijinja environment with all embedded templates
pub fn build_template_env() -> Environment<'static> {
    let mut env = Environment::new();
    env.add_template("index.html", include_str!("../templates/index.html"))
        .expect("index template must parse");
    env.add_template("results.html", include_str!("../templates/results.html"))
        .expect("results template must parse");
    env
}

/// Render a named template, mapping template failures to internal errors
pub fn render(
    env: &Environment<'static>,
    name: &str,
    ctx: minijinja::value::Value,
) -> Result<String> {
    let template = env.get_template(name).map_err(|e| AppError::Internal {
        message: format!("template {} not found: {}", name, e),
    })?;
    template.render(ctx).map_err(|e| AppError::Internal {
        message: format!("template {} render failed: {}", name, e),
    })
}
