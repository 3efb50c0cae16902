//! Page handlers
//!
//! The search handler runs the full pipeline for one request: scholar query,
//! citation extraction, complete-graph construction, windowed rendering.
//! Everything is request-local; no state is shared across requests.

use axum::{extract::State, response::Html, Form};
use minijinja::context;
use serde::Deserialize;
use std::time::Instant;
use validator::Validate;

use crate::templates;
use crate::AppState;
use scholargraph_citations::{
    extract_citations, render_graph_batch, CitationGraph, GraphImage, RenderOptions,
};
use scholargraph_common::{
    errors::{AppError, Result},
    metrics,
    scholar::ScholarSearch,
};

/// Search form submission
#[derive(Debug, Deserialize, Validate)]
pub struct SearchForm {
    #[validate(length(min = 1, max = 300))]
    pub paper_title: String,
}

/// `GET /` - the search form page
pub async fn index(State(state): State<AppState>) -> Result<Html<String>> {
    let html = templates::render(&state.templates, "index.html", context! {})?;
    Ok(Html(html))
}

/// `POST /search` - run the citation pipeline and render the results page
pub async fn search(
    State(state): State<AppState>,
    Form(form): Form<SearchForm>,
) -> Result<Html<String>> {
    let start = Instant::now();

    form.validate().map_err(|e| AppError::Validation {
        message: e.to_string(),
        field: Some("paper_title".to_string()),
    })?;

    let query = form.paper_title.trim().to_string();
    if query.is_empty() {
        return Err(AppError::MissingField {
            field: "paper_title".to_string(),
        });
    }

    let render_options = RenderOptions::new(
        state.config.render.width,
        state.config.render.height,
        state.config.render.layout_seed,
    );
    let graphs = run_search_pipeline(state.scholar.as_ref(), &query, &render_options).await?;

    let paper_count: usize = graphs.iter().map(|g| g.papers.len()).sum();
    let elapsed = start.elapsed().as_secs_f64();
    metrics::record_search(elapsed, paper_count);

    tracing::info!(
        query = %query,
        papers = paper_count,
        images = graphs.len(),
        latency_ms = (elapsed * 1000.0) as u64,
        "Search completed"
    );

    let html = templates::render(
        &state.templates,
        "results.html",
        context! { query => query, graphs => graphs },
    )?;
    Ok(Html(html))
}

/// The core pipeline: search -> extract -> build -> render.
///
/// Factored out of the handler so it can be exercised with a substitute
/// scholar client.
pub async fn run_search_pipeline(
    scholar: &dyn ScholarSearch,
    query: &str,
    render_options: &RenderOptions,
) -> Result<Vec<GraphImage>> {
    let response = scholar.search(query).await?;
    let records = extract_citations(&response);
    let graph = CitationGraph::from_records(records);

    let render_start = Instant::now();
    let batch = render_graph_batch(&graph, render_options)?;
    metrics::record_render(render_start.elapsed().as_secs_f64(), batch.len());

    Ok(batch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use scholargraph_common::scholar::ScholarResponse;
    use serde_json::json;

    struct StubScholar {
        response: ScholarResponse,
    }

    #[async_trait]
    impl ScholarSearch for StubScholar {
        async fn search(&self, _query: &str) -> Result<ScholarResponse> {
            Ok(self.response.clone())
        }
    }

    struct FailingScholar;

    #[async_trait]
    impl ScholarSearch for FailingScholar {
        async fn search(&self, _query: &str) -> Result<ScholarResponse> {
            Err(AppError::ScholarUpstream {
                message: "upstream returned 502".to_string(),
            })
        }
    }

    fn stub(results: serde_json::Value) -> StubScholar {
        StubScholar {
            response: serde_json::from_value(json!({ "organic_results": results })).unwrap(),
        }
    }

    fn options() -> RenderOptions {
        RenderOptions::new(200, 200, Some(7))
    }

    #[tokio::test]
    async fn test_pipeline_extracts_and_renders() {
        let scholar = stub(json!([
            { "title": "[PDF] Deep Learning Basics", "inline_links": { "cited_by": { "total": 42 } } },
            { "title": "Graph Theory 101" },
            { "snippet": "untitled, skipped" }
        ]));

        let batch = run_search_pipeline(&scholar, "deep learning", &options())
            .await
            .unwrap();

        assert_eq!(batch.len(), 1);
        assert_eq!(batch[0].papers.len(), 2);
        assert_eq!(batch[0].papers[0].title, "Deep Learning Basics");
        assert_eq!(batch[0].papers[0].cited_by, 42);
        assert_eq!(batch[0].papers[1].cited_by, 0);
        assert!(!batch[0].image.is_empty());
    }

    #[tokio::test]
    async fn test_pipeline_windows_large_result_sets() {
        let results: Vec<_> = (0..20)
            .map(|i| json!({ "title": format!("Paper {}", i) }))
            .collect();
        let scholar = stub(json!(results));

        let batch = run_search_pipeline(&scholar, "many", &options()).await.unwrap();
        assert_eq!(batch.len(), 2);
        assert_eq!(batch[0].papers.len(), 10);
        assert_eq!(batch[1].papers.len(), 10);
    }

    #[tokio::test]
    async fn test_pipeline_empty_results_is_not_an_error() {
        let scholar = stub(json!([]));
        let batch = run_search_pipeline(&scholar, "obscure", &options()).await.unwrap();
        assert!(batch.is_empty());
    }

    #[tokio::test]
    async fn test_pipeline_propagates_upstream_failure() {
        let err = run_search_pipeline(&FailingScholar, "anything", &options())
            .await
            .err()
            .unwrap();
        assert!(err.is_retryable());
    }

    #[test]
    fn test_form_validation_bounds() {
        let ok = SearchForm {
            paper_title: "Attention Is All You Need".to_string(),
        };
        assert!(ok.validate().is_ok());

        let empty = SearchForm {
            paper_title: String::new(),
        };
        assert!(empty.validate().is_err());

        let too_long = SearchForm {
            paper_title: "x".repeat(301),
        };
        assert!(too_long.validate().is_err());
    }
}
