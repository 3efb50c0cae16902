//! ScholarGraph citation pipeline
//!
//! Pure transformation from a raw scholar-search response to rendered
//! co-citation graph images:
//! - title normalization and citation extraction
//! - complete-graph construction over the extracted papers
//! - force-directed layout (seedable)
//! - windowed PNG rendering, base64-encoded for HTML embedding
//!
//! No web or network dependency; everything here is testable in isolation.

pub mod extract;
pub mod graph;
pub mod layout;
pub mod render;

pub use extract::{extract_citations, normalize_title, CitationRecord};
pub use graph::CitationGraph;
pub use layout::{LayoutStrategy, SpringLayout};
pub use render::{render_graph_batch, GraphImage, RenderOptions};

/// Maximum number of papers extracted per search
pub const MAX_PAPERS: usize = 20;

/// Number of papers drawn per graph image
pub const WINDOW_SIZE: usize = 10;
