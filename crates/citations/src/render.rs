//! Windowed graph rendering
//!
//! Slices the node order into fixed-size windows and draws each window as a
//! standalone PNG: spring layout, node size scaled by citation count, title
//! labels, and a caption with the 1-based paper range. Images are encoded
//! in-memory and base64-encoded for direct embedding in HTML.

use crate::extract::CitationRecord;
use crate::graph::CitationGraph;
use crate::layout::{LayoutStrategy, SpringLayout};
use crate::WINDOW_SIZE;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine;
use image::{codecs::png::PngEncoder, ExtendedColorType, ImageEncoder};
use plotters::coord::Shift;
use plotters::prelude::*;
use scholargraph_common::errors::{AppError, Result};
use serde::Serialize;

/// Node visual size per citation; also the floor for zero-count nodes
const NODE_SIZE_SCALE: f64 = 10.0;

/// Longest label drawn before truncation
const MAX_LABEL_CHARS: usize = 40;

const NODE_FILL: RGBColor = RGBColor(173, 216, 230);
const NODE_OUTLINE: RGBColor = RGBColor(70, 90, 110);
const EDGE_COLOR: RGBColor = RGBColor(190, 190, 190);

/// One rendered window: base64 PNG plus the papers it shows
#[derive(Debug, Clone, Serialize)]
pub struct GraphImage {
    pub image: String,
    pub papers: Vec<CitationRecord>,
}

/// Rendering parameters, fixed per request
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub width: u32,
    pub height: u32,
    pub layout: SpringLayout,
}

impl RenderOptions {
    pub fn new(width: u32, height: u32, layout_seed: Option<u64>) -> Self {
        Self {
            width,
            height,
            layout: SpringLayout::new(layout_seed),
        }
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::new(1000, 1000, None)
    }
}

/// Render every window of the graph, in node order.
///
/// K nodes produce ceil(K / WINDOW_SIZE) images whose paper lists partition
/// the node list. An empty graph yields an empty batch.
pub fn render_graph_batch(graph: &CitationGraph, options: &RenderOptions) -> Result<Vec<GraphImage>> {
    let count = graph.node_count();
    let mut batch = Vec::new();

    let mut start = 0;
    while start < count {
        let stop = (start + WINDOW_SIZE).min(count);
        let (papers, edges) = graph.window(start, stop);
        let image = render_window(&papers, &edges, start, stop, options)?;

        tracing::debug!(start, stop, bytes = image.len(), "Rendered graph window");
        batch.push(GraphImage { image, papers });
        start = stop;
    }

    Ok(batch)
}

/// Draw one window as a PNG and base64-encode it
fn render_window(
    papers: &[CitationRecord],
    edges: &[(usize, usize)],
    start: usize,
    stop: usize,
    options: &RenderOptions,
) -> Result<String> {
    let (width, height) = (options.width, options.height);
    let mut buffer = vec![0u8; (width * height * 3) as usize];

    {
        let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
        root.fill(&WHITE).map_err(render_err)?;

        let caption = format!("Papers {} to {} Citation Network", start + 1, stop);
        draw_text_best_effort(&root, &caption, (width as i32 / 2 - 160, 16), 26);

        let positions = options.layout.layout(papers.len(), edges);

        // Margin keeps the largest node and its label inside the figure
        let margin = 90.0;
        let to_px = |(x, y): (f64, f64)| -> (i32, i32) {
            let px = margin + (x + 1.0) / 2.0 * (width as f64 - 2.0 * margin);
            let py = margin + (y + 1.0) / 2.0 * (height as f64 - 2.0 * margin);
            (px as i32, py as i32)
        };

        for &(i, j) in edges {
            let a = to_px(positions[i]);
            let b = to_px(positions[j]);
            root.draw(&PathElement::new(vec![a, b], &EDGE_COLOR))
                .map_err(render_err)?;
        }

        for (record, &pos) in papers.iter().zip(positions.iter()) {
            let (x, y) = to_px(pos);
            let radius = node_radius(record.cited_by);

            root.draw(&Circle::new((x, y), radius, NODE_FILL.filled()))
                .map_err(render_err)?;
            root.draw(&Circle::new((x, y), radius, &NODE_OUTLINE))
                .map_err(render_err)?;

            let label = truncate_label(&record.title);
            let label_x = x - (label.chars().count() as i32 * 7) / 2;
            draw_text_best_effort(&root, &label, (label_x, y + radius + 6), 14);
        }
    }

    encode_png(&buffer, width, height)
}

/// Node radius in pixels.
///
/// The visual size `max(scale, cited_by * scale)` is an area term, so the
/// drawn radius follows its square root, clamped to keep heavily-cited
/// papers from swallowing the figure.
fn node_radius(cited_by: u64) -> i32 {
    let area = (cited_by as f64 * NODE_SIZE_SCALE).max(NODE_SIZE_SCALE);
    area.sqrt().round().clamp(4.0, 60.0) as i32
}

fn truncate_label(title: &str) -> String {
    if title.chars().count() <= MAX_LABEL_CHARS {
        return title.to_string();
    }
    let mut label: String = title.chars().take(MAX_LABEL_CHARS).collect();
    label.push_str("...");
    label
}

/// Text rendering depends on system fonts; a missing font must not take
/// down image generation, so text failures only log.
fn draw_text_best_effort(
    area: &DrawingArea<BitMapBackend, Shift>,
    text: &str,
    pos: (i32, i32),
    size: i32,
) {
    let style = ("sans-serif", size).into_font().color(&BLACK);
    if let Err(e) = area.draw(&Text::new(text.to_string(), pos, style)) {
        tracing::debug!(error = %e, "Skipping text draw");
    }
}

fn encode_png(rgb: &[u8], width: u32, height: u32) -> Result<String> {
    let mut png = Vec::new();
    PngEncoder::new(&mut png)
        .write_image(rgb, width, height, ExtendedColorType::Rgb8)
        .map_err(|e| AppError::Render {
            message: format!("PNG encoding failed: {}", e),
        })?;
    Ok(BASE64_STANDARD.encode(png))
}

fn render_err<E: std::fmt::Debug>(e: E) -> AppError {
    AppError::Render {
        message: format!("{:?}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records(n: usize) -> Vec<CitationRecord> {
        (0..n)
            .map(|i| CitationRecord {
                title: format!("Paper {}", i),
                cited_by: i as u64 * 7,
            })
            .collect()
    }

    fn small_options(seed: Option<u64>) -> RenderOptions {
        RenderOptions::new(200, 200, seed)
    }

    #[test]
    fn test_batch_windowing() {
        let graph = CitationGraph::from_records(records(23));
        let batch = render_graph_batch(&graph, &small_options(Some(1))).unwrap();

        let sizes: Vec<usize> = batch.iter().map(|g| g.papers.len()).collect();
        assert_eq!(sizes, vec![10, 10, 3]);
        assert_eq!(sizes.iter().sum::<usize>(), 23);
    }

    #[test]
    fn test_batch_count_is_ceil_of_windows() {
        for (k, expected) in [(0, 0), (1, 1), (10, 1), (11, 2), (20, 2)] {
            let graph = CitationGraph::from_records(records(k));
            let batch = render_graph_batch(&graph, &small_options(Some(1))).unwrap();
            assert_eq!(batch.len(), expected, "k = {}", k);
        }
    }

    #[test]
    fn test_images_are_valid_base64_png() {
        let graph = CitationGraph::from_records(records(5));
        let batch = render_graph_batch(&graph, &small_options(Some(9))).unwrap();
        let bytes = BASE64_STANDARD.decode(&batch[0].image).unwrap();
        assert_eq!(&bytes[..4], &[0x89, b'P', b'N', b'G']);
    }

    #[test]
    fn test_seeded_render_is_deterministic() {
        let graph = CitationGraph::from_records(records(6));
        let a = render_graph_batch(&graph, &small_options(Some(11))).unwrap();
        let b = render_graph_batch(&graph, &small_options(Some(11))).unwrap();
        assert_eq!(a[0].image, b[0].image);
    }

    #[test]
    fn test_empty_graph_renders_nothing() {
        let graph = CitationGraph::from_records(Vec::new());
        let batch = render_graph_batch(&graph, &small_options(Some(1))).unwrap();
        assert!(batch.is_empty());
    }

    #[test]
    fn test_node_radius_floor_and_clamp() {
        // Zero-count nodes share the scale-factor floor with count = 1
        assert_eq!(node_radius(0), node_radius(1));
        assert!(node_radius(0) >= 4);
        assert!(node_radius(10_000_000) <= 60);
        assert!(node_radius(100) > node_radius(1));
    }

    #[test]
    fn test_truncate_label() {
        assert_eq!(truncate_label("short"), "short");
        let long = "x".repeat(60);
        let truncated = truncate_label(&long);
        assert!(truncated.ends_with("..."));
        assert_eq!(truncated.chars().count(), MAX_LABEL_CHARS + 3);
    }
}
