//! Co-citation graph representation
//!
//! Undirected complete graph over the extracted papers. Nodes are indexed in
//! extraction order and carry their citation count; edges are every unordered
//! pair of distinct nodes. The construction is an explicit nested iteration
//! so the no-self-loop / no-duplicate-edge invariant stays visible.

use crate::extract::CitationRecord;

/// In-memory co-citation graph, immutable after construction
#[derive(Debug, Clone)]
pub struct CitationGraph {
    nodes: Vec<CitationRecord>,
    edges: Vec<(usize, usize)>,
}

impl CitationGraph {
    /// Build the complete graph over the given records.
    ///
    /// Records arrive deduplicated from the extractor, so node index and
    /// title identify the same paper.
    pub fn from_records(records: Vec<CitationRecord>) -> Self {
        let mut edges = Vec::with_capacity(records.len().saturating_sub(1) * records.len() / 2);
        for i in 0..records.len() {
            for j in (i + 1)..records.len() {
                edges.push((i, j));
            }
        }

        Self {
            nodes: records,
            edges,
        }
    }

    /// All nodes in extraction order
    pub fn nodes(&self) -> &[CitationRecord] {
        &self.nodes
    }

    /// All edges as (i, j) index pairs with i < j
    pub fn edges(&self) -> &[(usize, usize)] {
        &self.edges
    }

    /// Get node count
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Get edge count
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Induced subgraph over the node-index window [start, stop).
    ///
    /// Edge indices in the result are local to the window. `stop` is clamped
    /// to the node count.
    pub fn window(&self, start: usize, stop: usize) -> (Vec<CitationRecord>, Vec<(usize, usize)>) {
        let stop = stop.min(self.nodes.len());
        if start >= stop {
            return (Vec::new(), Vec::new());
        }

        let nodes = self.nodes[start..stop].to_vec();
        let edges = self
            .edges
            .iter()
            .filter(|(i, j)| *i >= start && *j < stop)
            .map(|(i, j)| (i - start, j - start))
            .collect();

        (nodes, edges)
    }
}
