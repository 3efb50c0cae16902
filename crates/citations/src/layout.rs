//! Force-directed graph layout
//!
//! Spring (Fruchterman-Reingold) layout with an injectable seed so renders
//! can be made reproducible. The layout strategy is a trait seam so tests and
//! callers can substitute a deterministic placement.

use rand::{rngs::StdRng, Rng, SeedableRng};

/// Pluggable node placement for rendering
pub trait LayoutStrategy: Send + Sync {
    /// Position `node_count` nodes given `edges` as local index pairs.
    ///
    /// Returned coordinates lie in [-1, 1] x [-1, 1].
    fn layout(&self, node_count: usize, edges: &[(usize, usize)]) -> Vec<(f64, f64)>;
}

/// Fruchterman-Reingold spring layout
#[derive(Debug, Clone)]
pub struct SpringLayout {
    /// Optional RNG seed; `None` gives a fresh layout per call
    pub seed: Option<u64>,

    /// Simulation iterations
    pub iterations: usize,
}

impl Default for SpringLayout {
    fn default() -> Self {
        Self {
            seed: None,
            iterations: 50,
        }
    }
}

impl SpringLayout {
    pub fn new(seed: Option<u64>) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

impl LayoutStrategy for SpringLayout {
    fn layout(&self, node_count: usize, edges: &[(usize, usize)]) -> Vec<(f64, f64)> {
        if node_count == 0 {
            return Vec::new();
        }
        if node_count == 1 {
            return vec![(0.0, 0.0)];
        }

        let mut rng = self.rng();
        let mut positions: Vec<(f64, f64)> = (0..node_count)
            .map(|_| (rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0)))
            .collect();

        // Ideal pairwise distance for a unit-ish area
        let k = (4.0 / node_count as f64).sqrt();
        let mut temperature = 0.5;
        let cooling = temperature / (self.iterations as f64 + 1.0);

        for _ in 0..self.iterations {
            let mut disp = vec![(0.0_f64, 0.0_f64); node_count];

            // Repulsion between every pair
            for i in 0..node_count {
                for j in (i + 1)..node_count {
                    let dx = positions[i].0 - positions[j].0;
                    let dy = positions[i].1 - positions[j].1;
                    let dist = (dx * dx + dy * dy).sqrt().max(1e-6);
                    let force = k * k / dist;
                    let (fx, fy) = (dx / dist * force, dy / dist * force);
                    disp[i].0 += fx;
                    disp[i].1 += fy;
                    disp[j].0 -= fx;
                    disp[j].1 -= fy;
                }
            }

            // Attraction along edges
            for &(i, j) in edges {
                let dx = positions[i].0 - positions[j].0;
                let dy = positions[i].1 - positions[j].1;
                let dist = (dx * dx + dy * dy).sqrt().max(1e-6);
                let force = dist * dist / k;
                let (fx, fy) = (dx / dist * force, dy / dist * force);
                disp[i].0 -= fx;
                disp[i].1 -= fy;
                disp[j].0 += fx;
                disp[j].1 += fy;
            }

            // Apply displacement capped by the current temperature
            for i in 0..node_count {
                let (dx, dy) = disp[i];
                let len = (dx * dx + dy * dy).sqrt().max(1e-6);
                let step = len.min(temperature);
                positions[i].0 = (positions[i].0 + dx / len * step).clamp(-1.0, 1.0);
                positions[i].1 = (positions[i].1 + dy / len * step).clamp(-1.0, 1.0);
            }

            temperature -= cooling;
        }

        positions
    }
}
