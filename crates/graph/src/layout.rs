//! Graph layout
//!
//! Places every node inside a fixed logical canvas. Small graphs go on a
//! circle around the canvas centre; larger graphs go on a grid whose cell
//! centres are jittered so neighbouring labels do not line up exactly.
//!
//! Placement depends only on node order and the random source, never on
//! edges or connectivity. The random source is passed in by the caller.

use crate::types::CitationGraph;
use citenet_common::LayoutConfig;
use rand::Rng;
use std::f64::consts::PI;
use tracing::debug;

/// Placement rule chosen for a graph size
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LayoutStrategy {
    /// Evenly spaced on a circle around the canvas centre
    Circular { radius: f64 },

    /// Row-major grid with jittered cell centres
    Grid {
        cols: usize,
        rows: usize,
        cell_width: f64,
        cell_height: f64,
    },
}

impl LayoutStrategy {
    /// Pick the strategy for `n` nodes
    pub fn select(n: usize, config: &LayoutConfig) -> Self {
        if n <= config.circular_threshold {
            let radius = (config.width / 2.0 - config.margin)
                .min(config.height / 2.0 - config.margin)
                .min(config.max_radius)
                .max(0.0);
            return LayoutStrategy::Circular { radius };
        }

        let cols = (n as f64).sqrt().ceil() as usize;
        let rows = n.div_ceil(cols);
        LayoutStrategy::Grid {
            cols,
            rows,
            cell_width: (config.width - config.margin) / cols as f64,
            cell_height: (config.height - config.margin) / rows as f64,
        }
    }
}

/// Assigns coordinates to nodes
#[derive(Debug, Clone)]
pub struct LayoutEngine {
    config: LayoutConfig,
}

impl LayoutEngine {
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    /// Canvas centre
    pub fn center(&self) -> (f64, f64) {
        (self.config.width / 2.0, self.config.height / 2.0)
    }

    pub fn strategy(&self, n: usize) -> LayoutStrategy {
        LayoutStrategy::select(n, &self.config)
    }

    /// Return a copy of `graph` with every node placed; edges are untouched
    pub fn layout<R: Rng>(&self, graph: &CitationGraph, rng: &mut R) -> CitationGraph {
        let mut placed = graph.clone();
        let n = placed.nodes.len();
        let strategy = self.strategy(n);
        debug!(nodes = n, strategy = ?strategy, "Laying out graph");

        match strategy {
            LayoutStrategy::Circular { radius } => {
                let (cx, cy) = self.center();
                for (i, node) in placed.nodes.iter_mut().enumerate() {
                    let angle = 2.0 * PI * i as f64 / n as f64;
                    node.x = Some(cx + radius * angle.cos());
                    node.y = Some(cy + radius * angle.sin());
                }
            }
            LayoutStrategy::Grid {
                cols,
                cell_width,
                cell_height,
                ..
            } => {
                let origin = self.config.margin / 2.0;
                let fraction = self.config.jitter_fraction;
                for (i, node) in placed.nodes.iter_mut().enumerate() {
                    let (col, row) = grid_cell(i, cols);
                    let x = origin + (col as f64 + 0.5) * cell_width;
                    let y = origin + (row as f64 + 0.5) * cell_height;
                    node.x = Some(x + jitter(rng, cell_width * fraction));
                    node.y = Some(y + jitter(rng, cell_height * fraction));
                }
            }
        }

        placed
    }
}

/// `(column, row)` of the i-th node in a row-major grid
pub fn grid_cell(i: usize, cols: usize) -> (usize, usize) {
    (i % cols, i / cols)
}

/// Uniform offset in `[-bound, bound]`
fn jitter<R: Rng>(rng: &mut R, bound: f64) -> f64 {
    let bound = bound.abs();
    if bound > 0.0 {
        rng.gen_range(-bound..=bound)
    } else {
        0.0
    }
}
