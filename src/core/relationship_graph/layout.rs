//! Force-Directed Layout
//!
//! Fruchterman-Reingold style placement: every pair of nodes repels with
//! `k² / d`, every edge attracts with `d² / k`, and a cooling factor shrinks
//! the allowed displacement each iteration so the system settles.
//!
//! The simulation is fully deterministic. Initial positions are spaced evenly
//! on a circle by node index and no randomness is used anywhere.
//!
//! Cost is O(n²) per iteration because of the all-pairs repulsion.

use std::collections::HashMap;
use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use super::error::LayoutError;
use super::types::{GraphEdge, GraphNode, Viewport};

/// Distance below which two nodes are treated as coincident.
const MIN_DISTANCE: f64 = 0.01;

// ============================================================================
// Configuration
// ============================================================================

/// Simulation constants.
///
/// # Defaults
///
/// - canvas: 800 x 600
/// - `iterations`: 100
/// - `alpha_decay`: 0.02 (about 13% of the initial strength remains)
/// - `max_displacement`: 10 units per iteration at full alpha
/// - `padding`: 120 units around the final bounding box
///
/// Iteration count and decay are tuned together for convergence quality;
/// change them as a pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Simulation canvas width
    pub width: f64,
    /// Simulation canvas height
    pub height: f64,
    pub iterations: usize,
    pub initial_alpha: f64,
    /// Fraction of alpha lost per iteration
    pub alpha_decay: f64,
    /// Displacement cap per iteration, scaled by the current alpha
    pub max_displacement: f64,
    /// Nodes are kept this far inside the canvas edges during simulation
    pub clip_margin: f64,
    /// Padding added around the node bounding box for the viewport
    pub padding: f64,
    /// Smallest radius of the initial circle
    pub min_initial_radius: f64,
    /// Largest radius of the initial circle
    pub max_initial_radius: f64,
    /// Initial circle radius contributed by each node
    pub radius_per_node: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            iterations: 100,
            initial_alpha: 1.0,
            alpha_decay: 0.02,
            max_displacement: 10.0,
            clip_margin: 50.0,
            padding: 120.0,
            min_initial_radius: 80.0,
            max_initial_radius: 150.0,
            radius_per_node: 15.0,
        }
    }
}

impl LayoutConfig {
    /// Check the constants describe a runnable simulation.
    pub fn validate(&self) -> Result<(), LayoutError> {
        let numbers = [
            ("width", self.width),
            ("height", self.height),
            ("initial_alpha", self.initial_alpha),
            ("alpha_decay", self.alpha_decay),
            ("max_displacement", self.max_displacement),
            ("clip_margin", self.clip_margin),
            ("padding", self.padding),
            ("min_initial_radius", self.min_initial_radius),
            ("max_initial_radius", self.max_initial_radius),
            ("radius_per_node", self.radius_per_node),
        ];
        if let Some(&(field, value)) = numbers.iter().find(|(_, v)| !v.is_finite()) {
            return Err(LayoutError::NonFinite { field, value });
        }

        if self.width <= 0.0 || self.height <= 0.0 {
            return Err(LayoutError::EmptyCanvas {
                width: self.width,
                height: self.height,
            });
        }
        if self.iterations == 0 {
            return Err(LayoutError::NoIterations);
        }
        if !(0.0..1.0).contains(&self.alpha_decay) {
            return Err(LayoutError::DecayOutOfRange(self.alpha_decay));
        }
        if self.clip_margin < 0.0 || self.clip_margin * 2.0 >= self.width.min(self.height) {
            return Err(LayoutError::MarginTooLarge(self.clip_margin));
        }
        if self.min_initial_radius > self.max_initial_radius {
            return Err(LayoutError::RadiusRange);
        }
        if self.padding < 0.0 {
            return Err(LayoutError::NotPositive("padding"));
        }
        if self.max_displacement <= 0.0 {
            return Err(LayoutError::NotPositive("max_displacement"));
        }
        if self.initial_alpha <= 0.0 {
            return Err(LayoutError::NotPositive("initial_alpha"));
        }
        Ok(())
    }

    /// Viewport reported when there is nothing to lay out
    pub fn default_viewport(&self) -> Viewport {
        Viewport::new(0.0, 0.0, self.width, self.height)
    }

    fn center(&self) -> Point {
        Point {
            x: self.width / 2.0,
            y: self.height / 2.0,
        }
    }

    fn initial_radius(&self, node_count: usize) -> f64 {
        (node_count as f64 * self.radius_per_node)
            .max(self.min_initial_radius)
            .min(self.max_initial_radius)
    }
}

// ============================================================================
// Simulation
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Final coordinates, indexed like the input node slice.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub positions: Vec<Point>,
    pub viewport: Viewport,
}

struct Simulation<'a> {
    config: &'a LayoutConfig,
    positions: Vec<Point>,
    /// Optimal spring length
    k: f64,
    alpha: f64,
}

impl<'a> Simulation<'a> {
    fn new(node_count: usize, config: &'a LayoutConfig) -> Self {
        let center = config.center();
        let radius = config.initial_radius(node_count);
        let positions = (0..node_count)
            .map(|i| {
                let angle = 2.0 * PI * i as f64 / node_count as f64;
                Point {
                    x: center.x + radius * angle.cos(),
                    y: center.y + radius * angle.sin(),
                }
            })
            .collect();

        Self {
            config,
            positions,
            k: (config.width * config.height / node_count as f64).sqrt(),
            alpha: config.initial_alpha,
        }
    }

    /// Vector from `b` to `a` and its length.
    ///
    /// Coincident nodes get a fixed direction derived from their indices so
    /// they separate deterministically.
    fn separation(&self, i: usize, j: usize) -> (f64, f64, f64) {
        let (a, b) = (self.positions[i], self.positions[j]);
        let (dx, dy) = (a.x - b.x, a.y - b.y);
        let dist = dx.hypot(dy);
        if dist >= MIN_DISTANCE {
            return (dx, dy, dist);
        }
        let angle = (i * 7 + j * 13) as f64;
        (
            angle.cos() * MIN_DISTANCE,
            angle.sin() * MIN_DISTANCE,
            MIN_DISTANCE,
        )
    }

    fn step(&mut self, springs: &[(usize, usize)]) {
        let n = self.positions.len();
        let k_squared = self.k * self.k;
        let mut displacement = vec![Point::default(); n];

        // Repulsion between every pair
        for i in 0..n {
            for j in (i + 1)..n {
                let (dx, dy, dist) = self.separation(i, j);
                let force = k_squared / dist;
                let (fx, fy) = (dx / dist * force, dy / dist * force);
                displacement[i].x += fx;
                displacement[i].y += fy;
                displacement[j].x -= fx;
                displacement[j].y -= fy;
            }
        }

        // Attraction along edges
        for &(a, b) in springs {
            let (dx, dy, dist) = self.separation(a, b);
            let force = dist * dist / self.k;
            let (fx, fy) = (dx / dist * force, dy / dist * force);
            displacement[a].x -= fx;
            displacement[a].y -= fy;
            displacement[b].x += fx;
            displacement[b].y += fy;
        }

        let max_step = self.alpha * self.config.max_displacement;
        let margin = self.config.clip_margin;
        let (lo_x, hi_x) = clip_range(margin, self.config.width);
        let (lo_y, hi_y) = clip_range(margin, self.config.height);

        for (position, d) in self.positions.iter_mut().zip(&displacement) {
            let length = d.x.hypot(d.y);
            if length > 0.0 {
                let step = length.min(max_step);
                position.x += d.x / length * step;
                position.y += d.y / length * step;
            }
            position.x = position.x.clamp(lo_x, hi_x);
            position.y = position.y.clamp(lo_y, hi_y);
        }

        self.alpha *= 1.0 - self.config.alpha_decay;
    }

    /// Translate every node so the centroid sits at the canvas center.
    fn recenter(&mut self) {
        let n = self.positions.len() as f64;
        let (sum_x, sum_y) = self
            .positions
            .iter()
            .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
        let center = self.config.center();
        let (shift_x, shift_y) = (center.x - sum_x / n, center.y - sum_y / n);
        for p in &mut self.positions {
            p.x += shift_x;
            p.y += shift_y;
        }
    }
}

fn clip_range(margin: f64, size: f64) -> (f64, f64) {
    let lo = margin.min(size / 2.0);
    (lo, (size - margin).max(lo))
}

// ============================================================================
// Entry Point
// ============================================================================

/// Lay out `nodes`, attracting along `edges`.
///
/// Edges whose endpoints are not in `nodes` are ignored. Zero nodes yield an
/// empty layout and the default viewport.
pub fn compute_layout(nodes: &[GraphNode], edges: &[GraphEdge], config: &LayoutConfig) -> Layout {
    if nodes.is_empty() {
        return Layout {
            positions: vec![],
            viewport: config.default_viewport(),
        };
    }

    let index: HashMap<&str, usize> = nodes
        .iter()
        .enumerate()
        .map(|(i, node)| (node.id.as_str(), i))
        .collect();
    let springs: Vec<(usize, usize)> = edges
        .iter()
        .filter_map(|edge| Some((*index.get(edge.from.as_str())?, *index.get(edge.to.as_str())?)))
        .filter(|(a, b)| a != b)
        .collect();

    let mut simulation = Simulation::new(nodes.len(), config);
    for _ in 0..config.iterations {
        simulation.step(&springs);
    }
    simulation.recenter();

    let viewport = Viewport::enclosing(
        simulation.positions.iter().map(|p| (p.x, p.y)),
        config.padding,
    )
    .unwrap_or_else(|| config.default_viewport());

    log::debug!(
        "Laid out {} nodes / {} springs in {} iterations (viewport {})",
        nodes.len(),
        springs.len(),
        config.iterations,
        viewport
    );

    Layout {
        positions: simulation.positions,
        viewport,
    }
}
