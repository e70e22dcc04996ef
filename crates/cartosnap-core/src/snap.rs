//! Nearest-snap resolver against real feature vertices and edges.

use kurbo::Point;
use serde::{Deserialize, Serialize};

use crate::geometry::Edge;

/// In `Both` mode, an edge candidate whose projection lands within this
/// fraction of the threshold from either endpoint defers to the vertex
/// candidate instead. Tuned empirically; changing it changes the feel of
/// corner snapping.
pub const VERTEX_DEFERENCE_FACTOR: f64 = 0.3;

/// In `Both` mode, an edge candidate must be closer than `best * 0.9` to
/// replace the current best. Tuned together with [`VERTEX_DEFERENCE_FACTOR`].
pub const EDGE_WIN_FACTOR: f64 = 0.9;

/// Which candidate kinds the resolver considers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SnapMode {
    /// Snap to vertices only.
    Vertex,
    /// Snap to points on edges only.
    Edge,
    /// Snap to both, with vertices given priority near corners.
    #[default]
    Both,
}

impl SnapMode {
    /// Check if vertex candidates are considered.
    pub fn snaps_to_vertices(self) -> bool {
        matches!(self, SnapMode::Vertex | SnapMode::Both)
    }

    /// Check if edge candidates are considered.
    pub fn snaps_to_edges(self) -> bool {
        matches!(self, SnapMode::Edge | SnapMode::Both)
    }
}

/// What kind of candidate a snap resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SnapKind {
    Vertex,
    Edge,
}

/// Result of matching a query point against real feature geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SnapResult {
    /// The snapped point.
    pub point: Point,
    /// Distance from the query to the snapped point.
    pub distance: f64,
    /// Candidate kind that won.
    pub kind: SnapKind,
    /// The owning edge, when `kind` is [`SnapKind::Edge`].
    pub edge: Option<Edge>,
}

/// Project a point onto a segment, clamped to the segment's extent.
///
/// A zero-length segment projects to its single endpoint.
pub fn project_on_segment(query: Point, edge: &Edge) -> Point {
    let dir = edge.end - edge.start;
    let len_sq = dir.hypot2();
    if len_sq <= f64::EPSILON {
        return edge.start;
    }
    let t = ((query - edge.start).dot(dir) / len_sq).clamp(0.0, 1.0);
    edge.start + dir * t
}

/// Find the single best snap candidate within `threshold` of `query`.
///
/// Vertices and edges compete for the same best slot. The threshold is
/// strict: a candidate at exactly `threshold` does not qualify. In `Both`
/// mode two rules keep corner snapping stable:
///
/// - an edge projection within `0.3 * threshold` of either of its own
///   endpoints is discarded, deferring to the vertex candidate there;
/// - an edge candidate only replaces the current best if it is closer than
///   `best * 0.9`, so edges must be meaningfully closer than a vertex to win.
///
/// Returns `None` when nothing qualifies.
pub fn find_nearest_snap(
    query: Point,
    vertices: &[Point],
    edges: &[Edge],
    threshold: f64,
    mode: SnapMode,
) -> Option<SnapResult> {
    let mut best: Option<SnapResult> = None;

    if mode.snaps_to_vertices() {
        for &vertex in vertices {
            let distance = query.distance(vertex);
            if distance >= threshold {
                continue;
            }
            if best.is_none_or(|b| distance < b.distance) {
                best = Some(SnapResult {
                    point: vertex,
                    distance,
                    kind: SnapKind::Vertex,
                    edge: None,
                });
            }
        }
    }

    if mode.snaps_to_edges() {
        let edge_win_factor = if mode == SnapMode::Both {
            EDGE_WIN_FACTOR
        } else {
            1.0
        };
        for edge in edges {
            let projected = project_on_segment(query, edge);
            if mode == SnapMode::Both {
                let deference = VERTEX_DEFERENCE_FACTOR * threshold;
                if projected.distance(edge.start) < deference
                    || projected.distance(edge.end) < deference
                {
                    continue;
                }
            }
            let distance = query.distance(projected);
            if distance >= threshold {
                continue;
            }
            if best.is_none_or(|b| distance < b.distance * edge_win_factor) {
                best = Some(SnapResult {
                    point: projected,
                    distance,
                    kind: SnapKind::Edge,
                    edge: Some(*edge),
                });
            }
        }
    }

    best
}
