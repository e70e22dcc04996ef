//! Unified snap coordinator.
//!
//! The single entry point the editor shell calls on every pointer move. The
//! engine holds the candidate sets assembled for the current query cycle and
//! combines the feature resolver with the guide resolver under one precedence
//! policy: a qualifying guide intersection wins outright, otherwise the
//! closest of the feature match and the guide-line match wins, otherwise the
//! query passes through unchanged.

use kurbo::Point;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::geometry::{close_ring, edges, vertices, Edge, Geometry};
use crate::guide::SnapGuide;
use crate::guide_snap::{find_guide_snap, GuideSnapKind, GuideSnapResult};
use crate::snap::{find_nearest_snap, SnapMode, SnapResult};

/// Identifier of a feature in the caller's collection.
pub type FeatureId = Uuid;

/// A candidate feature: a geometry with an identity, so selections and
/// pinned references can be told apart when assembling candidate sets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    pub id: FeatureId,
    pub geometry: Geometry,
}

impl Feature {
    pub fn new(geometry: Geometry) -> Self {
        Self {
            id: Uuid::new_v4(),
            geometry,
        }
    }
}

/// Errors surfaced to callers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SnapError {
    /// The index path does not address a vertex of the given geometry.
    #[error("vertex path {0:?} does not address a vertex of this geometry")]
    InvalidVertexPath(Vec<usize>),
}

/// The winning candidate of one snap resolution, for callers that render
/// snap markers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SnapDecision {
    /// A real feature vertex or edge won.
    Feature(SnapResult),
    /// A guide line or guide intersection won.
    Guide(GuideSnapResult),
}

impl SnapDecision {
    /// The resolved point.
    pub fn point(&self) -> Point {
        match self {
            SnapDecision::Feature(r) => r.point,
            SnapDecision::Guide(r) => r.point,
        }
    }

    /// Distance from the query to the resolved point.
    pub fn distance(&self) -> f64 {
        match self {
            SnapDecision::Feature(r) => r.distance,
            SnapDecision::Guide(r) => r.distance,
        }
    }
}

/// Snap coordinator for one query cycle.
///
/// Candidate sets are assembled from the caller's current feature collection
/// on every cycle and the engine keeps no other state, so repeated calls with
/// the same inputs return the same result.
#[derive(Debug, Clone)]
pub struct SnapEngine {
    /// Candidate vertices from real features.
    pub vertices: Vec<Point>,
    /// Candidate edges from real features.
    pub edges: Vec<Edge>,
    /// Active alignment guides, empty when not drawing.
    pub guides: Vec<SnapGuide>,
    /// Snap threshold in geometry units (degrees).
    pub threshold: f64,
    /// Which feature candidates to consider.
    pub mode: SnapMode,
}

impl SnapEngine {
    /// Create an engine with no candidates.
    pub fn new(threshold: f64, mode: SnapMode) -> Self {
        Self {
            vertices: Vec::new(),
            edges: Vec::new(),
            guides: Vec::new(),
            threshold,
            mode,
        }
    }

    /// Assemble candidates for drawing a new feature: every existing feature
    /// plus any pinned reference features is a snap target.
    pub fn for_drawing(
        features: &[Feature],
        references: &[Feature],
        threshold: f64,
        mode: SnapMode,
    ) -> Self {
        let mut engine = Self::new(threshold, mode);
        for feature in features.iter().chain(references) {
            engine.add_candidate(&feature.geometry);
        }
        engine
    }

    /// Assemble candidates for editing an existing selection: every feature
    /// except the selected ones, so a feature cannot snap to itself.
    pub fn for_editing(
        features: &[Feature],
        selected: &[FeatureId],
        references: &[Feature],
        threshold: f64,
        mode: SnapMode,
    ) -> Self {
        let mut engine = Self::new(threshold, mode);
        for feature in features.iter().chain(references) {
            if selected.contains(&feature.id) {
                continue;
            }
            engine.add_candidate(&feature.geometry);
        }
        engine
    }

    /// Add one geometry's vertices and edges to the candidate sets.
    pub fn add_candidate(&mut self, geometry: &Geometry) {
        self.vertices.extend(vertices(geometry));
        self.edges.extend(edges(geometry));
    }

    /// Replace the active guide set.
    pub fn set_guides(&mut self, guides: Vec<SnapGuide>) {
        self.guides = guides;
    }

    /// Resolve one query point, reporting which candidate won.
    ///
    /// Returns `None` when nothing is within threshold.
    pub fn resolve_snap_detailed(&self, query: Point) -> Option<SnapDecision> {
        let feature = find_nearest_snap(query, &self.vertices, &self.edges, self.threshold, self.mode);
        let guide = find_guide_snap(query, &self.guides, self.threshold);

        // A qualifying guide intersection beats everything, including a
        // closer feature vertex or edge.
        if let Some(g) = guide {
            if g.kind == GuideSnapKind::Intersection {
                log::trace!("snap: guide intersection at {:?}", g.point);
                return Some(SnapDecision::Guide(g));
            }
        }

        let decision = match (feature, guide) {
            (Some(f), Some(g)) => {
                if f.distance <= g.distance {
                    Some(SnapDecision::Feature(f))
                } else {
                    Some(SnapDecision::Guide(g))
                }
            }
            (Some(f), None) => Some(SnapDecision::Feature(f)),
            (None, Some(g)) => Some(SnapDecision::Guide(g)),
            (None, None) => None,
        };
        if let Some(d) = &decision {
            log::trace!("snap: {:?} at {:?}", d, d.point());
        }
        decision
    }

    /// Resolve one query point. Total: returns the query unchanged when
    /// nothing qualifies.
    pub fn resolve_snap(&self, query: Point) -> Point {
        if self.vertices.is_empty() && self.edges.is_empty() && self.guides.is_empty() {
            return query;
        }
        self.resolve_snap_detailed(query)
            .map_or(query, |decision| decision.point())
    }

    /// Apply [`Self::resolve_snap`] to every vertex of a geometry,
    /// preserving structure.
    pub fn resolve_snap_for_geometry(&self, geometry: &Geometry) -> Geometry {
        match geometry {
            Geometry::Point(p) => Geometry::Point(self.resolve_snap(*p)),
            Geometry::MultiPoint(points) => Geometry::MultiPoint(self.snap_line(points)),
            Geometry::LineString(points) => Geometry::LineString(self.snap_line(points)),
            Geometry::MultiLineString(lines) => {
                Geometry::MultiLineString(lines.iter().map(|l| self.snap_line(l)).collect())
            }
            Geometry::Polygon(rings) => {
                Geometry::Polygon(rings.iter().map(|r| self.snap_line(r)).collect())
            }
            Geometry::MultiPolygon(polygons) => Geometry::MultiPolygon(
                polygons
                    .iter()
                    .map(|rings| rings.iter().map(|r| self.snap_line(r)).collect())
                    .collect(),
            ),
            Geometry::GeometryCollection(members) => Geometry::GeometryCollection(
                members
                    .iter()
                    .map(|m| self.resolve_snap_for_geometry(m))
                    .collect(),
            ),
        }
    }

    fn snap_line(&self, points: &[Point]) -> Vec<Point> {
        points.iter().map(|&p| self.resolve_snap(p)).collect()
    }

    /// Apply [`Self::resolve_snap`] to exactly one addressed vertex.
    ///
    /// The path addresses a vertex by nesting level: `[]` for Point,
    /// `[vertex]` for MultiPoint/LineString, `[line, vertex]` for
    /// MultiLineString, `[ring, vertex]` for Polygon,
    /// `[polygon, ring, vertex]` for MultiPolygon, and `[member, ..rest]`
    /// for GeometryCollection. For polygon rings, editing the first or last
    /// vertex re-synchronizes the duplicated closing coordinate so the ring
    /// stays closed.
    pub fn resolve_snap_for_vertex(
        &self,
        geometry: &Geometry,
        path: &[usize],
    ) -> Result<Geometry, SnapError> {
        let bad_path = || SnapError::InvalidVertexPath(path.to_vec());
        match geometry {
            Geometry::Point(p) => {
                if !path.is_empty() {
                    return Err(bad_path());
                }
                Ok(Geometry::Point(self.resolve_snap(*p)))
            }
            Geometry::MultiPoint(points) => {
                let mut points = points.clone();
                let &[i] = path else { return Err(bad_path()) };
                let p = points.get_mut(i).ok_or_else(bad_path)?;
                *p = self.resolve_snap(*p);
                Ok(Geometry::MultiPoint(points))
            }
            Geometry::LineString(points) => {
                let mut points = points.clone();
                let &[i] = path else { return Err(bad_path()) };
                let p = points.get_mut(i).ok_or_else(bad_path)?;
                *p = self.resolve_snap(*p);
                Ok(Geometry::LineString(points))
            }
            Geometry::MultiLineString(lines) => {
                let mut lines = lines.clone();
                let &[line, i] = path else { return Err(bad_path()) };
                let line = lines.get_mut(line).ok_or_else(bad_path)?;
                let p = line.get_mut(i).ok_or_else(bad_path)?;
                *p = self.resolve_snap(*p);
                Ok(Geometry::MultiLineString(lines))
            }
            Geometry::Polygon(rings) => {
                let mut rings = rings.clone();
                let &[ring, i] = path else { return Err(bad_path()) };
                let ring = rings.get_mut(ring).ok_or_else(bad_path)?;
                self.snap_ring_vertex(ring, i).ok_or_else(bad_path)?;
                Ok(Geometry::Polygon(rings))
            }
            Geometry::MultiPolygon(polygons) => {
                let mut polygons = polygons.clone();
                let &[polygon, ring, i] = path else { return Err(bad_path()) };
                let rings = polygons.get_mut(polygon).ok_or_else(bad_path)?;
                let ring = rings.get_mut(ring).ok_or_else(bad_path)?;
                self.snap_ring_vertex(ring, i).ok_or_else(bad_path)?;
                Ok(Geometry::MultiPolygon(polygons))
            }
            Geometry::GeometryCollection(members) => {
                let mut members = members.clone();
                let (&member, rest) = path.split_first().ok_or_else(bad_path)?;
                let target = members.get_mut(member).ok_or_else(bad_path)?;
                *target = self.resolve_snap_for_vertex(target, rest)?;
                Ok(Geometry::GeometryCollection(members))
            }
        }
    }

    fn snap_ring_vertex(&self, ring: &mut [Point], index: usize) -> Option<()> {
        let p = ring.get_mut(index)?;
        *p = self.resolve_snap(*p);
        close_ring(ring, index);
        Some(())
    }
}
