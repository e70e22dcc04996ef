//! Vector geometry model and vertex/edge extraction.
//!
//! Geometries follow the seven GeoJSON kinds as an exhaustive enum, so a new
//! kind is a compile error until every `match` in the crate handles it.
//! Coordinates are planar `(x, y)` pairs in the geometry's native units
//! (longitude/latitude treated as Euclidean).

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// A vector geometry.
///
/// Polygon rings are closed: the first and last coordinate of each ring are
/// equal, and ring index 0 is the exterior boundary. Editing a ring's first
/// or last vertex must update both copies to keep the ring closed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Geometry {
    Point(Point),
    MultiPoint(Vec<Point>),
    LineString(Vec<Point>),
    MultiLineString(Vec<Vec<Point>>),
    Polygon(Vec<Vec<Point>>),
    MultiPolygon(Vec<Vec<Vec<Point>>>),
    GeometryCollection(Vec<Geometry>),
}

/// One segment of a polyline or polygon ring.
///
/// Edges are derived from their owning geometry on every query and carry no
/// identity beyond their two endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub start: Point,
    pub end: Point,
}

impl Edge {
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }
}

/// Collect every vertex of a geometry, in ring order then vertex order.
///
/// Empty coordinate lists yield an empty result; no geometry kind errors.
pub fn vertices(geometry: &Geometry) -> Vec<Point> {
    let mut out = Vec::new();
    collect_vertices(geometry, &mut out);
    out
}

fn collect_vertices(geometry: &Geometry, out: &mut Vec<Point>) {
    match geometry {
        Geometry::Point(p) => out.push(*p),
        Geometry::MultiPoint(points) | Geometry::LineString(points) => {
            out.extend_from_slice(points);
        }
        Geometry::MultiLineString(lines) | Geometry::Polygon(lines) => {
            for line in lines {
                out.extend_from_slice(line);
            }
        }
        Geometry::MultiPolygon(polygons) => {
            for rings in polygons {
                for ring in rings {
                    out.extend_from_slice(ring);
                }
            }
        }
        Geometry::GeometryCollection(members) => {
            for member in members {
                collect_vertices(member, out);
            }
        }
    }
}

/// Collect every edge of a geometry.
///
/// Each line or ring with `n` coordinates contributes `n - 1` edges, one per
/// consecutive pair. For a closed ring this includes the closing edge, since
/// the closing coordinate is duplicated in the ring itself. Point and
/// MultiPoint contribute no edges.
pub fn edges(geometry: &Geometry) -> Vec<Edge> {
    let mut out = Vec::new();
    collect_edges(geometry, &mut out);
    out
}

fn collect_edges(geometry: &Geometry, out: &mut Vec<Edge>) {
    match geometry {
        Geometry::Point(_) | Geometry::MultiPoint(_) => {}
        Geometry::LineString(points) => {
            line_edges(points, out);
        }
        Geometry::MultiLineString(lines) | Geometry::Polygon(lines) => {
            for line in lines {
                line_edges(line, out);
            }
        }
        Geometry::MultiPolygon(polygons) => {
            for rings in polygons {
                for ring in rings {
                    line_edges(ring, out);
                }
            }
        }
        Geometry::GeometryCollection(members) => {
            for member in members {
                collect_edges(member, out);
            }
        }
    }
}

fn line_edges(points: &[Point], out: &mut Vec<Edge>) {
    for pair in points.windows(2) {
        out.push(Edge::new(pair[0], pair[1]));
    }
}

/// Re-synchronize a closed ring after one of its vertices moved.
///
/// If `index` addresses the ring's first or last position, the coordinate at
/// the other end is overwritten with the same value so the ring stays closed.
pub fn close_ring(ring: &mut [Point], index: usize) {
    let len = ring.len();
    if len < 2 {
        return;
    }
    if index == 0 {
        ring[len - 1] = ring[0];
    } else if index == len - 1 {
        ring[0] = ring[len - 1];
    }
}
