//! Infinite-line geometry for alignment guides.

use kurbo::{Point, Rect, Vec2};

use crate::guide::SnapGuide;

/// Determinant magnitude below which two lines are treated as parallel.
///
/// Coincident lines also fall under this and yield no intersection; they are
/// not detected separately.
pub const PARALLEL_EPSILON: f64 = 1e-10;

/// Intersect two infinite lines given as origin plus direction.
///
/// Returns `None` for parallel (or coincident) lines.
pub fn line_intersection(
    origin1: Point,
    dir1: Vec2,
    origin2: Point,
    dir2: Vec2,
) -> Option<Point> {
    let det = dir1.cross(dir2);
    if det.abs() < PARALLEL_EPSILON {
        return None;
    }
    let t = (origin2 - origin1).cross(dir2) / det;
    Some(origin1 + dir1 * t)
}

/// Perpendicular projection of a point onto a guide's infinite line.
///
/// Unlike segment snapping there is no clamping; guides extend forever.
pub fn nearest_point_on_line(query: Point, guide: &SnapGuide) -> Point {
    let t = (query - guide.origin).dot(guide.direction);
    guide.origin + guide.direction * t
}

/// Clip an infinite guide to a finite renderable segment.
///
/// Walks twice the viewport diagonal in both directions from the guide's
/// origin, which is long enough to span the visible map at any pan position.
pub fn extend_to_viewport(guide: &SnapGuide, viewport: Rect) -> (Point, Point) {
    let diagonal = viewport.size().to_vec2().hypot();
    let reach = guide.direction * (2.0 * diagonal);
    (guide.origin - reach, guide.origin + reach)
}

/// All pairwise intersections among the current guide set.
///
/// The guide set is tiny (typically five or fewer), so the quadratic scan is
/// fine.
pub fn find_all_intersections(guides: &[SnapGuide]) -> Vec<Point> {
    let mut intersections = Vec::new();
    for (i, a) in guides.iter().enumerate() {
        for b in &guides[i + 1..] {
            if let Some(point) = line_intersection(a.origin, a.direction, b.origin, b.direction) {
                intersections.push(point);
            }
        }
    }
    intersections
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::guide::GuideKind;

    fn guide(origin: Point, direction: Vec2) -> SnapGuide {
        SnapGuide::new(origin, direction, GuideKind::Horizontal)
    }

    #[test]
    fn test_axis_aligned_intersection() {
        let point = line_intersection(
            Point::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Point::new(10.0, 10.0),
            Vec2::new(0.0, 1.0),
        )
        .unwrap();
        assert_eq!(point, Point::new(10.0, 0.0));
    }

    #[test]
    fn test_diagonal_intersection() {
        let point = line_intersection(
            Point::new(0.0, 0.0),
            Vec2::new(1.0, 1.0),
            Point::new(4.0, 0.0),
            Vec2::new(-1.0, 1.0),
        )
        .unwrap();
        assert!((point.x - 2.0).abs() < 1e-12);
        assert!((point.y - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_parallel_lines_do_not_intersect() {
        assert!(line_intersection(
            Point::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Point::new(0.0, 5.0),
            Vec2::new(1.0, 0.0),
        )
        .is_none());
    }

    #[test]
    fn test_coincident_lines_do_not_intersect() {
        assert!(line_intersection(
            Point::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Point::new(3.0, 0.0),
            Vec2::new(1.0, 0.0),
        )
        .is_none());
    }

    #[test]
    fn test_nearest_point_on_line_is_unclamped() {
        let g = guide(Point::new(0.0, 0.0), Vec2::new(1.0, 0.0));
        // Far beyond the origin in the negative direction still projects.
        assert_eq!(nearest_point_on_line(Point::new(-100.0, 3.0), &g), Point::new(-100.0, 0.0));
    }

    #[test]
    fn test_nearest_point_on_diagonal_line() {
        let g = guide(Point::new(0.0, 0.0), Vec2::new(1.0, 1.0) / 2f64.sqrt());
        let p = nearest_point_on_line(Point::new(2.0, 0.0), &g);
        assert!((p.x - 1.0).abs() < 1e-12);
        assert!((p.y - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_extend_to_viewport_spans_diagonal() {
        let g = guide(Point::new(5.0, 5.0), Vec2::new(1.0, 0.0));
        let viewport = Rect::new(0.0, 0.0, 30.0, 40.0);
        let (a, b) = extend_to_viewport(&g, viewport);
        // Diagonal is 50, so endpoints sit 100 away on each side.
        assert_eq!(a, Point::new(-95.0, 5.0));
        assert_eq!(b, Point::new(105.0, 5.0));
    }

    #[test]
    fn test_find_all_intersections_pairwise() {
        let guides = [
            guide(Point::new(0.0, 0.0), Vec2::new(1.0, 0.0)),
            guide(Point::new(0.0, 5.0), Vec2::new(1.0, 0.0)),
            guide(Point::new(2.0, 0.0), Vec2::new(0.0, 1.0)),
        ];
        // The two horizontals are parallel; each meets the vertical once.
        let points = find_all_intersections(&guides);
        assert_eq!(points.len(), 2);
        assert!(points.contains(&Point::new(2.0, 0.0)));
        assert!(points.contains(&Point::new(2.0, 5.0)));
    }
}
