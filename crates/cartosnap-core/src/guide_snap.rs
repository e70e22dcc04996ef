//! Snap resolution against the active alignment-guide set.

use kurbo::Point;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::guide::SnapGuide;
use crate::guide_math::{find_all_intersections, nearest_point_on_line};

/// Guide intersections get a catch radius of `threshold * 1.5`. They are the
/// most valuable snap target, so they are deliberately easier to hit. Tuned
/// empirically.
pub const INTERSECTION_RADIUS_FACTOR: f64 = 1.5;

/// What kind of guide target a snap resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GuideSnapKind {
    /// A point on a single guide line.
    Guide,
    /// The intersection of two guides.
    Intersection,
}

/// Result of matching a query point against the synthetic guide set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GuideSnapResult {
    /// The snapped point.
    pub point: Point,
    /// Distance from the query to the snapped point.
    pub distance: f64,
    /// Guide target kind that won.
    pub kind: GuideSnapKind,
    /// Id of the matched guide, when `kind` is [`GuideSnapKind::Guide`].
    pub guide: Option<Uuid>,
}

/// Find the best guide snap for a query point.
///
/// A qualifying intersection wins unconditionally over any single-guide
/// match, even one that is closer by plain distance; within their larger
/// catch radius, intersections always take precedence.
pub fn find_guide_snap(
    query: Point,
    guides: &[SnapGuide],
    threshold: f64,
) -> Option<GuideSnapResult> {
    let mut best_line: Option<GuideSnapResult> = None;
    for guide in guides {
        let projected = nearest_point_on_line(query, guide);
        let distance = query.distance(projected);
        if distance >= threshold {
            continue;
        }
        if best_line.is_none_or(|b| distance < b.distance) {
            best_line = Some(GuideSnapResult {
                point: projected,
                distance,
                kind: GuideSnapKind::Guide,
                guide: Some(guide.id),
            });
        }
    }

    let intersection_threshold = threshold * INTERSECTION_RADIUS_FACTOR;
    let mut best_intersection: Option<GuideSnapResult> = None;
    for point in find_all_intersections(guides) {
        let distance = query.distance(point);
        if distance >= intersection_threshold {
            continue;
        }
        if best_intersection.is_none_or(|b| distance < b.distance) {
            best_intersection = Some(GuideSnapResult {
                point,
                distance,
                kind: GuideSnapKind::Intersection,
                guide: None,
            });
        }
    }

    best_intersection.or(best_line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::guide::{GuideKind, SnapGuide};
    use kurbo::Vec2;

    fn horizontal(y: f64) -> SnapGuide {
        SnapGuide::new(Point::new(0.0, y), Vec2::new(1.0, 0.0), GuideKind::Horizontal)
    }

    fn vertical(x: f64) -> SnapGuide {
        SnapGuide::new(Point::new(x, 0.0), Vec2::new(0.0, 1.0), GuideKind::Vertical)
    }

    #[test]
    fn test_single_guide_snap() {
        let guides = [horizontal(0.0)];
        let result = find_guide_snap(Point::new(4.0, 0.8), &guides, 1.0).unwrap();
        assert_eq!(result.kind, GuideSnapKind::Guide);
        assert_eq!(result.point, Point::new(4.0, 0.0));
        assert!((result.distance - 0.8).abs() < 1e-12);
        assert_eq!(result.guide, Some(guides[0].id));
    }

    #[test]
    fn test_guide_threshold_is_strict() {
        let guides = [horizontal(0.0)];
        assert!(find_guide_snap(Point::new(4.0, 1.0), &guides, 1.0).is_none());
    }

    #[test]
    fn test_intersection_of_two_guides() {
        // Horizontal through (0,0) and vertical through (10,10) meet at (10,0).
        let guides = [
            SnapGuide::new(Point::new(0.0, 0.0), Vec2::new(1.0, 0.0), GuideKind::Horizontal),
            SnapGuide::new(Point::new(10.0, 10.0), Vec2::new(0.0, 1.0), GuideKind::Vertical),
        ];
        let result = find_guide_snap(Point::new(10.5, 0.5), &guides, 2.0).unwrap();
        assert_eq!(result.kind, GuideSnapKind::Intersection);
        assert_eq!(result.point, Point::new(10.0, 0.0));
        assert_eq!(result.guide, None);
    }

    #[test]
    fn test_intersection_beats_closer_guide_line() {
        let guides = [horizontal(0.0), vertical(10.0)];
        // The horizontal line is 0.1 away; the intersection at (10, 0) is
        // 1.2 away but still inside the 1.5x catch radius, so it wins.
        let query = Point::new(8.8, 0.1);
        let result = find_guide_snap(query, &guides, 1.0).unwrap();
        assert_eq!(result.kind, GuideSnapKind::Intersection);
        assert_eq!(result.point, Point::new(10.0, 0.0));
    }

    #[test]
    fn test_intersection_outside_catch_radius_falls_back_to_line() {
        let guides = [horizontal(0.0), vertical(10.0)];
        // Intersection is 5 away, beyond 1.5 * 1.0; the line match stands.
        let result = find_guide_snap(Point::new(5.0, 0.1), &guides, 1.0).unwrap();
        assert_eq!(result.kind, GuideSnapKind::Guide);
        assert_eq!(result.point, Point::new(5.0, 0.0));
    }

    #[test]
    fn test_empty_guide_set() {
        assert!(find_guide_snap(Point::ZERO, &[], 1.0).is_none());
    }
}
