//! Alignment guides synthesized from the in-progress drawing.
//!
//! Guides are the CAD-style construction lines: infinite lines the cursor can
//! snap onto while drawing. They are ephemeral, regenerated from scratch every
//! time the drawn coordinate list changes, and never mutated in place.

use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Segments shorter than this contribute no direction-derived guides.
const MIN_SEGMENT_LENGTH: f64 = 1e-12;

/// The orientation a guide was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GuideKind {
    /// Horizontal through the first drawn vertex.
    Horizontal,
    /// Vertical through the first drawn vertex.
    Vertical,
    /// Parallel to the most recent segment.
    Parallel,
    /// Perpendicular to the most recent segment.
    Orthogonal,
}

/// An infinite alignment line.
///
/// `origin` is any point on the line and `direction` is a unit vector along
/// it. Ids exist for rendering-layer diffing only; uniqueness across
/// regenerations is not load-bearing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SnapGuide {
    pub id: Uuid,
    pub origin: Point,
    pub direction: Vec2,
    pub kind: GuideKind,
}

impl SnapGuide {
    pub fn new(origin: Point, direction: Vec2, kind: GuideKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            origin,
            direction,
            kind,
        }
    }
}

/// Synthesize the guide set for the current in-progress vertex list.
///
/// With `include_initial` and at least one coordinate, a horizontal and a
/// vertical guide are anchored at the first drawn vertex. With at least two
/// coordinates, the last segment's direction yields a parallel guide at the
/// last vertex and two orthogonal guides, one at the last vertex and one at
/// the first. A degenerate (near-zero-length) last segment yields no
/// direction-derived guides.
pub fn generate_guides(drawn: &[Point], include_initial: bool) -> Vec<SnapGuide> {
    let mut guides = Vec::with_capacity(5);
    let Some(&first) = drawn.first() else {
        return guides;
    };

    if include_initial {
        guides.push(SnapGuide::new(first, Vec2::new(1.0, 0.0), GuideKind::Horizontal));
        guides.push(SnapGuide::new(first, Vec2::new(0.0, 1.0), GuideKind::Vertical));
    }

    if drawn.len() >= 2 {
        let last = drawn[drawn.len() - 1];
        let second_to_last = drawn[drawn.len() - 2];
        let segment = last - second_to_last;
        let length = segment.hypot();
        if length > MIN_SEGMENT_LENGTH {
            let direction = segment / length;
            let orthogonal = Vec2::new(-direction.y, direction.x);
            guides.push(SnapGuide::new(last, direction, GuideKind::Parallel));
            guides.push(SnapGuide::new(last, orthogonal, GuideKind::Orthogonal));
            guides.push(SnapGuide::new(first, orthogonal, GuideKind::Orthogonal));
        }
    }

    log::debug!("regenerated {} guides from {} drawn vertices", guides.len(), drawn.len());
    guides
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_coordinates_no_guides() {
        assert!(generate_guides(&[], true).is_empty());
        assert!(generate_guides(&[], false).is_empty());
    }

    #[test]
    fn test_initial_guides_anchor_at_first_vertex() {
        let first = Point::new(3.0, 7.0);
        let guides = generate_guides(&[first], true);
        assert_eq!(guides.len(), 2);
        assert_eq!(guides[0].kind, GuideKind::Horizontal);
        assert_eq!(guides[0].origin, first);
        assert_eq!(guides[0].direction, Vec2::new(1.0, 0.0));
        assert_eq!(guides[1].kind, GuideKind::Vertical);
        assert_eq!(guides[1].direction, Vec2::new(0.0, 1.0));
    }

    #[test]
    fn test_initial_guides_can_be_disabled() {
        assert!(generate_guides(&[Point::new(3.0, 7.0)], false).is_empty());
    }

    #[test]
    fn test_segment_guides() {
        let first = Point::new(0.0, 0.0);
        let last = Point::new(10.0, 0.0);
        let guides = generate_guides(&[first, last], false);
        assert_eq!(guides.len(), 3);

        let parallel = &guides[0];
        assert_eq!(parallel.kind, GuideKind::Parallel);
        assert_eq!(parallel.origin, last);
        assert!((parallel.direction.x - 1.0).abs() < 1e-12);
        assert!(parallel.direction.y.abs() < 1e-12);

        let ortho_last = &guides[1];
        assert_eq!(ortho_last.kind, GuideKind::Orthogonal);
        assert_eq!(ortho_last.origin, last);
        assert!(ortho_last.direction.x.abs() < 1e-12);

        let ortho_first = &guides[2];
        assert_eq!(ortho_first.kind, GuideKind::Orthogonal);
        assert_eq!(ortho_first.origin, first);
    }

    #[test]
    fn test_direction_is_normalized() {
        let guides = generate_guides(
            &[Point::new(0.0, 0.0), Point::new(3.0, 4.0)],
            false,
        );
        let parallel = &guides[0];
        assert!((parallel.direction.hypot() - 1.0).abs() < 1e-12);
        assert!((parallel.direction.x - 0.6).abs() < 1e-12);
        assert!((parallel.direction.y - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_degenerate_last_segment_skipped() {
        let p = Point::new(5.0, 5.0);
        let guides = generate_guides(&[p, p], true);
        // Only the two initial guides survive.
        assert_eq!(guides.len(), 2);
    }

    #[test]
    fn test_full_guide_set() {
        let guides = generate_guides(
            &[Point::new(0.0, 0.0), Point::new(5.0, 0.0), Point::new(5.0, 5.0)],
            true,
        );
        assert_eq!(guides.len(), 5);
        // Last segment is vertical, so its parallel guide points along y.
        let parallel = guides.iter().find(|g| g.kind == GuideKind::Parallel).unwrap();
        assert!(parallel.direction.x.abs() < 1e-12);
        assert_eq!(parallel.origin, Point::new(5.0, 5.0));
    }
}
