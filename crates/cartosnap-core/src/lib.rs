//! CartoSnap Core Library
//!
//! Snapping and alignment-guide engine for vector map editing. Given a
//! pointer location and a set of candidate geometries, decides what point
//! the pointer should resolve to, and synthesizes temporary CAD-style
//! alignment guides while drawing. Pure geometry and tolerance logic; no
//! rendering, no I/O, no state between calls.

pub mod engine;
pub mod geometry;
pub mod guide;
pub mod guide_math;
pub mod guide_snap;
pub mod snap;
pub mod viewport;

pub use engine::{Feature, FeatureId, SnapDecision, SnapEngine, SnapError};
pub use geometry::{edges, vertices, Edge, Geometry};
pub use guide::{generate_guides, GuideKind, SnapGuide};
pub use guide_math::{extend_to_viewport, find_all_intersections, line_intersection, nearest_point_on_line};
pub use guide_snap::{find_guide_snap, GuideSnapKind, GuideSnapResult};
pub use snap::{find_nearest_snap, SnapKind, SnapMode, SnapResult};
pub use viewport::{meters_per_pixel, threshold_degrees, visible_bounds, SnapSettings};
