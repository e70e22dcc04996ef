//! Pixel-tolerance and viewport math.
//!
//! Converts the on-screen snap tolerance (pixels) into degrees at the current
//! zoom and latitude, and computes the approximate visible coordinate window
//! used to clip guides. Plain Web-Mercator ground-resolution math; anything
//! fancier than planar degrees is the caller's problem.

use std::f64::consts::PI;

use kurbo::{Point, Rect, Size};
use serde::{Deserialize, Serialize};

use crate::snap::SnapMode;

/// Web-Mercator ground resolution at zoom 0, in meters per pixel at the
/// equator. Must stay exact for behavioral parity with the threshold math.
pub const GROUND_RESOLUTION_Z0: f64 = 156543.03392;

/// Meters per degree of latitude, approximated.
pub const METERS_PER_DEGREE: f64 = 111000.0;

/// Default snap tolerance in screen pixels.
pub const DEFAULT_SNAP_PIXELS: f64 = 12.0;

/// Caller-facing snap configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SnapSettings {
    /// Snap tolerance in screen pixels.
    pub snap_pixels: f64,
    /// Which feature candidates to consider.
    pub mode: SnapMode,
    /// Whether alignment guides are generated while drawing.
    pub guides_enabled: bool,
}

impl Default for SnapSettings {
    fn default() -> Self {
        Self {
            snap_pixels: DEFAULT_SNAP_PIXELS,
            mode: SnapMode::Both,
            guides_enabled: true,
        }
    }
}

/// Ground resolution in meters per pixel at a zoom level and latitude.
pub fn meters_per_pixel(zoom: f64, latitude: f64) -> f64 {
    GROUND_RESOLUTION_Z0 * (latitude * PI / 180.0).cos() / 2f64.powf(zoom)
}

/// Convert a pixel tolerance to degrees at the current view.
pub fn threshold_degrees(snap_pixels: f64, zoom: f64, latitude: f64) -> f64 {
    snap_pixels * meters_per_pixel(zoom, latitude) / METERS_PER_DEGREE
}

/// Approximate visible coordinate window for a view centered at `center`.
///
/// Good enough for clipping guides to a renderable extent; not a substitute
/// for a real projection.
pub fn visible_bounds(center: Point, zoom: f64, viewport_px: Size) -> Rect {
    let degrees_per_pixel = meters_per_pixel(zoom, center.y) / METERS_PER_DEGREE;
    let half_width = viewport_px.width * degrees_per_pixel / 2.0;
    let half_height = viewport_px.height * degrees_per_pixel / 2.0;
    Rect::new(
        center.x - half_width,
        center.y - half_height,
        center.x + half_width,
        center.y + half_height,
    )
}
