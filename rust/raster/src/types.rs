// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Configuration and intermediate records for the raster pipeline

use planvec_scene::Point2D;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding rectangle in pixel space.
///
/// Width and height are inclusive pixel counts (max - min + 1), the
/// convention the classification thresholds were tuned on.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PixelRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl PixelRect {
    /// Bounding rect of a point set. The set must be non-empty; a single
    /// point yields a 1x1 rect.
    pub fn of_points(points: &[Point2D]) -> Self {
        debug_assert!(!points.is_empty(), "bounding rect of an empty point set");

        let mut min_x = f64::MAX;
        let mut min_y = f64::MAX;
        let mut max_x = f64::MIN;
        let mut max_y = f64::MIN;

        for p in points {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }

        Self {
            x: min_x.round() as i32,
            y: min_y.round() as i32,
            width: (max_x - min_x).round() as i32 + 1,
            height: (max_y - min_y).round() as i32 + 1,
        }
    }

    pub fn area(&self) -> f64 {
        self.width as f64 * self.height as f64
    }

    pub fn center(&self) -> Point2D {
        Point2D::new(
            self.x as f64 + self.width as f64 / 2.0,
            self.y as f64 + self.height as f64 / 2.0,
        )
    }
}

/// One traced region after area filtering and polygon simplification
#[derive(Debug, Clone)]
pub struct SimplifiedContour {
    /// Simplified polygon vertices in pixel space, implicitly closed
    pub points: Vec<Point2D>,
    /// Shoelace area of the traced outer boundary, in square pixels
    pub area: f64,
    /// Bounding rect of the simplified polygon
    pub bounds: PixelRect,
}

/// Thresholds for the opening-candidate test and the door/window split.
///
/// A 4-vertex polygon is an opening candidate only when its bounding rect
/// is small in absolute terms, small relative to the traced area, and
/// markedly non-square; candidates with an elongated rect become doors,
/// the rest windows.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct OpeningHeuristics {
    /// Candidate iff rect_area < area * this ratio
    pub max_rect_area_ratio: f64,
    /// Candidate iff rect_area is below this absolute cap (px^2)
    pub max_rect_area: f64,
    /// Candidate iff min(w,h) < max(w,h) * this ratio
    pub max_side_balance: f64,
    /// Door iff max(w,h) / min(w,h) exceeds this, else window
    pub door_aspect_ratio: f64,
}

impl Default for OpeningHeuristics {
    fn default() -> Self {
        Self {
            max_rect_area_ratio: 0.6,
            max_rect_area: 5000.0,
            max_side_balance: 0.35,
            door_aspect_ratio: 1.5,
        }
    }
}

/// Configuration for the raster analysis pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RasterConfig {
    /// Gaussian blur kernel size (odd); sigma is derived from it
    pub blur_kernel_size: u32,
    /// Adaptive mean threshold block size (odd)
    pub threshold_block_size: u32,
    /// Constant subtracted from the local mean before comparison
    pub threshold_c: f64,
    /// Morphological structuring element size (odd, square)
    pub morph_kernel_size: u32,
    /// Closing iterations (bridges broken wall lines)
    pub close_iterations: u32,
    /// Opening iterations (removes speckle noise)
    pub open_iterations: u32,
    /// Minimum traced region area to keep (square pixels)
    pub min_region_area: f64,
    /// Opening candidate thresholds
    pub openings: OpeningHeuristics,
    /// Normalized thickness attached to every wall polygon
    pub wall_thickness: f64,
    /// Wall extrusion height, carried as scene metadata
    pub wall_height: f64,
    /// Plan units per pixel, carried as scene metadata
    pub scale_factor: f64,
}

impl Default for RasterConfig {
    fn default() -> Self {
        Self {
            blur_kernel_size: 5,
            threshold_block_size: 15,
            threshold_c: 5.0,
            morph_kernel_size: 5,
            close_iterations: 2,
            open_iterations: 1,
            min_region_area: 400.0,
            openings: OpeningHeuristics::default(),
            wall_thickness: 0.02,
            wall_height: 3.0,
            scale_factor: 0.02,
        }
    }
}
