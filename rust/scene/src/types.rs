// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Canonical types shared by the raster and vector analysis pipelines

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// A 2D point, either in pixel space or normalized to [0,1]x[0,1]
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn to_nalgebra(&self) -> Point2<f64> {
        Point2::new(self.x, self.y)
    }

    pub fn from_nalgebra(p: &Point2<f64>) -> Self {
        Self { x: p.x, y: p.y }
    }

    pub fn distance_to(&self, other: &Point2D) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Polygon area via the shoelace formula.
///
/// The polygon is implicitly closed (last vertex connects to the first).
/// Self-intersecting input from noisy tracings is tolerated; the result is
/// the absolute signed area.
pub fn polygon_area(points: &[Point2D]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }

    let mut area = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        area += points[i].x * points[j].y;
        area -= points[j].x * points[i].y;
    }

    (area / 2.0).abs()
}

/// A wall polygon in normalized coordinates
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Wall {
    pub id: String,
    /// Polygon vertices as `[x, y]` pairs, implicitly closed
    pub vertices: Vec<[f64; 2]>,
    /// Normalized thickness (fixed constant, not measured from the image)
    pub thickness: f64,
}

/// A door or window in normalized coordinates.
///
/// Which of the two it is determines the scene array it lands in; the
/// record itself carries no kind tag.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Opening {
    pub id: String,
    pub center: [f64; 2],
    pub width: f64,
    pub height: f64,
    /// Bounding-rect area in raw pixels, kept for downstream sizing
    pub area_px: f64,
}

/// Axis-aligned rectangle in normalized coordinates
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct RectBounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// A room region, derived as the envelope of wall vertices
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Room {
    pub id: String,
    pub bounds: RectBounds,
    pub center: [f64; 2],
}

/// Canonical output of the raster pipeline.
///
/// Field order is the serialized key order; downstream consumers rely on
/// this record being complete and immutable once written.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Scene {
    pub image_width: u32,
    pub image_height: u32,
    /// Plan units per pixel, carried as metadata
    pub scale_factor: f64,
    /// Wall extrusion height for the synthesis stage, carried as metadata
    pub wall_height: f64,
    pub walls: Vec<Wall>,
    pub doors: Vec<Opening>,
    pub windows: Vec<Opening>,
    pub rooms: Vec<Room>,
}

impl Scene {
    /// Total number of classified entities (excludes the derived rooms)
    pub fn entity_count(&self) -> usize {
        self.walls.len() + self.doors.len() + self.windows.len()
    }
}

/// Parameter record emitted by the vector pipeline.
///
/// The external synthesis stage re-reads the source drawing and rebuilds
/// the wall solids itself; this record carries everything it needs beyond
/// the line entities.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VectorPlanConfig {
    /// Absolute path to the source drawing
    pub dxf_path: String,
    /// Nominal footprint size the plan is scaled to fit
    pub target_size: f64,
    pub wall_height: f64,
    pub wall_thickness: f64,
    pub floors: u32,
    pub floor_height: f64,
    pub slab_thickness: f64,
}
