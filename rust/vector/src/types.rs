// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Types for vector drawing reconstruction

use crate::error::{Error, Result};
use nalgebra::Vector2;
use planvec_scene::{polygon_area, Point2D};
use serde::{Deserialize, Serialize};

/// A straight wall centerline in plan units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: Point2D,
    pub end: Point2D,
}

impl Segment {
    pub fn new(start: Point2D, end: Point2D) -> Self {
        Self { start, end }
    }

    pub fn length(&self) -> f64 {
        self.start.distance_to(&self.end)
    }
}

/// Axis-aligned bounding extent, grown point by point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extent {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Extent {
    pub fn empty() -> Self {
        Self {
            min_x: f64::INFINITY,
            min_y: f64::INFINITY,
            max_x: f64::NEG_INFINITY,
            max_y: f64::NEG_INFINITY,
        }
    }

    pub fn include(&mut self, point: Point2D) {
        self.min_x = self.min_x.min(point.x);
        self.min_y = self.min_y.min(point.y);
        self.max_x = self.max_x.max(point.x);
        self.max_y = self.max_y.max(point.y);
    }

    pub fn is_empty(&self) -> bool {
        self.min_x > self.max_x || self.min_y > self.max_y
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn center(&self) -> Point2D {
        Point2D::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Uniform factor that fits the longer axis to `target_size`.
    ///
    /// Fails when the extent has no span in either axis, since the scale
    /// would be undefined.
    pub fn scale_for(&self, target_size: f64) -> Result<f64> {
        if self.is_empty() {
            return Err(Error::DegenerateGeometry);
        }
        let span = self.width().max(self.height());
        if span <= 0.0 {
            return Err(Error::DegenerateGeometry);
        }
        Ok(target_size / span)
    }

    /// Recenter on `center` and scale uniformly
    pub fn transformed(&self, center: Point2D, scale: f64) -> Extent {
        Extent {
            min_x: (self.min_x - center.x) * scale,
            min_y: (self.min_y - center.y) * scale,
            max_x: (self.max_x - center.x) * scale,
            max_y: (self.max_y - center.y) * scale,
        }
    }
}

/// A wall segment expanded to its footprint ribbon, corners in order
/// offset-side then return-side
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WallQuad {
    pub corners: [Point2D; 4],
}

impl WallQuad {
    /// Expand a centerline to a ribbon of the given half thickness.
    ///
    /// Returns `None` for quads with no area (zero-length segment or zero
    /// thickness); callers skip those silently.
    pub fn ribbon(segment: &Segment, half_thickness: f64) -> Option<WallQuad> {
        let length = segment.length();
        if length <= 0.0 {
            return None;
        }

        let start = segment.start.to_nalgebra();
        let end = segment.end.to_nalgebra();
        let direction = (end - start) / length;
        let offset = Vector2::new(-direction.y, direction.x) * half_thickness;

        let quad = WallQuad {
            corners: [
                Point2D::from_nalgebra(&(start + offset)),
                Point2D::from_nalgebra(&(end + offset)),
                Point2D::from_nalgebra(&(end - offset)),
                Point2D::from_nalgebra(&(start - offset)),
            ],
        };

        if quad.area() < 1e-12 {
            return None;
        }
        Some(quad)
    }

    pub fn area(&self) -> f64 {
        polygon_area(&self.corners)
    }

    /// Corner coordinates quantized to micro-units, for deduplication
    pub fn key(&self) -> [i64; 8] {
        let mut key = [0i64; 8];
        for (i, corner) in self.corners.iter().enumerate() {
            key[i * 2] = (corner.x * 1e6).round() as i64;
            key[i * 2 + 1] = (corner.y * 1e6).round() as i64;
        }
        key
    }

    /// Recenter on `center` and scale uniformly
    pub fn transformed(&self, center: Point2D, scale: f64) -> WallQuad {
        WallQuad {
            corners: self.corners.map(|c| {
                Point2D::new((c.x - center.x) * scale, (c.y - center.y) * scale)
            }),
        }
    }
}

/// One storey of the replicated footprint
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FloorLevel {
    pub index: u32,
    /// Base elevation of this storey's walls and slab
    pub elevation: f64,
}

/// Floor slab matching the footprint's tight bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Slab {
    pub bounds: Extent,
    pub thickness: f64,
}

/// Reconstructed wall footprint, normalized to the target size and
/// centered at the origin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Footprint {
    /// Wall ribbons in world units
    pub quads: Vec<WallQuad>,
    /// Tight bounding extent of the wall centerlines
    pub bounds: Extent,
    /// Plan-units-to-world scale that was applied
    pub scale: f64,
    /// Storeys, bottom up
    pub levels: Vec<FloorLevel>,
    pub slab: Slab,
}

/// Tuning for the vector reconstruction pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconstructConfig {
    /// Wall thickness in plan units
    pub wall_thickness: f64,
    /// World-unit size the footprint's longer axis is scaled to
    pub target_size: f64,
    /// Wall extrusion height per storey
    pub wall_height: f64,
    /// Number of storeys to replicate
    pub floors: u32,
    /// Vertical spacing between storeys
    pub floor_height: f64,
    /// Slab extrusion thickness
    pub slab_thickness: f64,
}

impl Default for ReconstructConfig {
    fn default() -> Self {
        Self {
            wall_thickness: 0.2,
            target_size: 30.0,
            wall_height: 3.0,
            floors: 1,
            floor_height: 3.0,
            slab_thickness: 0.3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_extent_tracks_points() {
        let mut extent = Extent::empty();
        assert!(extent.is_empty());

        extent.include(Point2D::new(2.0, -1.0));
        extent.include(Point2D::new(-4.0, 5.0));

        assert!(!extent.is_empty());
        assert_relative_eq!(extent.width(), 6.0);
        assert_relative_eq!(extent.height(), 6.0);
        assert_relative_eq!(extent.center().x, -1.0);
        assert_relative_eq!(extent.center().y, 2.0);
    }

    #[test]
    fn test_scale_for_fits_longer_axis() {
        let mut extent = Extent::empty();
        extent.include(Point2D::new(0.0, 0.0));
        extent.include(Point2D::new(20.0, 5.0));

        assert_relative_eq!(extent.scale_for(30.0).unwrap(), 1.5);
    }

    #[test]
    fn test_scale_for_rejects_zero_span() {
        let empty = Extent::empty();
        assert!(matches!(empty.scale_for(30.0), Err(Error::DegenerateGeometry)));

        let mut point = Extent::empty();
        point.include(Point2D::new(3.0, 3.0));
        assert!(matches!(point.scale_for(30.0), Err(Error::DegenerateGeometry)));
    }

    #[test]
    fn test_scale_for_accepts_one_flat_axis() {
        // A single horizontal centerline still has a usable span
        let mut flat = Extent::empty();
        flat.include(Point2D::new(0.0, 1.0));
        flat.include(Point2D::new(10.0, 1.0));

        assert_relative_eq!(flat.scale_for(30.0).unwrap(), 3.0);
    }

    #[test]
    fn test_ribbon_offsets_perpendicular() {
        let segment = Segment::new(Point2D::new(0.0, 0.0), Point2D::new(10.0, 0.0));
        let quad = WallQuad::ribbon(&segment, 0.1).unwrap();

        assert_relative_eq!(quad.corners[0].y, 0.1);
        assert_relative_eq!(quad.corners[1].y, 0.1);
        assert_relative_eq!(quad.corners[2].y, -0.1);
        assert_relative_eq!(quad.corners[3].y, -0.1);
        assert_relative_eq!(quad.area(), 2.0);
    }

    #[test]
    fn test_ribbon_rejects_zero_thickness() {
        let segment = Segment::new(Point2D::new(0.0, 0.0), Point2D::new(10.0, 0.0));
        assert!(WallQuad::ribbon(&segment, 0.0).is_none());
    }

    #[test]
    fn test_quad_key_quantizes() {
        let segment = Segment::new(Point2D::new(0.0, 0.0), Point2D::new(10.0, 0.0));
        let a = WallQuad::ribbon(&segment, 0.1).unwrap();

        let nudged = Segment::new(Point2D::new(1e-9, 0.0), Point2D::new(10.0, 0.0));
        let b = WallQuad::ribbon(&nudged, 0.1).unwrap();

        assert_eq!(a.key(), b.key());
    }
}
