// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Shape classification into walls, doors and windows

use crate::types::{OpeningHeuristics, PixelRect, RasterConfig, SimplifiedContour};
use planvec_scene::{round6, Opening, Point2D, Wall};

/// Category a traced region falls into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeClass {
    Wall,
    Door,
    Window,
}

/// The geometric facts classification runs on, detached from pixel data
#[derive(Debug, Clone, Copy)]
pub struct ShapeDescriptor {
    pub vertex_count: usize,
    /// Traced area in square pixels (not the bounding rect area)
    pub area: f64,
    pub bounds: PixelRect,
}

impl ShapeDescriptor {
    pub fn of_region(region: &SimplifiedContour) -> Self {
        Self {
            vertex_count: region.points.len(),
            area: region.area,
            bounds: region.bounds,
        }
    }
}

/// Assigns a category to a simplified region
pub trait ShapeClassifier {
    fn classify(&self, shape: &ShapeDescriptor) -> ShapeClass;
}

/// Heuristic classifier over vertex count, bounding rect and aspect ratio.
///
/// A quadrilateral whose bounding rect is small both absolutely and
/// relative to the traced area, and clearly elongated, is an opening;
/// elongated past the door ratio it is a door, otherwise a window.
/// Everything else is a wall.
#[derive(Debug, Clone)]
pub struct AspectRatioClassifier {
    heuristics: OpeningHeuristics,
}

impl AspectRatioClassifier {
    pub fn new(heuristics: OpeningHeuristics) -> Self {
        Self { heuristics }
    }
}

impl ShapeClassifier for AspectRatioClassifier {
    fn classify(&self, shape: &ShapeDescriptor) -> ShapeClass {
        let width = shape.bounds.width as f64;
        let height = shape.bounds.height as f64;
        let rect_area = shape.bounds.area();
        let long_side = width.max(height);
        let short_side = width.min(height);

        let is_opening = shape.vertex_count == 4
            && rect_area < shape.area * self.heuristics.max_rect_area_ratio
            && rect_area < self.heuristics.max_rect_area
            && short_side < long_side * self.heuristics.max_side_balance;

        if !is_opening {
            return ShapeClass::Wall;
        }

        if long_side / short_side > self.heuristics.door_aspect_ratio {
            ShapeClass::Door
        } else {
            ShapeClass::Window
        }
    }
}

/// Classified plan entities in normalized coordinates, plus the raw pixel
/// vertices of every wall for room envelope derivation
#[derive(Debug, Default)]
pub struct RasterEntities {
    pub walls: Vec<Wall>,
    pub doors: Vec<Opening>,
    pub windows: Vec<Opening>,
    pub wall_points: Vec<Point2D>,
}

/// Classify regions and build scene entities.
///
/// Coordinates are normalized against the image dimensions and rounded to
/// six decimals. Ids number each category independently in trace order, so
/// output is stable for a given mask.
pub fn classify_regions(
    regions: &[SimplifiedContour],
    image_width: u32,
    image_height: u32,
    config: &RasterConfig,
) -> RasterEntities {
    let classifier = AspectRatioClassifier::new(config.openings);
    let width = image_width as f64;
    let height = image_height as f64;

    let mut entities = RasterEntities::default();
    for region in regions {
        let descriptor = ShapeDescriptor::of_region(region);
        match classifier.classify(&descriptor) {
            ShapeClass::Wall => {
                let vertices = region
                    .points
                    .iter()
                    .map(|p| [round6(p.x / width), round6(p.y / height)])
                    .collect();
                entities.walls.push(Wall {
                    id: format!("wall_{}", entities.walls.len()),
                    vertices,
                    thickness: config.wall_thickness,
                });
                entities.wall_points.extend(region.points.iter().copied());
            }
            ShapeClass::Door => {
                let opening = normalized_opening("door", entities.doors.len(), region, width, height);
                entities.doors.push(opening);
            }
            ShapeClass::Window => {
                let opening =
                    normalized_opening("window", entities.windows.len(), region, width, height);
                entities.windows.push(opening);
            }
        }
    }

    entities
}

fn normalized_opening(
    prefix: &str,
    index: usize,
    region: &SimplifiedContour,
    width: f64,
    height: f64,
) -> Opening {
    let center = region.bounds.center();
    Opening {
        id: format!("{prefix}_{index}"),
        center: [round6(center.x / width), round6(center.y / height)],
        width: round6(region.bounds.width as f64 / width),
        height: round6(region.bounds.height as f64 / height),
        // Bounding rect area, not the traced area
        area_px: round6(region.bounds.area()),
    }
}
