// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Scene assembly: merge classified entities into the canonical record

use crate::serialize::round6;
use crate::types::{Opening, Point2D, RectBounds, Room, Scene, Wall};

/// Plan-level metadata stamped onto the assembled scene.
///
/// `scale_factor` and `wall_height` are inputs to the analysis, never
/// derived from it.
#[derive(Debug, Clone, Copy)]
pub struct PlanMetadata {
    pub image_width: u32,
    pub image_height: u32,
    pub scale_factor: f64,
    pub wall_height: f64,
}

/// Assemble the canonical scene from classified raster entities.
///
/// The single room is the axis-aligned envelope of all wall vertices in
/// pixel space, normalized by the image dimensions. No walls means no
/// rooms: openings alone do not bound a room.
pub fn assemble_scene(
    meta: &PlanMetadata,
    walls: Vec<Wall>,
    doors: Vec<Opening>,
    windows: Vec<Opening>,
    wall_points: &[Point2D],
) -> Scene {
    let rooms = derive_room(meta, wall_points).into_iter().collect();

    Scene {
        image_width: meta.image_width,
        image_height: meta.image_height,
        scale_factor: meta.scale_factor,
        wall_height: meta.wall_height,
        walls,
        doors,
        windows,
        rooms,
    }
}

/// Envelope of the wall point cloud as a single room bound
fn derive_room(meta: &PlanMetadata, wall_points: &[Point2D]) -> Option<Room> {
    if wall_points.is_empty() {
        return None;
    }

    let w = meta.image_width as f64;
    let h = meta.image_height as f64;

    let mut min_x = f64::MAX;
    let mut min_y = f64::MAX;
    let mut max_x = f64::MIN;
    let mut max_y = f64::MIN;

    for point in wall_points {
        min_x = min_x.min(point.x);
        min_y = min_y.min(point.y);
        max_x = max_x.max(point.x);
        max_y = max_y.max(point.y);
    }

    Some(Room {
        id: "room_0".to_string(),
        bounds: RectBounds {
            x: round6(min_x / w),
            y: round6(min_y / h),
            width: round6((max_x - min_x) / w),
            height: round6((max_y - min_y) / h),
        },
        center: [
            round6((min_x + max_x) / (2.0 * w)),
            round6((min_y + max_y) / (2.0 * h)),
        ],
    })
}
