// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Region tracing and polygon simplification

use crate::types::{PixelRect, RasterConfig, SimplifiedContour};
use image::GrayImage;
use imageproc::contours::BorderType;
use planvec_scene::{polygon_area, Point2D};

/// Trace outermost foreground regions and simplify each to a polygon.
///
/// Only top-level outer borders are kept, so nothing nested inside a
/// region (room interiors, text inside walls) produces its own entity.
/// Regions below `min_region_area` are dropped before simplification,
/// and anything that simplifies below a triangle is dropped after.
pub fn extract_contours(mask: &GrayImage, config: &RasterConfig) -> Vec<SimplifiedContour> {
    let traced = imageproc::contours::find_contours::<i32>(mask);

    let mut regions = Vec::new();
    for contour in traced {
        if contour.border_type != BorderType::Outer || contour.parent.is_some() {
            continue;
        }

        let ring: Vec<Point2D> = contour
            .points
            .iter()
            .map(|p| Point2D::new(p.x as f64, p.y as f64))
            .collect();

        let area = polygon_area(&ring);
        if area < config.min_region_area {
            continue;
        }

        let epsilon = (0.01 * ring_perimeter(&ring)).max(2.0);
        let points = simplify_ring(&ring, epsilon);
        if points.len() < 3 {
            continue;
        }

        let bounds = PixelRect::of_points(&points);
        regions.push(SimplifiedContour {
            points,
            area,
            bounds,
        });
    }

    regions
}

/// Perimeter of a closed ring, including the wrap-around edge
pub fn ring_perimeter(ring: &[Point2D]) -> f64 {
    if ring.len() < 2 {
        return 0.0;
    }
    let mut length = 0.0;
    for i in 0..ring.len() {
        let next = &ring[(i + 1) % ring.len()];
        length += ring[i].distance_to(next);
    }
    length
}

/// Douglas-Peucker for a closed ring.
///
/// The open-polyline variant always keeps both endpoints, so running it on
/// a ring as-is would pin an arbitrary trace start vertex. Instead the ring
/// is split at the vertex farthest from the start, each arc is simplified
/// independently, and a final pass drops any vertex within epsilon of the
/// chord through its neighbors (which removes the split anchors when they
/// sit mid-edge).
pub fn simplify_ring(ring: &[Point2D], epsilon: f64) -> Vec<Point2D> {
    if ring.len() < 3 {
        return ring.to_vec();
    }

    let mut far_index = 1;
    let mut far_dist = 0.0;
    for (i, point) in ring.iter().enumerate().skip(1) {
        let d = ring[0].distance_to(point);
        if d > far_dist {
            far_dist = d;
            far_index = i;
        }
    }

    let first_arc = douglas_peucker(&ring[..=far_index], epsilon);
    let mut second_arc: Vec<Point2D> = ring[far_index..].to_vec();
    second_arc.push(ring[0]);
    let second_arc = douglas_peucker(&second_arc, epsilon);

    // Join the arcs, dropping the duplicated anchor vertices
    let mut merged = first_arc;
    if second_arc.len() > 2 {
        merged.extend_from_slice(&second_arc[1..second_arc.len() - 1]);
    }

    prune_collinear(&mut merged, epsilon);
    merged
}

/// Recursive Douglas-Peucker simplification of an open polyline
fn douglas_peucker(points: &[Point2D], epsilon: f64) -> Vec<Point2D> {
    if points.len() < 3 {
        return points.to_vec();
    }

    let end = points.len() - 1;
    let mut max_dist = 0.0;
    let mut index = 0;
    for (i, point) in points.iter().enumerate().take(end).skip(1) {
        let d = perpendicular_distance(point, &points[0], &points[end]);
        if d > max_dist {
            max_dist = d;
            index = i;
        }
    }

    if max_dist > epsilon {
        let mut result = douglas_peucker(&points[..=index], epsilon);
        let rest = douglas_peucker(&points[index..], epsilon);
        result.pop();
        result.extend(rest);
        result
    } else {
        vec![points[0], points[end]]
    }
}

/// Remove ring vertices closer than epsilon to the chord through their
/// neighbors, wrapping around the ring. Never shrinks below a triangle.
fn prune_collinear(ring: &mut Vec<Point2D>, epsilon: f64) {
    let mut changed = true;
    while changed && ring.len() > 3 {
        changed = false;
        let mut i = 0;
        while i < ring.len() && ring.len() > 3 {
            let prev = ring[(i + ring.len() - 1) % ring.len()];
            let next = ring[(i + 1) % ring.len()];
            if perpendicular_distance(&ring[i], &prev, &next) <= epsilon {
                ring.remove(i);
                changed = true;
            } else {
                i += 1;
            }
        }
    }
}

/// Perpendicular distance from a point to the line through two points
fn perpendicular_distance(point: &Point2D, line_start: &Point2D, line_end: &Point2D) -> f64 {
    let dx = line_end.x - line_start.x;
    let dy = line_end.y - line_start.y;
    let length = (dx * dx + dy * dy).sqrt();

    if length < 1e-10 {
        return point.distance_to(line_start);
    }

    (dy * point.x - dx * point.y + line_end.x * line_start.y - line_end.y * line_start.x).abs()
        / length
}
