// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Wall footprint reconstruction from centerline segments

use crate::error::{Error, Result};
use crate::types::{Extent, FloorLevel, Footprint, ReconstructConfig, Segment, Slab, WallQuad};
use rustc_hash::FxHashSet;

/// Segments shorter than this carry no direction and are dropped
const MIN_SEGMENT_LENGTH: f64 = 1e-9;

/// Build a normalized wall footprint from centerline segments.
///
/// Each surviving segment becomes a ribbon quad of half the configured
/// wall thickness on each side. The whole footprint is then recentered on
/// the origin and scaled so its longer axis spans `target_size`, making
/// the output independent of the source drawing's units. Duplicate
/// ribbons (coincident segments, a common CAD export artifact) collapse
/// to one.
///
/// Fails with [`Error::NoUsableGeometry`] when nothing survives the
/// degeneracy filter.
pub fn reconstruct_footprint(
    segments: &[Segment],
    config: &ReconstructConfig,
) -> Result<Footprint> {
    let half_thickness = config.wall_thickness / 2.0;

    let mut extent = Extent::empty();
    let mut seen = FxHashSet::default();
    let mut ribbons: Vec<WallQuad> = Vec::new();

    for segment in segments {
        if segment.length() < MIN_SEGMENT_LENGTH {
            continue;
        }
        extent.include(segment.start);
        extent.include(segment.end);

        let Some(quad) = WallQuad::ribbon(segment, half_thickness) else {
            continue;
        };
        if !seen.insert(quad.key()) {
            continue;
        }
        ribbons.push(quad);
    }

    if ribbons.is_empty() {
        return Err(Error::NoUsableGeometry);
    }

    let scale = extent.scale_for(config.target_size)?;
    let center = extent.center();

    let quads = ribbons
        .into_iter()
        .map(|quad| quad.transformed(center, scale))
        .collect();
    let bounds = extent.transformed(center, scale);

    let levels = (0..config.floors)
        .map(|index| FloorLevel {
            index,
            elevation: index as f64 * config.floor_height,
        })
        .collect();

    Ok(Footprint {
        quads,
        bounds,
        scale,
        levels,
        slab: Slab {
            bounds,
            thickness: config.slab_thickness,
        },
    })
}
