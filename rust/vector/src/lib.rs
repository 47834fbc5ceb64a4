// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Vector floor plan reconstruction.
//!
//! Takes a line drawing (DXF) and produces a wall [`Footprint`]: ribbon
//! quads around each wall centerline, recentered on the origin and scaled
//! to a configured nominal size, with floor levels and a slab. Alongside
//! the footprint it emits a [`VectorPlanConfig`], the flat parameter
//! record the external 3D synthesis stage consumes.

pub mod dxf;
pub mod error;
pub mod footprint;
pub mod types;

pub use dxf::{parse_dxf_lines, read_dxf_lines};
pub use error::{Error, Result};
pub use footprint::reconstruct_footprint;
pub use types::{
    Extent, FloorLevel, Footprint, ReconstructConfig, Segment, Slab, WallQuad,
};

use planvec_scene::VectorPlanConfig;
use std::fs;
use std::path::Path;

/// Reconstruct a wall footprint from a DXF drawing.
///
/// Returns the footprint together with the plan config handed to the
/// external synthesis stage. The config carries the input path in
/// canonical absolute form, so the consumer resolves it regardless of
/// its own working directory.
pub fn analyze_dxf<P: AsRef<Path>>(
    path: P,
    config: &ReconstructConfig,
) -> Result<(Footprint, VectorPlanConfig)> {
    let path = path.as_ref();
    let segments = dxf::read_dxf_lines(path)?;
    let footprint = footprint::reconstruct_footprint(&segments, config)?;

    let dxf_path = fs::canonicalize(path)?.to_string_lossy().into_owned();
    let plan = VectorPlanConfig {
        dxf_path,
        target_size: config.target_size,
        wall_height: config.wall_height,
        wall_thickness: config.wall_thickness,
        floors: config.floors,
        floor_height: config.floor_height,
        slab_thickness: config.slab_thickness,
    };

    Ok((footprint, plan))
}
