// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Canonical scene model for floor plan vectorization
//!
//! This crate is the shared contract between the analysis pipelines and the
//! external 3D synthesis stage:
//!
//! 1. Data model: walls, openings, rooms, and the [`Scene`] record the
//!    raster pipeline emits, plus the [`VectorPlanConfig`] parameter record
//!    the vector pipeline emits
//! 2. Scene assembly (room envelope derivation, metadata stamping)
//! 3. Deterministic JSON serialization: byte-identical output for
//!    identical input
//!
//! The pipelines themselves live in `planvec-raster` and `planvec-vector`.

pub mod assemble;
pub mod error;
pub mod serialize;
pub mod types;

// Re-export commonly used items
pub use assemble::{assemble_scene, PlanMetadata};
pub use error::{Error, Result};
pub use serialize::{round6, to_json_string, write_json};
pub use types::{
    polygon_area, Opening, Point2D, RectBounds, Room, Scene, VectorPlanConfig, Wall,
};
