// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Deterministic artifact serialization
//!
//! Identical analysis input must produce byte-identical output files: the
//! downstream synthesis stage caches on file content. Two rules make that
//! hold: keys serialize in struct declaration order, and every float stored
//! in an artifact is rounded to a fixed precision before it gets there.

use crate::error::Result;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Round to 6 decimal places, the fixed precision of all artifact floats.
///
/// Normalizes -0.0 to 0.0 so centered coordinates near the origin cannot
/// flip sign between runs of equivalent inputs.
pub fn round6(value: f64) -> f64 {
    let rounded = (value * 1e6).round() / 1e6;
    rounded + 0.0
}

/// Serialize an artifact to pretty JSON (2-space indent, trailing newline)
pub fn to_json_string<T: Serialize>(value: &T) -> Result<String> {
    let mut out = serde_json::to_string_pretty(value)?;
    out.push('\n');
    Ok(out)
}

/// Write an artifact file.
///
/// The value is serialized in memory first, so a serialization failure
/// never leaves a truncated file behind.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = to_json_string(value)?;
    fs::write(path, json)?;
    Ok(())
}
