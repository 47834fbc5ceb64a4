// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Result type for vector reconstruction
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during vector plan reconstruction
#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to read drawing: {0}")]
    Io(#[from] std::io::Error),

    #[error("No usable line geometry in input")]
    NoUsableGeometry,

    #[error("Drawing extent collapses to a point, scale is undefined")]
    DegenerateGeometry,
}
