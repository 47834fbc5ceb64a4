// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Result type for raster analysis
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during raster plan analysis
#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to read input image: {0}")]
    InputDecode(#[from] image::ImageError),

    #[error("Input image has no pixels ({width}x{height})")]
    EmptyInput { width: u32, height: u32 },
}
