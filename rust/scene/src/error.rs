// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Result type for scene assembly and serialization
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while writing scene artifacts
#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to write artifact: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize artifact: {0}")]
    Json(#[from] serde_json::Error),
}
