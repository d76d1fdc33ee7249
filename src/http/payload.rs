use std::path::Path;

use bytes::Bytes;

use crate::error::SetupError;

/// Reads the write-mode request body. Called once, before any worker starts.
///
/// # Errors
///
/// Returns an error when the file cannot be read.
pub fn load_payload(path: &Path) -> Result<Bytes, SetupError> {
    std::fs::read(path)
        .map(Bytes::from)
        .map_err(|err| SetupError::ReadPayload {
            path: path.to_path_buf(),
            source: err,
        })
}
