//! Error types for the DTED library.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when decoding DTED tiles or assembling a space.
#[derive(Error, Debug)]
pub enum DtedError {
    /// The tile file could not be opened.
    #[error("Unable to open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// IO error while seeking or reading inside an open tile.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// File size disagrees with the size computed from the header dimensions.
    #[error("The file has an incorrect size: {actual} bytes, {expected} bytes were expected")]
    SizeMismatch { expected: u64, actual: u64 },

    /// A fixed-width ASCII header field holds a byte that is not a decimal digit.
    #[error("Invalid header digit 0x{byte:02x} at offset {offset}")]
    InvalidDigit { offset: u64, byte: u8 },

    /// Header declares a grid without any samples.
    #[error("Empty elevation grid: {lat_count} latitude x {lon_count} longitude points")]
    EmptyGrid { lat_count: u32, lon_count: u32 },

    /// The origin of a space is not a finite coordinate on the globe.
    #[error("Invalid origin: lon={lon}, lat={lat} (valid: lon ±180°, lat ±90°)")]
    InvalidOrigin { lon: f64, lat: f64 },

    /// The sample buffer for a tile could not be allocated.
    #[error("Unable to allocate memory for {samples} tile samples")]
    Allocation { samples: usize },
}

impl DtedError {
    /// Returns `true` for errors caused by a structurally invalid file.
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            DtedError::SizeMismatch { .. }
                | DtedError::InvalidDigit { .. }
                | DtedError::EmptyGrid { .. }
        )
    }
}

/// Result type alias using [`DtedError`].
pub type Result<T> = std::result::Result<T, DtedError>;
