//! # DTED - Digital Terrain Elevation Data Library
//!
//! Decodes DTED elevation tiles into validated in-memory grids and assembles
//! them into a [`Space`] addressed by geographic origin.
//!
//! ## Features
//!
//! - **Validated**: File size is checked against the header dimensions before
//!   any sample buffer is allocated
//! - **Strict headers**: Fixed-width ASCII fields must contain decimal digits
//! - **Exact samples**: Sign-magnitude elevations are converted without
//!   two's-complement artifacts
//!
//! ## Quick Start
//!
//! ```ignore
//! use dted::{filename, Space, Tile};
//!
//! // Determine which file governs an origin
//! let filename = filename::lon_lat_to_filename(5.72, 45.18);
//! assert_eq!(filename, "n45_e005_1arc_v3.dt2");
//!
//! // Decode a single tile
//! let tile = Tile::from_file(format!("/data/dted/{}", filename))?;
//! println!("{}x{} samples", tile.lat_count(), tile.lon_count());
//!
//! // Or build a space around the origin
//! let space = Space::init("/data/dted", 5.72, 45.18)?;
//! ```
//!
//! ## DTED Data Format
//!
//! A DTED file holds three fixed-length header records (UHL, DSI, ACC)
//! followed by one data record per longitude line, west to east:
//!
//! - 8-byte record header
//! - `lat_count` samples, south to north
//! - 4-byte checksum
//!
//! Each sample is a 16-bit big-endian sign-magnitude integer representing
//! elevation in meters. The value -32767 indicates void (no data).

pub mod error;
pub mod filename;
pub mod header;
pub mod sample;
pub mod space;
pub mod tile;

// Re-export main types at crate root for convenience
pub use error::{DtedError, Result};
pub use header::TileHeader;
pub use space::{Space, SpaceBuilder, SIZE_SPACE};
pub use tile::{Tile, VOID_VALUE};
