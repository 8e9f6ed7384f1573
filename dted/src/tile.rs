//! DTED tile decoding.
//!
//! This module provides the [`Tile`] struct, the in-memory elevation grid of
//! one DTED file.

use std::fs::File;
use std::io::{Cursor, Read, Seek, SeekFrom};
use std::path::Path;

use memmap2::Mmap;
use tracing::{debug, info, warn};

use crate::error::{DtedError, Result};
use crate::header::{self, TileHeader};
use crate::sample::read_sample;

/// Value indicating no data (void) in DTED files.
pub const VOID_VALUE: i16 = -32767;

/// A fully decoded DTED elevation grid.
///
/// Samples are stored one longitude line after another, west to east, each
/// line running south to north. The sample at `row` (latitude index) and
/// `column` (longitude index) lives at `column * lat_count + row`.
///
/// # Example
///
/// ```ignore
/// use dted::Tile;
///
/// let tile = Tile::from_file("n35_e138_1arc_v3.dt2")?;
/// println!("{}x{} samples", tile.lat_count(), tile.lon_count());
/// let southwest = tile.get(0, 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    /// Number of samples per longitude line (rows, south to north)
    lat_count: usize,
    /// Number of longitude lines (columns, west to east)
    lon_count: usize,
    /// Percentage of the cell covered by real samples
    coverage: u8,
    /// Elevation samples in meters
    data: Vec<i16>,
}

impl Tile {
    /// Decode a DTED tile from a file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the DTED file (`.dt0`, `.dt1` or `.dt2`)
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be opened ([`DtedError::Open`])
    /// - A header field is not a decimal number
    /// - The file size doesn't match the size declared by the header
    /// - The sample buffer cannot be allocated
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| DtedError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        info!(path = %path.display(), "Opening DTED tile");

        // SAFETY: Memory mapping is safe as long as the file is not modified
        // while mapped. We open the file read-only and drop the mapping before
        // returning.
        let mmap = unsafe { Mmap::map(&file)? };

        Self::from_reader(Cursor::new(&mmap[..]))
    }

    /// Decode a DTED tile from any seekable source.
    ///
    /// Reads are issued per sample, so wrap unbuffered sources such as a
    /// [`File`] in a [`std::io::BufReader`].
    ///
    /// The file size is checked against the header dimensions before any
    /// buffer sized from those dimensions is allocated.
    pub fn from_reader<R: Read + Seek>(mut reader: R) -> Result<Self> {
        let (lat_count, lon_count) = header::read_dimensions(&mut reader)?;

        let actual = reader.seek(SeekFrom::End(0))?;
        let expected = header::expected_file_size(lat_count, lon_count);
        debug!(size = actual, lat_count, lon_count, "Measured tile size");

        if actual != expected {
            warn!(expected, actual, "DTED tile has an incorrect size");
            return Err(DtedError::SizeMismatch { expected, actual });
        }
        if lat_count == 0 || lon_count == 0 {
            return Err(DtedError::EmptyGrid {
                lat_count,
                lon_count,
            });
        }

        let coverage = header::read_coverage(&mut reader)?;
        info!("File covers {}% of the region", coverage);

        let header = TileHeader {
            lat_count,
            lon_count,
            coverage,
        };
        let data = read_samples(&mut reader, &header)?;

        Ok(Self {
            lat_count: lat_count as usize,
            lon_count: lon_count as usize,
            coverage,
            data,
        })
    }

    /// Get the elevation at a grid position.
    ///
    /// # Arguments
    ///
    /// * `row` - Latitude index (0 = south edge)
    /// * `column` - Longitude index (0 = west edge)
    ///
    /// Returns `None` if the position is outside the grid.
    pub fn get(&self, row: usize, column: usize) -> Option<i16> {
        if row >= self.lat_count || column >= self.lon_count {
            return None;
        }
        self.data.get(column * self.lat_count + row).copied()
    }

    /// Returns the lowest and highest non-void elevation, or `None` if every
    /// sample is void.
    pub fn min_max(&self) -> Option<(i16, i16)> {
        self.data
            .iter()
            .copied()
            .filter(|&v| v != VOID_VALUE)
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }

    /// Returns the number of void samples.
    pub fn void_count(&self) -> usize {
        self.data.iter().filter(|&&v| v == VOID_VALUE).count()
    }

    /// Returns the number of samples per longitude line.
    pub fn lat_count(&self) -> usize {
        self.lat_count
    }

    /// Returns the number of longitude lines.
    pub fn lon_count(&self) -> usize {
        self.lon_count
    }

    /// Returns the data coverage percentage (100 = complete cell).
    pub fn coverage(&self) -> u8 {
        self.coverage
    }

    /// Returns all samples in storage order.
    ///
    /// Samples are stored column by column, so the stride is the column
    /// length `lat_count`, not `lon_count`: the sample at (row, column) is
    /// `samples()[column * lat_count + row]`.
    pub fn samples(&self) -> &[i16] {
        &self.data
    }

    /// Returns the total number of samples.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the tile holds no samples.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Read every data record, skipping record headers and checksums.
fn read_samples<R: Read + Seek>(reader: &mut R, header: &TileHeader) -> Result<Vec<i16>> {
    let samples = header.sample_count();
    let mut data = Vec::new();
    data.try_reserve_exact(samples)
        .map_err(|_| DtedError::Allocation { samples })?;

    reader.seek(SeekFrom::Start(header::DATA))?;

    // Longitude goes W to E, latitude goes S to N
    for _ in 0..header.lon_count {
        reader.seek(SeekFrom::Current(header::RECORD_HEADER_LEN as i64))?;
        for _ in 0..header.lat_count {
            data.push(read_sample(reader)?);
        }
        reader.seek(SeekFrom::Current(header::RECORD_TRAILER_LEN as i64))?;
    }

    Ok(data)
}
