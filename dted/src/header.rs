//! DTED header layout and parsing.
//!
//! A DTED file starts with three fixed-length records followed by the
//! elevation data section:
//!
//! | Record | Offset | Length |
//! |--------|--------|--------|
//! | UHL (User Header Label) | 0 | 80 |
//! | DSI (Data Set Identification) | 80 | 648 |
//! | ACC (Accuracy Description) | 728 | 2700 |
//! | Data records | 3428 | `(lat_count * 2 + 12) * lon_count` |
//!
//! Header numbers are fixed-width, zero-padded ASCII decimal fields.
//! Only the fields needed to size and decode the grid are read here.

use std::io::{Read, Seek, SeekFrom};

use crate::error::{DtedError, Result};

/// Length of the User Header Label record.
pub const UHL_LEN: u64 = 80;

/// Length of the Data Set Identification record.
pub const DSI_LEN: u64 = 648;

/// Length of the Accuracy Description record.
pub const ACC_LEN: u64 = 2700;

/// Absolute offset of the DSI record.
pub const DSI_OFFSET: u64 = UHL_LEN;

/// Number of latitude points per longitude line (DSI bytes 282-285).
pub const DSI_NBLAT: u64 = DSI_OFFSET + 281;

/// Number of longitude lines (DSI bytes 286-289).
pub const DSI_NBLON: u64 = DSI_OFFSET + 285;

/// Partial cell indicator, percentage of data coverage (DSI bytes 290-291).
pub const DSI_DATACOV: u64 = DSI_OFFSET + 289;

/// Start of the first data record.
pub const DATA: u64 = UHL_LEN + DSI_LEN + ACC_LEN; // 3428

/// Sentinel, block count, longitude count and latitude count before the samples.
pub const RECORD_HEADER_LEN: u64 = 8;

/// Checksum after the samples.
pub const RECORD_TRAILER_LEN: u64 = 4;

/// Width of the point count fields.
const COUNT_WIDTH: usize = 4;

/// Width of the data coverage field.
const COVERAGE_WIDTH: usize = 2;

/// Grid dimensions and coverage read from the DSI record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileHeader {
    /// Number of samples in each longitude line (south to north).
    pub lat_count: u32,
    /// Number of longitude lines (west to east).
    pub lon_count: u32,
    /// Percentage of the cell covered by real samples (1 to 100).
    pub coverage: u8,
}

impl TileHeader {
    /// Total number of samples in the grid.
    pub fn sample_count(&self) -> usize {
        self.lat_count as usize * self.lon_count as usize
    }

    /// Expected file size for this header's dimensions.
    pub fn expected_file_size(&self) -> u64 {
        expected_file_size(self.lat_count, self.lon_count)
    }

    /// Length in bytes of one longitude data record.
    pub fn record_len(&self) -> u64 {
        record_len(self.lat_count)
    }
}

/// Length in bytes of one data record holding `lat_count` samples.
pub fn record_len(lat_count: u32) -> u64 {
    RECORD_HEADER_LEN + lat_count as u64 * 2 + RECORD_TRAILER_LEN
}

/// Size in bytes of a DTED file with the given dimensions.
///
/// # Examples
///
/// ```
/// use dted::header::expected_file_size;
///
/// assert_eq!(expected_file_size(5, 3), 3428 + 22 * 3);
/// assert_eq!(expected_file_size(3601, 3601), 25_981_042);
/// ```
pub fn expected_file_size(lat_count: u32, lon_count: u32) -> u64 {
    DATA + record_len(lat_count) * lon_count as u64
}

/// Parse a fixed-width, zero-padded ASCII decimal field.
///
/// `offset` is the absolute file position of `bytes[0]` and is only used to
/// report the position of an invalid byte.
///
/// # Examples
///
/// ```
/// use dted::header::parse_ascii_digits;
///
/// assert_eq!(parse_ascii_digits(b"3601", 0).unwrap(), 3601);
/// assert_eq!(parse_ascii_digits(b"0121", 0).unwrap(), 121);
/// assert!(parse_ascii_digits(b"36 1", 0).is_err());
/// ```
pub fn parse_ascii_digits(bytes: &[u8], offset: u64) -> Result<u32> {
    bytes.iter().enumerate().try_fold(0u32, |acc, (i, &byte)| {
        if !byte.is_ascii_digit() {
            return Err(DtedError::InvalidDigit {
                offset: offset + i as u64,
                byte,
            });
        }
        Ok(acc * 10 + u32::from(byte - b'0'))
    })
}

/// Read the point counts of a DTED source.
///
/// Leaves the reader at an unspecified position.
pub fn read_dimensions<R: Read + Seek>(reader: &mut R) -> Result<(u32, u32)> {
    let lat_count = read_field::<_, COUNT_WIDTH>(reader, DSI_NBLAT)?;
    let lon_count = read_field::<_, COUNT_WIDTH>(reader, DSI_NBLON)?;
    Ok((lat_count, lon_count))
}

/// Read the data coverage percentage. A stored value of `0` means complete
/// coverage and is returned as `100`.
pub fn read_coverage<R: Read + Seek>(reader: &mut R) -> Result<u8> {
    let coverage = read_field::<_, COVERAGE_WIDTH>(reader, DSI_DATACOV)?;
    Ok(if coverage == 0 { 100 } else { coverage as u8 })
}

/// Read a complete [`TileHeader`] without checking it against the file size.
pub fn read_header<R: Read + Seek>(reader: &mut R) -> Result<TileHeader> {
    let (lat_count, lon_count) = read_dimensions(reader)?;
    let coverage = read_coverage(reader)?;
    Ok(TileHeader {
        lat_count,
        lon_count,
        coverage,
    })
}

fn read_field<R: Read + Seek, const N: usize>(reader: &mut R, offset: u64) -> Result<u32> {
    let mut buf = [0u8; N];
    reader.seek(SeekFrom::Start(offset))?;
    reader.read_exact(&mut buf)?;
    parse_ascii_digits(&buf, offset)
}
