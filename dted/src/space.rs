//! Tile spaces centered on a geographic origin.
//!
//! A [`Space`] is a fixed 3×3 neighbourhood of tile slots. Slot addressing
//! uses offsets in whole tiles relative to the origin tile:
//!
//! | `d_lat` \ `d_lon` | -1 | 0 | +1 |
//! |---|---|---|---|
//! | +1 | 6 | 7 | 8 |
//! | 0 | 3 | **4** | 5 |
//! | -1 | 0 | 1 | 2 |
//!
//! Initialization decodes the tile containing the origin into the center
//! slot. The surrounding slots are reserved for adjacent tiles and stay empty.
//!
//! # Example
//!
//! ```ignore
//! use dted::SpaceBuilder;
//!
//! let space = SpaceBuilder::new("/data/dted").build(5.72, 45.18)?;
//! let tile = space.center_tile().unwrap();
//! println!("{}x{} samples", tile.lat_count(), tile.lon_count());
//! ```

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{DtedError, Result};
use crate::filename::{is_valid_origin, lon_lat_to_filename};
use crate::tile::Tile;

/// Number of tile slots in a space.
pub const SIZE_SPACE: usize = 9;

/// Number of slots along each side of the space.
pub const SPACE_WIDTH: usize = 3;

/// Index of the slot holding the origin tile.
pub const CENTER: usize = SIZE_SPACE / 2;

/// Environment variable holding the tile directory.
pub const DATA_DIR_ENV: &str = "DTED_DATA_DIR";

/// Map a tile offset from the origin tile to a slot index.
///
/// Returns `None` if the offset falls outside the space.
///
/// # Examples
///
/// ```
/// use dted::space::{slot_index, CENTER};
///
/// assert_eq!(slot_index(0, 0), Some(CENTER));
/// assert_eq!(slot_index(-1, -1), Some(0));
/// assert_eq!(slot_index(1, 1), Some(8));
/// assert_eq!(slot_index(2, 0), None);
/// ```
pub fn slot_index(d_lon: i32, d_lat: i32) -> Option<usize> {
    let radius = (SPACE_WIDTH / 2) as i32;
    if d_lon.abs() > radius || d_lat.abs() > radius {
        return None;
    }
    Some(((d_lat + radius) * SPACE_WIDTH as i32 + d_lon + radius) as usize)
}

/// A fixed grid of tiles centered on an origin coordinate.
///
/// The space exclusively owns every tile it holds. Dropping it, or calling
/// [`Space::release`], releases each populated slot once.
#[derive(Debug)]
pub struct Space {
    /// Longitude of the origin in decimal degrees
    origin_lon: f64,
    /// Latitude of the origin in decimal degrees
    origin_lat: f64,
    /// Directory the tiles were resolved in
    data_dir: PathBuf,
    /// Tile slots, see [`slot_index`]
    tiles: [Option<Tile>; SIZE_SPACE],
}

impl Space {
    /// Create a space around an origin, decoding the tile that contains it.
    ///
    /// # Arguments
    ///
    /// * `data_dir` - Directory containing `.dt2` files
    /// * `origin_lon` - Longitude of the origin in decimal degrees
    /// * `origin_lat` - Latitude of the origin in decimal degrees
    ///
    /// # Errors
    ///
    /// Returns [`DtedError::InvalidOrigin`] for an origin off the globe, or
    /// whatever error decoding the origin tile raises. No space is returned in
    /// either case.
    pub fn init<P: AsRef<Path>>(data_dir: P, origin_lon: f64, origin_lat: f64) -> Result<Self> {
        SpaceBuilder::new(data_dir).build(origin_lon, origin_lat)
    }

    /// Create a builder for more configuration options.
    pub fn builder<P: AsRef<Path>>(data_dir: P) -> SpaceBuilder {
        SpaceBuilder::new(data_dir)
    }

    /// Returns the origin as (longitude, latitude).
    pub fn origin(&self) -> (f64, f64) {
        (self.origin_lon, self.origin_lat)
    }

    /// Returns the origin longitude.
    pub fn origin_lon(&self) -> f64 {
        self.origin_lon
    }

    /// Returns the origin latitude.
    pub fn origin_lat(&self) -> f64 {
        self.origin_lat
    }

    /// Get the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Returns the tile containing the origin.
    ///
    /// Always `Some` for an initialized space.
    pub fn center_tile(&self) -> Option<&Tile> {
        self.tiles[CENTER].as_ref()
    }

    /// Returns the tile at an offset from the origin tile, if loaded.
    pub fn tile(&self, d_lon: i32, d_lat: i32) -> Option<&Tile> {
        slot_index(d_lon, d_lat).and_then(|i| self.tiles[i].as_ref())
    }

    /// Returns every slot, populated or not.
    pub fn slots(&self) -> &[Option<Tile>; SIZE_SPACE] {
        &self.tiles
    }

    /// Returns the number of populated slots.
    pub fn populated(&self) -> usize {
        self.tiles.iter().filter(|slot| slot.is_some()).count()
    }

    /// Release every populated slot and the space itself.
    ///
    /// Returns the number of tiles released.
    pub fn release(mut self) -> usize {
        let released = self.tiles.iter_mut().filter_map(Option::take).count();
        debug!(released, "Released space");
        released
    }
}

/// Builder for creating a [`Space`] with custom configuration.
///
/// # Example
///
/// ```ignore
/// use dted::SpaceBuilder;
///
/// let space = SpaceBuilder::from_env()?.build(5.72, 45.18)?;
/// ```
#[derive(Debug, Clone)]
pub struct SpaceBuilder {
    data_dir: PathBuf,
}

impl SpaceBuilder {
    /// Create a new builder with the specified data directory.
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Self {
        Self {
            data_dir: data_dir.as_ref().to_path_buf(),
        }
    }

    /// Create a builder configured from the environment.
    ///
    /// # Environment Variables
    ///
    /// | Variable | Description | Default |
    /// |----------|-------------|---------|
    /// | `DTED_DATA_DIR` | Directory containing .dt2 files | Required |
    ///
    /// # Errors
    ///
    /// Returns an error if `DTED_DATA_DIR` is not set.
    pub fn from_env() -> Result<Self> {
        let data_dir = std::env::var(DATA_DIR_ENV).map_err(|_| {
            DtedError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "DTED_DATA_DIR environment variable not set",
            ))
        })?;

        Ok(Self::new(data_dir))
    }

    /// Set the data directory.
    ///
    /// Overrides the directory set in the constructor or from environment.
    pub fn data_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.data_dir = path.as_ref().to_path_buf();
        self
    }

    /// Path of the tile governing an origin.
    pub fn tile_path(&self, origin_lon: f64, origin_lat: f64) -> PathBuf {
        self.data_dir.join(lon_lat_to_filename(origin_lon, origin_lat))
    }

    /// Build a [`Space`] centered on the origin.
    ///
    /// # Errors
    ///
    /// Returns an error if the origin is not a finite coordinate within
    /// ±180° longitude and ±90° latitude, or if the origin tile cannot be
    /// opened or decoded.
    pub fn build(&self, origin_lon: f64, origin_lat: f64) -> Result<Space> {
        if !is_valid_origin(origin_lon, origin_lat) {
            return Err(DtedError::InvalidOrigin {
                lon: origin_lon,
                lat: origin_lat,
            });
        }

        let mut space = Space {
            origin_lon,
            origin_lat,
            data_dir: self.data_dir.clone(),
            tiles: Default::default(),
        };

        let path = self.tile_path(origin_lon, origin_lat);
        space.tiles[CENTER] = Some(Tile::from_file(&path)?);

        debug!(
            origin_lon,
            origin_lat,
            path = %path.display(),
            slot = CENTER,
            "Space initialized"
        );

        Ok(space)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::{DATA, DSI_NBLAT, DSI_NBLON};
    use std::fs;
    use tempfile::TempDir;

    /// Create a small DTED tile where every sample has `elevation`
    fn create_test_tile(dir: &Path, filename: &str, elevation: i16) {
        let (lat_count, lon_count) = (5usize, 3usize);
        let mut data = vec![b'0'; DATA as usize];
        data[DSI_NBLAT as usize..DSI_NBLAT as usize + 4].copy_from_slice(b"0005");
        data[DSI_NBLON as usize..DSI_NBLON as usize + 4].copy_from_slice(b"0003");

        for _ in 0..lon_count {
            data.extend_from_slice(&[0xAA, 0, 0, 0, 0, 0, 0, 0]);
            for _ in 0..lat_count {
                data.extend_from_slice(&elevation.to_be_bytes());
            }
            data.extend_from_slice(&[0, 0, 0, 0]);
        }

        fs::write(dir.join(filename), data).unwrap();
    }

    #[test]
    fn test_slot_index() {
        assert_eq!(CENTER, 4);
        assert_eq!(slot_index(0, 0), Some(4));
        assert_eq!(slot_index(-1, 0), Some(3));
        assert_eq!(slot_index(1, 0), Some(5));
        assert_eq!(slot_index(0, -1), Some(1));
        assert_eq!(slot_index(0, 1), Some(7));
        assert_eq!(slot_index(0, 2), None);
        assert_eq!(slot_index(-2, 0), None);

        // Every slot is reachable exactly once
        let mut seen = [false; SIZE_SPACE];
        for d_lat in -1..=1 {
            for d_lon in -1..=1 {
                let i = slot_index(d_lon, d_lat).unwrap();
                assert!(!seen[i]);
                seen[i] = true;
            }
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_init_space() {
        let temp_dir = TempDir::new().unwrap();
        create_test_tile(temp_dir.path(), "n45_e005_1arc_v3.dt2", 212);

        let space = Space::init(temp_dir.path(), 5.72, 45.18).unwrap();

        assert_eq!(space.origin(), (5.72, 45.18));
        assert_eq!(space.data_dir(), temp_dir.path());
        assert_eq!(space.populated(), 1);

        let tile = space.center_tile().unwrap();
        assert_eq!(tile.len(), 15);
        assert_eq!(tile.get(2, 1), Some(212));
    }

    #[test]
    fn test_only_center_slot_populated() {
        let temp_dir = TempDir::new().unwrap();
        create_test_tile(temp_dir.path(), "n00_e000_1arc_v3.dt2", 1);

        let space = Space::init(temp_dir.path(), 0.5, 0.5).unwrap();

        for (i, slot) in space.slots().iter().enumerate() {
            assert_eq!(slot.is_some(), i == CENTER, "slot {}", i);
        }
        assert!(space.tile(0, 0).is_some());
        assert!(space.tile(1, 0).is_none());
        assert!(space.tile(5, 5).is_none());
    }

    #[test]
    fn test_southwest_origin() {
        let temp_dir = TempDir::new().unwrap();
        create_test_tile(temp_dir.path(), "s01_w001_1arc_v3.dt2", 7);

        let space = Space::init(temp_dir.path(), -0.5, -0.5).unwrap();
        assert_eq!(space.center_tile().unwrap().get(0, 0), Some(7));
    }

    #[test]
    fn test_missing_tile() {
        let temp_dir = TempDir::new().unwrap();

        match Space::init(temp_dir.path(), 5.72, 45.18) {
            Err(DtedError::Open { path, .. }) => {
                assert_eq!(path, temp_dir.path().join("n45_e005_1arc_v3.dt2"));
            }
            other => panic!("Expected Open error, got {:?}", other),
        }
    }

    #[test]
    fn test_corrupted_tile() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("n45_e005_1arc_v3.dt2");
        create_test_tile(temp_dir.path(), "n45_e005_1arc_v3.dt2", 212);

        // Drop the final checksum byte
        let mut data = fs::read(&path).unwrap();
        data.pop();
        fs::write(&path, data).unwrap();

        let err = Space::init(temp_dir.path(), 5.72, 45.18).unwrap_err();
        assert!(err.is_format_error());
    }

    #[test]
    fn test_invalid_origin() {
        let temp_dir = TempDir::new().unwrap();
        create_test_tile(temp_dir.path(), "s01_w001_1arc_v3.dt2", 7);

        let origins = [
            (f64::NAN, 0.5),
            (0.5, f64::NAN),
            (f64::NEG_INFINITY, 0.5),
            (0.5, f64::INFINITY),
            (-1e12, 0.5),
            (181.0, 45.0),
            (5.0, -91.0),
        ];

        for (lon, lat) in origins {
            match Space::init(temp_dir.path(), lon, lat) {
                Err(DtedError::InvalidOrigin { .. }) => {}
                other => panic!(
                    "Expected InvalidOrigin for ({}, {}), got {:?}",
                    lon, lat, other
                ),
            }
        }
    }

    #[test]
    fn test_release() {
        let temp_dir = TempDir::new().unwrap();
        create_test_tile(temp_dir.path(), "n45_e005_1arc_v3.dt2", 212);

        let space = Space::init(temp_dir.path(), 5.72, 45.18).unwrap();
        assert_eq!(space.release(), 1);
    }

    #[test]
    fn test_builder_tile_path() {
        let builder = SpaceBuilder::new("/data/dted");
        assert_eq!(
            builder.tile_path(-0.5, -0.5),
            PathBuf::from("/data/dted/s01_w001_1arc_v3.dt2")
        );

        let builder = builder.data_dir("/srv/terrain");
        assert_eq!(
            builder.tile_path(0.5, 0.5),
            PathBuf::from("/srv/terrain/n00_e000_1arc_v3.dt2")
        );
    }

    #[test]
    fn test_from_env() {
        let temp_dir = TempDir::new().unwrap();
        let original = std::env::var(DATA_DIR_ENV).ok();

        std::env::remove_var(DATA_DIR_ENV);
        assert!(SpaceBuilder::from_env().is_err());

        std::env::set_var(DATA_DIR_ENV, temp_dir.path());
        let builder = SpaceBuilder::from_env().unwrap();
        assert_eq!(builder.data_dir, temp_dir.path());

        // Restore original value
        match original {
            Some(v) => std::env::set_var(DATA_DIR_ENV, v),
            None => std::env::remove_var(DATA_DIR_ENV),
        }
    }
}
