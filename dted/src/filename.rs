//! DTED filename utilities.
//!
//! This module provides functions for converting between coordinates and
//! DTED tile filenames.
//!
//! # Filename Format
//!
//! Tiles follow the naming convention `{n|s}{lat}_{e|w}{lon}_1arc_v3.dt2`:
//!
//! - Latitude: 2 digits with n/s prefix (e.g., n35, s12)
//! - Longitude: 3 digits with e/w prefix (e.g., e138, w077)
//!
//! A coordinate strictly greater than zero takes the integer part of its
//! value and the `n`/`e` prefix. Any other coordinate takes the `s`/`w`
//! prefix and the integer part of its magnitude plus one, so `-0.5` and
//! `0.0` both resolve to degree `1`.

/// Suffix shared by every 1 arc-second, version 3 tile.
pub const TILE_SUFFIX: &str = "_1arc_v3.dt2";

/// Hemisphere letter for a latitude.
pub fn lat_hemisphere(lat: f64) -> char {
    if lat > 0.0 {
        'n'
    } else {
        's'
    }
}

/// Hemisphere letter for a longitude.
pub fn lon_hemisphere(lon: f64) -> char {
    if lon > 0.0 {
        'e'
    } else {
        'w'
    }
}

/// Degree magnitude of the tile governing a coordinate.
///
/// Non-finite or huge inputs saturate instead of overflowing; use
/// [`is_valid_origin`] to reject them first.
///
/// # Examples
///
/// ```
/// use dted::filename::degree_magnitude;
///
/// assert_eq!(degree_magnitude(35.7), 35);
/// assert_eq!(degree_magnitude(0.5), 0);
/// assert_eq!(degree_magnitude(-0.5), 1);
/// assert_eq!(degree_magnitude(-12.3), 13);
/// ```
pub fn degree_magnitude(c: f64) -> u32 {
    let degree = c.trunc();
    if c > 0.0 {
        degree as u32
    } else {
        (1.0 - degree) as u32
    }
}

/// Validate that an origin is a finite coordinate on the globe.
///
/// # Examples
///
/// ```
/// use dted::filename::is_valid_origin;
///
/// assert!(is_valid_origin(5.72, 45.18));
/// assert!(!is_valid_origin(181.0, 0.0));
/// assert!(!is_valid_origin(f64::NAN, 0.0));
/// ```
pub fn is_valid_origin(lon: f64, lat: f64) -> bool {
    (-180.0..=180.0).contains(&lon) && (-90.0..=90.0).contains(&lat)
}

/// Convert a longitude and latitude to a DTED tile filename.
///
/// # Arguments
///
/// * `lon` - Longitude in decimal degrees (-180 to 180)
/// * `lat` - Latitude in decimal degrees (-90 to 90)
///
/// # Returns
///
/// The filename (e.g., "n35_e138_1arc_v3.dt2")
///
/// # Examples
///
/// ```
/// use dted::filename::lon_lat_to_filename;
///
/// assert_eq!(lon_lat_to_filename(138.7, 35.5), "n35_e138_1arc_v3.dt2");
/// assert_eq!(lon_lat_to_filename(-0.5, -0.5), "s01_w001_1arc_v3.dt2");
/// assert_eq!(lon_lat_to_filename(0.5, 0.5), "n00_e000_1arc_v3.dt2");
/// ```
pub fn lon_lat_to_filename(lon: f64, lat: f64) -> String {
    format!(
        "{}{:02}_{}{:03}{}",
        lat_hemisphere(lat),
        degree_magnitude(lat),
        lon_hemisphere(lon),
        degree_magnitude(lon),
        TILE_SUFFIX
    )
}

/// Parse a DTED filename to extract the signed degrees it encodes.
///
/// # Arguments
///
/// * `filename` - The filename (with or without path, with or without suffix)
///
/// # Returns
///
/// The (latitude, longitude) in the name, negative for `s`/`w`, or `None` if
/// parsing fails.
///
/// # Examples
///
/// ```
/// use dted::filename::filename_to_lat_lon;
///
/// assert_eq!(filename_to_lat_lon("n35_e138_1arc_v3.dt2"), Some((35, 138)));
/// assert_eq!(filename_to_lat_lon("s12_w077_1arc_v3.dt2"), Some((-12, -77)));
/// assert_eq!(filename_to_lat_lon("/data/n00_e000"), Some((0, 0)));
/// assert_eq!(filename_to_lat_lon("invalid"), None);
/// ```
pub fn filename_to_lat_lon(filename: &str) -> Option<(i32, i32)> {
    // Extract just the filename if a path is given
    let name = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(filename);

    let name = name.strip_suffix(TILE_SUFFIX).unwrap_or(name);

    // Must be exactly 8 characters: n00_e000
    if name.len() != 8 || !name.is_ascii() {
        return None;
    }

    let bytes = name.as_bytes();

    let lat_sign = match bytes[0].to_ascii_lowercase() {
        b'n' => 1,
        b's' => -1,
        _ => return None,
    };
    if bytes[3] != b'_' {
        return None;
    }
    let lon_sign = match bytes[4].to_ascii_lowercase() {
        b'e' => 1,
        b'w' => -1,
        _ => return None,
    };

    let lat = parse_degrees(&name[1..3])?;
    let lon = parse_degrees(&name[5..8])?;

    Some((lat * lat_sign, lon * lon_sign))
}

fn parse_degrees(digits: &str) -> Option<i32> {
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}
