use anyhow::{Context, Result};
use dted::{filename::lon_lat_to_filename, space::CENTER, SpaceBuilder};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Serialize)]
struct SpaceResponse {
    lon: f64,
    lat: f64,
    tile: String,
    slot: usize,
    lat_count: usize,
    lon_count: usize,
    coverage: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    min_elevation: Option<i16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_elevation: Option<i16>,
}

pub fn run(data_dir: Option<PathBuf>, lon: f64, lat: f64, json: bool) -> Result<()> {
    // Build the space
    let builder = match data_dir {
        Some(dir) => SpaceBuilder::new(dir),
        None => SpaceBuilder::from_env().context(
            "DTED_DATA_DIR environment variable not set. Use --data-dir or set DTED_DATA_DIR",
        )?,
    };

    let space = builder
        .build(lon, lat)
        .context("Failed to initialize space")?;
    let tile = space
        .center_tile()
        .context("Space has no tile at its origin")?;

    let (min_elevation, max_elevation) = match tile.min_max() {
        Some((min, max)) => (Some(min), Some(max)),
        None => (None, None),
    };

    let response = SpaceResponse {
        lon,
        lat,
        tile: lon_lat_to_filename(lon, lat),
        slot: CENTER,
        lat_count: tile.lat_count(),
        lon_count: tile.lon_count(),
        coverage: tile.coverage(),
        min_elevation,
        max_elevation,
    };

    if json {
        println!("{}", serde_json::to_string(&response)?);
    } else {
        println!("Origin: {}, {}", response.lon, response.lat);
        println!("Tile: {} (slot {})", response.tile, response.slot);
        println!(
            "Grid: {} latitude x {} longitude points",
            response.lat_count, response.lon_count
        );
        println!("Coverage: {}%", response.coverage);
        if let (Some(min), Some(max)) = (response.min_elevation, response.max_elevation) {
            println!("Elevation: {}m to {}m", min, max);
        }
    }

    Ok(())
}
