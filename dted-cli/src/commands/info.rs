use anyhow::{bail, Context, Result};
use dted::{filename::TILE_SUFFIX, Tile};
use std::path::PathBuf;

pub fn run(data_dir: Option<PathBuf>, tile: String) -> Result<()> {
    // Determine tile filename
    let (filename, tile_path) = if tile.ends_with(".dt2") {
        // Full path provided
        let path = PathBuf::from(&tile);
        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(&tile)
            .to_string();
        (filename, path)
    } else {
        // Just tile name (e.g., "n45_e005")
        let filename = format!("{}{}", tile.to_lowercase(), TILE_SUFFIX);
        let path = get_tile_path(data_dir, &filename)?;
        (filename, path)
    };

    if !tile_path.exists() {
        bail!("Tile not found: {}", tile_path.display());
    }

    let tile = Tile::from_file(&tile_path).context("Failed to load tile")?;
    let file_size = std::fs::metadata(&tile_path)?.len();

    println!("Tile: {}", filename);
    println!("Path: {}", tile_path.display());
    println!();
    println!(
        "Grid: {} latitude x {} longitude points ({} samples)",
        tile.lat_count(),
        tile.lon_count(),
        tile.len()
    );
    if let Some((lat, lon)) = dted::filename::filename_to_lat_lon(&filename) {
        println!(
            "Cell: {}{:02} {}{:03}",
            if lat >= 0 { "N" } else { "S" },
            lat.abs(),
            if lon >= 0 { "E" } else { "W" },
            lon.abs()
        );
    }
    println!("Coverage: {}%", tile.coverage());
    println!("File size: {}", format_size(file_size));
    println!();

    if let Some((min_elev, max_elev)) = tile.min_max() {
        println!("Min elevation: {}m", min_elev);
        println!("Max elevation: {}m", max_elev);
    }

    let void_count = tile.void_count();
    if void_count > 0 {
        let void_pct = (void_count as f64 / tile.len() as f64) * 100.0;
        println!("Void samples: {} ({:.1}%)", void_count, void_pct);
    }

    Ok(())
}

fn get_tile_path(data_dir: Option<PathBuf>, filename: &str) -> Result<PathBuf> {
    match data_dir {
        Some(dir) => Ok(dir.join(filename)),
        None => bail!(
            "DTED_DATA_DIR environment variable not set. Use --data-dir or set DTED_DATA_DIR"
        ),
    }
}

fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} bytes", bytes)
    }
}
