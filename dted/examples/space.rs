//! Build a space around an origin and summarize its center tile.
//!
//! Run with: cargo run --example space -- /path/to/dted/files 5.72 45.18

use dted::{filename, DtedError, Space};
use std::env;

fn main() -> Result<(), DtedError> {
    let args: Vec<String> = env::args().collect();
    if args.len() != 4 {
        eprintln!("Usage: cargo run --example space -- /path/to/dted/files <lon> <lat>");
        std::process::exit(1);
    }

    let (lon, lat) = match (args[2].parse::<f64>(), args[3].parse::<f64>()) {
        (Ok(lon), Ok(lat)) => (lon, lat),
        _ => {
            eprintln!("Longitude and latitude must be decimal degrees");
            std::process::exit(1);
        }
    };

    println!("Origin tile: {}", filename::lon_lat_to_filename(lon, lat));

    let space = Space::init(&args[1], lon, lat)?;

    if let Some(tile) = space.center_tile() {
        println!(
            "Grid: {} latitude x {} longitude points",
            tile.lat_count(),
            tile.lon_count()
        );
        println!("Coverage: {}%", tile.coverage());
        if let Some((min, max)) = tile.min_max() {
            println!("Elevation: {}m to {}m", min, max);
        }
    }

    println!("Released {} tile(s)", space.release());

    Ok(())
}
