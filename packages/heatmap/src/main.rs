#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Offline static map renderer for Greater Vancouver incidents.
//!
//! Reads the incident CSV from the working directory, groups incidents by
//! exact coordinate, and writes `crime_map.html`: a standalone Leaflet
//! map with clustered circle markers sized and colored by incident count.
//! Rerunning with the same input overwrites the same output
//! deterministically.

mod render;
mod template;

use van_crime_dataset::loader;

/// Fixed output filename, overwritten on every run.
const OUTPUT_HTML: &str = "crime_map.html";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    let csv_path = van_crime_dataset::csv_path();
    if !csv_path.exists() {
        println!("CSV file not found: {}", csv_path.display());
        return Ok(());
    }

    let incidents = loader::load_prepared(&csv_path)?;
    let groups = render::group_by_location(&incidents);
    log::info!(
        "grouped {} incidents into {} distinct locations",
        incidents.len(),
        groups.len()
    );

    let html = render::render_map(&groups)?;
    std::fs::write(OUTPUT_HTML, html)?;
    println!("Wrote map to: {OUTPUT_HTML}");

    Ok(())
}
