#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! CSV ingestion and preparation for the Vancouver PD incident export.
//!
//! The source CSV is the only durable store in the system. Every consumer
//! reloads and reprocesses it from scratch; nothing here caches or writes.
//! Two load paths exist: [`loader::load_raw`] keeps every row for metadata
//! like the universe of incident types, while [`loader::load_prepared`]
//! reprojects coordinates to WGS84 and drops rows that fail the regional
//! sanity checks.

pub mod features;
pub mod filter;
pub mod loader;
pub mod neighbourhoods;

use std::path::{Path, PathBuf};

/// Name of the VPD export this system reads when no override is given.
pub const DEFAULT_CSV_FILENAME: &str = "crimedata_csv_AllNeighbourhoods_2025.csv";

/// Environment variable overriding the source CSV path.
pub const CSV_PATH_ENV: &str = "VAN_CRIME_CSV";

/// Resolves the source CSV path from the environment, falling back to
/// [`DEFAULT_CSV_FILENAME`] in the working directory.
#[must_use]
pub fn csv_path() -> PathBuf {
    std::env::var(CSV_PATH_ENV).map_or_else(|_| PathBuf::from(DEFAULT_CSV_FILENAME), PathBuf::from)
}

/// Errors that can occur while loading or preparing the dataset.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    /// The CSV could not be opened or read.
    #[error("CSV read error: {0}")]
    Csv(#[from] csv::Error),

    /// CRS detection or coordinate transformation failed.
    #[error(transparent)]
    Geo(#[from] van_crime_geo::GeoError),

    /// No row carried usable X/Y coordinates, so there is nothing to
    /// detect a CRS from.
    #[error("no rows with usable X/Y coordinates in {path}")]
    NoCoordinates {
        /// The file that was read.
        path: PathBuf,
    },
}

impl DatasetError {
    pub(crate) fn no_coordinates(path: &Path) -> Self {
        Self::NoCoordinates {
            path: path.to_path_buf(),
        }
    }
}
