//! Raw and prepared load paths for the incident CSV.
//!
//! The raw path keeps every row the file contains. The prepared path
//! drops rows without coordinates, detects the source CRS from the first
//! surviving row, reprojects everything to WGS84, applies the regional
//! sanity box, and composes the calendar date. Rows are salvaged
//! best-effort: a malformed cell drops that row, never the load.

use std::collections::BTreeSet;
use std::path::Path;

use serde::Deserialize;
use van_crime_geo::{VANCOUVER_BOUNDS, detect_transform};
use van_crime_models::Incident;

use crate::DatasetError;

/// One row of the VPD export, read permissively: numeric cells that fail
/// to parse become `None` instead of failing the row.
#[derive(Debug, Clone, Deserialize)]
pub struct RawIncident {
    /// Free-text incident category.
    #[serde(rename = "TYPE", default)]
    pub incident_type: String,
    /// Year component of the incident date.
    #[serde(rename = "YEAR", default, deserialize_with = "csv::invalid_option")]
    pub year: Option<i32>,
    /// Month component of the incident date.
    #[serde(rename = "MONTH", default, deserialize_with = "csv::invalid_option")]
    pub month: Option<u32>,
    /// Day component of the incident date.
    #[serde(rename = "DAY", default, deserialize_with = "csv::invalid_option")]
    pub day: Option<u32>,
    /// Hour of day, absent in some rows.
    #[serde(rename = "HOUR", default, deserialize_with = "csv::invalid_option")]
    pub hour: Option<i32>,
    /// Neighbourhood name, absent in some rows.
    #[serde(rename = "NEIGHBOURHOOD", default)]
    pub neighbourhood: Option<String>,
    /// Block-level address, absent in some rows.
    #[serde(rename = "HUNDRED_BLOCK", default)]
    pub hundred_block: Option<String>,
    /// Projected easting.
    #[serde(rename = "X", default, deserialize_with = "csv::invalid_option")]
    pub x: Option<f64>,
    /// Projected northing.
    #[serde(rename = "Y", default, deserialize_with = "csv::invalid_option")]
    pub y: Option<f64>,
}

/// Reads the full source table with no filtering.
///
/// Used when every distinct incident type must be enumerable, including
/// ones that the prepared path would drop.
///
/// # Errors
///
/// Returns [`DatasetError::Csv`] if the file is missing or unreadable.
pub fn load_raw(path: &Path) -> Result<Vec<RawIncident>, DatasetError> {
    let reader = csv::Reader::from_path(path)?;
    read_rows(reader, path)
}

fn read_rows<R: std::io::Read>(
    mut reader: csv::Reader<R>,
    path: &Path,
) -> Result<Vec<RawIncident>, DatasetError> {
    let mut rows = Vec::new();
    let mut dropped: usize = 0;

    for result in reader.deserialize() {
        match result {
            Ok(row) => rows.push(row),
            Err(e) => {
                dropped += 1;
                log::debug!("dropping unreadable row: {e}");
            }
        }
    }

    if dropped > 0 {
        log::warn!("dropped {dropped} unreadable rows from {}", path.display());
    }
    log::info!("loaded {} raw incidents from {}", rows.len(), path.display());

    Ok(rows)
}

/// Reads the source table and prepares it: coordinate filtering, CRS
/// detection, reprojection, regional sanity filter, and date composition.
///
/// Every returned incident has WGS84 coordinates strictly inside the
/// Greater Vancouver box and a valid calendar date.
///
/// # Errors
///
/// Returns [`DatasetError::Csv`] if the file is missing or unreadable,
/// [`DatasetError::NoCoordinates`] if no row has usable X/Y, and
/// [`DatasetError::Geo`] if no candidate CRS matches the data.
pub fn load_prepared(path: &Path) -> Result<Vec<Incident>, DatasetError> {
    let raw = load_raw(path)?;
    prepare(raw, path)
}

fn prepare(raw: Vec<RawIncident>, path: &Path) -> Result<Vec<Incident>, DatasetError> {
    let with_coords: Vec<(RawIncident, f64, f64)> = raw
        .into_iter()
        .filter_map(|row| match (row.x, row.y) {
            (Some(x), Some(y)) => Some((row, x, y)),
            _ => None,
        })
        .collect();

    let Some(first) = with_coords.first() else {
        return Err(DatasetError::no_coordinates(path));
    };
    let transform = detect_transform(first.1, first.2, &VANCOUVER_BOUNDS)?;

    let mut incidents = Vec::with_capacity(with_coords.len());
    let mut out_of_region: usize = 0;
    let mut bad_dates: usize = 0;

    for (row, x, y) in with_coords {
        let Ok((lon, lat)) = transform.to_wgs84(x, y) else {
            out_of_region += 1;
            continue;
        };
        if !VANCOUVER_BOUNDS.interior_contains(lat, lon) {
            out_of_region += 1;
            continue;
        }
        let Some(date) = compose_date(&row) else {
            bad_dates += 1;
            continue;
        };

        incidents.push(Incident {
            incident_type: row.incident_type,
            date,
            hour: row.hour.unwrap_or(-1),
            neighbourhood: row.neighbourhood,
            hundred_block: row.hundred_block,
            lon,
            lat,
        });
    }

    log::info!(
        "prepared {} incidents via EPSG:{} ({out_of_region} outside region, {bad_dates} invalid dates)",
        incidents.len(),
        transform.epsg(),
    );

    Ok(incidents)
}

fn compose_date(row: &RawIncident) -> Option<chrono::NaiveDate> {
    chrono::NaiveDate::from_ymd_opt(row.year?, row.month?, row.day?)
}

/// Returns the sorted, deduplicated, trimmed, non-empty incident types
/// found in the raw table.
#[must_use]
pub fn distinct_types(rows: &[RawIncident]) -> Vec<String> {
    let set: BTreeSet<&str> = rows
        .iter()
        .map(|row| row.incident_type.trim())
        .filter(|t| !t.is_empty())
        .collect();
    set.into_iter().map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "TYPE,YEAR,MONTH,DAY,HOUR,NEIGHBOURHOOD,HUNDRED_BLOCK,X,Y";

    fn raw_from_str(csv_text: &str) -> Vec<RawIncident> {
        let reader = csv::Reader::from_reader(csv_text.as_bytes());
        read_rows(reader, Path::new("test.csv")).unwrap()
    }

    #[test]
    fn raw_load_keeps_rows_without_coordinates() {
        let text = format!(
            "{HEADER}\nTheft of Bicycle,2025,3,14,18,Kitsilano,10XX W BROADWAY,491000.0,5458000.0\nArson,2025,1,1,,,,,\n"
        );
        let rows = raw_from_str(&text);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].incident_type, "Arson");
        assert!(rows[1].x.is_none());
        assert_eq!(rows[1].neighbourhood, None);
    }

    #[test]
    fn malformed_coordinates_become_none() {
        let text = format!("{HEADER}\nMischief,2025,1,5,2,Downtown,1XX MAIN ST,garbage,5458000.0\n");
        let rows = raw_from_str(&text);
        assert_eq!(rows.len(), 1);
        assert!(rows[0].x.is_none());
        assert!((rows[0].y.unwrap() - 5_458_000.0).abs() < f64::EPSILON);
    }

    #[test]
    fn prepared_rows_satisfy_regional_invariant() {
        let text = format!(
            "{HEADER}\n\
             Theft of Vehicle,2025,3,14,18,Kitsilano,10XX W BROADWAY,491000.0,5458000.0\n\
             Mischief,2025,4,2,7,Downtown,1XX MAIN ST,492200.0,5457400.0\n\
             Arson,2025,1,1,,,,,\n"
        );
        let incidents = prepare(raw_from_str(&text), Path::new("test.csv")).unwrap();
        assert_eq!(incidents.len(), 2);
        for incident in &incidents {
            assert!(
                VANCOUVER_BOUNDS.interior_contains(incident.lat, incident.lon),
                "({}, {})",
                incident.lat,
                incident.lon
            );
        }
    }

    #[test]
    fn invalid_dates_are_dropped() {
        // February 30th does not exist.
        let text = format!(
            "{HEADER}\n\
             Mischief,2025,2,30,4,Downtown,1XX MAIN ST,491000.0,5458000.0\n\
             Mischief,2025,2,28,4,Downtown,1XX MAIN ST,491000.0,5458000.0\n"
        );
        let incidents = prepare(raw_from_str(&text), Path::new("test.csv")).unwrap();
        assert_eq!(incidents.len(), 1);
        assert_eq!(incidents[0].date.to_string(), "2025-02-28");
    }

    #[test]
    fn missing_hour_defaults_to_sentinel() {
        let text = format!(
            "{HEADER}\nTheft from Vehicle,2025,6,1,,West End,9XX DENMAN ST,491300.0,5458900.0\n"
        );
        let incidents = prepare(raw_from_str(&text), Path::new("test.csv")).unwrap();
        assert_eq!(incidents[0].hour, -1);
    }

    #[test]
    fn empty_table_fails_with_no_coordinates() {
        let text = format!("{HEADER}\n");
        let err = prepare(raw_from_str(&text), Path::new("test.csv")).unwrap_err();
        assert!(matches!(err, DatasetError::NoCoordinates { .. }));
    }

    #[test]
    fn distinct_types_are_sorted_and_deduplicated() {
        let text = format!(
            "{HEADER}\n\
             Theft of Bicycle,2025,1,1,1,,,491000.0,5458000.0\n\
             Arson,2025,1,2,1,,,491000.0,5458000.0\n\
             \" Theft of Bicycle \",2025,1,3,1,,,491000.0,5458000.0\n\
             \"   \",2025,1,4,1,,,491000.0,5458000.0\n"
        );
        let types = distinct_types(&raw_from_str(&text));
        assert_eq!(types, vec!["Arson", "Theft of Bicycle"]);
    }
}
