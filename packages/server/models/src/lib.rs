#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the Vancouver crime map server.
//!
//! These types are serialized to JSON for the REST API. Key spellings
//! (`neighbourhood`, `bounds`, `years`, `months`) match the front end's
//! existing contract and must not be renamed.

use serde::{Deserialize, Serialize};

/// Query parameters for the `/data` endpoint.
///
/// Dates and substrings arrive as raw strings; blank values are treated
/// as absent by the handler, mirroring how the front end omits unused
/// controls.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DataQueryParams {
    /// Inclusive start date, `YYYY-MM-DD`.
    pub start: Option<String>,
    /// Inclusive end date, `YYYY-MM-DD`.
    pub end: Option<String>,
    /// Comma-separated incident type substrings, any-match.
    #[serde(rename = "type")]
    pub incident_type: Option<String>,
    /// Neighbourhood substring.
    pub neighbourhood: Option<String>,
}

/// One entry in the `/neighbourhoods` response.
#[derive(Debug, Clone, Serialize)]
pub struct ApiNeighbourhood {
    /// Neighbourhood name.
    pub neighbourhood: String,
    /// Bounding box as `[lat_min, lon_min, lat_max, lon_max]`.
    pub bounds: [f64; 4],
}

/// The `/date_meta` response. Fixed configuration, not derived from data.
#[derive(Debug, Clone, Serialize)]
pub struct DateMeta {
    /// Selectable years.
    pub years: Vec<i32>,
    /// Selectable months.
    pub months: Vec<u32>,
}

impl Default for DateMeta {
    fn default() -> Self {
        Self {
            years: (2020..=2025).collect(),
            months: (1..=12).collect(),
        }
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Whether the service is healthy.
    pub healthy: bool,
    /// Service version.
    pub version: String,
}
