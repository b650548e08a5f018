//! HTTP handler functions for the Vancouver crime map API.
//!
//! Every handler reloads the source CSV from scratch; there is no cache
//! to invalidate and nothing shared between requests. Load failures log
//! at error and surface as a 500 with a JSON body.

use actix_web::{HttpResponse, web};
use chrono::NaiveDate;
use van_crime_dataset::filter::{IncidentFilter, parse_type_list};
use van_crime_dataset::{features, loader, neighbourhoods};
use van_crime_server_models::{ApiHealth, ApiNeighbourhood, DataQueryParams, DateMeta};

use crate::AppState;

/// `GET /data`
///
/// Returns the prepared table as a GeoJSON feature collection, filtered
/// by the optional `start`, `end`, `type`, and `neighbourhood` query
/// parameters.
pub async fn data(state: web::Data<AppState>, params: web::Query<DataQueryParams>) -> HttpResponse {
    let start = match parse_date_param(params.start.as_deref()) {
        Ok(date) => date,
        Err(response) => return response,
    };
    let end = match parse_date_param(params.end.as_deref()) {
        Ok(date) => date,
        Err(response) => return response,
    };

    let filter = IncidentFilter {
        start,
        end,
        type_needles: params
            .incident_type
            .as_deref()
            .map(parse_type_list)
            .unwrap_or_default(),
        neighbourhood: params
            .neighbourhood
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string),
    };

    match loader::load_prepared(&state.csv_path) {
        Ok(incidents) => {
            let collection = features::feature_collection(filter.apply(&incidents));
            HttpResponse::Ok().json(collection)
        }
        Err(e) => {
            log::error!("Failed to prepare incidents: {e}");
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "Failed to prepare incidents"
            }))
        }
    }
}

/// `GET /neighbourhoods`
///
/// Returns each neighbourhood with the bounding box of its incidents,
/// ordered alphabetically by name.
pub async fn neighbourhoods(state: web::Data<AppState>) -> HttpResponse {
    match loader::load_prepared(&state.csv_path) {
        Ok(incidents) => {
            let out: Vec<ApiNeighbourhood> = neighbourhoods::neighbourhood_extents(&incidents)
                .into_iter()
                .map(|extent| ApiNeighbourhood {
                    bounds: extent.bounds(),
                    neighbourhood: extent.name,
                })
                .collect();
            HttpResponse::Ok().json(out)
        }
        Err(e) => {
            log::error!("Failed to prepare incidents: {e}");
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "Failed to prepare incidents"
            }))
        }
    }
}

/// `GET /types`
///
/// Returns every distinct incident type present in the raw file, so the
/// front end can offer types the prepared path would filter out.
pub async fn types(state: web::Data<AppState>) -> HttpResponse {
    match loader::load_raw(&state.csv_path) {
        Ok(rows) => HttpResponse::Ok().json(loader::distinct_types(&rows)),
        Err(e) => {
            log::error!("Failed to load incident types: {e}");
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "Failed to load incident types"
            }))
        }
    }
}

/// `GET /date_meta`
///
/// Fixed year/month ranges for the front end's date controls.
pub async fn date_meta() -> HttpResponse {
    HttpResponse::Ok().json(DateMeta::default())
}

/// `GET /health`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Parses an optional `YYYY-MM-DD` date parameter. Blank or missing
/// values are treated as absent; a non-empty value that fails to parse
/// is a 400.
fn parse_date_param(raw: Option<&str>) -> Result<Option<NaiveDate>, HttpResponse> {
    let Some(trimmed) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| {
            HttpResponse::BadRequest().json(serde_json::json!({
                "error": format!("invalid date: {trimmed}, expected YYYY-MM-DD")
            }))
        })
}
