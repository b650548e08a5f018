#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Source CRS detection and WGS84 reprojection.
//!
//! Vancouver PD exports carry projected X/Y coordinates without declaring
//! their reference system. Historically the data has shipped in either
//! Statistics Canada Lambert (EPSG:3347) or NAD83 / UTM zone 10N
//! (EPSG:26910), so we try those two in order and keep the first whose
//! transform of a sample coordinate lands inside the Greater Vancouver
//! bounding box. This is a one-shot heuristic, not CRS inference: it is
//! only correct because the expected output region is known and small.
//!
//! Detection is a pure function from a coordinate sample to a reusable
//! [`CoordTransform`], kept separate from bulk transformation so it can
//! be tested with synthetic coordinates.

use proj4rs::proj::Proj;
use proj4rs::transform::transform;

/// Candidate source reference systems, tried in order.
pub const CANDIDATE_EPSG: [u32; 2] = [3347, 26910];

/// WGS84 geographic coordinates.
const EPSG_WGS84: u32 = 4326;

/// Errors from projection setup or coordinate transformation.
#[derive(Debug, thiserror::Error)]
pub enum GeoError {
    /// A projection failed to initialize from its proj string.
    #[error("projection init failed for EPSG:{epsg}: {message}")]
    Projection {
        /// EPSG code of the projection that failed.
        epsg: u32,
        /// Underlying proj4rs failure.
        message: String,
    },

    /// A coordinate failed to transform.
    #[error("transform failed for ({x}, {y}): {message}")]
    Transform {
        /// Input easting.
        x: f64,
        /// Input northing.
        y: f64,
        /// Underlying proj4rs failure.
        message: String,
    },

    /// No candidate EPSG code produced coordinates inside the expected
    /// region. The source CRS list needs updating before the dataset can
    /// be used.
    #[error(
        "no candidate EPSG code matched: none of {candidates:?} lands inside {bounds}"
    )]
    NoCrsMatched {
        /// The EPSG codes that were tried.
        candidates: Vec<u32>,
        /// The region the sample coordinate was expected to land in.
        bounds: RegionBounds,
    },
}

/// A geographic bounding box in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionBounds {
    /// Southern edge.
    pub lat_min: f64,
    /// Northern edge.
    pub lat_max: f64,
    /// Western edge.
    pub lon_min: f64,
    /// Eastern edge.
    pub lon_max: f64,
}

/// Greater Vancouver, generously padded.
pub const VANCOUVER_BOUNDS: RegionBounds = RegionBounds {
    lat_min: 48.0,
    lat_max: 50.5,
    lon_min: -125.0,
    lon_max: -122.0,
};

impl RegionBounds {
    /// Whether the point lies inside the box, edges included.
    #[must_use]
    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        lat >= self.lat_min && lat <= self.lat_max && lon >= self.lon_min && lon <= self.lon_max
    }

    /// Whether the point lies strictly inside the box, edges excluded.
    /// Used for the post-transform sanity filter.
    #[must_use]
    pub fn interior_contains(&self, lat: f64, lon: f64) -> bool {
        lat > self.lat_min && lat < self.lat_max && lon > self.lon_min && lon < self.lon_max
    }
}

impl std::fmt::Display for RegionBounds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "lat [{}, {}], lon [{}, {}]",
            self.lat_min, self.lat_max, self.lon_min, self.lon_max
        )
    }
}

/// Proj strings for the EPSG codes this crate knows about.
///
/// proj4rs has no built-in EPSG registry, so the definitions live here.
const fn proj_string(epsg: u32) -> Option<&'static str> {
    match epsg {
        // Statistics Canada Lambert
        3347 => Some(
            "+proj=lcc +lat_1=49 +lat_2=77 +lat_0=63.390675 +lon_0=-91.866666666666667 \
             +x_0=6200000 +y_0=3000000 +ellps=GRS80 +towgs84=0,0,0,0,0,0,0 +units=m +no_defs",
        ),
        // NAD83 / UTM zone 10N
        26910 => Some(
            "+proj=utm +zone=10 +ellps=GRS80 +towgs84=0,0,0,0,0,0,0 +units=m +no_defs",
        ),
        // WGS84 geographic
        4326 => Some("+proj=longlat +datum=WGS84 +no_defs"),
        _ => None,
    }
}

/// A reusable transform from one projected CRS to WGS84 lon/lat degrees.
pub struct CoordTransform {
    source: Proj,
    target: Proj,
    epsg: u32,
}

impl std::fmt::Debug for CoordTransform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoordTransform")
            .field("epsg", &self.epsg)
            .finish_non_exhaustive()
    }
}

impl CoordTransform {
    /// Builds a transform from the given projected EPSG code to WGS84.
    ///
    /// # Errors
    ///
    /// Returns [`GeoError::Projection`] if the EPSG code is unknown to
    /// this crate or its proj string fails to parse.
    pub fn from_epsg(epsg: u32) -> Result<Self, GeoError> {
        let source_str = proj_string(epsg).ok_or_else(|| GeoError::Projection {
            epsg,
            message: "no proj string registered".to_string(),
        })?;
        let source = Proj::from_proj_string(source_str).map_err(|e| GeoError::Projection {
            epsg,
            message: format!("{e:?}"),
        })?;

        // proj_string always knows 4326, so only a parse failure can
        // surface here.
        let target_str = proj_string(EPSG_WGS84).ok_or_else(|| GeoError::Projection {
            epsg: EPSG_WGS84,
            message: "no proj string registered".to_string(),
        })?;
        let target = Proj::from_proj_string(target_str).map_err(|e| GeoError::Projection {
            epsg: EPSG_WGS84,
            message: format!("{e:?}"),
        })?;

        Ok(Self {
            source,
            target,
            epsg,
        })
    }

    /// EPSG code of the source projection.
    #[must_use]
    pub const fn epsg(&self) -> u32 {
        self.epsg
    }

    /// Transforms a projected `(x, y)` to WGS84 `(lon, lat)` in degrees.
    ///
    /// The source CRS is always projected (meters) and the target always
    /// geographic, so only the output needs radian conversion.
    ///
    /// # Errors
    ///
    /// Returns [`GeoError::Transform`] if the coordinate cannot be
    /// transformed (e.g. it lies outside the projection's valid domain).
    pub fn to_wgs84(&self, x: f64, y: f64) -> Result<(f64, f64), GeoError> {
        let mut point = (x, y, 0.0);

        transform(&self.source, &self.target, &mut point).map_err(|e| GeoError::Transform {
            x,
            y,
            message: format!("{e:?}"),
        })?;

        Ok((point.0.to_degrees(), point.1.to_degrees()))
    }
}

/// Detects the source CRS of a projected coordinate sample.
///
/// Tries each candidate in [`CANDIDATE_EPSG`] order and returns the first
/// transform whose output lands inside `bounds`. Candidates that fail to
/// initialize or transform are skipped.
///
/// # Errors
///
/// Returns [`GeoError::NoCrsMatched`] if no candidate qualifies. There is
/// deliberately no fallback: proceeding with an unverified projection
/// would silently misplace every incident.
pub fn detect_transform(x: f64, y: f64, bounds: &RegionBounds) -> Result<CoordTransform, GeoError> {
    for &epsg in &CANDIDATE_EPSG {
        let coord_transform = match CoordTransform::from_epsg(epsg) {
            Ok(t) => t,
            Err(e) => {
                log::warn!("skipping candidate EPSG:{epsg}: {e}");
                continue;
            }
        };
        let Ok((lon, lat)) = coord_transform.to_wgs84(x, y) else {
            log::debug!("candidate EPSG:{epsg} failed to transform sample ({x}, {y})");
            continue;
        };
        if bounds.contains(lat, lon) {
            log::info!("detected source CRS EPSG:{epsg}");
            return Ok(coord_transform);
        }
        log::debug!("candidate EPSG:{epsg} maps sample to ({lat}, {lon}), outside {bounds}");
    }

    Err(GeoError::NoCrsMatched {
        candidates: CANDIDATE_EPSG.to_vec(),
        bounds: *bounds,
    })
}
