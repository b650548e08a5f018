#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Incident record types and the severity taxonomy for the Vancouver
//! crime map.
//!
//! The severity classifier maps free-text Vancouver PD incident types to
//! an ordinal score and a marker color via ordered keyword rules. Rule
//! order is significant: the first matching rule wins, never the most
//! specific one.

pub mod classify;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

pub use classify::classify_severity;

/// A crime incident after preparation: coordinates reprojected to WGS84
/// and the calendar date composed from the source's YEAR/MONTH/DAY fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Incident {
    /// Free-text incident category (e.g. "Theft of Vehicle").
    pub incident_type: String,
    /// Calendar date the incident occurred.
    pub date: NaiveDate,
    /// Hour of day, or `-1` when the source omits it.
    pub hour: i32,
    /// Neighbourhood name. `None` when the source row has no value.
    pub neighbourhood: Option<String>,
    /// Block-level address. `None` when the source row has no value.
    pub hundred_block: Option<String>,
    /// Longitude (WGS84).
    pub lon: f64,
    /// Latitude (WGS84).
    pub lat: f64,
}

/// Severity level for an incident, from 1 (minimal) to 5 (critical).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    /// Level 1: non-criminal or negligible offenses
    Minimal = 1,
    /// Level 2: low-level offenses (mischief, drug possession)
    Low = 2,
    /// Level 3: property offenses (theft, break and enter)
    Moderate = 3,
    /// Level 4: offenses against persons (assault, robbery)
    High = 4,
    /// Level 5: most severe offenses (homicide, arson)
    Critical = 5,
}

impl Severity {
    /// Returns the numeric value of this severity level.
    #[must_use]
    pub const fn value(self) -> u8 {
        self as u8
    }

    /// Creates a severity level from a numeric value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not in the range 1-5.
    pub const fn from_value(value: u8) -> Result<Self, InvalidSeverityError> {
        match value {
            1 => Ok(Self::Minimal),
            2 => Ok(Self::Low),
            3 => Ok(Self::Moderate),
            4 => Ok(Self::High),
            5 => Ok(Self::Critical),
            _ => Err(InvalidSeverityError { value }),
        }
    }
}

/// Error returned when attempting to create a [`Severity`] from an invalid
/// numeric value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidSeverityError {
    /// The invalid severity value that was provided.
    pub value: u8,
}

impl std::fmt::Display for InvalidSeverityError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid severity value {}: expected 1-5", self.value)
    }
}

impl std::error::Error for InvalidSeverityError {}

/// Leaflet marker color assigned alongside a severity score.
///
/// The Display form is the lowercase color name Leaflet understands
/// (`"darkred"`, `"lightblue"`, ...).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum MarkerColor {
    /// Homicide-tier incidents.
    DarkRed,
    /// Arson.
    Red,
    /// Offenses against persons.
    Orange,
    /// Property offenses.
    Yellow,
    /// Drug and public-order offenses, or an empty incident type.
    Blue,
    /// Anything that matches no keyword rule.
    LightBlue,
}
