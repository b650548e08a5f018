//! Grouping and marker styling for the static map.
//!
//! Incidents at the same exact coordinate collapse into one marker whose
//! popup carries the incident count and the maximum severity score among
//! them. Marker fill encodes count, not severity; the severity score
//! only surfaces in the popup text.

use std::collections::HashMap;

use serde::Serialize;
use van_crime_models::{Incident, classify_severity};

use crate::template;

/// All incidents sharing one exact coordinate.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerGroup {
    /// Latitude of the shared coordinate.
    pub lat: f64,
    /// Longitude of the shared coordinate.
    pub lon: f64,
    /// Number of incidents at this coordinate.
    pub count: usize,
    /// Maximum classifier severity score among the group.
    pub severity: u8,
}

/// Groups incidents by exact `(lat, lon)` pair, computing the count and
/// maximum severity per location.
///
/// Output is sorted by `(lat, lon)` so repeated runs over the same input
/// produce identical marker order regardless of row iteration order.
#[must_use]
pub fn group_by_location(incidents: &[Incident]) -> Vec<MarkerGroup> {
    // Grouping is on the exact bit pattern, so two coordinates compare
    // equal only when the source values were identical.
    let mut groups: HashMap<(u64, u64), MarkerGroup> = HashMap::new();

    for incident in incidents {
        let (severity, _color) = classify_severity(&incident.incident_type);
        let entry = groups
            .entry((incident.lat.to_bits(), incident.lon.to_bits()))
            .or_insert(MarkerGroup {
                lat: incident.lat,
                lon: incident.lon,
                count: 0,
                severity: 0,
            });
        entry.count += 1;
        entry.severity = entry.severity.max(severity.value());
    }

    let mut out: Vec<MarkerGroup> = groups.into_values().collect();
    out.sort_by(|a, b| a.lat.total_cmp(&b.lat).then_with(|| a.lon.total_cmp(&b.lon)));
    out
}

/// Fill color for a marker, on a count gradient from blue to red.
#[must_use]
pub const fn color_for_count(count: usize) -> &'static str {
    match count {
        0..=1 => "#2b83ba",
        2..=3 => "#ffffbf",
        4..=6 => "#fdae61",
        _ => "#d7191c",
    }
}

/// Marker radius, growing sub-linearly so hotspot locations stay legible.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn radius_for_count(count: usize) -> f64 {
    4.0 + 6.0 * (count as f64).ln_1p()
}

/// One marker as embedded in the output document.
#[derive(Debug, Serialize)]
struct Marker {
    lat: f64,
    lon: f64,
    count: usize,
    severity: u8,
    color: &'static str,
    radius: f64,
}

/// Renders the full output document with the marker payload embedded.
///
/// # Errors
///
/// Returns an error if the marker payload fails to serialize.
pub fn render_map(groups: &[MarkerGroup]) -> Result<String, serde_json::Error> {
    let markers: Vec<Marker> = groups
        .iter()
        .map(|group| Marker {
            lat: group.lat,
            lon: group.lon,
            count: group.count,
            severity: group.severity,
            color: color_for_count(group.count),
            radius: radius_for_count(group.count),
        })
        .collect();

    let payload = serde_json::to_string(&markers)?;
    Ok(template::MAP_HTML.replacen("__MARKERS__", &payload, 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn incident(incident_type: &str, lat: f64, lon: f64) -> Incident {
        Incident {
            incident_type: incident_type.to_string(),
            date: "2025-01-01".parse().unwrap(),
            hour: 12,
            neighbourhood: None,
            hundred_block: None,
            lon,
            lat,
        }
    }

    #[test]
    fn groups_aggregate_count_and_max_severity() {
        let rows = vec![
            incident("Mischief", 49.25, -123.12),
            incident("Homicide", 49.25, -123.12),
            incident("Mischief", 49.26, -123.10),
        ];
        let groups = group_by_location(&rows);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].count, 2);
        assert_eq!(groups[0].severity, 5);
        assert_eq!(groups[1].count, 1);
        assert_eq!(groups[1].severity, 2);
    }

    #[test]
    fn grouping_is_independent_of_row_order() {
        let forward = vec![
            incident("Mischief", 49.25, -123.12),
            incident("Arson", 49.26, -123.10),
            incident("Homicide", 49.25, -123.12),
        ];
        let mut reversed = forward.clone();
        reversed.reverse();

        assert_eq!(group_by_location(&forward), group_by_location(&reversed));
    }

    #[test]
    fn groups_are_sorted_by_coordinate() {
        let rows = vec![
            incident("Mischief", 49.30, -123.00),
            incident("Mischief", 49.20, -123.20),
            incident("Mischief", 49.20, -123.30),
        ];
        let groups = group_by_location(&rows);
        let coords: Vec<(f64, f64)> = groups.iter().map(|g| (g.lat, g.lon)).collect();
        assert_eq!(
            coords,
            vec![(49.20, -123.30), (49.20, -123.20), (49.30, -123.00)]
        );
    }

    #[test]
    fn count_gradient_thresholds() {
        assert_eq!(color_for_count(1), "#2b83ba");
        assert_eq!(color_for_count(3), "#ffffbf");
        assert_eq!(color_for_count(6), "#fdae61");
        assert_eq!(color_for_count(7), "#d7191c");
    }

    #[test]
    fn radius_grows_sublinearly() {
        assert!((radius_for_count(1) - (6.0 * 2.0_f64.ln() + 4.0)).abs() < 1e-12);
        let r10 = radius_for_count(10);
        let r100 = radius_for_count(100);
        assert!(r100 - r10 < r10, "radius growth should flatten");
    }

    #[test]
    fn render_embeds_markers_and_cluster_layer() {
        let rows = vec![incident("Arson", 49.25, -123.12)];
        let html = render_map(&group_by_location(&rows)).unwrap();

        assert!(!html.contains("__MARKERS__"));
        assert!(html.contains("\"lat\":49.25"));
        assert!(html.contains("\"count\":1"));
        assert!(html.contains("markerClusterGroup"));
    }
}
