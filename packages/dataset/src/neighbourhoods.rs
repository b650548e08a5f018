//! Per-neighbourhood bounding boxes over prepared incidents.

use std::collections::BTreeMap;

use van_crime_models::Incident;

/// A neighbourhood and the bounding box of its incidents.
#[derive(Debug, Clone, PartialEq)]
pub struct NeighbourhoodExtent {
    /// Neighbourhood name as it appears in the source data.
    pub name: String,
    /// Southern edge.
    pub lat_min: f64,
    /// Western edge.
    pub lon_min: f64,
    /// Northern edge.
    pub lat_max: f64,
    /// Eastern edge.
    pub lon_max: f64,
}

impl NeighbourhoodExtent {
    /// Bounds in `[lat_min, lon_min, lat_max, lon_max]` order.
    #[must_use]
    pub const fn bounds(&self) -> [f64; 4] {
        [self.lat_min, self.lon_min, self.lat_max, self.lon_max]
    }
}

/// Groups incidents by neighbourhood and computes each group's bounding
/// box. Incidents without a neighbourhood are excluded. Results are
/// ordered alphabetically by name.
#[must_use]
pub fn neighbourhood_extents(incidents: &[Incident]) -> Vec<NeighbourhoodExtent> {
    let mut extents: BTreeMap<&str, (f64, f64, f64, f64)> = BTreeMap::new();

    for incident in incidents {
        let Some(name) = incident.neighbourhood.as_deref() else {
            continue;
        };
        let entry = extents.entry(name).or_insert((
            incident.lat,
            incident.lon,
            incident.lat,
            incident.lon,
        ));
        entry.0 = entry.0.min(incident.lat);
        entry.1 = entry.1.min(incident.lon);
        entry.2 = entry.2.max(incident.lat);
        entry.3 = entry.3.max(incident.lon);
    }

    extents
        .into_iter()
        .map(
            |(name, (lat_min, lon_min, lat_max, lon_max))| NeighbourhoodExtent {
                name: name.to_string(),
                lat_min,
                lon_min,
                lat_max,
                lon_max,
            },
        )
        .collect()
}
