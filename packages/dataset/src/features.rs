//! GeoJSON serialization of prepared incidents.
//!
//! Each incident becomes a point feature with longitude-first
//! coordinates. Features keep the input row order; nothing is resorted.

use geojson::{Feature, FeatureCollection, Geometry, JsonObject, Value};
use van_crime_models::Incident;

/// Converts incidents into a GeoJSON feature collection.
#[must_use]
pub fn feature_collection<'a, I>(incidents: I) -> FeatureCollection
where
    I: IntoIterator<Item = &'a Incident>,
{
    FeatureCollection {
        bbox: None,
        features: incidents.into_iter().map(to_feature).collect(),
        foreign_members: None,
    }
}

fn to_feature(incident: &Incident) -> Feature {
    let mut properties = JsonObject::new();
    properties.insert("type".to_string(), incident.incident_type.clone().into());
    properties.insert(
        "date".to_string(),
        incident.date.format("%Y-%m-%d").to_string().into(),
    );
    properties.insert("hour".to_string(), incident.hour.into());
    properties.insert(
        "neighbourhood".to_string(),
        incident.neighbourhood.clone().unwrap_or_default().into(),
    );
    properties.insert(
        "hundred_block".to_string(),
        incident.hundred_block.clone().unwrap_or_default().into(),
    );

    Feature {
        bbox: None,
        // GeoJSON positions are longitude first.
        geometry: Some(Geometry::new(Value::Point(vec![incident.lon, incident.lat]))),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn incident(lon: f64, lat: f64) -> Incident {
        Incident {
            incident_type: "Theft of Bicycle".to_string(),
            date: "2025-03-14".parse().unwrap(),
            hour: 18,
            neighbourhood: Some("Kitsilano".to_string()),
            hundred_block: None,
            lon,
            lat,
        }
    }

    #[test]
    fn coordinates_are_longitude_first() {
        let rows = vec![incident(-123.15, 49.27)];
        let collection = feature_collection(&rows);
        let feature = &collection.features[0];

        let Some(Geometry {
            value: Value::Point(coords),
            ..
        }) = &feature.geometry
        else {
            panic!("expected a point geometry");
        };
        assert!((coords[0] - -123.15).abs() < f64::EPSILON);
        assert!((coords[1] - 49.27).abs() < f64::EPSILON);
    }

    #[test]
    fn properties_carry_defaults_for_absent_fields() {
        let rows = vec![incident(-123.1, 49.25)];
        let collection = feature_collection(&rows);
        let properties = collection.features[0].properties.as_ref().unwrap();

        assert_eq!(properties["type"], "Theft of Bicycle");
        assert_eq!(properties["date"], "2025-03-14");
        assert_eq!(properties["hour"], 18);
        assert_eq!(properties["neighbourhood"], "Kitsilano");
        assert_eq!(properties["hundred_block"], "");
    }

    #[test]
    fn row_order_is_preserved() {
        let rows = vec![incident(-123.2, 49.21), incident(-123.1, 49.29)];
        let collection = feature_collection(&rows);
        assert_eq!(collection.features.len(), 2);

        let lons: Vec<f64> = collection
            .features
            .iter()
            .map(|f| match &f.geometry {
                Some(Geometry {
                    value: Value::Point(coords),
                    ..
                }) => coords[0],
                _ => panic!("expected a point geometry"),
            })
            .collect();
        assert!((lons[0] - -123.2).abs() < f64::EPSILON);
        assert!((lons[1] - -123.1).abs() < f64::EPSILON);
    }
}
