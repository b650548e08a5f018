//! Caller-supplied predicates over the prepared table.
//!
//! All predicates are optional and compose by logical AND. An empty
//! filter passes the entire table through unchanged.

use chrono::NaiveDate;
use van_crime_models::Incident;

/// Optional predicates applied to prepared incidents.
#[derive(Debug, Default, Clone)]
pub struct IncidentFilter {
    /// Inclusive lower date bound.
    pub start: Option<NaiveDate>,
    /// Inclusive upper date bound.
    pub end: Option<NaiveDate>,
    /// Lowercased substrings matched against TYPE; a row is kept when it
    /// contains any of them. Empty means no type filtering.
    pub type_needles: Vec<String>,
    /// Substring matched case-insensitively against NEIGHBOURHOOD.
    pub neighbourhood: Option<String>,
}

impl IncidentFilter {
    /// Whether the incident passes every configured predicate.
    #[must_use]
    pub fn matches(&self, incident: &Incident) -> bool {
        if let Some(start) = self.start
            && incident.date < start
        {
            return false;
        }
        if let Some(end) = self.end
            && incident.date > end
        {
            return false;
        }

        if !self.type_needles.is_empty() {
            let lower = incident.incident_type.to_lowercase();
            if !self
                .type_needles
                .iter()
                .any(|needle| lower.contains(needle.as_str()))
            {
                return false;
            }
        }

        if let Some(needle) = &self.neighbourhood {
            // An absent neighbourhood never matches a substring filter.
            let Some(neighbourhood) = &incident.neighbourhood else {
                return false;
            };
            if !neighbourhood
                .to_lowercase()
                .contains(&needle.to_lowercase())
            {
                return false;
            }
        }

        true
    }

    /// Applies the filter, preserving table row order.
    #[must_use]
    pub fn apply<'a>(&self, incidents: &'a [Incident]) -> Vec<&'a Incident> {
        incidents
            .iter()
            .filter(|incident| self.matches(incident))
            .collect()
    }
}

/// Parses a comma-separated type parameter into lowercased needles.
///
/// Empty and whitespace-only entries are ignored; an empty result means
/// the type filter is a no-op.
#[must_use]
pub fn parse_type_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn incident(incident_type: &str, date: &str, neighbourhood: Option<&str>) -> Incident {
        Incident {
            incident_type: incident_type.to_string(),
            date: date.parse().unwrap(),
            hour: 12,
            neighbourhood: neighbourhood.map(str::to_string),
            hundred_block: Some("10XX EXAMPLE ST".to_string()),
            lon: -123.1,
            lat: 49.26,
        }
    }

    #[test]
    fn empty_filter_passes_everything() {
        let rows = vec![
            incident("Mischief", "2025-01-01", Some("Downtown")),
            incident("Arson", "2025-06-01", None),
        ];
        let filter = IncidentFilter::default();
        assert_eq!(filter.apply(&rows).len(), 2);
    }

    #[test]
    fn date_bounds_are_inclusive_and_conjunctive() {
        let rows = vec![
            incident("Mischief", "2025-01-01", None),
            incident("Mischief", "2025-02-15", None),
            incident("Mischief", "2025-03-31", None),
        ];
        let filter = IncidentFilter {
            start: Some("2025-02-15".parse().unwrap()),
            end: Some("2025-03-31".parse().unwrap()),
            ..IncidentFilter::default()
        };
        let kept = filter.apply(&rows);
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0].date.to_string(), "2025-02-15");
    }

    #[test]
    fn type_filter_is_case_insensitive_any_match() {
        let rows = vec![
            incident("Theft of Vehicle", "2025-01-01", None),
            incident("Mischief", "2025-01-02", None),
            incident("Break and Enter Commercial", "2025-01-03", None),
        ];
        let filter = IncidentFilter {
            type_needles: parse_type_list("THEFT, break and enter"),
            ..IncidentFilter::default()
        };
        let kept = filter.apply(&rows);
        assert_eq!(kept.len(), 2);
    }

    #[test]
    fn blank_type_entries_make_the_filter_a_noop() {
        assert!(parse_type_list(" , ,  ").is_empty());
        assert_eq!(parse_type_list("Theft,, "), vec!["theft"]);
    }

    #[test]
    fn absent_neighbourhood_never_matches() {
        let rows = vec![
            incident("Mischief", "2025-01-01", Some("West End")),
            incident("Mischief", "2025-01-02", None),
        ];
        let filter = IncidentFilter {
            neighbourhood: Some("west".to_string()),
            ..IncidentFilter::default()
        };
        let kept = filter.apply(&rows);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].neighbourhood.as_deref(), Some("West End"));
    }

    #[test]
    fn predicates_compose_with_and() {
        let rows = vec![
            incident("Theft of Vehicle", "2025-01-01", Some("Downtown")),
            incident("Theft of Vehicle", "2025-06-01", Some("Downtown")),
            incident("Mischief", "2025-01-01", Some("Downtown")),
        ];
        let filter = IncidentFilter {
            end: Some("2025-03-01".parse().unwrap()),
            type_needles: parse_type_list("theft"),
            ..IncidentFilter::default()
        };
        let kept = filter.apply(&rows);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].date.to_string(), "2025-01-01");
    }
}
