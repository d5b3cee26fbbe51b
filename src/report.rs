// 📊 Atlas Report - serializable snapshot of the derived queries

use crate::atlas::Atlas;
use serde::Serialize;

/// Per-park line of the report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParkSummary {
    pub name: String,
    pub total_visits: usize,
    pub visitor_count: usize,
    pub best_visitor: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AtlasReport {
    pub park_count: usize,
    pub visitor_count: usize,
    pub trip_count: usize,
    pub most_visited: Option<String>,

    /// One entry per park, in registration order
    pub parks: Vec<ParkSummary>,
}

impl Atlas {
    /// Run every derived query once and collect the answers
    pub fn report(&self) -> AtlasReport {
        let parks: Vec<ParkSummary> = self
            .parks()
            .into_iter()
            .map(|park| ParkSummary {
                name: park.name().to_string(),
                total_visits: self.total_visits(park.id()),
                visitor_count: self.park_visitors(park.id()).len(),
                best_visitor: self
                    .best_visitor(park.id())
                    .map(|v| v.name().to_string()),
            })
            .collect();

        AtlasReport {
            park_count: parks.len(),
            visitor_count: self.visitor_count(),
            trip_count: self.trips().len(),
            most_visited: self.most_visited().map(|p| p.name().to_string()),
            parks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_report() {
        let report = Atlas::new().report();

        assert_eq!(report.park_count, 0);
        assert_eq!(report.trip_count, 0);
        assert!(report.most_visited.is_none());
        assert!(report.parks.is_empty());
    }

    #[test]
    fn test_report_summaries() {
        let atlas = Atlas::new();
        let ama = atlas.create_visitor("Ama").unwrap();
        let kofi = atlas.create_visitor("Kofi").unwrap();
        let zion = atlas.create_park("Zion").unwrap();
        atlas.create_park("Acadia").unwrap();

        atlas.book_trip(ama.id(), zion.id(), "2023-01-01", "2023-01-05").unwrap();
        atlas.book_trip(kofi.id(), zion.id(), "2023-02-01", "2023-02-05").unwrap();
        atlas.book_trip(kofi.id(), zion.id(), "2023-03-01", "2023-03-05").unwrap();

        let report = atlas.report();
        assert_eq!(report.park_count, 2);
        assert_eq!(report.visitor_count, 2);
        assert_eq!(report.trip_count, 3);
        assert_eq!(report.most_visited.as_deref(), Some("Zion"));

        assert_eq!(
            report.parks[0],
            ParkSummary {
                name: "Zion".to_string(),
                total_visits: 3,
                visitor_count: 2,
                best_visitor: Some("Kofi".to_string()),
            }
        );
        assert_eq!(report.parks[1].total_visits, 0);
        assert_eq!(report.parks[1].best_visitor, None);
    }

    #[test]
    fn test_report_serializes_to_json() {
        let atlas = Atlas::new();
        atlas.create_park("Glacier").unwrap();

        let json = serde_json::to_value(atlas.report()).unwrap();
        assert_eq!(json["park_count"], 1);
        assert_eq!(json["parks"][0]["name"], "Glacier");
        assert!(json["parks"][0]["best_visitor"].is_null());
    }
}
