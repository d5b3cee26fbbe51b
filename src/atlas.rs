// 🗺️ Atlas - the explicit store for parks, visitors and trips
//
// Owns one registry per entity type and answers every derived query by
// scanning them on demand. Nothing is cached: a query always reflects the
// registries as they are at call time.
//
// Ordering rules:
// - trips come back in booking order
// - "distinct" results (a park's visitors, a visitor's parks) come back in
//   order of first appearance in the trip registry
// - ties in "max by count" queries follow the configured TieBreak

use crate::config::{AtlasConfig, TieBreak};
use crate::entities::{
    NationalPark, ParkId, ParkRegistry, Trip, TripId, TripRegistry, Visitor, VisitorId,
    VisitorRegistry,
};
use crate::validation::ValidationError;
use std::collections::HashSet;

#[derive(Debug, Clone, Default)]
pub struct Atlas {
    config: AtlasConfig,
    visitors: VisitorRegistry,
    parks: ParkRegistry,
    trips: TripRegistry,
}

impl Atlas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: AtlasConfig) -> Self {
        Atlas {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &AtlasConfig {
        &self.config
    }

    // ========================================================================
    // CONSTRUCTION
    // ========================================================================

    /// Create a visitor and make it resolvable by id. Nothing is stored on failure.
    ///
    /// The returned value is a snapshot; rename through `rename_visitor`.
    pub fn create_visitor(&self, name: impl Into<String>) -> Result<Visitor, ValidationError> {
        let visitor = Visitor::new(name)?;
        self.visitors.register(visitor.clone());
        Ok(visitor)
    }

    /// Create a park and append it to the park registry exactly once
    pub fn create_park(&self, name: impl Into<String>) -> Result<NationalPark, ValidationError> {
        let park = NationalPark::new(name)?;
        self.parks.register(park.clone());
        Ok(park)
    }

    /// Book a trip linking a known visitor and a known park.
    ///
    /// # Errors
    /// `UnknownVisitor` / `UnknownPark` if an id does not resolve here, or a
    /// `Length` error for a date shorter than 7 characters. The trip registry
    /// is unchanged on error.
    ///
    /// The returned trip is a snapshot; change it through the `set_trip_*` methods.
    pub fn book_trip(
        &self,
        visitor_id: VisitorId,
        park_id: ParkId,
        start_date: impl Into<String>,
        end_date: impl Into<String>,
    ) -> Result<Trip, ValidationError> {
        let visitor = self.resolve_visitor(visitor_id)?;
        let park = self.resolve_park(park_id)?;

        let trip = Trip::new(&visitor, &park, start_date, end_date)?;
        self.trips.register(trip.clone());
        Ok(trip)
    }

    // ========================================================================
    // LOOKUPS
    // ========================================================================

    pub fn visitor(&self, id: VisitorId) -> Option<Visitor> {
        self.visitors.find_by_id(id)
    }

    pub fn park(&self, id: ParkId) -> Option<NationalPark> {
        self.parks.find_by_id(id)
    }

    pub fn trip(&self, id: TripId) -> Option<Trip> {
        self.trips.find_by_id(id)
    }

    /// Every registered park, in registration order
    pub fn parks(&self) -> Vec<NationalPark> {
        self.parks.all_parks()
    }

    /// Every registered trip, in booking order
    pub fn trips(&self) -> Vec<Trip> {
        self.trips.all_trips()
    }

    pub fn visitor_count(&self) -> usize {
        self.visitors.count()
    }

    // ========================================================================
    // MUTATION (validate, then assign)
    // ========================================================================

    pub fn rename_visitor(
        &self,
        id: VisitorId,
        name: impl Into<String>,
    ) -> Result<Visitor, ValidationError> {
        self.visitors.rename(id, name)
    }

    pub fn set_trip_visitor(
        &self,
        trip_id: TripId,
        visitor_id: VisitorId,
    ) -> Result<Trip, ValidationError> {
        let visitor = self.resolve_visitor(visitor_id)?;
        self.trips.update_trip(trip_id, |trip| {
            trip.set_visitor(&visitor);
            Ok(())
        })
    }

    pub fn set_trip_national_park(
        &self,
        trip_id: TripId,
        park_id: ParkId,
    ) -> Result<Trip, ValidationError> {
        let park = self.resolve_park(park_id)?;
        self.trips.update_trip(trip_id, |trip| {
            trip.set_national_park(&park);
            Ok(())
        })
    }

    pub fn set_trip_start_date(
        &self,
        trip_id: TripId,
        value: impl Into<String>,
    ) -> Result<Trip, ValidationError> {
        self.trips
            .update_trip(trip_id, |trip| trip.set_start_date(value))
    }

    pub fn set_trip_end_date(
        &self,
        trip_id: TripId,
        value: impl Into<String>,
    ) -> Result<Trip, ValidationError> {
        self.trips.update_trip(trip_id, |trip| trip.set_end_date(value))
    }

    // ========================================================================
    // VISITOR QUERIES
    // ========================================================================

    /// The visitor's trips, in booking order
    pub fn visitor_trips(&self, visitor_id: VisitorId) -> Vec<Trip> {
        self.trips.by_visitor(visitor_id)
    }

    /// Distinct parks the visitor has a trip to
    pub fn visitor_national_parks(&self, visitor_id: VisitorId) -> Vec<NationalPark> {
        let mut seen = HashSet::new();
        self.visitor_trips(visitor_id)
            .into_iter()
            .filter(|trip| seen.insert(trip.park_id()))
            .filter_map(|trip| self.parks.find_by_id(trip.park_id()))
            .collect()
    }

    pub fn total_visits_at_park(&self, visitor_id: VisitorId, park_id: ParkId) -> usize {
        self.trips
            .count_where(|t| t.is_for_visitor(visitor_id) && t.is_at_park(park_id))
    }

    // ========================================================================
    // PARK QUERIES
    // ========================================================================

    /// The park's trips, in booking order
    pub fn park_trips(&self, park_id: ParkId) -> Vec<Trip> {
        self.trips.by_park(park_id)
    }

    /// Distinct visitors with a trip to the park
    pub fn park_visitors(&self, park_id: ParkId) -> Vec<Visitor> {
        let mut seen = HashSet::new();
        self.park_trips(park_id)
            .into_iter()
            .filter(|trip| seen.insert(trip.visitor_id()))
            .filter_map(|trip| self.visitors.find_by_id(trip.visitor_id()))
            .collect()
    }

    pub fn total_visits(&self, park_id: ParkId) -> usize {
        self.trips.count_where(|t| t.is_at_park(park_id))
    }

    /// The visitor with the most trips to this park; `None` if nobody went
    pub fn best_visitor(&self, park_id: ParkId) -> Option<Visitor> {
        let candidates = self.park_visitors(park_id).into_iter().map(|visitor| {
            let visits = self.total_visits_at_park(visitor.id(), park_id);
            (visitor, visits)
        });

        select_max(candidates, self.config.tie_break, |v| v.name())
    }

    /// The registered park with the most trips; `None` if no park exists.
    ///
    /// Parks with zero trips are still candidates, so with parks but no trips
    /// this returns the tie-break winner among all of them.
    pub fn most_visited(&self) -> Option<NationalPark> {
        let candidates = self.parks().into_iter().map(|park| {
            let visits = self.total_visits(park.id());
            (park, visits)
        });

        select_max(candidates, self.config.tie_break, |p| p.name())
    }

    // ========================================================================
    // HELPERS
    // ========================================================================

    fn resolve_visitor(&self, id: VisitorId) -> Result<Visitor, ValidationError> {
        self.visitors.find_by_id(id).ok_or_else(|| {
            tracing::warn!(visitor = %id, "trip references unknown visitor");
            ValidationError::UnknownVisitor(id)
        })
    }

    fn resolve_park(&self, id: ParkId) -> Result<NationalPark, ValidationError> {
        self.parks.find_by_id(id).ok_or_else(|| {
            tracing::warn!(park = %id, "trip references unknown national park");
            ValidationError::UnknownPark(id)
        })
    }
}

/// Max-by-count over candidates given in registration order.
///
/// A later candidate only wins a tie under `LexicographicName`, and only with
/// a strictly smaller name.
fn select_max<T, N>(
    candidates: impl IntoIterator<Item = (T, usize)>,
    tie_break: TieBreak,
    name: N,
) -> Option<T>
where
    N: Fn(&T) -> &str,
{
    let mut best: Option<(T, usize)> = None;

    for (candidate, count) in candidates {
        let replace = match &best {
            None => true,
            Some((current, best_count)) => {
                count > *best_count
                    || (count == *best_count
                        && tie_break == TieBreak::LexicographicName
                        && name(&candidate) < name(current))
            }
        };

        if replace {
            best = Some((candidate, count));
        }
    }

    best.map(|(winner, _)| winner)
}

// ============================================================================
// TESTS
// ============================================================================
