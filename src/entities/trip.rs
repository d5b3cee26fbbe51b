// 🥾 Trip Entity - joins one Visitor and one NationalPark over a date range
//
// Foreign keys (visitor_id, park_id) point at the visitor and park; the trip
// never owns them. Every reverse query ("this park's trips", "this visitor's
// trips") is a scan over the TripRegistry.
//
// Start and end dates are independent strings: there is no check that
// start <= end.

use super::park::{NationalPark, ParkId};
use super::visitor::{Visitor, VisitorId};
use crate::validation::{self, ValidationError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

// ============================================================================
// TRIP ID
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TripId(uuid::Uuid);

impl TripId {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for TripId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TripId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// TRIP ENTITY
// ============================================================================

/// Trip Entity
///
/// Identity: `id`
/// Values: `visitor_id`, `park_id`, `start_date`, `end_date`. Each can be
/// reassigned, and each assignment is validated on its own.
///
/// Registered trips are changed through `TripRegistry::update_trip`; the
/// setters here are only reachable from inside the crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TripRecord")]
pub struct Trip {
    id: TripId,

    /// Visitor ID (foreign key to Visitor)
    visitor_id: VisitorId,

    /// Park ID (foreign key to NationalPark)
    park_id: ParkId,

    /// Free-form date strings, at least 7 characters each
    start_date: String,
    end_date: String,

    booked_at: DateTime<Utc>,
}

impl Trip {
    /// Create a trip. Taking `&Visitor` / `&NationalPark` means only real
    /// entities can be linked; the two dates are checked here.
    pub fn new(
        visitor: &Visitor,
        national_park: &NationalPark,
        start_date: impl Into<String>,
        end_date: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let start_date = start_date.into();
        let end_date = end_date.into();
        validation::trip_date("start_date", &start_date)?;
        validation::trip_date("end_date", &end_date)?;

        Ok(Trip {
            id: TripId::new(),
            visitor_id: visitor.id(),
            park_id: national_park.id(),
            start_date,
            end_date,
            booked_at: Utc::now(),
        })
    }

    pub fn id(&self) -> TripId {
        self.id
    }

    pub fn visitor_id(&self) -> VisitorId {
        self.visitor_id
    }

    pub fn park_id(&self) -> ParkId {
        self.park_id
    }

    pub fn start_date(&self) -> &str {
        &self.start_date
    }

    pub fn end_date(&self) -> &str {
        &self.end_date
    }

    pub fn booked_at(&self) -> DateTime<Utc> {
        self.booked_at
    }

    pub(crate) fn set_visitor(&mut self, visitor: &Visitor) {
        self.visitor_id = visitor.id();
    }

    pub(crate) fn set_national_park(&mut self, national_park: &NationalPark) {
        self.park_id = national_park.id();
    }

    pub(crate) fn set_start_date(&mut self, value: impl Into<String>) -> Result<(), ValidationError> {
        let value = value.into();
        validation::trip_date("start_date", &value)?;
        self.start_date = value;
        Ok(())
    }

    pub(crate) fn set_end_date(&mut self, value: impl Into<String>) -> Result<(), ValidationError> {
        let value = value.into();
        validation::trip_date("end_date", &value)?;
        self.end_date = value;
        Ok(())
    }

    pub fn is_for_visitor(&self, visitor_id: VisitorId) -> bool {
        self.visitor_id == visitor_id
    }

    pub fn is_at_park(&self, park_id: ParkId) -> bool {
        self.park_id == park_id
    }
}

/// Unvalidated wire shape of a trip
#[derive(Deserialize)]
struct TripRecord {
    id: TripId,
    visitor_id: VisitorId,
    park_id: ParkId,
    start_date: String,
    end_date: String,
    booked_at: DateTime<Utc>,
}

impl TryFrom<TripRecord> for Trip {
    type Error = ValidationError;

    fn try_from(record: TripRecord) -> Result<Self, Self::Error> {
        validation::trip_date("start_date", &record.start_date)?;
        validation::trip_date("end_date", &record.end_date)?;

        Ok(Trip {
            id: record.id,
            visitor_id: record.visitor_id,
            park_id: record.park_id,
            start_date: record.start_date,
            end_date: record.end_date,
            booked_at: record.booked_at,
        })
    }
}

// ============================================================================
// TRIP REGISTRY
// ============================================================================

/// Registry of all trips, in booking order
///
/// Append-only. Updates replace the stored value in place, so a trip keeps
/// its position in the registry.
#[derive(Debug, Clone, Default)]
pub struct TripRegistry {
    trips: Arc<RwLock<Vec<Trip>>>,
}

impl TripRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, trip: Trip) {
        tracing::debug!(
            id = %trip.id,
            visitor = %trip.visitor_id,
            park = %trip.park_id,
            "registered trip"
        );
        let mut trips = self.trips.write().unwrap_or_else(PoisonError::into_inner);
        trips.push(trip);
    }

    pub fn find_by_id(&self, id: TripId) -> Option<Trip> {
        let trips = self.trips.read().unwrap_or_else(PoisonError::into_inner);
        trips.iter().find(|t| t.id == id).cloned()
    }

    /// Apply a fallible update to a trip. The update runs on a copy, so a
    /// failure leaves the stored trip untouched.
    pub fn update_trip<F>(&self, id: TripId, update_fn: F) -> Result<Trip, ValidationError>
    where
        F: FnOnce(&mut Trip) -> Result<(), ValidationError>,
    {
        let mut trips = self.trips.write().unwrap_or_else(PoisonError::into_inner);
        let slot = trips
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(ValidationError::UnknownTrip(id))?;

        let mut next = slot.clone();
        update_fn(&mut next)?;
        *slot = next.clone();

        tracing::debug!(id = %id, "updated trip");
        Ok(next)
    }

    /// All trips in registration order
    pub fn all_trips(&self) -> Vec<Trip> {
        self.trips.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn by_visitor(&self, visitor_id: VisitorId) -> Vec<Trip> {
        let trips = self.trips.read().unwrap_or_else(PoisonError::into_inner);
        trips
            .iter()
            .filter(|t| t.is_for_visitor(visitor_id))
            .cloned()
            .collect()
    }

    pub fn by_park(&self, park_id: ParkId) -> Vec<Trip> {
        let trips = self.trips.read().unwrap_or_else(PoisonError::into_inner);
        trips
            .iter()
            .filter(|t| t.is_at_park(park_id))
            .cloned()
            .collect()
    }

    /// Count trips without cloning them
    pub fn count_where<P>(&self, predicate: P) -> usize
    where
        P: Fn(&Trip) -> bool,
    {
        let trips = self.trips.read().unwrap_or_else(PoisonError::into_inner);
        trips.iter().filter(|t| predicate(*t)).count()
    }

    pub fn count(&self) -> usize {
        self.trips.read().unwrap_or_else(PoisonError::into_inner).len()
    }
}

// ============================================================================
// TESTS
// ============================================================================
