// Entity Models
//
// Each entity has:
// - Stable identity (UUID newtype) that never changes
// - Values validated on construction and on every reassignment
// - A registry (append-only, insertion ordered) for lookups and scans

pub mod park;
pub mod trip;
pub mod visitor;

pub use park::{NationalPark, ParkId, ParkRegistry};
pub use trip::{Trip, TripId, TripRegistry};
pub use visitor::{Visitor, VisitorId, VisitorRegistry};
