// Park Atlas - Core Library
// National parks, visitors and the trips that link them, with derived
// queries (most visited park, best visitor per park, visit totals).

pub mod atlas;
pub mod config;
pub mod entities;
pub mod report;
pub mod validation;

// Re-export commonly used types
pub use atlas::Atlas;
pub use config::{AtlasConfig, ConfigError, TieBreak};
pub use entities::{
    NationalPark, ParkId, ParkRegistry,
    Trip, TripId, TripRegistry,
    Visitor, VisitorId, VisitorRegistry,
};
pub use report::{AtlasReport, ParkSummary};
pub use validation::ValidationError;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
