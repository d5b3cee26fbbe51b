// ✅ Validation Layer - one validate-then-assign contract
// Every constructor and every setter runs the same rule function,
// so an entity is either fully valid or it does not exist.

use crate::entities::{ParkId, TripId, VisitorId};
use thiserror::Error;

// ============================================================================
// LENGTH RULES
// ============================================================================

/// Visitor names: 1..=15 characters
pub const VISITOR_NAME_MIN: usize = 1;
pub const VISITOR_NAME_MAX: usize = 15;

/// Park names: at least 3 characters, no upper bound
pub const PARK_NAME_MIN: usize = 3;

/// Trip dates are free-form strings of at least 7 characters ("2023-01")
pub const TRIP_DATE_MIN: usize = 7;

// ============================================================================
// VALIDATION ERROR
// ============================================================================

/// The single error kind of the object model.
///
/// Raised synchronously by constructors and setters; nothing is assigned
/// or registered when one is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A string field is outside its allowed length
    #[error("{entity}.{field} must be {} (got {actual})", describe_bounds(.min, .max))]
    Length {
        entity: &'static str,
        field: &'static str,
        min: usize,
        max: Option<usize>,
        actual: usize,
    },

    /// The visitor id does not resolve in this atlas
    #[error("Trip.visitor must reference a known visitor (unknown id {0})")]
    UnknownVisitor(VisitorId),

    /// The park id does not resolve in this atlas
    #[error("Trip.national_park must reference a known national park (unknown id {0})")]
    UnknownPark(ParkId),

    /// The trip id does not resolve in this atlas
    #[error("unknown trip {0}")]
    UnknownTrip(TripId),
}

fn describe_bounds(min: &usize, max: &Option<usize>) -> String {
    match max {
        Some(max) => format!("between {} and {} characters", min, max),
        None => format!("at least {} characters", min),
    }
}

// ============================================================================
// RULE FUNCTIONS
// ============================================================================

/// Check the length of `value` in characters (not bytes) against the bounds.
pub fn check_length(
    entity: &'static str,
    field: &'static str,
    value: &str,
    min: usize,
    max: Option<usize>,
) -> Result<(), ValidationError> {
    let actual = value.chars().count();
    let too_long = max.is_some_and(|max| actual > max);

    if actual < min || too_long {
        let err = ValidationError::Length {
            entity,
            field,
            min,
            max,
            actual,
        };
        tracing::warn!(%err, "validation rejected value");
        return Err(err);
    }

    Ok(())
}

pub fn visitor_name(value: &str) -> Result<(), ValidationError> {
    check_length(
        "Visitor",
        "name",
        value,
        VISITOR_NAME_MIN,
        Some(VISITOR_NAME_MAX),
    )
}

pub fn park_name(value: &str) -> Result<(), ValidationError> {
    check_length("NationalPark", "name", value, PARK_NAME_MIN, None)
}

/// Shared by `start_date` and `end_date`; no ordering between the two is checked.
pub fn trip_date(field: &'static str, value: &str) -> Result<(), ValidationError> {
    check_length("Trip", field, value, TRIP_DATE_MIN, None)
}

// ============================================================================
// TESTS
// ============================================================================


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Any name of 1..=15 characters is accepted
        #[test]
        fn test_valid_visitor_names_accepted(name in "\\PC{1,15}") {
            prop_assert!(visitor_name(&name).is_ok());
        }

        /// Anything longer than 15 characters is rejected
        #[test]
        fn test_long_visitor_names_rejected(name in "\\PC{16,40}") {
            prop_assert!(visitor_name(&name).is_err());
        }

        /// Any park name of at least 3 characters is accepted
        #[test]
        fn test_valid_park_names_accepted(name in "\\PC{3,40}") {
            prop_assert!(park_name(&name).is_ok());
        }

        /// Park names under 3 characters are rejected
        #[test]
        fn test_short_park_names_rejected(name in "\\PC{0,2}") {
            prop_assert!(park_name(&name).is_err());
        }

        /// Dates shorter than 7 characters never pass
        #[test]
        fn test_short_dates_rejected(date in "\\PC{0,6}") {
            prop_assert!(trip_date("start_date", &date).is_err());
        }
    }
}
