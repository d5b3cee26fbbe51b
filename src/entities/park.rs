// 🏞️ National Park Entity - a named place with a process-lifetime registry
//
// The name is fixed at construction. Every park ever created is kept in
// the ParkRegistry, in registration order, for aggregate queries such as
// "most visited".

use crate::validation::{self, ValidationError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, PoisonError, RwLock};

// ============================================================================
// PARK ID
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParkId(uuid::Uuid);

impl ParkId {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for ParkId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ParkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// NATIONAL PARK ENTITY
// ============================================================================

/// National Park Entity
///
/// Identity: `id`
/// Value: `name` (at least 3 characters, immutable)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "ParkRecord")]
pub struct NationalPark {
    id: ParkId,
    name: String,
    registered_at: DateTime<Utc>,
}

impl NationalPark {
    /// Create a park; fails unless the name has at least 3 characters.
    pub fn new(name: impl Into<String>) -> Result<Self, ValidationError> {
        let name = name.into();
        validation::park_name(&name)?;

        Ok(NationalPark {
            id: ParkId::new(),
            name,
            registered_at: Utc::now(),
        })
    }

    pub fn id(&self) -> ParkId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn registered_at(&self) -> DateTime<Utc> {
        self.registered_at
    }
}

/// Unvalidated wire shape of a park
#[derive(Deserialize)]
struct ParkRecord {
    id: ParkId,
    name: String,
    registered_at: DateTime<Utc>,
}

impl TryFrom<ParkRecord> for NationalPark {
    type Error = ValidationError;

    fn try_from(record: ParkRecord) -> Result<Self, Self::Error> {
        validation::park_name(&record.name)?;

        Ok(NationalPark {
            id: record.id,
            name: record.name,
            registered_at: record.registered_at,
        })
    }
}

impl PartialEq for NationalPark {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for NationalPark {}

impl Hash for NationalPark {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

// ============================================================================
// PARK REGISTRY
// ============================================================================

/// Registry of all parks
///
/// Append-only: a registered park stays a member for the registry's lifetime.
#[derive(Debug, Clone, Default)]
pub struct ParkRegistry {
    parks: Arc<RwLock<Vec<NationalPark>>>,
}

impl ParkRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a park. A park already present (same id) is not added twice.
    pub fn register(&self, park: NationalPark) {
        let mut parks = self.parks.write().unwrap_or_else(PoisonError::into_inner);
        if parks.iter().any(|p| p.id == park.id) {
            tracing::debug!(id = %park.id, "national park already registered, skipping");
            return;
        }

        tracing::debug!(id = %park.id, name = %park.name, "registered national park");
        parks.push(park);
    }

    pub fn find_by_id(&self, id: ParkId) -> Option<NationalPark> {
        let parks = self.parks.read().unwrap_or_else(PoisonError::into_inner);
        parks.iter().find(|p| p.id == id).cloned()
    }

    /// All parks in registration order
    pub fn all_parks(&self) -> Vec<NationalPark> {
        self.parks.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn count(&self) -> usize {
        self.parks.read().unwrap_or_else(PoisonError::into_inner).len()
    }
}

// ============================================================================
// TESTS
// ============================================================================
