// 🧍 Visitor Entity - a named person, referenced (never owned) by trips
//
// "Visitor name is a VALUE (can change), Visitor UUID is IDENTITY (never changes)"
//
// Two visitors called "Ama" are two different people; equality follows the id.

use crate::validation::{self, ValidationError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, PoisonError, RwLock};

// ============================================================================
// VISITOR ID
// ============================================================================

/// Stable identity of a visitor (UUID v4)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VisitorId(uuid::Uuid);

impl VisitorId {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for VisitorId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for VisitorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// VISITOR ENTITY
// ============================================================================

/// Visitor Entity
///
/// Identity: `id` (never changes)
/// Value: `name`, 1 to 15 characters, re-validated on every assignment
///
/// Deserializing goes through `VisitorRecord`, so stored data gets the same
/// name check as `Visitor::new`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "VisitorRecord")]
pub struct Visitor {
    id: VisitorId,
    name: String,
    registered_at: DateTime<Utc>,
}

impl Visitor {
    /// Create a visitor; fails unless the name has 1 to 15 characters.
    pub fn new(name: impl Into<String>) -> Result<Self, ValidationError> {
        let name = name.into();
        validation::visitor_name(&name)?;

        Ok(Visitor {
            id: VisitorId::new(),
            name,
            registered_at: Utc::now(),
        })
    }

    pub fn id(&self) -> VisitorId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn registered_at(&self) -> DateTime<Utc> {
        self.registered_at
    }

    /// Rename the visitor. On failure the previous name is kept.
    ///
    /// Registered visitors are renamed through `VisitorRegistry::rename`.
    pub(crate) fn set_name(&mut self, name: impl Into<String>) -> Result<(), ValidationError> {
        let name = name.into();
        validation::visitor_name(&name)?;
        self.name = name;
        Ok(())
    }
}

/// Unvalidated wire shape of a visitor
#[derive(Deserialize)]
struct VisitorRecord {
    id: VisitorId,
    name: String,
    registered_at: DateTime<Utc>,
}

impl TryFrom<VisitorRecord> for Visitor {
    type Error = ValidationError;

    fn try_from(record: VisitorRecord) -> Result<Self, Self::Error> {
        validation::visitor_name(&record.name)?;

        Ok(Visitor {
            id: record.id,
            name: record.name,
            registered_at: record.registered_at,
        })
    }
}

impl PartialEq for Visitor {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Visitor {}

impl Hash for Visitor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

// ============================================================================
// VISITOR REGISTRY
// ============================================================================

/// Lookup arena for visitors, so trips can resolve `VisitorId`s.
///
/// Unlike parks and trips, visitors have no aggregate queries; this exists
/// only so a rename is seen by every trip that references the visitor.
#[derive(Debug, Clone, Default)]
pub struct VisitorRegistry {
    visitors: Arc<RwLock<Vec<Visitor>>>,
}

impl VisitorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a visitor (append-only)
    pub fn register(&self, visitor: Visitor) {
        tracing::debug!(id = %visitor.id, name = %visitor.name, "registered visitor");
        let mut visitors = self.visitors.write().unwrap_or_else(PoisonError::into_inner);
        visitors.push(visitor);
    }

    pub fn find_by_id(&self, id: VisitorId) -> Option<Visitor> {
        let visitors = self.visitors.read().unwrap_or_else(PoisonError::into_inner);
        visitors.iter().find(|v| v.id == id).cloned()
    }

    /// Rename a registered visitor in place, returning the updated value
    pub fn rename(&self, id: VisitorId, name: impl Into<String>) -> Result<Visitor, ValidationError> {
        let mut visitors = self.visitors.write().unwrap_or_else(PoisonError::into_inner);
        let visitor = visitors
            .iter_mut()
            .find(|v| v.id == id)
            .ok_or(ValidationError::UnknownVisitor(id))?;

        visitor.set_name(name)?;
        tracing::debug!(id = %id, name = %visitor.name, "renamed visitor");
        Ok(visitor.clone())
    }

    pub fn count(&self) -> usize {
        self.visitors.read().unwrap_or_else(PoisonError::into_inner).len()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visitor_creation() {
        let visitor = Visitor::new("Ama").unwrap();

        assert_eq!(visitor.name(), "Ama");
        assert!(visitor.registered_at() <= Utc::now());
    }

    #[test]
    fn test_visitor_rejects_bad_names() {
        assert!(Visitor::new("").is_err());
        assert!(Visitor::new("a".repeat(16)).is_err());
    }

    #[test]
    fn test_set_name_keeps_old_value_on_failure() {
        let mut visitor = Visitor::new("Ama").unwrap();

        assert!(visitor.set_name("").is_err());
        assert_eq!(visitor.name(), "Ama");

        visitor.set_name("Kofi").unwrap();
        assert_eq!(visitor.name(), "Kofi");
    }

    #[test]
    fn test_same_name_different_identity() {
        let a = Visitor::new("Ama").unwrap();
        let b = Visitor::new("Ama").unwrap();

        assert_ne!(a, b);
        assert_eq!(a, a.clone());
    }

    #[test]
    fn test_registry_rename() {
        let registry = VisitorRegistry::new();
        let visitor = Visitor::new("Ama").unwrap();
        let id = visitor.id();
        registry.register(visitor);

        let renamed = registry.rename(id, "Ama Mensah").unwrap();
        assert_eq!(renamed.name(), "Ama Mensah");
        assert_eq!(registry.find_by_id(id).unwrap().name(), "Ama Mensah");

        assert!(registry.rename(id, "").is_err());
        assert_eq!(registry.find_by_id(id).unwrap().name(), "Ama Mensah");
    }

    #[test]
    fn test_deserialize_validates_name() {
        let visitor = Visitor::new("Ama").unwrap();
        let json = serde_json::to_string(&visitor).unwrap();

        let restored: Visitor = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, visitor);
        assert_eq!(restored.name(), "Ama");

        let blank = json.replace("\"Ama\"", "\"\"");
        let err = serde_json::from_str::<Visitor>(&blank).unwrap_err();
        assert!(err.to_string().contains("Visitor.name"));

        let long = json.replace("\"Ama\"", "\"aaaaaaaaaaaaaaaa\"");
        assert!(serde_json::from_str::<Visitor>(&long).is_err());
    }

    #[test]
    fn test_registry_rename_unknown_visitor_fails() {
        let registry = VisitorRegistry::new();
        let id = VisitorId::new();

        assert_eq!(
            registry.rename(id, "Kofi").unwrap_err(),
            ValidationError::UnknownVisitor(id)
        );
    }
}
