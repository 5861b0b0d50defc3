//! Shared identity model for persisted entities.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;

/// A record stored as one document in its own collection.
///
/// The identifier is assigned by the store on first save. Until then the
/// entity is transient and compares unequal to everything.
pub trait Entity: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Document collection, also used as the entity name in error reports.
    const COLLECTION: &'static str;

    /// The store-assigned identifier, `None` while transient.
    ///
    /// An empty string is treated the same as a missing identifier.
    fn id(&self) -> Option<&str>;

    fn set_id(&mut self, id: String);

    /// Checks required fields before anything touches the store.
    fn validate(&self) -> Result<(), ValidationError>;

    fn is_persisted(&self) -> bool {
        self.id().is_some()
    }
}

/// Pointer from one document to another, serialized as `{"id": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Reference {
    pub id: String,
}

impl Reference {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    /// Builds a reference to a persisted entity, `None` if it has no id yet.
    pub fn to<E: Entity>(entity: &E) -> Option<Self> {
        entity.id().map(Self::new)
    }

    pub fn points_to<E: Entity>(&self, entity: &E) -> bool {
        entity.id() == Some(self.id.as_str())
    }
}

/// Identifier equality where a missing id never matches, not even itself.
pub fn same_identity(left: Option<&str>, right: Option<&str>) -> bool {
    matches!((left, right), (Some(l), Some(r)) if l == r)
}

/// Normalizes a raw identifier field so `Some("")` reads as absent.
pub(crate) fn non_empty(id: &Option<String>) -> Option<&str> {
    id.as_deref().filter(|id| !id.is_empty())
}
