//! Resource references
//!
//! Some create operations only acknowledge the request and never
//! return an identifier (image capture is the main case); the workflow
//! knows the resource by the name it chose and learns the id later
//! from a list endpoint. [`ResourceRef`] carries that progression: the
//! name is always present, the identifier is assigned at most once.

use crate::error::{CoreError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Instance,
    Image,
}

/// Reference to a control-plane resource.
///
/// The id is authoritative once known; the name is only used while the
/// id is not yet known.
#[derive(Debug, Clone)]
pub struct ResourceRef {
    pub kind: ResourceKind,
    pub name: String,
    id: Option<String>,
}

impl ResourceRef {
    /// Reference by name only; the id is not known yet.
    pub fn named(kind: ResourceKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            id: None,
        }
    }

    /// Reference with a known id.
    pub fn identified(
        kind: ResourceKind,
        name: impl Into<String>,
        id: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            name: name.into(),
            id: Some(id.into()),
        }
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Assign the provider id once it becomes known.
    ///
    /// Identifiers are never reassigned; a second assignment is an
    /// error regardless of the value.
    pub fn assign_id(&mut self, id: impl Into<String>) -> Result<&str> {
        if self.id.is_some() {
            return Err(CoreError::IdentifierReassigned(self.name.clone()));
        }
        self.id = Some(id.into());
        Ok(self.id.as_deref().unwrap_or_default())
    }
}
