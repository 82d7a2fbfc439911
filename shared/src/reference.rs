//! Relational references
//!
//! The backend returns relational fields (`client`, `professional`, `service`,
//! `userId`) either as a bare id string or as a populated object, depending on
//! the endpoint. [`Ref`] captures both shapes in one type. A populated field
//! whose record was deleted arrives as `null` and becomes [`Ref::Missing`].

use serde::{Deserialize, Serialize};

/// Something that can stand in for a display name.
pub trait Named {
    /// Backend identifier (`_id`)
    fn id(&self) -> &str;

    /// Display name, if the record carries one
    fn name(&self) -> Option<&str>;

    /// Contact email, used when there is no name
    fn email(&self) -> Option<&str> {
        None
    }

    /// Calendar color, if the record carries one
    fn color(&self) -> Option<&str> {
        None
    }
}

/// Relational field: either a bare id or a populated record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Ref<T> {
    /// Unpopulated reference
    Id(String),
    /// Populated record
    Populated(T),
    /// Dangling reference (`null` or absent)
    Missing,
}

impl<T> Default for Ref<T> {
    fn default() -> Self {
        Ref::Missing
    }
}

impl<T: Named> Ref<T> {
    /// Identifier of the referenced record, whichever shape it came in.
    /// Empty for a missing reference.
    pub fn id(&self) -> &str {
        match self {
            Ref::Id(id) => id,
            Ref::Populated(item) => item.id(),
            Ref::Missing => "",
        }
    }

    /// Name resolution: `.name`, then `.email`, then the raw id.
    pub fn resolve_name(&self) -> String {
        match self {
            Ref::Missing => String::new(),
            Ref::Id(id) => id.clone(),
            Ref::Populated(item) => non_empty(item.name())
                .or_else(|| non_empty(item.email()))
                .unwrap_or_else(|| item.id())
                .to_string(),
        }
    }

    /// Color carried by a populated record (never by a bare id).
    pub fn color(&self) -> Option<&str> {
        match self {
            Ref::Populated(item) => non_empty(item.color()),
            Ref::Id(_) | Ref::Missing => None,
        }
    }

    /// Whether this reference points at `id`. A missing reference matches nothing.
    pub fn is(&self, id: &str) -> bool {
        !self.is_missing() && self.id() == id
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Ref::Missing)
    }

    /// The populated record, if any.
    pub fn populated(&self) -> Option<&T> {
        match self {
            Ref::Populated(item) => Some(item),
            Ref::Id(_) | Ref::Missing => None,
        }
    }
}

impl<T> From<String> for Ref<T> {
    fn from(id: String) -> Self {
        Ref::Id(id)
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
