#![forbid(unsafe_code)]

//! Panel identifiers.

use std::borrow::Borrow;
use std::fmt;

/// Error returned when constructing a [`PanelId`] from invalid input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelIdError {
    /// The empty string means "no panel" in the markup contract.
    Empty,
}

impl fmt::Display for PanelIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "panel id must not be empty"),
        }
    }
}

impl std::error::Error for PanelIdError {}

/// Opaque key naming one panel element (`data-pushbar-id`).
///
/// Lookup is by exact string match; no normalization is applied.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub struct PanelId(String);

impl PanelId {
    /// Create a panel id. Fails only for the empty string.
    pub fn new(id: impl Into<String>) -> Result<Self, PanelIdError> {
        let id = id.into();
        if id.is_empty() {
            return Err(PanelIdError::Empty);
        }
        Ok(Self(id))
    }

    /// Parse an optional attribute value. Missing and empty values yield `None`.
    #[must_use]
    pub fn from_attribute(value: Option<&str>) -> Option<Self> {
        value.and_then(|v| Self::new(v).ok())
    }

    /// Borrow the id as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the id, returning the owned string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for PanelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PanelId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for PanelId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<PanelId> for String {
    fn from(id: PanelId) -> Self {
        id.0
    }
}

impl TryFrom<&str> for PanelId {
    type Error = PanelIdError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<String> for PanelId {
    type Error = PanelIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}
