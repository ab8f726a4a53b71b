//! Selection criteria.
//!
//! # Responsibilities
//! - Carry the request attributes used for one selection
//! - Reject attributes with no acceptable values
//!
//! # Design Decisions
//! - Immutable once built; a fresh value per request
//! - `BTreeMap` keeps iteration order stable for logs and tests
//! - Attribute names are plain strings so new selector kinds need no new fields

use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;

/// Attribute carrying the calling application (single-attribute selectors).
pub const ORIGIN: &str = "origin";
/// Attribute carrying the source application of a request.
pub const SOURCE_APP: &str = "sourceApp";
/// Attribute carrying the destination application of a request.
pub const DESTINATION_APP: &str = "destinationApp";

/// Errors raised while building criteria.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CriteriaError {
    /// An attribute was given an empty value sequence.
    #[error("attribute `{0}` has no values")]
    EmptyValues(String),
}

/// Attributes describing a single selection request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Criteria {
    attributes: BTreeMap<String, Vec<String>>,
}

impl Criteria {
    /// Start building criteria.
    pub fn builder() -> CriteriaBuilder {
        CriteriaBuilder::default()
    }

    /// Criteria with no attributes. Always resolves to the default backend.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build the criteria the router uses: every present input becomes
    /// one single-valued attribute.
    pub fn for_request(source_app: Option<&str>, destination_app: Option<&str>) -> Self {
        let mut attributes = BTreeMap::new();
        if let Some(app) = source_app {
            attributes.insert(SOURCE_APP.to_string(), vec![app.to_string()]);
        }
        if let Some(app) = destination_app {
            attributes.insert(DESTINATION_APP.to_string(), vec![app.to_string()]);
        }
        Self { attributes }
    }

    /// Acceptable values for `name`, if the attribute is present.
    pub fn values(&self, name: &str) -> Option<&[String]> {
        self.attributes.get(name).map(Vec::as_slice)
    }

    /// True if `name` is present and one of its values equals `value`.
    pub fn contains(&self, name: &str, value: &str) -> bool {
        self.values(name)
            .map(|values| values.iter().any(|v| v == value))
            .unwrap_or(false)
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    /// Iterate attributes in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.attributes
            .iter()
            .map(|(name, values)| (name.as_str(), values.as_slice()))
    }
}

impl fmt::Display for Criteria {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (name, values)) in self.attributes.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}={}", name, values.join("|"))?;
        }
        write!(f, "}}")
    }
}

/// Builder for [`Criteria`].
#[derive(Debug, Default)]
pub struct CriteriaBuilder {
    attributes: BTreeMap<String, Vec<String>>,
}

impl CriteriaBuilder {
    /// Set `name` to a single value.
    pub fn attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), vec![value.into()]);
        self
    }

    /// Set `name` to a sequence of acceptable values. An empty sequence
    /// is rejected by [`build`](Self::build).
    pub fn values<I, S>(mut self, name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.attributes
            .insert(name.into(), values.into_iter().map(Into::into).collect());
        self
    }

    pub fn origin(self, value: impl Into<String>) -> Self {
        self.attribute(ORIGIN, value)
    }

    pub fn source_app(self, value: impl Into<String>) -> Self {
        self.attribute(SOURCE_APP, value)
    }

    pub fn destination_app(self, value: impl Into<String>) -> Self {
        self.attribute(DESTINATION_APP, value)
    }

    pub fn build(self) -> Result<Criteria, CriteriaError> {
        if let Some((name, _)) = self.attributes.iter().find(|(_, v)| v.is_empty()) {
            return Err(CriteriaError::EmptyValues(name.clone()));
        }
        Ok(Criteria {
            attributes: self.attributes,
        })
    }
}
