//! Candidate selectors.
//!
//! # Responsibilities
//! - Pair a backend with a priority and a match predicate
//! - Test whether a [`Criteria`] is supported
//!
//! # Design Decisions
//! - `supports` is a pure predicate; misconfiguration is reported once, at
//!   construction, and the selector is then permanently non-matching
//! - Single-attribute and multi-attribute variants share one trait

use std::sync::Arc;

use crate::config::schema::MatchConfig;
use crate::routing::criteria::{Criteria, SOURCE_APP};

/// A candidate backend guarded by a match predicate.
pub trait ServiceSelector<B>: Send + Sync {
    /// The backend returned when this selector wins.
    fn backend(&self) -> &Arc<B>;

    /// Higher priority wins among matching selectors.
    fn priority(&self) -> i32;

    /// Returns true if this selector accepts the criteria.
    fn supports(&self, criteria: &Criteria) -> bool;

    /// Short description for log lines.
    fn describe(&self) -> String;
}

/// Matches when one attribute carries one expected value.
pub struct AttributeSelector<B> {
    backend: Arc<B>,
    priority: i32,
    attribute: String,
    value: Option<String>,
}

impl<B> AttributeSelector<B> {
    /// Create a selector for `attribute = value`.
    ///
    /// A missing value leaves the selector disabled; a warning is logged here
    /// rather than on every request.
    pub fn new(
        backend: Arc<B>,
        priority: i32,
        attribute: impl Into<String>,
        value: Option<String>,
    ) -> Self {
        let attribute = attribute.into();
        if value.is_none() {
            tracing::warn!(
                attribute = %attribute,
                priority,
                "Attribute selector created without a match value; it will never match"
            );
        }
        Self {
            backend,
            priority,
            attribute,
            value,
        }
    }

    /// Create a selector from a match table's `origin` key. The origin is
    /// the calling application, so it matches on `sourceApp`.
    pub fn by_origin(backend: Arc<B>, priority: i32, config: &MatchConfig) -> Self {
        Self::new(backend, priority, SOURCE_APP, config.origin.clone())
    }

    pub fn attribute(&self) -> &str {
        &self.attribute
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }
}

impl<B: Send + Sync> ServiceSelector<B> for AttributeSelector<B> {
    fn backend(&self) -> &Arc<B> {
        &self.backend
    }

    fn priority(&self) -> i32 {
        self.priority
    }

    fn supports(&self, criteria: &Criteria) -> bool {
        match &self.value {
            Some(value) => criteria.contains(&self.attribute, value),
            None => false,
        }
    }

    fn describe(&self) -> String {
        format!(
            "{}={}",
            self.attribute,
            self.value.as_deref().unwrap_or("<unset>")
        )
    }
}

/// A named attribute with the values a selector accepts for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub name: String,
    pub values: Vec<String>,
}

impl Parameter {
    pub fn new<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    fn matches(&self, criteria: &Criteria) -> bool {
        criteria
            .values(&self.name)
            .map(|given| given.iter().any(|v| self.values.contains(v)))
            .unwrap_or(false)
    }
}

/// Matches when every configured parameter is satisfied.
///
/// Request attributes that the selector does not name are ignored, so a
/// selector configured only for `sourceApp` still matches a request that
/// also carries `destinationApp`.
pub struct ParameterSelector<B> {
    backend: Arc<B>,
    priority: i32,
    parameters: Vec<Parameter>,
    enabled: bool,
}

impl<B> ParameterSelector<B> {
    pub fn new(backend: Arc<B>, priority: i32, parameters: Vec<Parameter>) -> Self {
        let enabled = if parameters.is_empty() {
            tracing::warn!(priority, "Parameter selector created without parameters; it will never match");
            false
        } else if let Some(p) = parameters.iter().find(|p| p.values.is_empty()) {
            tracing::warn!(
                parameter = %p.name,
                priority,
                "Parameter selector has a parameter without values; it will never match"
            );
            false
        } else {
            true
        };

        Self {
            backend,
            priority,
            parameters,
            enabled,
        }
    }

    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }
}

impl<B: Send + Sync> ServiceSelector<B> for ParameterSelector<B> {
    fn backend(&self) -> &Arc<B> {
        &self.backend
    }

    fn priority(&self) -> i32 {
        self.priority
    }

    fn supports(&self, criteria: &Criteria) -> bool {
        self.enabled && self.parameters.iter().all(|p| p.matches(criteria))
    }

    fn describe(&self) -> String {
        self.parameters
            .iter()
            .map(|p| format!("{}={}", p.name, p.values.join("|")))
            .collect::<Vec<_>>()
            .join(" & ")
    }
}
