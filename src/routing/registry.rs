//! Selector registry.
//!
//! # Responsibilities
//! - Hold the candidate selectors and the default backend of one family
//! - Resolve a [`Criteria`] to exactly one backend
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - Selectors sorted once by priority, highest first; the sort is stable so
//!   equal priorities keep registration order
//! - First supporting selector wins, no match falls back to the default
//! - Multi-attribute matching is a conjunction over the attributes a selector
//!   names, never over every attribute on the request

use std::sync::Arc;

use crate::routing::criteria::Criteria;
use crate::routing::selector::ServiceSelector;

/// Anything that can resolve criteria to a backend.
pub trait BackendSelector<B>: Send + Sync {
    /// Resolve criteria and report whether a selector or the default decided it.
    fn select_with_source(&self, criteria: &Criteria) -> Selection<B>;

    fn select(&self, criteria: &Criteria) -> Arc<B> {
        self.select_with_source(criteria).into_backend()
    }
}

/// Outcome of a selection, for callers that want to log how it was made.
#[derive(Debug)]
pub enum Selection<B> {
    /// A selector matched.
    Matched {
        backend: Arc<B>,
        priority: i32,
        selector: String,
    },
    /// Nothing matched (or the criteria were empty).
    Default(Arc<B>),
}

impl<B> Selection<B> {
    pub fn backend(&self) -> &Arc<B> {
        match self {
            Selection::Matched { backend, .. } => backend,
            Selection::Default(backend) => backend,
        }
    }

    pub fn into_backend(self) -> Arc<B> {
        match self {
            Selection::Matched { backend, .. } => backend,
            Selection::Default(backend) => backend,
        }
    }

    pub fn is_default(&self) -> bool {
        matches!(self, Selection::Default(_))
    }
}

/// Priority-ordered selectors plus a guaranteed fallback.
pub struct SelectableService<B> {
    default_backend: Arc<B>,
    selectors: Vec<Box<dyn ServiceSelector<B>>>,
}

impl<B> SelectableService<B> {
    pub fn new(default_backend: Arc<B>, mut selectors: Vec<Box<dyn ServiceSelector<B>>>) -> Self {
        selectors.sort_by(|a, b| b.priority().cmp(&a.priority()));
        Self {
            default_backend,
            selectors,
        }
    }

    /// A registry with no selectors; every selection returns the default.
    pub fn with_default(default_backend: Arc<B>) -> Self {
        Self::new(default_backend, Vec::new())
    }

    pub fn default_backend(&self) -> &Arc<B> {
        &self.default_backend
    }

    /// Selectors in evaluation order.
    pub fn selectors(&self) -> impl Iterator<Item = &dyn ServiceSelector<B>> {
        self.selectors.iter().map(|s| s.as_ref())
    }

    pub fn len(&self) -> usize {
        self.selectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selectors.is_empty()
    }

    fn resolve(&self, criteria: &Criteria) -> Selection<B> {
        if criteria.is_empty() {
            return Selection::Default(self.default_backend.clone());
        }

        match self.selectors.iter().find(|s| s.supports(criteria)) {
            Some(selector) => Selection::Matched {
                backend: selector.backend().clone(),
                priority: selector.priority(),
                selector: selector.describe(),
            },
            None => Selection::Default(self.default_backend.clone()),
        }
    }
}

impl<B: Send + Sync> BackendSelector<B> for SelectableService<B> {
    fn select_with_source(&self, criteria: &Criteria) -> Selection<B> {
        self.resolve(criteria)
    }
}
