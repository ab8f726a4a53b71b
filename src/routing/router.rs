//! Request-facing routing entry point.
//!
//! # Responsibilities
//! - Check the global and per-family dynamic routing flags
//! - Build criteria from request attributes
//! - Delegate to the registry, or return the default backend
//!
//! # Design Decisions
//! - Fail closed: a flag that errors counts as disabled
//! - When disabled the registry is never called
//! - The router keeps its own handle on the default backend so the disabled
//!   path does not depend on the registry

use std::sync::Arc;

use axum::http::HeaderMap;

use crate::flags::{family_flag, DynamicConfig, DYNAMIC_ROUTING_ENABLED};
use crate::observability::metrics::{self, RouteOutcome};
use crate::routing::criteria::Criteria;
use crate::routing::registry::BackendSelector;

/// Header carrying the calling application.
pub const SOURCE_APP_HEADER: &str = "x-source-app";
/// Header carrying the application the call is made on behalf of.
pub const DESTINATION_APP_HEADER: &str = "x-destination-app";

/// Flag-gated router for one backend family.
pub struct DynamicRouter<B> {
    family: String,
    family_flag: String,
    default_backend: Arc<B>,
    registry: Arc<dyn BackendSelector<B>>,
    flags: Arc<dyn DynamicConfig>,
}

impl<B> DynamicRouter<B> {
    pub fn new(
        family: impl Into<String>,
        default_backend: Arc<B>,
        registry: Arc<dyn BackendSelector<B>>,
        flags: Arc<dyn DynamicConfig>,
    ) -> Self {
        let family = family.into();
        Self {
            family_flag: family_flag(&family),
            family,
            default_backend,
            registry,
            flags,
        }
    }

    pub fn family(&self) -> &str {
        &self.family
    }

    pub fn default_backend(&self) -> &Arc<B> {
        &self.default_backend
    }

    /// True only if both the global and the family flag are on.
    pub fn should_select(&self) -> bool {
        self.flag(DYNAMIC_ROUTING_ENABLED) && self.flag(&self.family_flag)
    }

    fn flag(&self, name: &str) -> bool {
        match self.flags.is_enabled(name, false) {
            Ok(enabled) => enabled,
            Err(e) => {
                tracing::warn!(
                    family = %self.family,
                    flag = %name,
                    error = %e,
                    "Flag lookup failed; treating as disabled"
                );
                false
            }
        }
    }

    /// Pick a backend for a request.
    pub fn route(&self, source_app: Option<&str>, destination_app: Option<&str>) -> Arc<B> {
        self.route_with_outcome(source_app, destination_app).0
    }

    /// Pick a backend and report how the decision was made.
    pub fn route_with_outcome(
        &self,
        source_app: Option<&str>,
        destination_app: Option<&str>,
    ) -> (Arc<B>, RouteOutcome) {
        if !self.should_select() {
            metrics::record_route(&self.family, RouteOutcome::Disabled);
            return (self.default_backend.clone(), RouteOutcome::Disabled);
        }

        let criteria = Criteria::for_request(source_app, destination_app);
        let selection = self.registry.select_with_source(&criteria);
        let outcome = if selection.is_default() {
            RouteOutcome::Default
        } else {
            RouteOutcome::Selected
        };

        tracing::debug!(
            family = %self.family,
            criteria = %criteria,
            outcome = outcome.as_str(),
            "Routing decision"
        );
        metrics::record_route(&self.family, outcome);
        (selection.into_backend(), outcome)
    }

    /// Pick a backend using the application headers of a request.
    pub fn route_headers(&self, headers: &HeaderMap) -> Arc<B> {
        let source_app = header_value(headers, SOURCE_APP_HEADER);
        let destination_app = header_value(headers, DESTINATION_APP_HEADER);
        self.route(source_app, destination_app)
    }
}

fn header_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}
