//! Routing metrics.
//!
//! # Metrics
//! - `service_selector_routes_total` (counter): routing decisions by family, outcome
//! - `service_selector_config_reloads_total` (counter): reload attempts by result
//!
//! # Design Decisions
//! - Recorded through the `metrics` facade; the embedding process installs
//!   an exporter (or none, in which case updates are no-ops)

/// How a routing decision was made.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteOutcome {
    /// Dynamic routing was off; the default backend was used.
    Disabled,
    /// A selector matched.
    Selected,
    /// Routing was on but nothing matched.
    Default,
}

impl RouteOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            RouteOutcome::Disabled => "disabled",
            RouteOutcome::Selected => "selected",
            RouteOutcome::Default => "default",
        }
    }
}

/// Record one routing decision.
pub fn record_route(family: &str, outcome: RouteOutcome) {
    metrics::counter!(
        "service_selector_routes_total",
        "family" => family.to_string(),
        "outcome" => outcome.as_str()
    )
    .increment(1);
}

/// Record a configuration reload attempt.
pub fn record_reload(success: bool) {
    let result = if success { "success" } else { "failure" };
    metrics::counter!("service_selector_config_reloads_total", "result" => result).increment(1);
}
