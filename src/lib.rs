//! Attribute-based backend selection for an API gateway.
//!
//! Outbound calls are routed to one of several instances of a backend
//! family, chosen from request attributes (source and destination
//! application). Selection is gated by feature flags and always falls back
//! to the family's default backend.

pub mod config;
pub mod flags;
pub mod observability;
pub mod routing;
pub mod services;

pub use config::schema::SelectorConfig;
pub use flags::{DynamicConfig, FlagStore};
pub use routing::{Criteria, DynamicRouter, SelectableService};
pub use services::{Gateway, ServiceEndpoint};
