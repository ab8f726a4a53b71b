//! Backend wiring.
//!
//! # Data Flow
//! ```text
//! SelectorConfig
//!     → builder.rs (one backend per URL, one selector per candidate)
//!     → gateway.rs (one DynamicRouter per family, shared FlagStore)
//!     → endpoint.rs (ServiceEndpoint handed to the HTTP client)
//! ```

pub mod builder;
pub mod endpoint;
pub mod gateway;

pub use builder::build_registry;
pub use endpoint::ServiceEndpoint;
pub use gateway::{Gateway, RoutingError};
