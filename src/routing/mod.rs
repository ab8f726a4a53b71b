//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Request attributes (sourceApp, destinationApp)
//!     → router.rs (flag gate, build Criteria)
//!     → registry.rs (priority-ordered lookup)
//!     → selector.rs (evaluate match predicates)
//!     → Return: matched backend or the default backend
//!
//! Registry construction (at startup or reload):
//!     FamilyConfig
//!     → Build one selector per candidate
//!     → Sort by priority
//!     → Freeze as immutable SelectableService
//! ```
//!
//! # Design Decisions
//! - Registries built once, immutable at runtime
//! - Deterministic: same input always selects the same backend
//! - Every failure path ends at the default backend

pub mod criteria;
pub mod registry;
pub mod router;
pub mod selector;

pub use criteria::{Criteria, CriteriaBuilder, CriteriaError};
pub use registry::{BackendSelector, SelectableService, Selection};
pub use router::DynamicRouter;
pub use selector::{AttributeSelector, Parameter, ParameterSelector, ServiceSelector};
