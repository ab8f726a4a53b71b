//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! routing / config reload
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters)
//! ```

pub mod logging;
pub mod metrics;
