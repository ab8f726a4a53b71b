//! Feature flags that gate dynamic routing.
//!
//! # Responsibilities
//! - Answer "is this flag enabled?" for the router
//! - Hold the current flag snapshot and replace it on config reload
//!
//! # Design Decisions
//! - Lookups are lock-free loads of an `Arc` snapshot
//! - A reload swaps the whole map; readers never observe a partial update
//! - Unknown flags answer with the caller's default

use std::collections::HashMap;
use std::sync::Arc;

use arc_swap::ArcSwap;
use thiserror::Error;

/// Global switch for dynamic routing.
pub const DYNAMIC_ROUTING_ENABLED: &str = "dynamic-routing.enabled";

/// Per-family switch, e.g. `dynamic-routing.clouddriver.enabled`.
pub fn family_flag(family: &str) -> String {
    format!("dynamic-routing.{}.enabled", family)
}

/// Errors from a flag source.
#[derive(Debug, Error)]
pub enum FlagError {
    /// The flag source could not be reached.
    #[error("flag source unavailable: {0}")]
    Unavailable(String),

    /// The flag exists but its value is not a boolean.
    #[error("flag `{flag}` has a non-boolean value: {value}")]
    InvalidValue { flag: String, value: String },
}

/// Source of enable/disable switches.
pub trait DynamicConfig: Send + Sync {
    /// Current value of `flag`, or `default` if the source has no opinion.
    fn is_enabled(&self, flag: &str, default: bool) -> Result<bool, FlagError>;
}

/// In-memory flag snapshot, replaceable as a whole.
#[derive(Debug)]
pub struct FlagStore {
    flags: ArcSwap<HashMap<String, bool>>,
}

impl FlagStore {
    pub fn new(flags: HashMap<String, bool>) -> Self {
        Self {
            flags: ArcSwap::from_pointee(flags),
        }
    }

    /// Replace every flag at once.
    pub fn replace(&self, flags: HashMap<String, bool>) {
        tracing::info!(count = flags.len(), "Flag snapshot replaced");
        self.flags.store(Arc::new(flags));
    }

    /// Copy of the current snapshot.
    pub fn snapshot(&self) -> HashMap<String, bool> {
        (**self.flags.load()).clone()
    }
}

impl Default for FlagStore {
    fn default() -> Self {
        Self::new(HashMap::new())
    }
}

impl DynamicConfig for FlagStore {
    fn is_enabled(&self, flag: &str, default: bool) -> Result<bool, FlagError> {
        Ok(self.flags.load().get(flag).copied().unwrap_or(default))
    }
}
