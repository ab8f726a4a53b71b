//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → SelectorConfig (validated, immutable)
//!     → services::Gateway built from it
//!
//! On file change:
//!     watcher.rs detects change
//!     → loader.rs loads new config
//!     → validation.rs validates
//!     → a fresh Gateway replaces the old one as a whole
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require full reload
//! - All fields have defaults to allow minimal configs, except each
//!   family's default_url
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use loader::{load_config, load_config_str, ConfigError};
pub use schema::{BaseUrlConfig, FamilyConfig, MatchConfig, ParameterConfig, SelectorConfig};
pub use validation::ValidationError;
