//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Every family has a parsable default URL
//! - Every candidate URL parses
//! - Each match rule uses a single form
//! - A match `value` always comes with an `attribute`
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: SelectorConfig → Result<(), Vec<ValidationError>>
//! - A rule without a match value is not an error; the selector is built
//!   disabled and logs a warning

use thiserror::Error;
use url::Url;

use crate::config::schema::SelectorConfig;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("family name must not be empty")]
    EmptyFamilyName,

    #[error("family `{0}` has no default_url")]
    MissingDefault(String),

    #[error("family `{family}` has an invalid default_url `{url}`: {reason}")]
    InvalidDefaultUrl {
        family: String,
        url: String,
        reason: String,
    },

    #[error("family `{family}` has an invalid base_url `{url}`: {reason}")]
    InvalidBaseUrl {
        family: String,
        url: String,
        reason: String,
    },

    #[error("family `{family}` base_url `{url}` sets a match value without an attribute")]
    MissingAttribute { family: String, url: String },

    #[error("family `{family}` base_url `{url}` mixes several match forms")]
    ConflictingMatch { family: String, url: String },
}

/// Validate a parsed configuration.
pub fn validate_config(config: &SelectorConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    for (family, cfg) in &config.families {
        if family.trim().is_empty() {
            errors.push(ValidationError::EmptyFamilyName);
        }

        match &cfg.default_url {
            None => errors.push(ValidationError::MissingDefault(family.clone())),
            Some(url) => {
                if let Err(e) = Url::parse(url) {
                    errors.push(ValidationError::InvalidDefaultUrl {
                        family: family.clone(),
                        url: url.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        for candidate in &cfg.base_urls {
            if let Err(e) = Url::parse(&candidate.base_url) {
                errors.push(ValidationError::InvalidBaseUrl {
                    family: family.clone(),
                    url: candidate.base_url.clone(),
                    reason: e.to_string(),
                });
            }
            if candidate.config.value.is_some() && candidate.config.attribute.is_none() {
                errors.push(ValidationError::MissingAttribute {
                    family: family.clone(),
                    url: candidate.base_url.clone(),
                });
            }
            if candidate.config.kinds().len() > 1 {
                errors.push(ValidationError::ConflictingMatch {
                    family: family.clone(),
                    url: candidate.base_url.clone(),
                });
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
