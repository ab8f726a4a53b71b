//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the selector.
//! All types derive Serde traits for deserialization from config files.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct SelectorConfig {
    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Initial values of the enablement flags, e.g.
    /// `"dynamic-routing.enabled" = true`.
    pub flags: HashMap<String, bool>,

    /// Backend families keyed by name (e.g. `clouddriver`).
    pub families: BTreeMap<String, FamilyConfig>,
}

/// One backend family: a default and the candidates that may replace it.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct FamilyConfig {
    /// Base URL of the default backend. Required.
    pub default_url: Option<String>,

    /// Candidate backends.
    pub base_urls: Vec<BaseUrlConfig>,
}

/// A candidate backend and the rule that selects it.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct BaseUrlConfig {
    /// Base URL of the backend.
    pub base_url: String,

    /// Higher priority is preferred when several candidates match.
    #[serde(default)]
    pub priority: i32,

    /// Match rule.
    #[serde(default)]
    pub config: MatchConfig,
}

/// Match rule of a candidate. Exactly one form should be used:
/// - `origin = "deck"`
/// - `attribute = "destinationApp"`, `value = "orca"`
/// - `parameters = [{ name = "sourceApp", values = ["deck"] }]`
///
/// An empty table builds an origin selector without a value, which is
/// accepted but never matches.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct MatchConfig {
    pub origin: Option<String>,
    pub attribute: Option<String>,
    pub value: Option<String>,
    pub parameters: Vec<ParameterConfig>,
}

/// Which selector variant a [`MatchConfig`] describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    Origin,
    Attribute,
    Parameters,
}

impl MatchConfig {
    /// Every form present in this table. More than one is a validation error.
    pub fn kinds(&self) -> Vec<MatchKind> {
        let mut kinds = Vec::new();
        if self.origin.is_some() {
            kinds.push(MatchKind::Origin);
        }
        if self.attribute.is_some() || self.value.is_some() {
            kinds.push(MatchKind::Attribute);
        }
        if !self.parameters.is_empty() {
            kinds.push(MatchKind::Parameters);
        }
        kinds
    }

    /// The selector variant to build; defaults to an origin selector.
    pub fn kind(&self) -> MatchKind {
        self.kinds().first().copied().unwrap_or(MatchKind::Origin)
    }
}

/// One attribute of a multi-attribute rule.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ParameterConfig {
    pub name: String,
    #[serde(default)]
    pub values: Vec<String>,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_kind() {
        let origin = MatchConfig {
            origin: Some("deck".into()),
            ..Default::default()
        };
        assert_eq!(origin.kind(), MatchKind::Origin);

        let attribute = MatchConfig {
            attribute: Some("destinationApp".into()),
            ..Default::default()
        };
        assert_eq!(attribute.kind(), MatchKind::Attribute);

        let params = MatchConfig {
            parameters: vec![ParameterConfig {
                name: "sourceApp".into(),
                values: vec!["deck".into()],
            }],
            ..Default::default()
        };
        assert_eq!(params.kind(), MatchKind::Parameters);

        assert_eq!(MatchConfig::default().kind(), MatchKind::Origin);
        assert!(MatchConfig::default().kinds().is_empty());
    }

    #[test]
    fn test_defaults() {
        let config: SelectorConfig = toml::from_str("").unwrap();
        assert_eq!(config.observability.log_level, "info");
        assert!(config.families.is_empty());
        assert!(config.flags.is_empty());
    }
}
