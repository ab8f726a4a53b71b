//! Routers for every configured backend family.
//!
//! # Responsibilities
//! - Build one [`DynamicRouter`] per family from a config snapshot
//! - Route a request for a named family
//!
//! # Design Decisions
//! - A `Gateway` is immutable; a new config builds a new `Gateway`
//! - Flags live in a shared [`FlagStore`] that outlives gateway rebuilds

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::http::HeaderMap;
use thiserror::Error;

use crate::config::{ConfigError, SelectorConfig};
use crate::flags::{DynamicConfig, FlagStore};
use crate::routing::router::DynamicRouter;
use crate::services::builder::build_registry;
use crate::services::endpoint::ServiceEndpoint;

/// Request-time routing errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoutingError {
    #[error("unknown backend family `{0}`")]
    UnknownFamily(String),
}

/// All family routers built from one configuration snapshot.
pub struct Gateway {
    routers: BTreeMap<String, DynamicRouter<ServiceEndpoint>>,
    flags: Arc<FlagStore>,
}

impl Gateway {
    /// Build routers for every family. Flags are seeded from the config.
    pub fn from_config(config: &SelectorConfig) -> Result<Self, ConfigError> {
        let flags = Arc::new(FlagStore::new(config.flags.clone()));
        Self::with_flags(config, flags)
    }

    /// Build routers sharing an existing flag store. Once every router is
    /// built the store is reset to the flags in `config`; on error it is
    /// left untouched.
    pub fn with_flags(config: &SelectorConfig, flags: Arc<FlagStore>) -> Result<Self, ConfigError> {
        let mut routers = BTreeMap::new();
        for (family, family_config) in &config.families {
            let registry = build_registry(family, family_config, |url| {
                ServiceEndpoint::new(family.clone(), url.clone())
            })?;
            let default_backend = registry.default_backend().clone();
            let flag_source: Arc<dyn DynamicConfig> = flags.clone();
            let router = DynamicRouter::new(family.clone(), default_backend, Arc::new(registry), flag_source);
            routers.insert(family.clone(), router);
        }

        flags.replace(config.flags.clone());
        Ok(Self { routers, flags })
    }

    pub fn flags(&self) -> &Arc<FlagStore> {
        &self.flags
    }

    pub fn families(&self) -> impl Iterator<Item = &str> {
        self.routers.keys().map(String::as_str)
    }

    pub fn router(&self, family: &str) -> Result<&DynamicRouter<ServiceEndpoint>, RoutingError> {
        self.routers
            .get(family)
            .ok_or_else(|| RoutingError::UnknownFamily(family.to_string()))
    }

    /// Select the backend of `family` for a request.
    pub fn route(
        &self,
        family: &str,
        source_app: Option<&str>,
        destination_app: Option<&str>,
    ) -> Result<Arc<ServiceEndpoint>, RoutingError> {
        Ok(self.router(family)?.route(source_app, destination_app))
    }

    /// Select the backend of `family` from request headers.
    pub fn route_headers(&self, family: &str, headers: &HeaderMap) -> Result<Arc<ServiceEndpoint>, RoutingError> {
        Ok(self.router(family)?.route_headers(headers))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_config_str;
    use crate::flags::{family_flag, DYNAMIC_ROUTING_ENABLED};
    use std::collections::HashMap;

    const CONFIG: &str = r#"
[flags]
"dynamic-routing.enabled" = true
"dynamic-routing.clouddriver.enabled" = true

[families.clouddriver]
default_url = "http://clouddriver:7002"

[[families.clouddriver.base_urls]]
base_url = "http://clouddriver-deck:7002"
priority = 10
config = { parameters = [ { name = "sourceApp", values = ["deck"] } ] }

[families.front50]
default_url = "http://front50:8080"

[[families.front50.base_urls]]
base_url = "http://front50-deck:8080"
priority = 10
config = { parameters = [ { name = "sourceApp", values = ["deck"] } ] }
"#;

    #[test]
    fn test_routes_per_family_flags() {
        let gateway = Gateway::from_config(&load_config_str(CONFIG).unwrap()).unwrap();
        assert_eq!(gateway.families().collect::<Vec<_>>(), vec!["clouddriver", "front50"]);

        let cd = gateway.route("clouddriver", Some("deck"), None).unwrap();
        assert_eq!(cd.base_url.as_str(), "http://clouddriver-deck:7002/");

        // front50 has no family flag, so it stays on its default
        let f50 = gateway.route("front50", Some("deck"), None).unwrap();
        assert_eq!(f50.base_url.as_str(), "http://front50:8080/");
    }

    #[test]
    fn test_flag_changes_apply_without_rebuild() {
        let gateway = Gateway::from_config(&load_config_str(CONFIG).unwrap()).unwrap();
        gateway.flags().replace(HashMap::from([
            (DYNAMIC_ROUTING_ENABLED.to_string(), false),
            (family_flag("clouddriver"), true),
        ]));
        let cd = gateway.route("clouddriver", Some("deck"), None).unwrap();
        assert_eq!(cd.base_url.as_str(), "http://clouddriver:7002/");
    }

    #[test]
    fn test_failed_rebuild_keeps_flags() {
        let gateway = Gateway::from_config(&load_config_str(CONFIG).unwrap()).unwrap();
        let before = gateway.flags().snapshot();

        // Bypasses validation, so the default is only caught while building
        let mut broken = SelectorConfig::default();
        broken.flags.insert(DYNAMIC_ROUTING_ENABLED.to_string(), false);
        broken.families.insert("clouddriver".into(), Default::default());

        assert!(Gateway::with_flags(&broken, gateway.flags().clone()).is_err());
        assert_eq!(gateway.flags().snapshot(), before);

        let cd = gateway.route("clouddriver", Some("deck"), None).unwrap();
        assert_eq!(cd.base_url.as_str(), "http://clouddriver-deck:7002/");
    }

    #[test]
    fn test_origin_rule_routes_source_app() {
        let config = load_config_str(include_str!("../../demos/selector.toml")).unwrap();
        let gateway = Gateway::from_config(&config).unwrap();

        let deck = gateway.route("clouddriver", Some("deck"), None).unwrap();
        assert_eq!(deck.base_url.as_str(), "http://clouddriver-ui:7002/");

        let api = gateway.route("clouddriver", Some("api"), Some("orca")).unwrap();
        assert_eq!(api.base_url.as_str(), "http://clouddriver-api:7002/");

        let mut headers = HeaderMap::new();
        headers.insert("x-source-app", "deck".parse().unwrap());
        let from_headers = gateway.route_headers("clouddriver", &headers).unwrap();
        assert_eq!(from_headers.base_url.as_str(), "http://clouddriver-ui:7002/");
    }

    #[test]
    fn test_unknown_family() {
        let gateway = Gateway::from_config(&SelectorConfig::default()).unwrap();
        assert_eq!(
            gateway.route("igor", None, None).unwrap_err(),
            RoutingError::UnknownFamily("igor".into())
        );
    }
}
