//! Registry construction from configuration.
//!
//! # Responsibilities
//! - Turn a family's configuration into a [`SelectableService`]
//! - Build backends through a caller-supplied factory
//! - Pick the selector variant implied by each match rule
//!
//! # Design Decisions
//! - One backend per distinct URL; candidates that repeat a URL (including
//!   the default) share the same `Arc`
//! - A missing default is a startup error, never a request-time one

use std::collections::HashMap;
use std::sync::Arc;

use url::Url;

use crate::config::schema::{BaseUrlConfig, FamilyConfig, MatchKind};
use crate::config::validation::ValidationError;
use crate::config::ConfigError;
use crate::routing::registry::SelectableService;
use crate::routing::selector::{AttributeSelector, Parameter, ParameterSelector, ServiceSelector};

/// Build the registry of `family` using `factory` to create backends.
pub fn build_registry<B, F>(
    family: &str,
    config: &FamilyConfig,
    mut factory: F,
) -> Result<SelectableService<B>, ConfigError>
where
    B: Send + Sync + 'static,
    F: FnMut(&Url) -> B,
{
    let default_url = config
        .default_url
        .as_deref()
        .ok_or_else(|| ConfigError::Validation(vec![ValidationError::MissingDefault(family.to_string())]))?;
    let default_url = Url::parse(default_url).map_err(|e| {
        ConfigError::Validation(vec![ValidationError::InvalidDefaultUrl {
            family: family.to_string(),
            url: default_url.to_string(),
            reason: e.to_string(),
        }])
    })?;

    let mut backends: HashMap<Url, Arc<B>> = HashMap::new();
    let default_backend = Arc::new(factory(&default_url));
    backends.insert(default_url, default_backend.clone());

    let mut selectors: Vec<Box<dyn ServiceSelector<B>>> = Vec::with_capacity(config.base_urls.len());
    for candidate in &config.base_urls {
        let url = Url::parse(&candidate.base_url).map_err(|e| {
            ConfigError::Validation(vec![ValidationError::InvalidBaseUrl {
                family: family.to_string(),
                url: candidate.base_url.clone(),
                reason: e.to_string(),
            }])
        })?;
        let backend = backends
            .entry(url)
            .or_insert_with_key(|url| Arc::new(factory(url)))
            .clone();

        tracing::debug!(
            family = %family,
            backend = %candidate.base_url,
            priority = candidate.priority,
            "Registering selector"
        );
        selectors.push(build_selector(family, backend, candidate)?);
    }

    let registry = SelectableService::new(default_backend, selectors);
    tracing::info!(
        family = %family,
        selectors = registry.len(),
        backends = backends.len(),
        "Registry built"
    );
    Ok(registry)
}

fn build_selector<B>(
    family: &str,
    backend: Arc<B>,
    candidate: &BaseUrlConfig,
) -> Result<Box<dyn ServiceSelector<B>>, ConfigError>
where
    B: Send + Sync + 'static,
{
    let rule = &candidate.config;
    let selector: Box<dyn ServiceSelector<B>> = match rule.kind() {
        MatchKind::Origin => Box::new(AttributeSelector::by_origin(backend, candidate.priority, rule)),
        MatchKind::Attribute => {
            let attribute = rule.attribute.clone().ok_or_else(|| {
                ConfigError::Validation(vec![ValidationError::MissingAttribute {
                    family: family.to_string(),
                    url: candidate.base_url.clone(),
                }])
            })?;
            Box::new(AttributeSelector::new(backend, candidate.priority, attribute, rule.value.clone()))
        }
        MatchKind::Parameters => Box::new(ParameterSelector::new(
            backend,
            candidate.priority,
            rule.parameters
                .iter()
                .map(|p| Parameter::new(p.name.clone(), p.values.iter().cloned()))
                .collect(),
        )),
    };
    Ok(selector)
}
