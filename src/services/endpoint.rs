//! Backend handle.
//!
//! # Responsibilities
//! - Represent one reachable instance of a backend family
//! - Resolve request paths against its base URL

use std::fmt;

use url::Url;

/// A single backend instance, identified by its base URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ServiceEndpoint {
    /// Family this instance belongs to.
    pub family: String,
    /// Base URL requests are sent to.
    pub base_url: Url,
}

impl ServiceEndpoint {
    pub fn new(family: impl Into<String>, base_url: Url) -> Self {
        Self {
            family: family.into(),
            base_url,
        }
    }

    /// Join a request path onto the base URL.
    pub fn url_for(&self, path: &str) -> Result<Url, url::ParseError> {
        self.base_url.join(path.trim_start_matches('/'))
    }
}

impl fmt::Display for ServiceEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.family, self.base_url)
    }
}
