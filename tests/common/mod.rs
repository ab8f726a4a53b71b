//! Shared helpers for integration tests.

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use service_selector::flags::{DynamicConfig, FlagError};
use service_selector::routing::{BackendSelector, Criteria, Selection};

/// Write `content` to a unique file under the system temp directory.
#[allow(dead_code)]
pub fn write_temp_config(name: &str, content: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("service-selector-{}-{}.toml", name, std::process::id()));
    std::fs::write(&path, content).unwrap();
    path
}

/// Registry stub that counts calls and always answers with one backend.
#[allow(dead_code)]
pub struct CountingRegistry<B> {
    pub backend: Arc<B>,
    pub calls: AtomicUsize,
}

#[allow(dead_code)]
impl<B> CountingRegistry<B> {
    pub fn new(backend: Arc<B>) -> Self {
        Self {
            backend,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl<B: Send + Sync> BackendSelector<B> for CountingRegistry<B> {
    fn select_with_source(&self, _criteria: &Criteria) -> Selection<B> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Selection::Matched {
            backend: self.backend.clone(),
            priority: 0,
            selector: "counting".to_string(),
        }
    }
}

/// Flag source whose answers are fixed per flag; anything else errors.
#[allow(dead_code)]
pub struct ScriptedFlags {
    pub global: Result<bool, ()>,
    pub family: Result<bool, ()>,
}

impl DynamicConfig for ScriptedFlags {
    fn is_enabled(&self, flag: &str, _default: bool) -> Result<bool, FlagError> {
        let answer = if flag == service_selector::flags::DYNAMIC_ROUTING_ENABLED {
            self.global
        } else {
            self.family
        };
        answer.map_err(|_| FlagError::Unavailable(format!("no answer for {}", flag)))
    }
}
