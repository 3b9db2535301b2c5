//! Registry of quick access providers.
//!
//! Providers are kept in registration order. Lookups by input value pick the
//! provider with the longest matching prefix, falling back to the default
//! provider (the one registered with an empty prefix).

use std::rc::Rc;

use tracing::debug;

use super::{ProviderSource, QuickAccessProvider};

/// In-process mapping from prefixes to providers.
#[derive(Default)]
pub struct QuickAccessRegistry {
    /// Registered providers, oldest first.
    providers: Vec<Rc<dyn QuickAccessProvider>>,
}

impl QuickAccessRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a provider.
    ///
    /// Several providers may share a prefix; they keep their registration
    /// order.
    pub fn register(&mut self, provider: Rc<dyn QuickAccessProvider>) {
        debug!(prefix = %provider.prefix(), "Registering quick access provider");
        self.providers.push(provider);
    }

    /// Remove every provider registered under `prefix`.
    ///
    /// Returns how many providers were removed.
    pub fn unregister(&mut self, prefix: &str) -> usize {
        let before = self.providers.len();
        self.providers.retain(|p| p.prefix() != prefix);
        let removed = before - self.providers.len();
        debug!(prefix, removed, "Unregistered quick access provider");
        removed
    }

    /// The provider registered with an empty prefix, if any.
    pub fn default_provider(&self) -> Option<Rc<dyn QuickAccessProvider>> {
        self.providers
            .iter()
            .find(|p| p.prefix().is_empty())
            .cloned()
    }

    /// Resolve the provider responsible for an input value.
    ///
    /// The longest non-empty prefix that `value` starts with wins; ties go to
    /// the earliest registration. Without a match the default provider is
    /// returned.
    pub fn provider_for(&self, value: &str) -> Option<Rc<dyn QuickAccessProvider>> {
        let mut best: Option<&Rc<dyn QuickAccessProvider>> = None;
        for provider in &self.providers {
            let prefix = provider.prefix();
            if prefix.is_empty() || !value.starts_with(prefix) {
                continue;
            }
            if best.map_or(true, |b| prefix.len() > b.prefix().len()) {
                best = Some(provider);
            }
        }

        best.cloned().or_else(|| self.default_provider())
    }

    /// Number of registered providers.
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Whether nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

impl ProviderSource for QuickAccessRegistry {
    fn list_providers(&self) -> Vec<Rc<dyn QuickAccessProvider>> {
        self.providers.clone()
    }
}
