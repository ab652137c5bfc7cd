//! The definition directory: an explicit, hierarchical service registry.
//!
//! This is the host-container stand-in. Hosts define implementation
//! definitions in it before bootstrap; the bootstrap processors insert
//! exporter/proxy bindings into it during the discovery pass. Registration is
//! a plain keyed insert with last-write-wins semantics, no ambient global
//! state.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use serde::Serialize;

use crate::export::ExportConfiguration;
use crate::import::ImportConfiguration;
use crate::manifest::ContractRef;

/// An implementation definition known to the host container.
///
/// `contracts` lists the declared contract traits in declaration order; only
/// the first one is ever inspected by discovery. An empty list marks a
/// definition with no resolvable type (never a candidate).
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceDefinition {
    pub id: String,
    pub contracts: Vec<ContractRef>,
}

impl ServiceDefinition {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            contracts: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_contract(mut self, contract: ContractRef) -> Self {
        self.contracts.push(contract);
        self
    }
}

/// Value registered under a resolved service name.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Binding {
    Export(ExportConfiguration),
    Import(ImportConfiguration),
}

#[derive(Default)]
struct Inner {
    definitions: Vec<ServiceDefinition>,
    bindings: HashMap<String, Binding>,
}

/// Enumerable directory of definitions and bindings, possibly with a parent.
///
/// Definitions enumerate in insertion order (discovery reports hits in that
/// order, unsorted). Bindings overwrite silently; re-registering under an
/// existing key replaces the previous binding.
#[derive(Default)]
pub struct ServiceRegistry {
    parent: Option<Arc<ServiceRegistry>>,
    inner: RwLock<Inner>,
}

impl ServiceRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A child registry; discovery walks from the child through every parent.
    #[must_use]
    pub fn with_parent(parent: Arc<ServiceRegistry>) -> Self {
        Self {
            parent: Some(parent),
            inner: RwLock::new(Inner::default()),
        }
    }

    #[must_use]
    pub fn parent(&self) -> Option<Arc<ServiceRegistry>> {
        self.parent.clone()
    }

    /// Add or replace a definition. Redefining an id keeps its position.
    pub fn define(&self, definition: ServiceDefinition) {
        let mut w = self.inner.write();
        if let Some(existing) = w.definitions.iter_mut().find(|d| d.id == definition.id) {
            *existing = definition;
        } else {
            w.definitions.push(definition);
        }
    }

    /// Snapshot of the definitions in insertion order.
    #[must_use]
    pub fn definitions(&self) -> Vec<ServiceDefinition> {
        self.inner.read().definitions.clone()
    }

    /// Insert a binding under `key`. Last write wins.
    pub fn register(&self, key: impl Into<String>, binding: Binding) {
        self.inner.write().bindings.insert(key.into(), binding);
    }

    #[must_use]
    pub fn binding(&self, key: &str) -> Option<Binding> {
        self.inner.read().bindings.get(key).cloned()
    }

    /// Registered binding keys, sorted for stable assertions.
    #[must_use]
    pub fn binding_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.inner.read().bindings.keys().cloned().collect();
        keys.sort();
        keys
    }

    /// Number of registered bindings (definitions are not counted).
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.read().bindings.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.read().bindings.is_empty()
    }
}
