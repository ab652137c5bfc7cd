//! The one-shot discovery pass.
//!
//! Server side walks the definition directory (and every ancestor) looking
//! for implementations whose first declared contract carries an exposure
//! descriptor. Client side enumerates every registered contract under a base
//! package; the type enumerated *is* the contract, there is no
//! implementation.

use crate::descriptor::ExposureDescriptor;
use crate::error::RemotingError;
use crate::manifest::{ContractRef, TypeMetadataProvider};
use crate::registry::ServiceRegistry;

/// One discovery hit. Transient: consumed immediately to build a single
/// configuration entry, never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscoveredService {
    /// Definition id of the implementation; `None` on the client side.
    pub service_id: Option<String>,
    pub contract: ContractRef,
    pub descriptor: ExposureDescriptor,
}

/// Server-side scan: find every definition whose first declared contract is
/// exposed.
///
/// Each level of the registry hierarchy is scanned independently, child
/// first, with hits reported in the level's definition order. Per-candidate
/// metadata failures are logged and skipped; the pass never aborts.
#[must_use]
pub fn discover_exported(
    registry: &ServiceRegistry,
    metadata: &dyn TypeMetadataProvider,
) -> Vec<DiscoveredService> {
    let mut hits = Vec::new();
    scan_level(registry, metadata, &mut hits);
    let mut next = registry.parent();
    while let Some(level) = next {
        scan_level(&level, metadata, &mut hits);
        next = level.parent();
    }
    hits
}

fn scan_level(
    registry: &ServiceRegistry,
    metadata: &dyn TypeMetadataProvider,
    hits: &mut Vec<DiscoveredService>,
) {
    for definition in registry.definitions() {
        // Only the first declared contract is ever inspected.
        let Some(first) = definition.contracts.first() else {
            tracing::debug!(definition = %definition.id, "no declared contracts, skipping");
            continue;
        };
        match metadata.contract_metadata(first.qualified()) {
            Ok(Some(registration)) => {
                tracing::debug!(
                    definition = %definition.id,
                    contract = %first,
                    "definition implements an exposed contract"
                );
                hits.push(DiscoveredService {
                    service_id: Some(definition.id.clone()),
                    contract: first.clone(),
                    descriptor: registration.descriptor,
                });
            }
            Ok(None) => {
                tracing::debug!(definition = %definition.id, contract = %first, "not exposed");
            }
            Err(e) => {
                tracing::warn!(
                    definition = %definition.id,
                    contract = %first,
                    error = %e,
                    "unreadable contract metadata, skipping candidate"
                );
            }
        }
    }
}

/// Client-side scan: every exposed contract under `base_package`.
///
/// # Errors
/// Fails with [`RemotingError::Scan`] when the manifest cannot be enumerated
/// at all; this aborts bootstrap, unlike per-candidate failures.
pub fn discover_importable(
    base_package: &str,
    metadata: &dyn TypeMetadataProvider,
) -> Result<Vec<DiscoveredService>, RemotingError> {
    let registrations =
        metadata
            .contracts_under(base_package)
            .map_err(|source| RemotingError::Scan {
                base_package: base_package.to_owned(),
                source,
            })?;
    Ok(registrations
        .into_iter()
        .map(|registration| {
            tracing::debug!(contract = %registration.qualified_name(), "exposed contract found");
            DiscoveredService {
                service_id: None,
                contract: ContractRef::new(registration.qualified_name()),
                descriptor: registration.descriptor,
            }
        })
        .collect())
}
