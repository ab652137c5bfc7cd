//! External service name derivation.

use crate::descriptor::ExposureDescriptor;

/// Resolve the externally-visible name of a contract.
///
/// An explicit descriptor name wins verbatim. Otherwise the contract's simple
/// (unqualified) type name is returned with only its first character
/// lower-cased. No collision detection is performed; two contracts resolving
/// to the same name overwrite one another in the registry, last write wins.
#[must_use]
pub fn resolve_service_name(simple_name: &str, descriptor: &ExposureDescriptor) -> String {
    if !descriptor.name.is_empty() {
        return descriptor.name.to_owned();
    }
    let mut chars = simple_name.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_lowercase().chain(chars).collect(),
    }
}
