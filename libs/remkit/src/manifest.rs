//! Link-time contract manifest.
//!
//! `#[remote]` submits one [`ContractRegistration`] per annotated contract
//! trait through `inventory`. The manifest replaces runtime classpath
//! scanning: discovery consults it through the [`TypeMetadataProvider`] seam,
//! so hosts with external metadata sources (and tests) can substitute their
//! own provider.

use std::fmt;

use serde::Serialize;

use crate::descriptor::ExposureDescriptor;
use crate::error::MetadataError;

/// Reference to a contract trait by its fully-qualified path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ContractRef {
    qualified: String,
}

impl ContractRef {
    /// Reference the contract trait `T` (usually `dyn SomeContract`).
    ///
    /// Uses `std::any::type_name`, which yields the same qualified path the
    /// `#[remote]` macro records (`module_path!()` + trait ident).
    #[must_use]
    pub fn of<T: ?Sized + 'static>() -> Self {
        let name = std::any::type_name::<T>();
        Self {
            qualified: name.strip_prefix("dyn ").unwrap_or(name).to_owned(),
        }
    }

    #[must_use]
    pub fn new(qualified: impl Into<String>) -> Self {
        Self {
            qualified: qualified.into(),
        }
    }

    #[must_use]
    pub fn qualified(&self) -> &str {
        &self.qualified
    }

    /// Simple (unqualified) type name: the last path segment.
    #[must_use]
    pub fn simple_name(&self) -> &str {
        self.qualified
            .rsplit("::")
            .next()
            .unwrap_or(&self.qualified)
    }
}

impl fmt::Display for ContractRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.qualified)
    }
}

/// One manifest entry: a contract trait carrying an exposure descriptor.
///
/// Emitted by `#[remote]`; collected at link time.
#[derive(Debug)]
pub struct ContractRegistration {
    /// Module path of the defining module (`module_path!()` at the trait).
    pub module_path: &'static str,
    /// Trait identifier.
    pub type_name: &'static str,
    /// The attached descriptor.
    pub descriptor: ExposureDescriptor,
}

impl ContractRegistration {
    /// Fully-qualified contract path, matching [`ContractRef::of`].
    #[must_use]
    pub fn qualified_name(&self) -> String {
        format!("{}::{}", self.module_path, self.type_name)
    }

    /// True when this contract lives in `base_package` or below it.
    ///
    /// An empty base package matches every contract, the same as scanning
    /// from the root.
    #[must_use]
    pub fn is_under(&self, base_package: &str) -> bool {
        base_package.is_empty()
            || self.module_path == base_package
            || self
                .module_path
                .strip_prefix(base_package)
                .is_some_and(|rest| rest.starts_with("::"))
    }
}

inventory::collect!(ContractRegistration);

/// Metadata source consulted by discovery.
///
/// Stands in for the classpath/resource provider of the host platform:
/// single-type lookup feeds the server-side pass, prefix enumeration feeds
/// the client-side pass.
pub trait TypeMetadataProvider {
    /// Look up the registration for one qualified contract path.
    ///
    /// `Ok(None)` means the type exists but carries no exposure descriptor
    /// (a non-match, not an error).
    ///
    /// # Errors
    /// A [`MetadataError`] here is a *soft* failure: discovery logs it and
    /// skips the candidate.
    fn contract_metadata(
        &self,
        qualified: &str,
    ) -> Result<Option<&ContractRegistration>, MetadataError>;

    /// Enumerate every registered contract under a base package.
    ///
    /// # Errors
    /// A [`MetadataError`] here is *fatal* to the discovery pass.
    fn contracts_under(
        &self,
        base_package: &str,
    ) -> Result<Vec<&ContractRegistration>, MetadataError>;
}

/// [`TypeMetadataProvider`] backed by the link-time manifest. Infallible.
#[derive(Debug, Default, Clone, Copy)]
pub struct ManifestMetadataProvider;

impl ManifestMetadataProvider {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl TypeMetadataProvider for ManifestMetadataProvider {
    fn contract_metadata(
        &self,
        qualified: &str,
    ) -> Result<Option<&ContractRegistration>, MetadataError> {
        Ok(inventory::iter::<ContractRegistration>
            .into_iter()
            .find(|reg| reg.qualified_name() == qualified))
    }

    fn contracts_under(
        &self,
        base_package: &str,
    ) -> Result<Vec<&ContractRegistration>, MetadataError> {
        let mut hits: Vec<&ContractRegistration> = inventory::iter::<ContractRegistration>
            .into_iter()
            .filter(|reg| reg.is_under(base_package))
            .collect();
        // Link order is arbitrary; sort so every pass sees the same sequence.
        hits.sort_by_key(|reg| reg.qualified_name());
        Ok(hits)
    }
}
