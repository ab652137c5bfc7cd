//! remkit — auto-exporting remote-service registry.
//!
//! Contract traits marked with [`remote`] are collected into a link-time
//! manifest. During bootstrap a one-shot discovery pass walks either the
//! host's definition directory (server side) or the manifest under a base
//! package (client side) and registers, per exposed contract, a
//! transport-specific exporter or proxy configuration into the
//! [`ServiceRegistry`]. The wire protocols themselves are pluggable back
//! ends supplied by the host; this crate only decides which transport to use
//! and how to name and address each service.
//!
//! ```
//! mod app {
//!     use remkit::remote;
//!
//!     #[remote(transport = rmi)]
//!     pub trait OrderService {
//!         fn place(&self, order_id: u64);
//!     }
//! }
//!
//! use remkit::{
//!     Binding, ContractRef, ExporterSettings, ManifestMetadataProvider,
//!     ServiceDefinition, ServiceExporter, ServiceRegistry,
//! };
//!
//! fn main() {
//!     let registry = ServiceRegistry::new();
//!     registry.define(
//!         ServiceDefinition::new("orderServiceImpl")
//!             .with_contract(ContractRef::of::<dyn app::OrderService>()),
//!     );
//!
//!     let exporter = ServiceExporter::new(ExporterSettings::default());
//!     let keys = exporter.run(&registry, &ManifestMetadataProvider::new());
//!     assert_eq!(keys, ["/orderService"]);
//!     assert!(matches!(registry.binding("/orderService"), Some(Binding::Export(_))));
//! }
//! ```

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]

pub mod config;
pub mod descriptor;
pub mod discovery;
pub mod endpoint;
pub mod error;
pub mod export;
pub mod import;
pub mod manifest;
pub mod naming;
pub mod registry;
pub mod secret;

pub use config::{
    settings_or_default, settings_required, ConfigError, ConfigProvider, ExporterSettings,
    ImporterSettings,
};
pub use descriptor::{ExposureDescriptor, TransportKind};
pub use discovery::{discover_exported, discover_importable, DiscoveredService};
pub use endpoint::EndpointAddress;
pub use error::{MetadataError, RemotingError};
pub use export::{build_export, ExportConfiguration, RmiRegistryOptions, ServiceExporter};
pub use import::{build_import, ImportConfiguration, ServiceImporter};
pub use manifest::{
    ContractRef, ContractRegistration, ManifestMetadataProvider, TypeMetadataProvider,
};
pub use naming::resolve_service_name;
pub use registry::{Binding, ServiceDefinition, ServiceRegistry};
pub use secret::SecretString;

/// Marks a contract trait as remotely callable.
///
/// Accepts an optional explicit `name` and a `transport` selection:
/// `#[remote]`, `#[remote(name = "orders")]`,
/// `#[remote(transport = rmi)]`, or both. The default transport is `http`.
pub use remkit_macros::remote;

// Re-exported for the code generated by `#[remote]`.
pub use inventory;
