//! Server side: exporter configurations and the bootstrap processor that
//! registers them.

use serde::Serialize;

use crate::config::ExporterSettings;
use crate::descriptor::TransportKind;
use crate::discovery::discover_exported;
use crate::manifest::{ContractRef, TypeMetadataProvider};
use crate::naming::resolve_service_name;
use crate::registry::{Binding, ServiceRegistry};

/// RMI-only exporter options.
///
/// `registry_host`/`registry_port` are present iff explicitly configured
/// (non-empty host, non-zero port); `always_create_registry` is always set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RmiRegistryOptions {
    /// Registry service name: the resolved name without the leading slash.
    pub service_name: String,
    pub always_create_registry: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registry_host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registry_port: Option<u16>,
}

/// Instruction for materializing a remote endpoint for one implementation.
///
/// Consumed by the transport layer; HTTP-family exporters are picked up by
/// the transport's own request dispatch under the registration key, so they
/// carry no address.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportConfiguration {
    pub transport: TransportKind,
    /// Definition id of the implementation to expose.
    pub service_id: String,
    pub contract: ContractRef,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registry: Option<RmiRegistryOptions>,
}

/// Build the exporter configuration and its registration key for one
/// discovered service.
///
/// The key is `/` + resolved name for every transport; for RMI the leading
/// slash is stripped again to form the registry service name.
#[must_use]
pub fn build_export(
    resolved_name: &str,
    service_id: &str,
    contract: ContractRef,
    transport: TransportKind,
    settings: &ExporterSettings,
) -> (String, ExportConfiguration) {
    let key = format!("/{resolved_name}");
    let registry = match transport {
        TransportKind::Rmi => Some(RmiRegistryOptions {
            service_name: resolved_name.to_owned(),
            always_create_registry: settings.always_create_registry,
            registry_host: (!settings.rmi_registry_host.is_empty())
                .then(|| settings.rmi_registry_host.clone()),
            registry_port: (settings.rmi_registry_port != 0).then_some(settings.rmi_registry_port),
        }),
        TransportKind::Http | TransportKind::Bincode | TransportKind::MsgPack => None,
    };
    let configuration = ExportConfiguration {
        transport,
        service_id: service_id.to_owned(),
        contract,
        registry,
    };
    (key, configuration)
}

/// Bootstrap processor publishing every exposed implementation found in the
/// registry hierarchy.
///
/// Runs once, synchronously, before any service traffic flows. Bindings are
/// always registered into the scanned (child) registry, also for hits coming
/// from ancestor levels.
#[derive(Debug, Default)]
pub struct ServiceExporter {
    settings: ExporterSettings,
}

impl ServiceExporter {
    #[must_use]
    pub fn new(settings: ExporterSettings) -> Self {
        Self { settings }
    }

    /// Discover, configure and register every exported service; returns the
    /// registration keys in discovery order.
    pub fn run(
        &self,
        registry: &ServiceRegistry,
        metadata: &dyn TypeMetadataProvider,
    ) -> Vec<String> {
        let mut keys = Vec::new();
        for hit in discover_exported(registry, metadata) {
            let Some(service_id) = hit.service_id else {
                continue;
            };
            let name = resolve_service_name(hit.contract.simple_name(), &hit.descriptor);
            let (key, configuration) = build_export(
                &name,
                &service_id,
                hit.contract,
                hit.descriptor.transport,
                &self.settings,
            );
            tracing::debug!(
                service_id = %service_id,
                key = %key,
                transport = %configuration.transport,
                "registering exporter"
            );
            registry.register(key.clone(), Binding::Export(configuration));
            keys.push(key);
        }
        tracing::info!(exported = keys.len(), "export pass complete");
        keys
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contract() -> ContractRef {
        ContractRef::new("app::api::OrderService")
    }

    #[test]
    fn key_always_begins_with_a_slash() {
        for transport in [
            TransportKind::Http,
            TransportKind::Rmi,
            TransportKind::Bincode,
            TransportKind::MsgPack,
        ] {
            let (key, _) = build_export(
                "orderService",
                "orderServiceImpl",
                contract(),
                transport,
                &ExporterSettings::default(),
            );
            assert_eq!(key, "/orderService");
        }
    }

    #[test]
    fn http_family_configurations_carry_no_registry_options() {
        for transport in [
            TransportKind::Http,
            TransportKind::Bincode,
            TransportKind::MsgPack,
        ] {
            let (_, cfg) = build_export(
                "orderService",
                "orderServiceImpl",
                contract(),
                transport,
                &ExporterSettings::default(),
            );
            assert_eq!(cfg.transport, transport);
            assert_eq!(cfg.service_id, "orderServiceImpl");
            assert!(cfg.registry.is_none());
        }
    }

    #[test]
    fn rmi_service_name_has_no_leading_slash() {
        let (key, cfg) = build_export(
            "orderService",
            "orderServiceImpl",
            contract(),
            TransportKind::Rmi,
            &ExporterSettings::default(),
        );
        assert_eq!(key, "/orderService");
        assert_eq!(cfg.registry.unwrap().service_name, "orderService");
    }

    #[test]
    fn rmi_registry_host_and_port_present_iff_configured() {
        let unset = ExporterSettings::default();
        let (_, cfg) = build_export("s", "i", contract(), TransportKind::Rmi, &unset);
        let opts = cfg.registry.unwrap();
        assert!(opts.registry_host.is_none());
        assert!(opts.registry_port.is_none());
        assert!(opts.always_create_registry, "always present, defaults on");

        let set = ExporterSettings {
            rmi_registry_host: "registry1".to_owned(),
            rmi_registry_port: 1199,
            always_create_registry: false,
        };
        let (_, cfg) = build_export("s", "i", contract(), TransportKind::Rmi, &set);
        let opts = cfg.registry.unwrap();
        assert_eq!(opts.registry_host.as_deref(), Some("registry1"));
        assert_eq!(opts.registry_port, Some(1199));
        assert!(!opts.always_create_registry);
    }

    #[test]
    fn serialized_rmi_configuration_omits_unset_registry_fields() {
        let (_, cfg) = build_export(
            "orderService",
            "orderServiceImpl",
            contract(),
            TransportKind::Rmi,
            &ExporterSettings::default(),
        );
        let json = serde_json::to_value(&cfg).unwrap();
        let registry = &json["registry"];
        assert_eq!(registry["service_name"], "orderService");
        assert!(registry.get("registry_host").is_none());
        assert!(registry.get("registry_port").is_none());
    }
}
