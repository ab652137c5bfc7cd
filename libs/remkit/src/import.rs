//! Client side: proxy configurations and the bootstrap processor that
//! registers them.

use serde::Serialize;

use crate::config::ImporterSettings;
use crate::descriptor::TransportKind;
use crate::discovery::discover_importable;
use crate::endpoint::EndpointAddress;
use crate::error::RemotingError;
use crate::manifest::{ContractRef, TypeMetadataProvider};
use crate::naming::resolve_service_name;
use crate::registry::{Binding, ServiceRegistry};

/// Instruction for materializing a local proxy for one contract.
///
/// All HTTP-family transports target the HTTP-style address; swapping the
/// request codec is the only protocol difference on the client side.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportConfiguration {
    pub transport: TransportKind,
    pub contract: ContractRef,
    pub target: EndpointAddress,
}

/// Build the proxy configuration and its registration key for one discovered
/// contract. The key is the resolved name unmodified, without the leading
/// slash the server side uses.
#[must_use]
pub fn build_import(
    resolved_name: &str,
    contract: ContractRef,
    transport: TransportKind,
    settings: &ImporterSettings,
) -> (String, ImportConfiguration) {
    let target = EndpointAddress::build(
        transport,
        &settings.host,
        settings.http_port,
        &settings.http_context_path,
        settings.rmi_port,
        resolved_name,
    );
    let configuration = ImportConfiguration {
        transport,
        contract,
        target,
    };
    (resolved_name.to_owned(), configuration)
}

/// Bootstrap processor wiring a proxy for every exposed contract under the
/// configured base package.
///
/// Credentials in the settings are deliberately not copied into the produced
/// configurations; hosts that authenticate their transport read them from
/// [`ImporterSettings`] directly.
#[derive(Debug, Default)]
pub struct ServiceImporter {
    settings: ImporterSettings,
}

impl ServiceImporter {
    #[must_use]
    pub fn new(settings: ImporterSettings) -> Self {
        Self { settings }
    }

    /// Discover, configure and register a proxy per exposed contract;
    /// returns the registration keys in discovery order.
    ///
    /// # Errors
    /// Propagates [`RemotingError::Scan`] when the contract manifest cannot
    /// be enumerated; bootstrap must abort in that case.
    pub fn run(
        &self,
        registry: &ServiceRegistry,
        metadata: &dyn TypeMetadataProvider,
    ) -> Result<Vec<String>, RemotingError> {
        let mut keys = Vec::new();
        for hit in discover_importable(&self.settings.base_package, metadata)? {
            let name = resolve_service_name(hit.contract.simple_name(), &hit.descriptor);
            let (key, configuration) =
                build_import(&name, hit.contract, hit.descriptor.transport, &self.settings);
            tracing::debug!(
                key = %key,
                target = %configuration.target,
                transport = %configuration.transport,
                "registering proxy"
            );
            registry.register(key.clone(), Binding::Import(configuration));
            keys.push(key);
        }
        tracing::info!(imported = keys.len(), "import pass complete");
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> ImporterSettings {
        ImporterSettings {
            base_package: "app::api".to_owned(),
            host: "h".to_owned(),
            http_port: 8080,
            http_context_path: String::new(),
            rmi_port: 1099,
            user_name: None,
            password: None,
        }
    }

    #[test]
    fn key_is_the_resolved_name_without_slash() {
        let (key, _) = build_import(
            "orderService",
            ContractRef::new("app::api::OrderService"),
            TransportKind::Http,
            &settings(),
        );
        assert_eq!(key, "orderService");
    }

    #[test]
    fn http_family_proxies_target_the_http_address() {
        for transport in [
            TransportKind::Http,
            TransportKind::Bincode,
            TransportKind::MsgPack,
        ] {
            let (_, cfg) = build_import(
                "foo",
                ContractRef::new("app::api::Foo"),
                transport,
                &settings(),
            );
            assert_eq!(cfg.target.to_string(), "http://h:8080/foo");
            assert_eq!(cfg.transport, transport);
        }
    }

    #[test]
    fn rmi_proxy_targets_the_rmi_address() {
        let (_, cfg) = build_import(
            "foo",
            ContractRef::new("app::api::Foo"),
            TransportKind::Rmi,
            &settings(),
        );
        assert_eq!(cfg.target.to_string(), "rmi://h:1099/foo");
    }

    #[test]
    fn context_path_is_used_verbatim() {
        let mut s = settings();
        s.http_context_path = "/remoting".to_owned();
        let (_, cfg) = build_import(
            "foo",
            ContractRef::new("app::api::Foo"),
            TransportKind::Http,
            &s,
        );
        assert_eq!(cfg.target.to_string(), "http://h:8080/remoting/foo");
    }

    #[test]
    fn credentials_never_reach_the_configuration() {
        let mut s = settings();
        s.user_name = Some("svc".to_owned());
        s.password = Some(crate::secret::SecretString::new("hunter2"));
        let (_, cfg) = build_import(
            "foo",
            ContractRef::new("app::api::Foo"),
            TransportKind::Http,
            &s,
        );
        let json = serde_json::to_string(&cfg).unwrap();
        assert!(!json.contains("svc"));
        assert!(!json.contains("hunter2"));
    }
}
