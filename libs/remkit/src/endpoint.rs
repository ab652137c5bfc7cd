//! Canonical service addresses.

use std::fmt;

use serde::Serialize;

use crate::descriptor::TransportKind;

/// Immutable service address; `Display` renders the canonical URL.
///
/// HTTP-family: `http://{host}:{port}{path_prefix}/{service_name}`.
/// RMI: `rmi://{host}:{port}/{service_name}` (no path prefix).
///
/// `path_prefix` is used verbatim: callers supply either an empty string or a
/// prefix already beginning with `/`. No trailing-slash normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EndpointAddress {
    scheme: &'static str,
    host: String,
    port: u16,
    path_prefix: String,
    service_name: String,
}

impl EndpointAddress {
    /// Build the address for a transport kind from the per-transport ports.
    ///
    /// Every HTTP-family kind maps to the HTTP-style address; swapping the
    /// request codec does not change the URL.
    #[must_use]
    pub fn build(
        transport: TransportKind,
        host: &str,
        http_port: u16,
        path_prefix: &str,
        rmi_port: u16,
        service_name: &str,
    ) -> Self {
        let (port, path_prefix) = if transport.is_http_family() {
            (http_port, path_prefix.to_owned())
        } else {
            (rmi_port, String::new())
        };
        Self {
            scheme: transport.scheme(),
            host: host.to_owned(),
            port,
            path_prefix,
            service_name: service_name.to_owned(),
        }
    }

    #[must_use]
    pub fn scheme(&self) -> &str {
        self.scheme
    }

    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    #[must_use]
    pub fn port(&self) -> u16 {
        self.port
    }

    #[must_use]
    pub fn service_name(&self) -> &str {
        &self.service_name
    }
}

impl fmt::Display for EndpointAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}://{}:{}{}/{}",
            self.scheme, self.host, self.port, self.path_prefix, self.service_name
        )
    }
}
