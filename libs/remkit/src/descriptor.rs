//! The exposure descriptor: annotation-equivalent metadata attached to a
//! contract trait by `#[remote]`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RemotingError;

/// Which transport a contract is published over.
///
/// The three HTTP-family kinds (`Http`, `Bincode`, `MsgPack`) differ only in
/// the request codec; they share HTTP-style addressing on the client side and
/// container dispatch on the server side. `Rmi` is the legacy registry-based
/// transport with its own addressing scheme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportKind {
    /// HTTP-invoker style RPC.
    #[default]
    Http,
    /// Legacy registry-based RPC (`rmi://` addressing).
    Rmi,
    /// Binary RPC, bincode codec over HTTP.
    Bincode,
    /// Binary RPC, MessagePack codec over HTTP.
    MsgPack,
}

impl TransportKind {
    /// True for every kind addressed with an HTTP-style URL.
    #[must_use]
    pub fn is_http_family(self) -> bool {
        !matches!(self, TransportKind::Rmi)
    }

    /// URL scheme used when building an endpoint address for this kind.
    #[must_use]
    pub fn scheme(self) -> &'static str {
        if self.is_http_family() {
            "http"
        } else {
            "rmi"
        }
    }

    /// Canonical lowercase name, matching the `FromStr` spelling.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            TransportKind::Http => "http",
            TransportKind::Rmi => "rmi",
            TransportKind::Bincode => "bincode",
            TransportKind::MsgPack => "msgpack",
        }
    }
}

impl fmt::Display for TransportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransportKind {
    type Err = RemotingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "http" => Ok(TransportKind::Http),
            "rmi" => Ok(TransportKind::Rmi),
            "bincode" => Ok(TransportKind::Bincode),
            "msgpack" => Ok(TransportKind::MsgPack),
            other => Err(RemotingError::UnsupportedTransport(other.to_owned())),
        }
    }
}

/// Metadata marking a contract trait as remotely callable.
///
/// An empty `name` means "derive the external name from the trait name"; a
/// contract without a descriptor is not exposed at all.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExposureDescriptor {
    /// Explicit external name; empty means derive from the type name.
    pub name: &'static str,
    /// Selected transport. Exactly one per contract.
    pub transport: TransportKind,
}

impl ExposureDescriptor {
    #[must_use]
    pub fn new(transport: TransportKind) -> Self {
        Self {
            name: "",
            transport,
        }
    }

    #[must_use]
    pub fn named(name: &'static str, transport: TransportKind) -> Self {
        Self { name, transport }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_transport_is_http() {
        assert_eq!(TransportKind::default(), TransportKind::Http);
        assert_eq!(ExposureDescriptor::default().transport, TransportKind::Http);
    }

    #[test]
    fn http_family_membership() {
        assert!(TransportKind::Http.is_http_family());
        assert!(TransportKind::Bincode.is_http_family());
        assert!(TransportKind::MsgPack.is_http_family());
        assert!(!TransportKind::Rmi.is_http_family());
    }

    #[test]
    fn from_str_round_trips_every_kind() {
        for kind in [
            TransportKind::Http,
            TransportKind::Rmi,
            TransportKind::Bincode,
            TransportKind::MsgPack,
        ] {
            assert_eq!(kind.as_str().parse::<TransportKind>().unwrap(), kind);
        }
    }

    #[test]
    fn unknown_transport_name_fails_loudly() {
        let err = "corba".parse::<TransportKind>().unwrap_err();
        assert_eq!(err.to_string(), "unsupported transport 'corba'");
    }
}
