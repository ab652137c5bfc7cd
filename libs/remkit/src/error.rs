//! Error taxonomy for the bootstrap discovery pass.
//!
//! Two classes of failure exist (and only two):
//! - soft scan errors: a single candidate's metadata cannot be read; the
//!   candidate is logged and skipped, the pass continues;
//! - enumeration failures: the metadata source itself cannot be listed; the
//!   whole pass aborts and the error propagates to the bootstrap caller.

use thiserror::Error;

/// Failure to read type metadata for a single candidate.
///
/// Providers backed by the link-time manifest never produce this; providers
/// backed by external metadata sources may.
#[derive(Debug, Clone, Error)]
#[error("cannot read type metadata for '{type_path}': {reason}")]
pub struct MetadataError {
    pub type_path: String,
    pub reason: String,
}

impl MetadataError {
    pub fn new(type_path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            type_path: type_path.into(),
            reason: reason.into(),
        }
    }
}

/// Top-level error type surfaced by the bootstrap processors.
#[derive(Debug, Error)]
pub enum RemotingError {
    /// A transport name arriving from outside the type system (host config,
    /// manifest data) did not match any known transport kind.
    #[error("unsupported transport '{0}'")]
    UnsupportedTransport(String),

    /// The contract manifest could not be enumerated at all. Fatal to the
    /// discovery pass, unlike per-candidate metadata failures.
    #[error("contract enumeration failed under base package '{base_package}'")]
    Scan {
        base_package: String,
        #[source]
        source: MetadataError,
    },
}
