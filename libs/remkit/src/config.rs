//! Settings for the bootstrap processors, plus typed loading over a host
//! config provider.
//!
//! Two loading modes:
//! 1. **Lenient** (`settings_or_default`): missing section falls back to
//!    `T::default()`; an invalid section is still an error.
//! 2. **Strict** (`settings_required`): the section must be present and
//!    valid.

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::secret::SecretString;

/// Server-side settings: RMI registry parameters passed through to the
/// transport layer.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExporterSettings {
    /// RMI registry host; empty means "do not set" on the exporter.
    pub rmi_registry_host: String,
    /// RMI registry port; zero means "do not set" on the exporter.
    pub rmi_registry_port: u16,
    pub always_create_registry: bool,
}

impl Default for ExporterSettings {
    fn default() -> Self {
        Self {
            rmi_registry_host: String::new(),
            rmi_registry_port: 0,
            always_create_registry: true,
        }
    }
}

/// Client-side settings: where proxies point and which contracts to scan.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ImporterSettings {
    /// Base package scanned for exposed contracts.
    pub base_package: String,
    pub host: String,
    pub http_port: u16,
    /// Either empty or already beginning with `/`; used verbatim.
    pub http_context_path: String,
    pub rmi_port: u16,
    /// Accepted for hosts that authenticate their HTTP executor; not copied
    /// into any produced configuration.
    pub user_name: Option<String>,
    /// See `user_name`.
    pub password: Option<SecretString>,
}

/// Configuration error for typed settings loading.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("settings section '{section}' not found")]
    SectionNotFound { section: String },
    #[error("invalid settings in section '{section}': {source}")]
    InvalidSettings {
        section: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Provider of raw settings sections (raw JSON by section name).
pub trait ConfigProvider: Send + Sync {
    fn get_section(&self, section: &str) -> Option<&serde_json::Value>;
}

/// Lenient loader: missing section means `T::default()`.
///
/// # Errors
/// Returns [`ConfigError::InvalidSettings`] if the section exists but cannot
/// be deserialized.
pub fn settings_or_default<T: DeserializeOwned + Default>(
    provider: &dyn ConfigProvider,
    section: &str,
) -> Result<T, ConfigError> {
    let Some(raw) = provider.get_section(section) else {
        return Ok(T::default());
    };
    serde_json::from_value(raw.clone()).map_err(|e| ConfigError::InvalidSettings {
        section: section.to_owned(),
        source: e,
    })
}

/// Strict loader: the section must be present and valid.
///
/// # Errors
/// Returns [`ConfigError::SectionNotFound`] or [`ConfigError::InvalidSettings`].
pub fn settings_required<T: DeserializeOwned>(
    provider: &dyn ConfigProvider,
    section: &str,
) -> Result<T, ConfigError> {
    let raw = provider
        .get_section(section)
        .ok_or_else(|| ConfigError::SectionNotFound {
            section: section.to_owned(),
        })?;
    serde_json::from_value(raw.clone()).map_err(|e| ConfigError::InvalidSettings {
        section: section.to_owned(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;

    struct MockConfigProvider {
        sections: HashMap<String, serde_json::Value>,
    }

    impl MockConfigProvider {
        fn new() -> Self {
            let mut sections = HashMap::new();
            sections.insert(
                "exporter".to_owned(),
                json!({
                    "rmi_registry_host": "registry1",
                    "rmi_registry_port": 1199,
                    "always_create_registry": false
                }),
            );
            sections.insert(
                "importer".to_owned(),
                json!({
                    "base_package": "app::api",
                    "host": "services.internal",
                    "http_port": 8080,
                    "http_context_path": "/remoting",
                    "rmi_port": 1099,
                    "user_name": "svc",
                    "password": "hunter2"
                }),
            );
            sections.insert("broken".to_owned(), json!({ "rmi_registry_port": "no" }));
            Self { sections }
        }
    }

    impl ConfigProvider for MockConfigProvider {
        fn get_section(&self, section: &str) -> Option<&serde_json::Value> {
            self.sections.get(section)
        }
    }

    #[test]
    fn lenient_loads_present_section() {
        let provider = MockConfigProvider::new();
        let s: ExporterSettings = settings_or_default(&provider, "exporter").unwrap();
        assert_eq!(s.rmi_registry_host, "registry1");
        assert_eq!(s.rmi_registry_port, 1199);
        assert!(!s.always_create_registry);
    }

    #[test]
    fn lenient_missing_section_yields_defaults() {
        let provider = MockConfigProvider::new();
        let s: ExporterSettings = settings_or_default(&provider, "nonexistent").unwrap();
        assert_eq!(s.rmi_registry_host, "");
        assert_eq!(s.rmi_registry_port, 0);
        assert!(s.always_create_registry, "registry creation defaults to on");
    }

    #[test]
    fn lenient_invalid_section_is_an_error() {
        let provider = MockConfigProvider::new();
        let result: Result<ExporterSettings, _> = settings_or_default(&provider, "broken");
        assert!(matches!(
            result,
            Err(ConfigError::InvalidSettings { .. })
        ));
    }

    #[test]
    fn strict_missing_section_is_an_error() {
        let provider = MockConfigProvider::new();
        let result: Result<ImporterSettings, _> = settings_required(&provider, "nonexistent");
        match result {
            Err(ConfigError::SectionNotFound { section }) => assert_eq!(section, "nonexistent"),
            other => panic!("expected SectionNotFound, got {other:?}"),
        }
    }

    #[test]
    fn importer_settings_carry_credentials_without_exposing_them() {
        let provider = MockConfigProvider::new();
        let s: ImporterSettings = settings_required(&provider, "importer").unwrap();
        assert_eq!(s.base_package, "app::api");
        assert_eq!(s.http_context_path, "/remoting");
        assert_eq!(s.user_name.as_deref(), Some("svc"));
        let password = s.password.unwrap();
        assert_eq!(password.reveal(), "hunter2");
        assert!(!format!("{password:?}").contains("hunter2"), "debug output must redact");
    }

    #[test]
    fn importer_defaults_are_empty() {
        let s = ImporterSettings::default();
        assert_eq!(s.http_context_path, "");
        assert!(s.user_name.is_none());
        assert!(s.password.is_none());
    }
}
