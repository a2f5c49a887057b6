//! Configuration management for the screening API
//!
//! Defaults are layered with an optional `Config.toml` and then with
//! `VANITIZER_`-prefixed environment variables (nested keys separated by
//! `__`, e.g. `VANITIZER_SERVER__PORT=8080`), using the figment crate.

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use vanitizer_core::{lists::ListPaths, CascadeConfig, ProbeConfig, ReferenceSet};

pub const CONFIG_FILE: &str = "Config.toml";
pub const ENV_PREFIX: &str = "VANITIZER_";

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub lists: ListsConfig,
    pub overrides: OverridesConfig,
    pub probes: ProbesConfig,
    pub observability: ObservabilityConfig,
    pub security: SecurityConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    pub host: String,
    /// Server port
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

/// Replacement reference lists; all three paths must be set to take effect
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListsConfig {
    pub disposable_path: Option<PathBuf>,
    pub free_path: Option<PathBuf>,
    pub bad_words_path: Option<PathBuf>,
}

impl ListsConfig {
    /// Paths of the replacement lists, or `None` to use the bundled ones
    pub fn paths(&self) -> Option<ListPaths> {
        match (&self.disposable_path, &self.free_path, &self.bad_words_path) {
            (Some(disposable), Some(free), Some(bad_words)) => Some(ListPaths {
                disposable: disposable.clone(),
                free: free.clone(),
                bad_words: bad_words.clone(),
            }),
            _ => None,
        }
    }
}

/// Per-deployment overrides applied to every `/v1/domains` request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OverridesConfig {
    pub word_whitelist: Vec<String>,
    pub word_blacklist: Vec<String>,
    pub domain_whitelist: Vec<String>,
    pub domain_blacklist: Vec<String>,
}

impl OverridesConfig {
    pub fn to_cascade_config(&self) -> CascadeConfig {
        CascadeConfig::default()
            .with_word_whitelist(self.word_whitelist.iter().collect::<ReferenceSet>())
            .with_word_blacklist(self.word_blacklist.iter().collect::<ReferenceSet>())
            .with_domain_whitelist(self.domain_whitelist.iter().collect::<ReferenceSet>())
            .with_domain_blacklist(self.domain_blacklist.iter().collect::<ReferenceSet>())
    }
}

/// Google Workspace probe configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbesConfig {
    /// MX lookup timeout in milliseconds
    pub dns_timeout_ms: u64,
    /// Workspace HTTP probe timeout in milliseconds
    pub http_timeout_ms: u64,
    /// Resolver attempts per query
    pub dns_attempts: usize,
}

impl Default for ProbesConfig {
    fn default() -> Self {
        let defaults = ProbeConfig::default();
        Self {
            dns_timeout_ms: defaults.dns_timeout_ms,
            http_timeout_ms: defaults.http_timeout_ms,
            dns_attempts: defaults.dns_attempts,
        }
    }
}

impl From<&ProbesConfig> for ProbeConfig {
    fn from(config: &ProbesConfig) -> Self {
        ProbeConfig {
            dns_timeout_ms: config.dns_timeout_ms,
            http_timeout_ms: config.http_timeout_ms,
            dns_attempts: config.dns_attempts,
        }
    }
}

/// Observability configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Enable JSON structured logging
    pub json_logs: bool,
    /// Log level filter used when `RUST_LOG` is unset
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            json_logs: false,
            log_level: "info".to_string(),
        }
    }
}

/// Security configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SecurityConfig {
    /// Salt for hashing email local parts in logs; random per process if unset
    pub privacy_salt: Option<String>,
}

/// Load configuration from defaults, an optional config file and the environment
pub fn load_config(path: impl AsRef<Path>) -> Result<AppConfig, figment::Error> {
    let mut figment = Figment::from(Serialized::defaults(AppConfig::default()));

    if path.as_ref().exists() {
        figment = figment.merge(Toml::file(path.as_ref()));
    }

    figment
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
        .extract()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.probes.dns_timeout_ms, 2000);
        assert!(!config.observability.json_logs);
        assert!(config.lists.paths().is_none());
        assert!(config.overrides.domain_whitelist.is_empty());
    }

    #[test]
    fn test_partial_list_paths_are_ignored() {
        let lists = ListsConfig {
            disposable_path: Some(PathBuf::from("disposable.json")),
            free_path: None,
            bad_words_path: Some(PathBuf::from("badwords.json")),
        };
        assert!(lists.paths().is_none());
    }

    #[test]
    fn test_overrides_to_cascade_config() {
        let overrides = OverridesConfig {
            domain_whitelist: vec!["Gmail.com".to_string()],
            word_blacklist: vec!["koan".to_string()],
            ..Default::default()
        };
        let cascade = overrides.to_cascade_config();
        assert!(cascade.domain_whitelist.contains("gmail.com"));
        assert!(cascade.word_blacklist.contains("koan"));
        assert!(cascade.word_whitelist.is_empty());
        assert!(cascade.logger.is_none());
    }

    #[test]
    fn test_probe_config_conversion() {
        let probes = ProbesConfig {
            dns_timeout_ms: 100,
            http_timeout_ms: 200,
            dns_attempts: 1,
        };
        let config = ProbeConfig::from(&probes);
        assert_eq!(config.dns_timeout_ms, 100);
        assert_eq!(config.http_timeout_ms, 200);
        assert_eq!(config.dns_attempts, 1);
    }

    #[test]
    fn test_load_config_from_file_and_env() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "test.toml",
                r#"
                [server]
                port = 8080

                [overrides]
                domain_whitelist = ["gmail.com"]
                "#,
            )?;
            jail.set_env("VANITIZER_OBSERVABILITY__JSON_LOGS", "true");

            let config = load_config("test.toml")?;
            assert_eq!(config.server.port, 8080);
            assert_eq!(config.overrides.domain_whitelist, vec!["gmail.com".to_string()]);
            assert!(config.observability.json_logs);
            assert_eq!(config.server.host, "0.0.0.0");
            Ok(())
        });
    }

    #[test]
    fn test_load_config_without_file() {
        figment::Jail::expect_with(|_jail| {
            let config = load_config("missing.toml")?;
            assert_eq!(config.server.port, 3000);
            Ok(())
        });
    }
}
