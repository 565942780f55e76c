use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::{EditorialError, Result};

pub const CONFIG_PATH_ENV: &str = "EDITORIAL_API_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub services: ServicesConfig,
    #[serde(default)]
    pub site: SiteConfig,
    pub thumbor: ThumborConfig,
    #[serde(default)]
    pub circuit_breaker: CircuitBreakerConfig,
}

/// Base URLs of the backend services the aggregator fans out to.
#[derive(Debug, Clone, Deserialize)]
pub struct ServicesConfig {
    pub editorial_url: String,
    pub section_url: String,
    pub journalist_url: String,
    pub tag_url: String,
    pub multimedia_url: String,
    pub membership_url: String,
    pub legacy_url: String,
    #[serde(default)]
    pub legacy_host_header: Option<String>,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    /// Top-level domain appended to every generated host, e.g. "com".
    #[serde(default = "default_extension")]
    pub extension: String,
    #[serde(default = "default_player_host")]
    pub player_host: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ThumborConfig {
    pub server_url: String,
    #[serde(default)]
    pub secret: String,
    pub bucket: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CircuitBreakerConfig {
    #[serde(default = "default_failure_threshold")]
    pub failure_threshold: u32,
    #[serde(default = "default_recovery_timeout_seconds")]
    pub recovery_timeout_seconds: u64,
}

fn default_timeout_seconds() -> u64 {
    5
}

fn default_extension() -> String {
    "com".to_string()
}

fn default_player_host() -> String {
    "https://player.elconfidencial.com".to_string()
}

fn default_failure_threshold() -> u32 {
    5
}

fn default_recovery_timeout_seconds() -> u64 {
    30
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self { extension: default_extension(), player_host: default_player_host() }
    }
}

impl Default for CircuitBreakerConfig {
    fn default() -> Self {
        Self {
            failure_threshold: default_failure_threshold(),
            recovery_timeout_seconds: default_recovery_timeout_seconds(),
        }
    }
}

impl Config {
    /// Load from `$EDITORIAL_API_CONFIG`, falling back to `config.toml`.
    pub fn load() -> Result<Self> {
        let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::load_from(path)
    }

    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            EditorialError::Config(format!("Failed to read config file '{}': {}", path.display(), e))
        })?;
        let mut config = Self::from_toml(&content)?;
        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// `EDITORIAL_API_SERVICES_<KEY>` and `EDITORIAL_API_THUMBOR_<KEY>` win over the file.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let services = &mut self.services;
        let service_fields: [(&str, &mut String); 7] = [
            ("EDITORIAL_API_SERVICES_EDITORIAL_URL", &mut services.editorial_url),
            ("EDITORIAL_API_SERVICES_SECTION_URL", &mut services.section_url),
            ("EDITORIAL_API_SERVICES_JOURNALIST_URL", &mut services.journalist_url),
            ("EDITORIAL_API_SERVICES_TAG_URL", &mut services.tag_url),
            ("EDITORIAL_API_SERVICES_MULTIMEDIA_URL", &mut services.multimedia_url),
            ("EDITORIAL_API_SERVICES_MEMBERSHIP_URL", &mut services.membership_url),
            ("EDITORIAL_API_SERVICES_LEGACY_URL", &mut services.legacy_url),
        ];
        for (key, field) in service_fields {
            if let Some(value) = lookup(key) {
                *field = value;
            }
        }
        if let Some(value) = lookup("EDITORIAL_API_SERVICES_LEGACY_HOST_HEADER") {
            services.legacy_host_header = Some(value);
        }

        let thumbor = &mut self.thumbor;
        let thumbor_fields: [(&str, &mut String); 3] = [
            ("EDITORIAL_API_THUMBOR_SERVER_URL", &mut thumbor.server_url),
            ("EDITORIAL_API_THUMBOR_SECRET", &mut thumbor.secret),
            ("EDITORIAL_API_THUMBOR_BUCKET", &mut thumbor.bucket),
        ];
        for (key, field) in thumbor_fields {
            if let Some(value) = lookup(key) {
                *field = value;
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        let s = &self.services;
        let urls = [
            ("editorial_url", &s.editorial_url),
            ("section_url", &s.section_url),
            ("journalist_url", &s.journalist_url),
            ("tag_url", &s.tag_url),
            ("multimedia_url", &s.multimedia_url),
            ("membership_url", &s.membership_url),
            ("legacy_url", &s.legacy_url),
            ("thumbor.server_url", &self.thumbor.server_url),
        ];
        for (name, value) in urls {
            if value.trim().is_empty() {
                return Err(EditorialError::Config(format!("'{}' must not be empty", name)));
            }
        }
        if s.timeout_seconds == 0 {
            return Err(EditorialError::Config("'timeout_seconds' must be greater than zero".into()));
        }
        if self.circuit_breaker.failure_threshold == 0 {
            return Err(EditorialError::Config("'failure_threshold' must be greater than zero".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r#"
        [services]
        editorial_url = "http://editorial.local"
        section_url = "http://section.local"
        journalist_url = "http://journalist.local"
        tag_url = "http://tag.local"
        multimedia_url = "http://multimedia.local"
        membership_url = "http://membership.local"
        legacy_url = "http://legacy.local"
        timeout_seconds = 3

        [thumbor]
        server_url = "https://images.local"
        secret = "s3cret"
        bucket = "bucket"
    "#;

    #[test]
    fn test_load_from_file_with_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let config = Config::load_from(file.path()).unwrap();
        assert_eq!(config.services.timeout_seconds, 3);
        assert_eq!(config.site.extension, "com");
        assert_eq!(config.circuit_breaker.failure_threshold, 5);
        assert_eq!(config.circuit_breaker.recovery_timeout_seconds, 30);
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let err = Config::load_from("/definitely/not/here.toml").unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_env_overrides() {
        let mut config = Config::from_toml(SAMPLE).unwrap();
        config.apply_env_overrides(|key| match key {
            "EDITORIAL_API_SERVICES_EDITORIAL_URL" => Some("http://override.local".to_string()),
            "EDITORIAL_API_THUMBOR_SECRET" => Some("other".to_string()),
            _ => None,
        });
        assert_eq!(config.services.editorial_url, "http://override.local");
        assert_eq!(config.thumbor.secret, "other");
        assert_eq!(config.services.section_url, "http://section.local");
    }

    #[test]
    fn test_validation_rejects_zero_timeout_and_empty_url() {
        let mut config = Config::from_toml(SAMPLE).unwrap();
        config.services.timeout_seconds = 0;
        assert!(config.validate().is_err());

        let mut config = Config::from_toml(SAMPLE).unwrap();
        config.services.tag_url = "  ".into();
        assert!(config.validate().is_err());
    }
}
