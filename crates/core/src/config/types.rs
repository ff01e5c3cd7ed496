use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr};
use std::path::PathBuf;
use std::time::Duration;

use crate::catalog::{DEFAULT_BASE_URL, DEFAULT_IMAGE_BASE_URL};

/// Root configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub trending: TrendingConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::UNSPECIFIED)
}

fn default_port() -> u16 {
    8080
}

/// Database configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_db_path")]
    pub path: PathBuf,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

fn default_db_path() -> PathBuf {
    PathBuf::from("marquee.db")
}

/// Movie catalog (TMDB) configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CatalogConfig {
    /// Bearer token sent with every catalog request (TMDB "API Read Access Token").
    pub api_token: String,
    /// Base URL of the catalog REST API.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Poster CDN prefix; poster paths are appended verbatim.
    #[serde(default = "default_image_base_url")]
    pub image_base_url: String,
    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
}

impl CatalogConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(u64::from(self.timeout_secs))
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_image_base_url() -> String {
    DEFAULT_IMAGE_BASE_URL.to_string()
}

fn default_timeout() -> u32 {
    30
}

/// Search input configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchConfig {
    /// Quiet period before typed input is considered settled.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

impl SearchConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
        }
    }
}

fn default_debounce_ms() -> u64 {
    1000
}

/// Trending list configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TrendingConfig {
    /// How many records the trending list shows.
    #[serde(default = "default_trending_limit")]
    pub limit: u32,
    /// Capacity of the background record queue.
    #[serde(default = "default_queue_size")]
    pub queue_size: usize,
}

impl Default for TrendingConfig {
    fn default() -> Self {
        Self {
            limit: default_trending_limit(),
            queue_size: default_queue_size(),
        }
    }
}

fn default_trending_limit() -> u32 {
    5
}

fn default_queue_size() -> usize {
    256
}

/// Sanitized config for API responses (secrets redacted)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub catalog: SanitizedCatalogConfig,
    pub search: SearchConfig,
    pub trending: TrendingConfig,
}

/// Sanitized catalog config (token hidden)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedCatalogConfig {
    pub base_url: String,
    pub image_base_url: String,
    pub api_token_configured: bool,
    pub timeout_secs: u32,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        Self {
            server: config.server.clone(),
            database: config.database.clone(),
            catalog: SanitizedCatalogConfig {
                base_url: config.catalog.base_url.clone(),
                image_base_url: config.catalog.image_base_url.clone(),
                api_token_configured: !config.catalog.api_token.is_empty(),
                timeout_secs: config.catalog.timeout_secs,
            },
            search: config.search.clone(),
            trending: config.trending.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog(token: &str) -> CatalogConfig {
        CatalogConfig {
            api_token: token.to_string(),
            base_url: default_base_url(),
            image_base_url: default_image_base_url(),
            timeout_secs: 30,
        }
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let toml = r#"
[catalog]
api_token = "abc"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host.to_string(), "0.0.0.0");
        assert_eq!(config.database.path.to_str().unwrap(), "marquee.db");
        assert_eq!(config.catalog.base_url, "https://api.themoviedb.org/3");
        assert_eq!(
            config.catalog.image_base_url,
            "https://image.tmdb.org/t/p/w500"
        );
        assert_eq!(config.catalog.timeout(), Duration::from_secs(30));
        assert_eq!(config.search.debounce(), Duration::from_millis(1000));
        assert_eq!(config.trending.limit, 5);
        assert_eq!(config.trending.queue_size, 256);
    }

    #[test]
    fn test_deserialize_missing_catalog_fails() {
        let toml = r#"
[server]
port = 8080
"#;
        let result: Result<Config, _> = toml::from_str(toml);
        assert!(result.is_err());
    }

    #[test]
    fn test_deserialize_custom_sections() {
        let toml = r#"
[catalog]
api_token = "abc"
base_url = "http://localhost:9999/3"

[database]
path = "/data/trends.sqlite"

[trending]
limit = 10
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.catalog.base_url, "http://localhost:9999/3");
        assert_eq!(
            config.database.path.to_str().unwrap(),
            "/data/trends.sqlite"
        );
        assert_eq!(config.trending.limit, 10);
        assert_eq!(config.trending.queue_size, 256);
    }

    #[test]
    fn test_sanitized_config_hides_token() {
        let config = Config {
            catalog: catalog("secret-token"),
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            search: SearchConfig::default(),
            trending: TrendingConfig::default(),
        };

        let sanitized = SanitizedConfig::from(&config);
        assert!(sanitized.catalog.api_token_configured);

        let json = serde_json::to_string(&sanitized).unwrap();
        assert!(!json.contains("secret-token"));
    }

    #[test]
    fn test_sanitized_config_reports_missing_token() {
        let config = Config {
            catalog: catalog(""),
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            search: SearchConfig::default(),
            trending: TrendingConfig::default(),
        };

        let sanitized = SanitizedConfig::from(&config);
        assert!(!sanitized.catalog.api_token_configured);
        assert_eq!(sanitized.server.port, 8080);
    }
}
