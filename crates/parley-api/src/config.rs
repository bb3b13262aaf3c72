use config::{Config as ConfigLoader, ConfigError, Environment, File, FileFormat};
use parley_llm::WorkersAiConfig;
use parley_persist::{CloudflareKvConfig, StoreBackend};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub cors: CorsConfig,
    pub store: StoreConfig,
    #[serde(default)]
    pub history: HistoryConfig,
    pub logging: LoggingConfig,

    // Secrets (from ENV only)
    #[serde(default)]
    pub cloudflare_account_id: String,
    #[serde(default)]
    pub cloudflare_api_token: String,
    #[serde(default)]
    pub cloudflare_kv_namespace_id: String,
    #[serde(default)]
    pub mongodb_uri: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_request_timeout_secs() -> u64 {
    60
}

#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    pub enabled: bool,
    #[serde(default)]
    pub origins: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreKind {
    Memory,
    CloudflareKv,
    #[serde(rename = "mongodb")]
    MongoDb,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    pub backend: StoreKind,
    /// Override for the Cloudflare API base (KV and Workers AI)
    #[serde(default)]
    pub api_base: Option<String>,
    #[serde(default = "default_database")]
    pub database: String,
    #[serde(default = "default_collection")]
    pub collection: String,
}

fn default_database() -> String {
    "parley".to_string()
}

fn default_collection() -> String {
    "sessions".to_string()
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HistoryConfig {
    /// Treat an unparseable stored history as empty instead of failing the request
    #[serde(default)]
    pub reset_on_corrupt: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Config {
    /// Load configuration from TOML files and environment variables
    ///
    /// Hierarchy (weakest to strongest):
    /// 1. config/default.toml
    /// 2. config/{ENV}.toml (if ENV is set, `dev` otherwise)
    /// 3. Environment variables prefixed `PARLEY_`, nested with `__`
    ///    (e.g. `PARLEY_SERVER__PORT=8080`)
    pub fn load() -> Result<Self, ConfigError> {
        let env = std::env::var("ENV").unwrap_or_else(|_| "dev".to_string());

        let builder = ConfigLoader::builder()
            // 1. Load default config
            .add_source(File::with_name("config/default").required(false))
            // 2. Load environment-specific config
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            // 3. Environment variables override everything
            .add_source(
                Environment::with_prefix("PARLEY")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        let mut cfg: Config = builder.build()?.try_deserialize()?;

        // Load secrets from ENV (not in TOML)
        cfg.cloudflare_account_id = required_env("CLOUDFLARE_ACCOUNT_ID")?;
        cfg.cloudflare_api_token = required_env("CLOUDFLARE_API_TOKEN")?;

        match cfg.store.backend {
            StoreKind::Memory => {}
            StoreKind::CloudflareKv => {
                cfg.cloudflare_kv_namespace_id = required_env("CLOUDFLARE_KV_NAMESPACE_ID")?;
            }
            StoreKind::MongoDb => {
                cfg.mongodb_uri = required_env("MONGODB_URI")?;
            }
        }

        Ok(cfg)
    }

    /// Load config from an inline TOML document
    pub fn from_toml_str(toml: &str) -> Result<Self, ConfigError> {
        let builder = ConfigLoader::builder().add_source(File::from_str(toml, FileFormat::Toml));

        builder.build()?.try_deserialize()
    }

    pub fn inference(&self) -> WorkersAiConfig {
        let config = WorkersAiConfig::new(&self.cloudflare_account_id, &self.cloudflare_api_token);
        match &self.store.api_base {
            Some(base) => config.with_base_url(base),
            None => config,
        }
    }

    pub fn store_backend(&self) -> Result<StoreBackend, ConfigError> {
        match self.store.backend {
            StoreKind::Memory => Ok(StoreBackend::Memory),
            StoreKind::CloudflareKv => Ok(StoreBackend::CloudflareKv(CloudflareKvConfig {
                account_id: self.cloudflare_account_id.clone(),
                api_token: self.cloudflare_api_token.clone(),
                namespace_id: self.cloudflare_kv_namespace_id.clone(),
                base_url: self.store.api_base.clone(),
            })),
            #[cfg(feature = "mongodb")]
            StoreKind::MongoDb => Ok(StoreBackend::MongoDb {
                uri: self.mongodb_uri.clone(),
                database: self.store.database.clone(),
                collection: self.store.collection.clone(),
            }),
            #[cfg(not(feature = "mongodb"))]
            StoreKind::MongoDb => Err(ConfigError::Message(
                "store.backend = \"mongodb\" requires building with the `mongodb` feature".to_string(),
            )),
        }
    }
}

fn required_env(name: &str) -> Result<String, ConfigError> {
    std::env::var(name)
        .map_err(|_| ConfigError::Message(format!("{} environment variable is required", name)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOML: &str = r#"
        [server]
        host = "127.0.0.1"
        port = 8787

        [cors]
        enabled = true
        origins = ["http://localhost:8787"]

        [store]
        backend = "cloudflare_kv"
        api_base = "http://localhost:9000"

        [history]
        reset_on_corrupt = true

        [logging]
        level = "debug"
        format = "json"
    "#;

    #[test]
    fn test_config_structure() {
        let config: Config = toml::from_str(TOML).unwrap();
        assert_eq!(config.server.port, 8787);
        assert_eq!(config.server.request_timeout_secs, 60);
        assert_eq!(config.store.backend, StoreKind::CloudflareKv);
        assert_eq!(config.store.database, "parley");
        assert!(config.history.reset_on_corrupt);
    }

    #[test]
    fn test_from_toml_str_matches_toml_crate() {
        let config = Config::from_toml_str(TOML).unwrap();
        assert_eq!(config.cors.origins, vec!["http://localhost:8787".to_string()]);
        assert_eq!(config.logging.format, "json");
    }

    #[test]
    fn test_history_section_is_optional() {
        let toml = TOML.replace("[history]\n        reset_on_corrupt = true", "");
        let config: Config = toml::from_str(&toml).unwrap();
        assert!(!config.history.reset_on_corrupt);
    }

    #[test]
    fn test_store_backend_uses_secrets_and_api_base() {
        let mut config: Config = toml::from_str(TOML).unwrap();
        config.cloudflare_account_id = "acc".to_string();
        config.cloudflare_api_token = "tok".to_string();
        config.cloudflare_kv_namespace_id = "ns".to_string();

        match config.store_backend().unwrap() {
            StoreBackend::CloudflareKv(kv) => {
                assert_eq!(kv.namespace_id, "ns");
                assert_eq!(kv.base_url.as_deref(), Some("http://localhost:9000"));
            }
            other => panic!("unexpected backend: {}", other.name()),
        }
        assert_eq!(config.inference().base_url.as_deref(), Some("http://localhost:9000"));
    }
}
