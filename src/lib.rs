use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

pub mod domain;
pub mod infrastructure;

#[derive(Clone, Debug, Deserialize)]
pub struct MeiboConfig {
    pub server: Server,
    pub store: Store,
    pub meilisearch: Option<MeiliSearch>,
    pub client: Client,
    pub logger: Logger,
}

impl MeiboConfig {
    pub fn load() -> Result<Self, ConfigError> {
        Self::builder()?
            .add_source(File::with_name("meibo.toml").required(false))
            .add_source(
                Environment::with_prefix("MEIBO")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?
            .try_deserialize::<MeiboConfig>()
    }

    fn builder() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        Config::builder()
            .set_default("server.address", "0.0.0.0:8080")?
            .set_default("store.backend", "memory")?
            .set_default("client.api_base", "http://localhost:8080")?
            .set_default("logger.level", "INFO")
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Server {
    pub address: String,
    pub tls: Option<Tls>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Tls {
    pub cert: String,
    pub key: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Store {
    pub backend: Backend,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    MeiliSearch,
    Memory,
}

#[derive(Clone, Debug, Deserialize)]
pub struct MeiliSearch {
    pub url: String,
    pub api_key: String,
    /// 一覧取得時に1リクエストで読む文書数
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

fn default_page_size() -> usize {
    1000
}

#[derive(Clone, Debug, Deserialize)]
pub struct Client {
    pub api_base: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Logger {
    pub level: Level,
}

#[derive(Clone, Debug, Deserialize)]
pub enum Level {
    TRACE,
    DEBUG,
    INFO,
    WARN,
    ERROR,
}

impl From<&Level> for tracing::Level {
    fn from(value: &Level) -> Self {
        match value {
            Level::TRACE => tracing::Level::TRACE,
            Level::DEBUG => tracing::Level::DEBUG,
            Level::INFO => tracing::Level::INFO,
            Level::WARN => tracing::Level::WARN,
            Level::ERROR => tracing::Level::ERROR,
        }
    }
}
