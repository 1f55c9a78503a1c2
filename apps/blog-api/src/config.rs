//! Application configuration loaded from environment variables.

use std::env;

use blog_infra::search::ElasticConfig;
use blog_infra::store::MongoConfig;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub mongo: Option<MongoConfig>,
    pub elastic: Option<ElasticConfig>,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let mongo = env::var("MONGODB_URL").ok().map(|url| MongoConfig {
            url,
            database: env::var("MONGODB_DATABASE").unwrap_or_else(|_| "blog".to_string()),
        });

        let elastic = env::var("ELASTICSEARCH_URL")
            .ok()
            .map(|url| ElasticConfig { url });

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            mongo,
            elastic,
        }
    }
}
