//! Configuration model loaded from external sources.

use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
/// Settings required to serve the directory API.
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
    pub database_url: String,
}

#[cfg(feature = "server")]
impl ServerConfig {
    /// Layers `config/default.yaml`, the optional `config/{app_env}.yaml` and
    /// `APP_*` environment variables.
    pub fn load(app_env: &str) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            .add_source(config::File::with_name(&format!("config/{app_env}")).required(false))
            .add_source(config::Environment::with_prefix("APP"))
            .build()?
            .try_deserialize()
    }
}
