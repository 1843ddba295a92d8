use core_config::{FromEnv, server::ServerConfig};
use database::postgres::PostgresConfig;

// Re-export Environment for use in other modules
pub use core_config::Environment;

/// Application-specific configuration
/// Composes shared config components from the `core_config` library
#[derive(Clone, Debug)]
pub struct Config {
    pub postgres: PostgresConfig,
    pub server: ServerConfig,
    pub environment: Environment,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let postgres = PostgresConfig::from_env()?;
        let server = ServerConfig::from_env()?;

        Ok(Self {
            postgres,
            server,
            environment,
        })
    }
}
