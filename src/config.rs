use thiserror::Error;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: String,
    pub max_connections: Option<u32>,
    /// Number of demo products generated at startup. Zero disables seeding.
    pub seed_products: usize,
}

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("invalid value {value:?} for {key}")]
    Invalid { key: &'static str, value: String },
}

impl Config {
    /// Reads the configuration from the process environment, loading `.env` first.
    pub fn from_env() -> Result<Config, ConfigError> {
        dotenvy::dotenv().ok();
        Config::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Config, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;
        let bind_addr = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_owned());

        let max_connections = match lookup("DB_MAX_CONNECTIONS") {
            Some(value) => Some(parse("DB_MAX_CONNECTIONS", value)?),
            None => None,
        };

        let seed_products = match lookup("SEED_PRODUCTS") {
            Some(value) => parse("SEED_PRODUCTS", value)?,
            None => 0,
        };

        Ok(Config {
            database_url,
            bind_addr,
            max_connections,
            seed_products,
        })
    }
}

fn parse<T: std::str::FromStr>(key: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse::<T>()
        .map_err(|_| ConfigError::Invalid { key, value })
}
