use std::env;

const DEFAULT_DATABASE_URL: &str = "app.db";
const DEFAULT_ADDRESS: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_POOL_SIZE: u32 = 10;

/// Runtime settings read from the process environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub database_url: String,
    pub address: String,
    pub port: u16,
    pub pool_size: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            address: DEFAULT_ADDRESS.to_string(),
            port: DEFAULT_PORT,
            pool_size: DEFAULT_POOL_SIZE,
        }
    }
}

impl ServerConfig {
    /// Read `DATABASE_URL`, `ADDRESS`, `PORT` and `DATABASE_POOL_SIZE`,
    /// falling back to defaults for missing or unparsable values.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Self {
            database_url: lookup("DATABASE_URL").unwrap_or(defaults.database_url),
            address: lookup("ADDRESS").unwrap_or(defaults.address),
            port: lookup("PORT")
                .and_then(|value| value.parse::<u16>().ok())
                .unwrap_or(defaults.port),
            pool_size: lookup("DATABASE_POOL_SIZE")
                .and_then(|value| value.parse::<u32>().ok())
                .filter(|size| *size > 0)
                .unwrap_or(defaults.pool_size),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> ServerConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn missing_variables_use_defaults() {
        assert_eq!(config_from(&[]), ServerConfig::default());
    }

    #[test]
    fn variables_override_defaults() {
        let config = config_from(&[
            ("DATABASE_URL", "/tmp/catalog.db"),
            ("ADDRESS", "0.0.0.0"),
            ("PORT", "3001"),
            ("DATABASE_POOL_SIZE", "4"),
        ]);

        assert_eq!(config.database_url, "/tmp/catalog.db");
        assert_eq!(config.address, "0.0.0.0");
        assert_eq!(config.port, 3001);
        assert_eq!(config.pool_size, 4);
    }

    #[test]
    fn unparsable_numbers_fall_back() {
        let config = config_from(&[("PORT", "eighty"), ("DATABASE_POOL_SIZE", "0")]);

        assert_eq!(config.port, 8080);
        assert_eq!(config.pool_size, 10);
    }
}
