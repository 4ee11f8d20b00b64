use std::env;
use std::fmt;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_DATABASE: &str = "bill_db";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    fn parse(raw: Option<&str>) -> Result<Self, ConfigError> {
        match raw.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
            None | Some("") | Some("production") | Some("prod") => Ok(Environment::Production),
            Some("development") | Some("dev") => Ok(Environment::Development),
            Some(other) => Err(ConfigError::Invalid {
                key: "NODE_ENV",
                reason: format!("unknown environment '{}'", other),
            }),
        }
    }

    /// Log filter used when RUST_LOG is not set.
    pub fn default_log_filter(self) -> &'static str {
        match self {
            Environment::Development => "debug",
            Environment::Production => "info",
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid { key: &'static str, reason: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "{} must be set", key),
            ConfigError::Invalid { key, reason } => write!(f, "{} is invalid: {}", key, reason),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub mongodb_url: String,
    pub database_name: String,
    /// Base64-encoded Firebase service-account JSON
    pub firebase_service_key: String,
    pub environment: Environment,
    /// Empty means any origin is accepted
    pub cors_allowed_origins: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let mongodb_url = non_empty("MONGODB_URL").ok_or(ConfigError::Missing("MONGODB_URL"))?;
        let firebase_service_key =
            non_empty("FB_SERVICE_KEY").ok_or(ConfigError::Missing("FB_SERVICE_KEY"))?;

        let port = match non_empty("PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|e| ConfigError::Invalid {
                key: "PORT",
                reason: e.to_string(),
            })?,
            None => DEFAULT_PORT,
        };

        let environment = Environment::parse(lookup("NODE_ENV").as_deref())?;

        let cors_allowed_origins = non_empty("CORS_ALLOWED_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(|origin| origin.trim().to_string())
                    .filter(|origin| !origin.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        Ok(Config {
            host: non_empty("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            mongodb_url,
            database_name: non_empty("MONGODB_DATABASE")
                .unwrap_or_else(|| DEFAULT_DATABASE.to_string()),
            firebase_service_key,
            environment,
            cors_allowed_origins,
        })
    }

    pub fn bind_address(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    const REQUIRED: [(&str, &str); 2] = [
        ("MONGODB_URL", "mongodb://localhost:27017"),
        ("FB_SERVICE_KEY", "e30="),
    ];

    #[test]
    fn test_defaults() {
        let config = config_from(&REQUIRED).unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3000);
        assert_eq!(config.database_name, "bill_db");
        assert_eq!(config.environment, Environment::Production);
        assert!(config.cors_allowed_origins.is_empty());
    }

    #[test]
    fn test_missing_required() {
        let err = config_from(&[("FB_SERVICE_KEY", "e30=")]).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("MONGODB_URL")));

        let err = config_from(&[("MONGODB_URL", "mongodb://x")]).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("FB_SERVICE_KEY")));
    }

    #[test]
    fn test_overrides() {
        let mut pairs = REQUIRED.to_vec();
        pairs.extend([
            ("PORT", "8080"),
            ("NODE_ENV", "development"),
            ("MONGODB_DATABASE", "bills_test"),
            ("CORS_ALLOWED_ORIGINS", "http://localhost:5173, https://bills.example.com,"),
        ]);
        let config = config_from(&pairs).unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.environment.default_log_filter(), "debug");
        assert_eq!(config.database_name, "bills_test");
        assert_eq!(
            config.cors_allowed_origins,
            vec!["http://localhost:5173", "https://bills.example.com"]
        );
    }

    #[test]
    fn test_invalid_values() {
        let mut pairs = REQUIRED.to_vec();
        pairs.push(("PORT", "eighty"));
        assert!(matches!(
            config_from(&pairs).unwrap_err(),
            ConfigError::Invalid { key: "PORT", .. }
        ));

        let mut pairs = REQUIRED.to_vec();
        pairs.push(("NODE_ENV", "staging"));
        assert!(matches!(
            config_from(&pairs).unwrap_err(),
            ConfigError::Invalid { key: "NODE_ENV", .. }
        ));
    }
}
