use secrecy::{ExposeSecret, Secret};
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct DadConfig {
    pub common: core_config::Config,
    pub service_name: String,
    pub service_version: String,
    pub log_level: String,
    pub otlp_endpoint: Option<String>,
    pub mongodb: MongoConfig,
    pub cors: CorsConfig,
    pub swagger: SwaggerConfig,
}

#[derive(Clone)]
pub struct MongoConfig {
    pub uri: Secret<String>,
    pub database: String,
    pub collection: String,
    pub timeout_secs: u64,
}

impl std::fmt::Debug for MongoConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MongoConfig")
            .field("uri", &"[REDACTED]")
            .field("database", &self.database)
            .field("collection", &self.collection)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl MongoConfig {
    pub fn uri(&self) -> &str {
        self.uri.expose_secret()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone)]
pub struct CorsConfig {
    /// `*` allows any origin.
    pub allowed_origins: Vec<String>,
}

impl CorsConfig {
    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origins.iter().any(|o| o == "*")
    }
}

#[derive(Debug, Clone)]
pub struct SwaggerConfig {
    pub enabled: bool,
}

impl DadConfig {
    /// Load from the process environment. `MONGO` is the only required key.
    pub fn load() -> Result<Self, AppError> {
        let common_config = core_config::Config::load()?;
        Self::from_lookup(common_config, |key| env::var(key).ok())
    }

    pub fn from_lookup<F>(common: core_config::Config, lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let timeout_secs: u64 = parse_env(&lookup, "MONGO_TIMEOUT_SECS", "10")?;
        if timeout_secs == 0 {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "MONGO_TIMEOUT_SECS must be greater than zero"
            )));
        }

        Ok(DadConfig {
            common,
            service_name: get_env(&lookup, "SERVICE_NAME", Some("dad-service"))?,
            service_version: get_env(
                &lookup,
                "SERVICE_VERSION",
                Some(env!("CARGO_PKG_VERSION")),
            )?,
            log_level: get_env(&lookup, "LOG_LEVEL", Some("info"))?,
            otlp_endpoint: lookup("OTLP_ENDPOINT").filter(|v| !v.is_empty()),
            mongodb: MongoConfig {
                uri: Secret::new(get_env(&lookup, "MONGO", None)?),
                database: get_env(&lookup, "MONGO_DATABASE", Some("dad-api"))?,
                collection: get_env(&lookup, "MONGO_COLLECTION", Some("contents"))?,
                timeout_secs,
            },
            cors: CorsConfig {
                allowed_origins: get_env(&lookup, "CORS_ALLOWED_ORIGINS", Some("*"))?
                    .split(',')
                    .map(|o| o.trim().to_string())
                    .filter(|o| !o.is_empty())
                    .collect(),
            },
            swagger: SwaggerConfig {
                enabled: parse_env(&lookup, "SWAGGER_ENABLED", "true")?,
            },
        })
    }
}

fn get_env<F>(lookup: &F, key: &str, default: Option<&str>) -> Result<String, AppError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key).filter(|v| !v.is_empty()) {
        Some(val) => Ok(val),
        None => match default {
            Some(def) => Ok(def.to_string()),
            None => Err(AppError::ConfigError(anyhow::anyhow!(
                "{} environment variable is not set",
                key
            ))),
        },
    }
}

fn parse_env<F, T>(lookup: &F, key: &str, default: &str) -> Result<T, AppError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let raw = get_env(lookup, key, Some(default))?;
    raw.parse().map_err(|e: T::Err| {
        AppError::ConfigError(anyhow::anyhow!("Invalid value '{}' for {}: {}", raw, key, e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<DadConfig, AppError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        DadConfig::from_lookup(core_config::Config::default(), |key| vars.get(key).cloned())
    }

    #[test]
    fn missing_mongo_is_a_config_error() {
        let err = load(&[]).expect_err("MONGO is required");
        assert!(matches!(err, AppError::ConfigError(_)));
        assert!(err.to_string().contains("MONGO"));
    }

    #[test]
    fn empty_mongo_is_treated_as_missing() {
        let err = load(&[("MONGO", "")]).expect_err("empty MONGO is rejected");
        assert!(matches!(err, AppError::ConfigError(_)));
    }

    #[test]
    fn defaults_cover_everything_but_mongo() {
        let config = load(&[("MONGO", "mongodb://localhost:27017")]).unwrap();

        assert_eq!(config.common.port, 3000);
        assert_eq!(config.mongodb.uri(), "mongodb://localhost:27017");
        assert_eq!(config.mongodb.database, "dad-api");
        assert_eq!(config.mongodb.collection, "contents");
        assert_eq!(config.mongodb.timeout(), Duration::from_secs(10));
        assert_eq!(config.service_name, "dad-service");
        assert_eq!(config.log_level, "info");
        assert!(config.otlp_endpoint.is_none());
        assert!(config.cors.allows_any_origin());
        assert!(config.swagger.enabled);
    }

    #[test]
    fn overrides_are_applied() {
        let config = load(&[
            ("MONGO", "mongodb://db:27017"),
            ("MONGO_DATABASE", "jokes"),
            ("MONGO_COLLECTION", "lines"),
            ("MONGO_TIMEOUT_SECS", "3"),
            ("CORS_ALLOWED_ORIGINS", "https://a.example, https://b.example"),
            ("SWAGGER_ENABLED", "false"),
            ("OTLP_ENDPOINT", "http://tempo:4317"),
        ])
        .unwrap();

        assert_eq!(config.mongodb.database, "jokes");
        assert_eq!(config.mongodb.collection, "lines");
        assert_eq!(config.mongodb.timeout(), Duration::from_secs(3));
        assert_eq!(
            config.cors.allowed_origins,
            vec!["https://a.example", "https://b.example"]
        );
        assert!(!config.cors.allows_any_origin());
        assert!(!config.swagger.enabled);
        assert_eq!(config.otlp_endpoint.as_deref(), Some("http://tempo:4317"));
    }

    #[test]
    fn invalid_numbers_are_rejected() {
        let err = load(&[("MONGO", "mongodb://db"), ("MONGO_TIMEOUT_SECS", "soon")])
            .expect_err("timeout must be numeric");
        assert!(matches!(err, AppError::ConfigError(_)));

        let err = load(&[("MONGO", "mongodb://db"), ("MONGO_TIMEOUT_SECS", "0")])
            .expect_err("timeout must be positive");
        assert!(matches!(err, AppError::ConfigError(_)));
    }

    #[test]
    fn uri_is_redacted_in_debug_output() {
        let config = load(&[("MONGO", "mongodb://user:hunter2@db:27017")]).unwrap();
        assert!(!format!("{:?}", config).contains("hunter2"));
    }
}
