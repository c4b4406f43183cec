use serde::Deserialize;
use sqlx::postgres::PgConnectOptions;
use std::env;
use std::str::FromStr;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub environment: Environment,
    pub log_format: LogFormat,
    pub database: DatabaseSettings,
    // Upstream admin API serving students, courses and enrollments
    pub catalog_api_url: String,
    pub catalog_timeout_secs: u64,
    // Empty means any origin
    pub cors_allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
    Test,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Where error logs are stored
#[derive(Debug, Clone)]
pub enum DatabaseSettings {
    InMemory,
    Postgres(PgConnectOptions),
}

const DEFAULT_DB_HOST: &str = "localhost";
const DEFAULT_DB_PORT: &str = "5432";
const DEFAULT_DB_USER: &str = "postgres";
const DEFAULT_DB_PASSWORD: &str = "postgres";
const DEFAULT_DB_NAME: &str = "student_admin";

impl DatabaseSettings {
    /// Test runs use memory; otherwise `DATABASE_URL` wins over the discrete
    /// `DB_*` variables, which fall back to the `POSTGRES_*` image variables
    fn resolve(
        environment: Environment,
        lookup: &impl Fn(&str) -> Option<String>,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        if environment == Environment::Test {
            return Ok(Self::InMemory);
        }

        if let Some(url) = lookup("DATABASE_URL").filter(|url| !url.is_empty()) {
            return Ok(Self::Postgres(PgConnectOptions::from_str(&url)?));
        }

        let var = |keys: &[&str], default: &str| {
            keys.iter()
                .find_map(|key| lookup(*key))
                .unwrap_or_else(|| default.to_string())
        };
        let port: u16 = var(&["DB_PORT"], DEFAULT_DB_PORT).parse()?;

        // Credentials go through the typed builder so reserved URL characters stay literal
        let options = PgConnectOptions::new()
            .host(&var(&["DB_HOST"], DEFAULT_DB_HOST))
            .port(port)
            .username(&var(&["DB_USER", "POSTGRES_USER"], DEFAULT_DB_USER))
            .password(&var(&["DB_PASSWORD", "POSTGRES_PASSWORD"], DEFAULT_DB_PASSWORD))
            .database(&var(&["DB_NAME", "POSTGRES_DB"], DEFAULT_DB_NAME));

        Ok(Self::Postgres(options))
    }
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let environment_name = lookup("NODE_ENV")
            .or_else(|| lookup("ENVIRONMENT"))
            .unwrap_or_else(|| "development".to_string());
        let environment = match environment_name.trim().to_lowercase().as_str() {
            "production" => Environment::Production,
            "test" => Environment::Test,
            _ => Environment::Development,
        };

        let config = Config {
            host: var("HOST", "0.0.0.0"),
            port: var("PORT", "8080").parse()?,
            environment,
            log_format: match var("LOG_FORMAT", "pretty").as_str() {
                "json" => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
            database: DatabaseSettings::resolve(environment, &lookup)?,
            catalog_api_url: var("CATALOG_API_URL", "http://localhost:3000/api"),
            catalog_timeout_secs: var("CATALOG_TIMEOUT_SECS", "5").parse()?,
            cors_allowed_origins: var("CORS_ALLOWED_ORIGINS", "")
                .split(',')
                .map(str::trim)
                .filter(|origin| !origin.is_empty())
                .map(str::to_string)
                .collect(),
        };

        Ok(config)
    }
}
