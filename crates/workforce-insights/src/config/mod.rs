use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application, loaded once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub sources: SourcesConfig,
    pub dataset: DatasetConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(&var_or("APP_ENV", "development"));

        let host = var_or("APP_HOST", "127.0.0.1");
        let port = var_or("APP_PORT", "3000")
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = var_or("APP_LOG_LEVEL", "info");

        let timeout_secs = var_or("UPSTREAM_TIMEOUT_SECS", "10")
            .trim()
            .parse::<u64>()
            .map_err(|_| ConfigError::InvalidTimeout)?;

        let sources = SourcesConfig {
            jsearch: JSearchConfig {
                api_key: var_or("RAPIDAPI_KEY", ""),
                api_host: var_or("RAPIDAPI_HOST", "jsearch.p.rapidapi.com"),
                url: var_or("JSEARCH_URL", "https://jsearch.p.rapidapi.com/search"),
                fallback: parse_flag("JSEARCH_FALLBACK", &var_or("JSEARCH_FALLBACK", "0"))?,
                country: var_or("DEFAULT_COUNTRY", "us"),
                language: var_or("DEFAULT_LANGUAGE", "en"),
            },
            onet: OnetConfig {
                username: var_or("ONET_API_USER", ""),
                password: var_or("ONET_API_PASS", ""),
                base_url: var_or("ONET_BASE", "https://services.onetcenter.org/ws"),
            },
            courses: CourseConfig {
                coursera_url: var_or(
                    "COURSERA_API_URL",
                    "https://api.coursera.org/api/courses.v1",
                ),
                catalog_path: env::var("COURSE_CATALOG_PATH")
                    .ok()
                    .filter(|value| !value.trim().is_empty())
                    .map(PathBuf::from),
            },
            timeout: Duration::from_secs(timeout_secs),
        };

        let dataset = DatasetConfig {
            path: PathBuf::from(var_or(
                "SKILL_DATASET_PATH",
                "dataset/skill_gap_dataset.csv",
            )),
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            sources,
            dataset,
        })
    }
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

// Flags are integers in the environment: "0" is off, any other number is on.
fn parse_flag(key: &'static str, raw: &str) -> Result<bool, ConfigError> {
    raw.trim()
        .parse::<i64>()
        .map(|value| value != 0)
        .map_err(|_| ConfigError::InvalidFlag { key })
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Upstream providers feeding the insight endpoints.
#[derive(Debug, Clone)]
pub struct SourcesConfig {
    pub jsearch: JSearchConfig,
    pub onet: OnetConfig,
    pub courses: CourseConfig,
    pub timeout: Duration,
}

#[derive(Clone)]
pub struct JSearchConfig {
    pub api_key: String,
    pub api_host: String,
    pub url: String,
    /// Serve sample postings instead of calling RapidAPI.
    pub fallback: bool,
    pub country: String,
    pub language: String,
}

impl JSearchConfig {
    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    /// Live calls need a key and the fallback switch turned off.
    pub fn uses_fallback(&self) -> bool {
        self.fallback || !self.has_api_key()
    }
}

impl fmt::Debug for JSearchConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JSearchConfig")
            .field("api_key", &redacted(&self.api_key))
            .field("api_host", &self.api_host)
            .field("url", &self.url)
            .field("fallback", &self.fallback)
            .field("country", &self.country)
            .field("language", &self.language)
            .finish()
    }
}

#[derive(Clone)]
pub struct OnetConfig {
    pub username: String,
    pub password: String,
    pub base_url: String,
}

impl OnetConfig {
    pub fn has_username(&self) -> bool {
        !self.username.trim().is_empty()
    }

    pub fn has_password(&self) -> bool {
        !self.password.trim().is_empty()
    }
}

impl fmt::Debug for OnetConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OnetConfig")
            .field("username", &redacted(&self.username))
            .field("password", &redacted(&self.password))
            .field("base_url", &self.base_url)
            .finish()
    }
}

fn redacted(secret: &str) -> &'static str {
    if secret.is_empty() {
        "<unset>"
    } else {
        "<redacted>"
    }
}

/// Where course recommendations come from.
#[derive(Debug, Clone)]
pub struct CourseConfig {
    pub coursera_url: String,
    /// A local CSV catalog replaces the Coursera search when set.
    pub catalog_path: Option<PathBuf>,
}

/// Location of the offline skill-gap export summarized by the dashboard.
#[derive(Debug, Clone)]
pub struct DatasetConfig {
    pub path: PathBuf,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidFlag { key: &'static str },
    InvalidTimeout,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidFlag { key } => write!(f, "{key} must be an integer flag"),
            ConfigError::InvalidTimeout => {
                write!(f, "UPSTREAM_TIMEOUT_SECS must be a whole number of seconds")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidFlag { .. }
            | ConfigError::InvalidTimeout => None,
        }
    }
}
