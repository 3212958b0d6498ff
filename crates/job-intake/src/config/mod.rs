use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

/// Form-processing endpoint receiving completed applications.
pub const DEFAULT_SINK_URL: &str = "https://usebasin.com/f/e1c50fe8a6e1";

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

/// Top-level configuration for the intake service and console.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub sink: SinkConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let endpoint = env::var("APP_SINK_URL").unwrap_or_else(|_| DEFAULT_SINK_URL.to_string());
        let sink = SinkConfig::new(endpoint)?;

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            sink,
        })
    }
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

/// Outbound form-processing endpoint.
#[derive(Debug, Clone)]
pub struct SinkConfig {
    pub endpoint: reqwest::Url,
}

impl SinkConfig {
    pub fn new(endpoint: impl AsRef<str>) -> Result<Self, ConfigError> {
        let raw = endpoint.as_ref().trim();
        let endpoint = reqwest::Url::parse(raw).map_err(|err| ConfigError::InvalidSinkUrl {
            value: raw.to_string(),
            reason: err.to_string(),
        })?;

        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(ConfigError::UnsupportedSinkScheme {
                scheme: endpoint.scheme().to_string(),
            });
        }

        Ok(Self { endpoint })
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost {
        source: std::net::AddrParseError,
    },
    InvalidSinkUrl {
        value: String,
        reason: String,
    },
    UnsupportedSinkScheme {
        scheme: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidSinkUrl { value, reason } => {
                write!(f, "APP_SINK_URL '{}' is not a valid URL ({})", value, reason)
            }
            ConfigError::UnsupportedSinkScheme { scheme } => {
                write!(f, "APP_SINK_URL must use http or https (found '{}')", scheme)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidSinkUrl { .. }
            | ConfigError::UnsupportedSinkScheme { .. } => None,
        }
    }
}
