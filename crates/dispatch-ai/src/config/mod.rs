use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

use crate::workflows::dispatch::EngineConfig;

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

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub dispatch: DispatchTuning,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            dispatch: DispatchTuning::load()?,
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

/// Tracing and metrics controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Operator-adjustable engine dials. The factor weights are not exposed
/// here; changing them changes recommendation outcomes and requires a code
/// change on purpose.
#[derive(Debug, Clone)]
pub struct DispatchTuning {
    pub max_recommendations: usize,
    pub feedback_window_days: u32,
}

impl DispatchTuning {
    fn load() -> Result<Self, ConfigError> {
        let defaults = EngineConfig::default();

        let max_recommendations = match env::var("APP_MAX_RECOMMENDATIONS") {
            Ok(raw) => raw.parse::<usize>().map_err(|_| ConfigError::InvalidNumber {
                key: "APP_MAX_RECOMMENDATIONS",
            })?,
            Err(_) => defaults.max_recommendations,
        };

        let feedback_window_days = match env::var("APP_FEEDBACK_WINDOW_DAYS") {
            Ok(raw) => raw.parse::<u32>().map_err(|_| ConfigError::InvalidNumber {
                key: "APP_FEEDBACK_WINDOW_DAYS",
            })?,
            Err(_) => defaults.feedback_window_days,
        };

        Ok(Self {
            max_recommendations,
            feedback_window_days,
        })
    }

    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            max_recommendations: self.max_recommendations,
            feedback_window_days: self.feedback_window_days,
            ..EngineConfig::default()
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidNumber { key: &'static str },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidNumber { key } => {
                write!(f, "{key} must be a non-negative integer")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort | ConfigError::InvalidNumber { .. } => None,
            ConfigError::InvalidHost { source } => Some(source),
        }
    }
}
