use crate::registration::EligibilityConfig;
use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

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
    pub eligibility: EligibilityConfig,
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

        let defaults = EligibilityConfig::default();
        let submission_years = match env::var("APP_SUBMISSION_YEARS") {
            Ok(raw) => parse_year_list(&raw)
                .ok_or_else(|| ConfigError::InvalidSubmissionYears { value: raw.clone() })?,
            Err(_) => defaults.submission_years,
        };
        let min_intake_year = match env::var("APP_MIN_INTAKE_YEAR") {
            Ok(raw) => raw
                .trim()
                .parse::<i32>()
                .map_err(|_| ConfigError::InvalidMinIntakeYear { value: raw.clone() })?,
            Err(_) => defaults.min_intake_year,
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            eligibility: EligibilityConfig {
                submission_years,
                min_intake_year,
            },
        })
    }
}

// Comma-separated list of years of study, e.g. "3,5".
fn parse_year_list(raw: &str) -> Option<Vec<i32>> {
    let years = raw
        .split(',')
        .map(|part| part.trim().parse::<i32>().ok())
        .collect::<Option<Vec<_>>>()?;

    if years.is_empty() || years.iter().any(|year| *year < 1) {
        return None;
    }

    Some(years)
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

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidSubmissionYears { value: String },
    InvalidMinIntakeYear { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidSubmissionYears { value } => write!(
                f,
                "APP_SUBMISSION_YEARS must be a comma-separated list of positive years, got '{value}'"
            ),
            ConfigError::InvalidMinIntakeYear { value } => {
                write!(f, "APP_MIN_INTAKE_YEAR must be a valid year, got '{value}'")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidSubmissionYears { .. }
            | ConfigError::InvalidMinIntakeYear { .. } => None,
        }
    }
}
