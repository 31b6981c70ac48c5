use crate::workflows::attendance::{AlertThresholds, Locale};
use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
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

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub insight: InsightServiceConfig,
    pub estimator: EstimatorConfig,
    pub thresholds: AlertThresholds,
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

        let endpoint = optional_var("APP_INSIGHT_ENDPOINT");
        let timeout = optional_number::<u64>("APP_INSIGHT_TIMEOUT_SECS")?.map(Duration::from_secs);

        let default_locale = optional_var("APP_DEFAULT_LOCALE")
            .map(|code| Locale::from_code(&code))
            .unwrap_or_default();
        let seed = optional_number::<u64>("APP_ESTIMATOR_SEED")?;

        let thresholds = load_thresholds()?;

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            insight: InsightServiceConfig { endpoint, timeout },
            estimator: EstimatorConfig {
                seed,
                default_locale,
            },
            thresholds,
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

/// Remote regional-insight endpoint. No endpoint means offline mode.
#[derive(Debug, Clone, Default)]
pub struct InsightServiceConfig {
    pub endpoint: Option<String>,
    pub timeout: Option<Duration>,
}

/// Estimator and narrative defaults.
#[derive(Debug, Clone, Default)]
pub struct EstimatorConfig {
    pub seed: Option<u64>,
    pub default_locale: Locale,
}

fn optional_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn optional_number<T: FromStr>(key: &'static str) -> Result<Option<T>, ConfigError> {
    optional_var(key)
        .map(|raw| raw.parse::<T>().map_err(|_| ConfigError::InvalidNumber { key }))
        .transpose()
}

fn load_thresholds() -> Result<AlertThresholds, ConfigError> {
    let defaults = AlertThresholds::default();
    let thresholds = AlertThresholds {
        teacher_attendance_critical: optional_number("APP_ALERT_TEACHER_CRITICAL")?
            .unwrap_or(defaults.teacher_attendance_critical),
        teacher_attendance_warning: optional_number("APP_ALERT_TEACHER_WARNING")?
            .unwrap_or(defaults.teacher_attendance_warning),
        student_attendance_critical: optional_number("APP_ALERT_STUDENT_CRITICAL")?
            .unwrap_or(defaults.student_attendance_critical),
        student_attendance_warning: optional_number("APP_ALERT_STUDENT_WARNING")?
            .unwrap_or(defaults.student_attendance_warning),
        ratio_critical: optional_number("APP_ALERT_RATIO_CRITICAL")?
            .unwrap_or(defaults.ratio_critical),
        ratio_warning: optional_number("APP_ALERT_RATIO_WARNING")?
            .unwrap_or(defaults.ratio_warning),
    };

    if thresholds.is_consistent() {
        Ok(thresholds)
    } else {
        Err(ConfigError::InvalidThresholds)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidNumber { key: &'static str },
    InvalidThresholds,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidNumber { key } => write!(f, "{key} must be a valid number"),
            ConfigError::InvalidThresholds => write!(
                f,
                "alert thresholds are inconsistent: critical bounds must be stricter than warning bounds"
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidNumber { .. }
            | ConfigError::InvalidThresholds => None,
        }
    }
}
