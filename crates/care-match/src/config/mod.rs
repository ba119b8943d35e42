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

/// Top-level configuration for the matching service.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub matching: MatchingConfig,
    pub compliance: ComplianceConfig,
    pub audit: AuditConfig,
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

        let result_limit = match env::var("APP_MATCH_LIMIT") {
            Ok(raw) => raw
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|limit| *limit > 0)
                .ok_or(ConfigError::InvalidMatchLimit { value: raw })?,
            Err(_) => MatchingConfig::DEFAULT_RESULT_LIMIT,
        };

        let suspend_expired = match env::var("APP_SUSPEND_EXPIRED") {
            Ok(raw) => parse_flag(&raw).ok_or(ConfigError::InvalidFlag {
                name: "APP_SUSPEND_EXPIRED",
                value: raw,
            })?,
            Err(_) => true,
        };

        let retention = match env::var("APP_AUDIT_RETENTION") {
            Ok(raw) => raw
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|retention| *retention > 0)
                .ok_or(ConfigError::InvalidAuditRetention { value: raw })?,
            Err(_) => AuditConfig::DEFAULT_RETENTION,
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            matching: MatchingConfig { result_limit },
            compliance: ComplianceConfig { suspend_expired },
            audit: AuditConfig { retention },
        })
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
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

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchingConfig {
    /// Upper bound on ranked candidates returned when a caller does not ask for one.
    pub result_limit: usize,
}

impl MatchingConfig {
    pub const DEFAULT_RESULT_LIMIT: usize = 10;
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            result_limit: Self::DEFAULT_RESULT_LIMIT,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComplianceConfig {
    /// Whether expired-credential alerts suspend the worker after reminders go out.
    pub suspend_expired: bool,
}

impl Default for ComplianceConfig {
    fn default() -> Self {
        Self {
            suspend_expired: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuditConfig {
    /// Entries kept in memory by the audit log; older ones are dropped after forwarding.
    pub retention: usize,
}

impl AuditConfig {
    pub const DEFAULT_RETENTION: usize = 10_000;
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            retention: Self::DEFAULT_RETENTION,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidMatchLimit { value: String },
    InvalidAuditRetention { value: String },
    InvalidFlag { name: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidMatchLimit { value } => {
                write!(f, "APP_MATCH_LIMIT must be a positive integer, got '{value}'")
            }
            ConfigError::InvalidAuditRetention { value } => {
                write!(f, "APP_AUDIT_RETENTION must be a positive integer, got '{value}'")
            }
            ConfigError::InvalidFlag { name, value } => {
                write!(f, "{name} must be true or false, got '{value}'")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidMatchLimit { .. }
            | ConfigError::InvalidAuditRetention { .. }
            | ConfigError::InvalidFlag { .. } => None,
        }
    }
}
