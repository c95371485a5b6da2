use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use crate::intake::settings::IntakeSettings;
use crate::intake::tiers::{BudgetTierClassifier, TierTableError};

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
    pub intake: IntakeSettings,
    pub scorer_url: Option<url::Url>,
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

        let intake = load_intake_settings()?;
        let scorer_url = match non_empty_var("LEADS_SCORER_URL") {
            Some(raw) => Some(
                url::Url::parse(&raw)
                    .map_err(|source| ConfigError::InvalidUrl { value: raw, source })?,
            ),
            None => None,
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            intake,
            scorer_url,
        })
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn number_var(key: &'static str) -> Result<Option<f64>, ConfigError> {
    match non_empty_var(key) {
        Some(raw) => match raw.parse::<f64>() {
            Ok(value) if value.is_finite() && value >= 0.0 => Ok(Some(value)),
            _ => Err(ConfigError::InvalidNumber { key, value: raw }),
        },
        None => Ok(None),
    }
}

fn load_intake_settings() -> Result<IntakeSettings, ConfigError> {
    let mut settings = IntakeSettings::default();

    if let Some(minimum) = number_var("LEADS_BRAND_MIN_BUDGET")? {
        settings.brand_minimum_budget = minimum;
    }

    let bands = non_empty_var("LEADS_TIER_BANDS");
    let ceiling = number_var("LEADS_TIER_CEILING")?;
    if bands.is_some() || ceiling.is_some() {
        let bands = match bands {
            Some(raw) => BudgetTierClassifier::parse_bands(&raw)?,
            None => settings.tiers.bands().to_vec(),
        };
        let ceiling = ceiling.unwrap_or_else(|| settings.tiers.ceiling());
        settings.tiers = BudgetTierClassifier::new(bands, ceiling)?;
    }

    if let Some(seconds) = number_var("LEADS_REDIRECT_SECS")? {
        settings.redirect_delay =
            Duration::try_from_secs_f64(seconds).map_err(|_| ConfigError::InvalidNumber {
                key: "LEADS_REDIRECT_SECS",
                value: seconds.to_string(),
            })?;
    }
    if let Some(target) = non_empty_var("LEADS_BRAND_REDIRECT_TARGET") {
        settings.brand_redirect_target = target;
    }
    if let Some(target) = non_empty_var("LEADS_REDIRECT_TARGET") {
        settings.default_redirect_target = target;
    }
    if let Some(admin) = non_empty_var("LEADS_ADMIN_EMAIL") {
        settings.admin_email = admin;
    }
    if let Some(sender) = non_empty_var("LEADS_SENDER") {
        settings.sender = sender;
    }
    if let Some(rows) = non_empty_var("LEADS_RECEIPT_ROWS_PER_PAGE") {
        settings.receipt_rows_per_page = match rows.parse::<usize>() {
            Ok(value) if value > 0 => value,
            _ => {
                return Err(ConfigError::InvalidNumber {
                    key: "LEADS_RECEIPT_ROWS_PER_PAGE",
                    value: rows,
                })
            }
        };
    }

    Ok(settings)
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
    InvalidNumber { key: &'static str, value: String },
    InvalidTierBands(TierTableError),
    InvalidUrl { value: String, source: url::ParseError },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidNumber { key, value } => {
                write!(f, "{key} must be a non-negative number, got '{value}'")
            }
            ConfigError::InvalidTierBands(err) => {
                write!(f, "LEADS_TIER_BANDS/LEADS_TIER_CEILING rejected: {err}")
            }
            ConfigError::InvalidUrl { value, .. } => {
                write!(f, "LEADS_SCORER_URL '{value}' is not a valid URL")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort | ConfigError::InvalidNumber { .. } => None,
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidTierBands(err) => Some(err),
            ConfigError::InvalidUrl { source, .. } => Some(source),
        }
    }
}

impl From<TierTableError> for ConfigError {
    fn from(value: TierTableError) -> Self {
        Self::InvalidTierBands(value)
    }
}
