use std::env;
use std::fmt;
use std::path::PathBuf;

/// Area identifier the hh.ru API uses for a nationwide search.
pub const NATIONWIDE_AREA: &str = "113";

/// Distinguishes runtime behavior for different stages of the tool.
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
    pub api: ApiConfig,
    pub storage: StorageConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let base_url =
            env::var("HH_API_BASE_URL").unwrap_or_else(|_| "https://api.hh.ru".to_string());
        let per_page = env::var("HH_PER_PAGE")
            .unwrap_or_else(|_| "100".to_string())
            .parse::<u32>()
            .ok()
            .filter(|value| (1..=100).contains(value))
            .ok_or(ConfigError::InvalidPerPage)?;
        let timeout_secs = env::var("HH_TIMEOUT_SECS")
            .unwrap_or_else(|_| "10".to_string())
            .parse::<u64>()
            .map_err(|_| ConfigError::InvalidTimeout)?;
        let default_area = env::var("HH_DEFAULT_AREA")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| NATIONWIDE_AREA.to_string());

        let json_path = env::var("VACANCY_JSON_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("data/vacancies.json"));
        let csv_path = env::var("VACANCY_CSV_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("data/vacancies.csv"));

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            api: ApiConfig {
                base_url,
                per_page,
                timeout_secs,
                default_area,
            },
            storage: StorageConfig {
                json_path,
                csv_path,
            },
            telemetry: TelemetryConfig { log_level },
        })
    }
}

/// Settings for the upstream vacancy API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub per_page: u32,
    pub timeout_secs: u64,
    pub default_area: String,
}

/// Locations of the vacancy files.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub json_path: PathBuf,
    pub csv_path: PathBuf,
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPerPage,
    InvalidTimeout,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPerPage => {
                write!(f, "HH_PER_PAGE must be an integer between 1 and 100")
            }
            ConfigError::InvalidTimeout => {
                write!(f, "HH_TIMEOUT_SECS must be a whole number of seconds")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
