use std::env;
use std::fmt;

use crate::assessment::{ScoringPolicy, DEFAULT_FALLBACK_SCORE, DEFAULT_NORMALIZATION_BASE};

/// Distinguishes runtime behavior for different stages of the tooling.
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

/// Top-level configuration for the CLI tooling.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub telemetry: TelemetryConfig,
    pub scoring: ScoringConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let normalization_base = match env::var("APP_NORMALIZATION_BASE") {
            Ok(raw) => raw
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|base| base.is_finite() && *base > 0.0)
                .ok_or(ConfigError::InvalidNormalizationBase)?,
            Err(_) => DEFAULT_NORMALIZATION_BASE,
        };

        let fallback_score = match env::var("APP_FALLBACK_SCORE") {
            Ok(raw) => raw
                .trim()
                .parse::<u8>()
                .ok()
                .filter(|score| *score <= 100)
                .ok_or(ConfigError::InvalidFallbackScore)?,
            Err(_) => DEFAULT_FALLBACK_SCORE,
        };

        Ok(Self {
            environment,
            telemetry: TelemetryConfig { log_level },
            scoring: ScoringConfig {
                normalization_base,
                fallback_score,
            },
        })
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Score normalization dials, overridable via environment.
#[derive(Debug, Clone)]
pub struct ScoringConfig {
    pub normalization_base: f64,
    pub fallback_score: u8,
}

impl ScoringConfig {
    pub fn policy(&self) -> ScoringPolicy {
        ScoringPolicy::new(self.normalization_base, self.fallback_score)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidNormalizationBase,
    InvalidFallbackScore,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidNormalizationBase => {
                write!(f, "APP_NORMALIZATION_BASE must be a positive number")
            }
            ConfigError::InvalidFallbackScore => {
                write!(f, "APP_FALLBACK_SCORE must be an integer between 0 and 100")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
