// utils/config.rs
use crate::utils::error::{AppError, Result};
use chrono::NaiveTime;
use dotenv::dotenv;
use serde::Deserialize;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // Environnement
    pub run_mode: String,
    pub log_level: String,
    pub logging_format: String,

    // API
    pub api_url: String,
    pub http_timeout_seconds: u64,

    // Session (None = stockage en mémoire)
    pub session_file: Option<PathBuf>,

    // Grille de créneaux par défaut
    pub slot_day_start: NaiveTime,
    pub slot_day_end: NaiveTime,
    pub slot_step_minutes: u32,
}

impl Config {
    /// Charger la configuration depuis les variables d'environnement
    pub fn from_env() -> Result<Self> {
        // Charger le fichier .env si présent
        let _ = dotenv().ok();

        let config = Config {
            run_mode: env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string()),
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            logging_format: env::var("LOGGING_FORMAT").unwrap_or_else(|_| "json".to_string()),

            api_url: env::var("API_URL")
                .unwrap_or_else(|_| "http://localhost:8080/api".to_string())
                .trim_end_matches('/')
                .to_string(),
            http_timeout_seconds: env::var("HTTP_TIMEOUT_SECONDS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .map_err(|_| AppError::Config("HTTP_TIMEOUT_SECONDS must be a number".to_string()))?,

            session_file: env::var("SESSION_FILE").ok().map(PathBuf::from),

            slot_day_start: parse_time_var("SLOT_DAY_START", "09:00")?,
            slot_day_end: parse_time_var("SLOT_DAY_END", "18:00")?,
            slot_step_minutes: env::var("SLOT_STEP_MINUTES")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .map_err(|_| AppError::Config("SLOT_STEP_MINUTES must be a number".to_string()))?,
        };

        if config.slot_step_minutes == 0 {
            return Err(AppError::Config("SLOT_STEP_MINUTES must be positive".to_string()));
        }

        Ok(config)
    }

    /// Configuration pointant vers une URL donnée (tests, outils)
    pub fn with_api_url(api_url: &str) -> Self {
        Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            ..Self::default()
        }
    }

    /// Vérifier si on est en production
    pub fn is_production(&self) -> bool {
        self.run_mode == "production"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            run_mode: "development".to_string(),
            log_level: "info".to_string(),
            logging_format: "compact".to_string(),
            api_url: "http://localhost:8080/api".to_string(),
            http_timeout_seconds: 30,
            session_file: None,
            slot_day_start: NaiveTime::from_hms_opt(9, 0, 0).unwrap_or_default(),
            slot_day_end: NaiveTime::from_hms_opt(18, 0, 0).unwrap_or_default(),
            slot_step_minutes: 30,
        }
    }
}

fn parse_time_var(name: &str, default: &str) -> Result<NaiveTime> {
    let raw = env::var(name).unwrap_or_else(|_| default.to_string());
    NaiveTime::parse_from_str(&raw, "%H:%M")
        .map_err(|_| AppError::Config(format!("{} must be formatted HH:MM", name)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_slot_window() {
        let config = Config::default();
        assert_eq!(config.slot_day_start.format("%H:%M").to_string(), "09:00");
        assert_eq!(config.slot_day_end.format("%H:%M").to_string(), "18:00");
        assert_eq!(config.slot_step_minutes, 30);
        assert!(!config.is_production());
    }

    #[test]
    fn test_with_api_url_strips_trailing_slash() {
        let config = Config::with_api_url("http://127.0.0.1:9999/api/");
        assert_eq!(config.api_url, "http://127.0.0.1:9999/api");
        assert!(!config.is_production());
    }

    #[test]
    fn test_production_mode() {
        let config = Config {
            run_mode: "production".to_string(),
            ..Config::default()
        };
        assert!(config.is_production());
    }
}
