use once_cell::sync::OnceCell;
use serde::Deserialize;
use std::{env, fs};

/// Process-wide configuration for the detection engine and its CLI driver.
///
/// Every field has a usable default so the engine can run without any
/// environment set up; `.env` files are honored when present.
#[derive(Debug, Deserialize)]
pub struct Config {
    pub log_level: String,
    pub log_file: String,
    /// AI-detection score at or above which a submission is flagged (0-100).
    pub detection_threshold: f64,
    /// Similarity floor for fuzzy trap matching (0.0-1.0).
    pub similarity_threshold: f64,
}

static CONFIG: OnceCell<Config> = OnceCell::new();

impl Config {
    pub fn init(env_path: &str) -> &'static Self {
        dotenvy::from_filename(env_path).ok();

        CONFIG.get_or_init(|| {
            let log_level = env::var("DETECTOR_LOG_LEVEL").unwrap_or_else(|_| "info".into());
            let log_file =
                env::var("DETECTOR_LOG_FILE").unwrap_or_else(|_| "logs/detector.log".into());
            let detection_threshold = env::var("DETECTION_THRESHOLD")
                .ok()
                .and_then(|t| t.parse().ok())
                .unwrap_or(70.0);
            let similarity_threshold = env::var("SIMILARITY_THRESHOLD")
                .ok()
                .and_then(|t| t.parse().ok())
                .unwrap_or(0.75);

            if let Some(parent) = std::path::Path::new(&log_file).parent() {
                fs::create_dir_all(parent).expect("Failed to create log directory");
            }

            Config {
                log_level,
                log_file,
                detection_threshold,
                similarity_threshold,
            }
        })
    }

    pub fn get() -> &'static Self {
        CONFIG.get().expect("Config not initialized")
    }
}
