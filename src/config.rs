use std::env;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredictorSource {
    Http,
    Demo,
}

#[derive(Debug, Clone)]
pub struct PredictorConfig {
    pub base_url: String,
    pub source: PredictorSource,
    /// `None` leaves requests without a deadline.
    pub timeout: Option<Duration>,
    pub threads: usize,
}

impl PredictorConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any variable source, so callers other than the
    /// process environment (tests, embedding) can supply values.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let base_url = lookup("PREDICTOR_BASE_URL")
            .map(|val| val.trim().trim_end_matches('/').to_string())
            .filter(|val| !val.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let source = match lookup("PREDICTOR_SOURCE")
            .unwrap_or_else(|| "http".to_string())
            .trim()
            .to_lowercase()
            .as_str()
        {
            "demo" => PredictorSource::Demo,
            _ => PredictorSource::Http,
        };
        let timeout_secs = lookup("PREDICT_TIMEOUT_SECS")
            .and_then(|val| val.trim().parse::<u64>().ok())
            .unwrap_or(0);
        Self {
            base_url,
            source,
            timeout: request_timeout(timeout_secs),
            threads: lookup("PREDICT_THREADS")
                .and_then(|val| val.trim().parse::<usize>().ok())
                .unwrap_or(2)
                .clamp(2, 8),
        }
    }

    pub fn predict_url(&self) -> String {
        format!("{}/api/predict", self.base_url)
    }

    pub fn predict_players_url(&self) -> String {
        format!("{}/api/predict_players", self.base_url)
    }
}

/// Zero means no deadline; other values are clamped to 1..=600 seconds.
pub fn request_timeout(secs: u64) -> Option<Duration> {
    if secs == 0 {
        None
    } else {
        Some(Duration::from_secs(secs.clamp(1, 600)))
    }
}
