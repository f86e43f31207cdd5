//! Write-through store for the most recent reading.
//!
//! One JSON document per key under the data directory. Saves report errors
//! for the diagnostic sink; loads are best-effort — an empty or unreadable
//! store is a cold start, not a failure.

use std::path::{Path, PathBuf};

use crate::state::WeatherReading;

/// The single store key the widget uses
pub const WEATHER_DATA_KEY: &str = "weatherData";

pub fn reading_path(data_dir: &Path) -> PathBuf {
    data_dir.join(format!("{WEATHER_DATA_KEY}.json"))
}

pub async fn save_reading(path: &Path, reading: &WeatherReading) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| format!("Failed to create store directory: {}", e))?;
    }
    let json = serde_json::to_string_pretty(reading)
        .map_err(|e| format!("Failed to serialize reading: {}", e))?;
    tokio::fs::write(path, json)
        .await
        .map_err(|e| format!("Failed to write store file: {}", e))
}

pub async fn load_reading(path: &Path) -> Option<WeatherReading> {
    let json = tokio::fs::read_to_string(path).await.ok()?;
    serde_json::from_str(&json).ok()
}
