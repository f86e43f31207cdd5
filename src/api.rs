//! OpenWeatherMap current-weather client

use reqwest::StatusCode;
use thiserror::Error;

use crate::state::WeatherReading;

pub const DEFAULT_ENDPOINT: &str = "https://api.openweathermap.org/data/2.5/weather";

/// Fetch failure. The variants exist for diagnostics; callers treat them
/// uniformly — every failure is logged and leaves displayed state intact.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("weather request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("weather endpoint returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("malformed weather payload: {0}")]
    Payload(#[from] serde_json::Error),
}

/// Fetch current weather by city name.
///
/// The query string is passed through as typed, empty included; the endpoint
/// answers an empty `q` with a client error like any other unknown city.
pub async fn fetch_by_city(
    endpoint: &str,
    api_key: &str,
    city: &str,
) -> Result<WeatherReading, FetchError> {
    let url = format!(
        "{}?q={}&appid={}",
        endpoint,
        urlencoding::encode(city),
        api_key
    );

    let response = reqwest::get(&url).await?;
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(FetchError::Status {
            status,
            body: truncate_body(&body),
        });
    }

    Ok(serde_json::from_str(&body)?)
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        format!("{}...", &body[..MAX])
    } else {
        body.to_string()
    }
}
