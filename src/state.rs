//! Application state - single source of truth

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Current-weather payload from OpenWeatherMap, kept close to the wire shape.
///
/// Every section is optional: the upstream response is passed through as-is
/// and display code renders nothing for absent parts.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct WeatherReading {
    /// City display name
    pub name: Option<String>,
    pub main: Option<MainReading>,
    pub weather: Vec<Condition>,
    pub coord: Option<Coord>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct MainReading {
    /// Temperature in Kelvin, straight from the API
    pub temp: Option<f64>,
    /// Relative humidity, percent
    pub humidity: Option<u8>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct Condition {
    /// Free-text condition, lower-case and space-separated upstream
    pub description: Option<String>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct Coord {
    pub lat: f64,
    pub lon: f64,
}

impl WeatherReading {
    pub fn city(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn temp_kelvin(&self) -> Option<f64> {
        self.main.as_ref().and_then(|m| m.temp)
    }

    pub fn humidity(&self) -> Option<u8> {
        self.main.as_ref().and_then(|m| m.humidity)
    }

    pub fn description(&self) -> Option<&str> {
        self.weather.first().and_then(|c| c.description.as_deref())
    }
}

/// Temperature unit preference
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub enum TempUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

impl TempUnit {
    pub fn toggle(&self) -> Self {
        match self {
            TempUnit::Celsius => TempUnit::Fahrenheit,
            TempUnit::Fahrenheit => TempUnit::Celsius,
        }
    }

    /// Rounded display value for a Kelvin reading
    pub fn convert(&self, kelvin: f64) -> i32 {
        match self {
            TempUnit::Celsius => kelvin_to_celsius(kelvin),
            TempUnit::Fahrenheit => kelvin_to_fahrenheit(kelvin),
        }
    }

    pub fn format(&self, kelvin: f64) -> String {
        match self {
            TempUnit::Celsius => format!("{}°C", self.convert(kelvin)),
            TempUnit::Fahrenheit => format!("{}°F", self.convert(kelvin)),
        }
    }
}

/// Rounding is f64::round, half away from zero.
pub fn kelvin_to_celsius(kelvin: f64) -> i32 {
    (kelvin - 273.15).round() as i32
}

pub fn kelvin_to_fahrenheit(kelvin: f64) -> i32 {
    ((kelvin - 273.15) * 9.0 / 5.0 + 32.0).round() as i32
}

/// Application state - everything the UI needs to render
#[derive(Clone, Debug, tui_dispatch::DebugState, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppState {
    // --- Core data (visible in debug) ---
    /// Last successfully fetched reading; hydrated from the store at startup
    #[debug(section = "Weather", label = "Reading", debug_fmt)]
    pub reading: Option<WeatherReading>,

    /// Temperature unit preference
    #[debug(section = "Weather", label = "Unit", debug_fmt)]
    pub unit: TempUnit,

    /// Whether a fetch is outstanding (display keeps showing current data)
    #[debug(section = "Weather", label = "In flight")]
    pub fetch_in_flight: bool,

    /// Most recent fetch/persist failure; diagnostic only, never rendered
    #[debug(section = "Weather", label = "Last error", debug_fmt)]
    pub last_error: Option<String>,

    /// Dark palette for the whole surface
    #[debug(section = "Ui", label = "Dark mode")]
    pub dark_mode: bool,

    // --- Request bookkeeping (skipped) ---
    /// Monotonic fetch counter; completions carrying an older value are stale
    #[debug(skip)]
    pub request_seq: u64,

    // --- Search overlay (skipped) ---
    /// Whether the search overlay is open
    #[debug(skip)]
    pub search_mode: bool,

    /// Current search box text
    #[debug(skip)]
    pub search_query: String,
}

impl AppState {
    /// Create state warmed from a previously persisted reading, if any
    pub fn with_reading(reading: Option<WeatherReading>) -> Self {
        Self {
            reading,
            unit: TempUnit::default(),
            fetch_in_flight: false,
            last_error: None,
            dark_mode: false,
            request_seq: 0,
            search_mode: false,
            search_query: String::new(),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_reading(None)
    }
}
