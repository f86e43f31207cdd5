//! Actions with automatic category inference

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::state::WeatherReading;

#[derive(tui_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[action(infer_categories)]
pub enum Action {
    // ===== Weather category =====
    /// Intent: fetch current weather for a city (triggers async task)
    WeatherFetch(String),

    /// Intent: re-fetch the city named by the current reading
    WeatherRefresh,

    /// Result: fetch resolved; `seq` identifies the originating request
    WeatherDidLoad { seq: u64, reading: WeatherReading },

    /// Result: fetch failed (network, non-2xx, or malformed body)
    WeatherDidError { seq: u64, message: String },

    // ===== Persist category =====
    /// Result: reading written through to the store
    PersistDidSave,

    /// Result: write-through failed; diagnostic only
    PersistDidError(String),

    // ===== Search category =====
    /// Open the city search overlay
    SearchOpen,

    /// Close the overlay without searching
    SearchClose,

    /// Search box text changed
    SearchQueryChange(String),

    /// Commit the search box text (Enter)
    SearchSubmit(String),

    // ===== UI category =====
    /// Toggle between Celsius and Fahrenheit
    UiToggleUnits,

    /// Toggle the dark palette for the whole surface
    UiToggleDarkMode,

    /// Force a re-render (for cursor movement, etc.)
    Render,

    // ===== Uncategorized (global) =====
    /// Exit the application
    Quit,
}
