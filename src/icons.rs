//! Condition icons keyed by the upstream description string.
//!
//! The lookup is a total function: every description resolves to one of the
//! nine icons below, with clear sky as the fallback for unknown, absent, or
//! differently-cased input. Extra rows can be layered in from configuration
//! without changing that contract. Keys are matched exactly; the upstream
//! API reports descriptions lower-case and space-separated.

use std::collections::HashMap;

use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span, Text};
use serde::{Deserialize, Serialize};

/// The nine icon assets
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WeatherIcon {
    ClearSky,
    FewClouds,
    ScatteredClouds,
    BrokenClouds,
    ShowerRain,
    Rain,
    Thunderstorm,
    Snow,
    Mist,
}

/// Every art block is padded to this many rows for stable layout
pub const ART_HEIGHT: u16 = 5;

const YELLOW: Color = Color::Yellow;
const GRAY: Color = Color::Gray;
const DARK: Color = Color::DarkGray;
const BLUE: Color = Color::Blue;
const WHITE: Color = Color::White;

type ArtLines = [(&'static str, Color); ART_HEIGHT as usize];

const CLEAR_SKY: ArtLines = [
    (r"    \   /    ", YELLOW),
    (r"     .-.     ", YELLOW),
    (r"  --(   )--  ", YELLOW),
    (r"     `-'     ", YELLOW),
    (r"    /   \    ", YELLOW),
];

const FEW_CLOUDS: ArtLines = [
    (r"   \  /      ", YELLOW),
    (r" _ /''.-.    ", YELLOW),
    (r"   \_(   ).  ", GRAY),
    (r"   /(___(__) ", GRAY),
    (r"             ", GRAY),
];

const SCATTERED_CLOUDS: ArtLines = [
    (r"             ", GRAY),
    (r"     .--.    ", GRAY),
    (r"  .-(    ).  ", GRAY),
    (r" (___.__)__) ", GRAY),
    (r"             ", GRAY),
];

const BROKEN_CLOUDS: ArtLines = [
    (r"   .--.      ", DARK),
    (r"  (    ).--. ", DARK),
    (r" (___.(    ).", GRAY),
    (r"     (___.__)", GRAY),
    (r"             ", GRAY),
];

const SHOWER_RAIN: ArtLines = [
    (r"     .--.    ", GRAY),
    (r"  .-(    ).  ", GRAY),
    (r" (___.__)__) ", GRAY),
    (r"  ,',',','   ", BLUE),
    (r" ,',',','    ", BLUE),
];

const RAIN: ArtLines = [
    (r"     .--.    ", GRAY),
    (r"  .-(    ).  ", GRAY),
    (r" (___.__)__) ", GRAY),
    (r"   / / / /   ", BLUE),
    (r"  / / / /    ", BLUE),
];

const THUNDERSTORM: ArtLines = [
    (r"     .--.    ", DARK),
    (r"  .-(    ).  ", DARK),
    (r" (___.__)__) ", DARK),
    (r"    _/ _/    ", YELLOW),
    (r"   /  /      ", YELLOW),
];

const SNOW: ArtLines = [
    (r"     .--.    ", GRAY),
    (r"  .-(    ).  ", GRAY),
    (r" (___.__)__) ", GRAY),
    (r"   * * * *   ", WHITE),
    (r"  * * * *    ", WHITE),
];

const MIST: ArtLines = [
    (r"             ", GRAY),
    (r" _ - _ - _ - ", GRAY),
    (r"  - _ - _ -  ", GRAY),
    (r" _ - _ - _ - ", GRAY),
    (r"             ", GRAY),
];

impl WeatherIcon {
    pub const ALL: [WeatherIcon; 9] = [
        WeatherIcon::ClearSky,
        WeatherIcon::FewClouds,
        WeatherIcon::ScatteredClouds,
        WeatherIcon::BrokenClouds,
        WeatherIcon::ShowerRain,
        WeatherIcon::Rain,
        WeatherIcon::Thunderstorm,
        WeatherIcon::Snow,
        WeatherIcon::Mist,
    ];

    fn lines(self) -> &'static ArtLines {
        match self {
            WeatherIcon::ClearSky => &CLEAR_SKY,
            WeatherIcon::FewClouds => &FEW_CLOUDS,
            WeatherIcon::ScatteredClouds => &SCATTERED_CLOUDS,
            WeatherIcon::BrokenClouds => &BROKEN_CLOUDS,
            WeatherIcon::ShowerRain => &SHOWER_RAIN,
            WeatherIcon::Rain => &RAIN,
            WeatherIcon::Thunderstorm => &THUNDERSTORM,
            WeatherIcon::Snow => &SNOW,
            WeatherIcon::Mist => &MIST,
        }
    }

    /// Colored art block, ART_HEIGHT rows
    pub fn art(self) -> Text<'static> {
        let lines = self
            .lines()
            .iter()
            .map(|(content, color)| {
                Line::from(Span::styled(*content, Style::default().fg(*color)))
            })
            .collect::<Vec<_>>();
        Text::from(lines)
    }

    /// Single-cell fallback for areas too small for art
    pub fn emoji(self) -> &'static str {
        match self {
            WeatherIcon::ClearSky => "\u{2600}\u{fe0f}",
            WeatherIcon::FewClouds => "\u{26c5}",
            WeatherIcon::ScatteredClouds => "\u{2601}\u{fe0f}",
            WeatherIcon::BrokenClouds => "\u{2601}\u{fe0f}",
            WeatherIcon::ShowerRain => "\u{1f327}\u{fe0f}",
            WeatherIcon::Rain => "\u{1f327}\u{fe0f}",
            WeatherIcon::Thunderstorm => "\u{26c8}\u{fe0f}",
            WeatherIcon::Snow => "\u{2744}\u{fe0f}",
            WeatherIcon::Mist => "\u{1f32b}\u{fe0f}",
        }
    }
}

/// Description-to-icon rows, built-in nine plus configured extras
#[derive(Clone, Debug)]
pub struct IconTable {
    rows: HashMap<String, WeatherIcon>,
}

impl IconTable {
    pub fn builtin() -> Self {
        let rows = [
            ("clear sky", WeatherIcon::ClearSky),
            ("few clouds", WeatherIcon::FewClouds),
            ("scattered clouds", WeatherIcon::ScatteredClouds),
            ("broken clouds", WeatherIcon::BrokenClouds),
            ("shower rain", WeatherIcon::ShowerRain),
            ("rain", WeatherIcon::Rain),
            ("thunderstorm", WeatherIcon::Thunderstorm),
            ("snow", WeatherIcon::Snow),
            ("mist", WeatherIcon::Mist),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();
        Self { rows }
    }

    /// Built-in rows with configured rows layered on top
    pub fn with_overrides(overrides: &HashMap<String, WeatherIcon>) -> Self {
        let mut table = Self::builtin();
        for (description, icon) in overrides {
            table.rows.insert(description.clone(), *icon);
        }
        table
    }

    /// Total lookup: unknown or absent descriptions fall back to clear sky
    pub fn lookup(&self, description: Option<&str>) -> WeatherIcon {
        description
            .and_then(|d| self.rows.get(d).copied())
            .unwrap_or(WeatherIcon::ClearSky)
    }
}

impl Default for IconTable {
    fn default() -> Self {
        Self::builtin()
    }
}
