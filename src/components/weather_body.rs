use artbox::{
    Alignment as ArtAlignment, Color as ArtColor, Fill, LinearGradient, Renderer, fonts,
    integrations::ratatui::ArtBox,
};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use super::city_header::HEADER_OVERHEAD;
use super::{CityHeader, CityHeaderProps, Component};
use crate::action::Action;
use crate::icons::{ART_HEIGHT, IconTable};
use crate::state::{AppState, WeatherReading};
use crate::theme::Theme;

pub struct WeatherBody;

pub struct WeatherBodyProps<'a> {
    pub state: &'a AppState,
    pub icons: &'a IconTable,
}

/// Fixed rows: blank + blank + description + humidity.
const LAYOUT_FIXED: u16 = 4;

/// Text cap tiers: (header_cap, temp_cap).
/// terminus(6), miniwi(4), plain(1) — with HEADER_OVERHEAD added to header.
const TEXT_TIERS: [(u16, u16); 3] = [
    (6 + HEADER_OVERHEAD, 6), // terminus for both
    (4 + HEADER_OVERHEAD, 4), // miniwi for both
    (1 + HEADER_OVERHEAD, 1), // plain for both
];

fn font_stack() -> Vec<artbox::Font> {
    fonts::stack(&["terminus", "miniwi"])
}

struct LayoutSizing {
    use_art: bool,
    icon_h: u16,
    header_cap: u16,
    temp_cap: u16,
}

/// Try to fit the icon art by progressively shrinking text caps.
/// Only falls to emoji when the art does not fit even with plain text.
fn compute_layout(area_height: u16) -> LayoutSizing {
    for &(hcap, tcap) in &TEXT_TIERS {
        let budget = area_height.saturating_sub(hcap + tcap + LAYOUT_FIXED);
        if budget >= ART_HEIGHT {
            return LayoutSizing {
                use_art: true,
                icon_h: ART_HEIGHT,
                header_cap: hcap,
                temp_cap: tcap,
            };
        }
    }
    // No art fits — emoji with the largest text caps
    let (hcap, tcap) = TEXT_TIERS[0];
    LayoutSizing {
        use_art: false,
        icon_h: 1,
        header_cap: hcap,
        temp_cap: tcap,
    }
}

// ============================================================================
// Component
// ============================================================================

impl Component<Action> for WeatherBody {
    type Props<'a> = WeatherBodyProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let sizing = compute_layout(area.height);
        let theme = props.state.theme();

        match &props.state.reading {
            Some(reading) => {
                render_reading(frame, area, props.state, reading, props.icons, &sizing, theme);
            }
            None => render_empty_hint(frame, area, &sizing, theme),
        }
    }
}

fn make_layout(area: Rect, sizing: &LayoutSizing) -> std::rc::Rc<[Rect]> {
    Layout::vertical([
        Constraint::Max(sizing.header_cap),
        Constraint::Length(1),
        Constraint::Length(sizing.icon_h),
        Constraint::Length(1),
        Constraint::Max(sizing.temp_cap),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .flex(Flex::Center)
    .split(area)
}

fn render_reading(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    reading: &WeatherReading,
    icons: &IconTable,
    sizing: &LayoutSizing,
    theme: Theme,
) {
    let chunks = make_layout(area, sizing);

    let mut header = CityHeader;
    header.render(
        frame,
        chunks[0],
        CityHeaderProps {
            name: reading.city(),
            coord: reading.coord,
            temp_kelvin: reading.temp_kelvin(),
            theme,
        },
    );

    // Icon art or emoji; absent descriptions fall back to the clear-sky icon
    let icon = icons.lookup(reading.description());
    if sizing.use_art {
        frame.render_widget(
            Paragraph::new(icon.art()).alignment(Alignment::Center),
            chunks[2],
        );
    } else {
        let emoji = Line::from(icon.emoji()).centered();
        frame.render_widget(Paragraph::new(emoji), chunks[2]);
    }

    // Temperature renders only when the reading carries one
    if let Some(kelvin) = reading.temp_kelvin() {
        let temp_text = state.unit.format(kelvin);
        let renderer = Renderer::new(font_stack())
            .with_plain_fallback()
            .with_alignment(ArtAlignment::Center)
            .with_fill(temperature_gradient(kelvin - 273.15));
        frame.render_widget(ArtBox::new(&renderer, &temp_text), chunks[4]);
    }

    if let Some(description) = reading.description() {
        let desc = Line::from(vec![Span::styled(
            description.to_string(),
            Style::default().fg(theme.text),
        )])
        .centered();
        frame.render_widget(Paragraph::new(desc), chunks[5]);
    }

    if let Some(humidity) = reading.humidity() {
        let line = Line::from(vec![Span::styled(
            format!("{}% Humidity", humidity),
            Style::default().fg(theme.text),
        )])
        .centered();
        frame.render_widget(Paragraph::new(line), chunks[6]);
    }
}

fn render_empty_hint(frame: &mut Frame, area: Rect, sizing: &LayoutSizing, theme: Theme) {
    let chunks = make_layout(area, sizing);

    let hint = Line::from(vec![
        Span::styled("Press ", Style::default().fg(theme.muted)),
        Span::styled("/", Style::default().fg(theme.accent)),
        Span::styled(" to search for a city", Style::default().fg(theme.muted)),
    ])
    .centered();
    frame.render_widget(Paragraph::new(hint), chunks[5]);
}

// ============================================================================
// Helpers
// ============================================================================

fn temperature_gradient(celsius: f64) -> Fill {
    let (start, end) = match celsius {
        t if t < 0.0 => (
            ArtColor::rgb(150, 200, 255),
            ArtColor::rgb(200, 230, 255),
        ),
        t if t < 15.0 => (
            ArtColor::rgb(100, 180, 255),
            ArtColor::rgb(150, 220, 200),
        ),
        t if t < 25.0 => (
            ArtColor::rgb(100, 200, 150),
            ArtColor::rgb(255, 220, 100),
        ),
        t if t < 35.0 => (
            ArtColor::rgb(255, 180, 80),
            ArtColor::rgb(255, 120, 80),
        ),
        _ => (
            ArtColor::rgb(255, 100, 80),
            ArtColor::rgb(255, 60, 60),
        ),
    };
    Fill::Linear(LinearGradient::horizontal(start, end))
}
