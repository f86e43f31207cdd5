use artbox::{
    Alignment as ArtAlignment, Color as ArtColor, Fill, LinearGradient, Renderer, fonts,
    integrations::ratatui::ArtBox,
};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use super::Component;
use crate::action::Action;
use crate::state::Coord;
use crate::theme::Theme;

pub struct CityHeader;

pub struct CityHeaderProps<'a> {
    pub name: Option<&'a str>,
    pub coord: Option<Coord>,
    /// Drives the gradient tint; Kelvin as fetched
    pub temp_kelvin: Option<f64>,
    pub theme: Theme,
}

/// Overhead inside the header area: 1 spacer + 1 coords line.
/// The FIGlet city name gets `area.height - HEADER_OVERHEAD`.
pub const HEADER_OVERHEAD: u16 = 2;

fn gradient_colors(celsius: Option<f64>) -> (ArtColor, ArtColor) {
    match celsius {
        Some(t) if t < 0.0 => (
            ArtColor::rgb(150, 200, 255), // Ice blue
            ArtColor::rgb(200, 230, 255), // Light ice
        ),
        Some(t) if t < 15.0 => (
            ArtColor::rgb(100, 180, 255), // Cool blue
            ArtColor::rgb(150, 220, 200), // Teal
        ),
        Some(t) if t < 25.0 => (
            ArtColor::rgb(100, 200, 150), // Green
            ArtColor::rgb(255, 220, 100), // Yellow
        ),
        Some(t) if t < 35.0 => (
            ArtColor::rgb(255, 180, 80), // Orange
            ArtColor::rgb(255, 120, 80), // Deep orange
        ),
        Some(_) => (
            ArtColor::rgb(255, 100, 80), // Red-orange
            ArtColor::rgb(255, 60, 60),  // Hot red
        ),
        None => (
            ArtColor::rgb(180, 180, 180), // Gray (no data)
            ArtColor::rgb(220, 220, 220),
        ),
    }
}

impl Component<Action> for CityHeader {
    type Props<'a> = CityHeaderProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let chunks = Layout::vertical([
            Constraint::Fill(1),   // FIGlet city name — artbox picks the best font
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Coordinates
        ])
        .split(area);

        if let Some(name) = props.name {
            let celsius = props.temp_kelvin.map(|k| k - 273.15);
            let (start, end) = gradient_colors(celsius);
            let fill = Fill::Linear(LinearGradient::horizontal(start, end));

            let renderer = Renderer::new(fonts::stack(&["terminus", "miniwi"]))
                .with_plain_fallback()
                .with_alignment(ArtAlignment::Center)
                .with_fill(fill);

            frame.render_widget(ArtBox::new(&renderer, name), chunks[0]);
        }

        if let Some(coord) = props.coord {
            let coords_line = Line::from(vec![Span::styled(
                format!("Coord: {}, {}", coord.lat, coord.lon),
                Style::default().fg(props.theme.muted),
            )])
            .centered();
            frame.render_widget(Paragraph::new(coords_line), chunks[2]);
        }
    }
}
