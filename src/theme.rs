//! Light/dark palettes threaded through component props.
//!
//! Dark mode is ordinary session state: the reducer flips a flag and every
//! component receives the derived palette explicitly. Nothing global mutates.

use ratatui::style::Color;

use crate::state::AppState;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Theme {
    /// Whole-surface background
    pub background: Color,
    pub text: Color,
    pub muted: Color,
    pub accent: Color,
    /// Search overlay backdrop
    pub overlay: Color,
    /// Search overlay input field
    pub overlay_field: Color,
}

impl Theme {
    pub fn light() -> Self {
        Self {
            background: Color::Reset,
            text: Color::Reset,
            muted: Color::DarkGray,
            accent: Color::Cyan,
            overlay: Color::Rgb(225, 225, 232),
            overlay_field: Color::Rgb(205, 205, 215),
        }
    }

    pub fn dark() -> Self {
        Self {
            background: Color::Rgb(20, 20, 28),
            text: Color::Rgb(225, 225, 230),
            muted: Color::Rgb(140, 140, 150),
            accent: Color::Cyan,
            overlay: Color::Rgb(35, 35, 45),
            overlay_field: Color::Rgb(50, 50, 60),
        }
    }

    pub fn for_mode(dark: bool) -> Self {
        if dark { Self::dark() } else { Self::light() }
    }
}

impl AppState {
    pub fn theme(&self) -> Theme {
        Theme::for_mode(self.dark_mode)
    }
}
