// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Visual styling and color configuration for the TUI.
//!
//! This module defines the application's color palette and provides utilities
//! for converting colors between Ratatui's internal representation and external
//! formats (such as hexadecimal strings) used for terminal emulator styling.

use ratatui::style::Color;

#[derive(Clone, Copy)]
pub(crate) struct Theme {
    pub(crate) background_colour: Color,
    pub(crate) accent_colour: Color,
    pub(crate) border_colour: Color,
    pub(crate) active_border_colour: Color,
    pub(crate) gauge_track_colour: Color,
    pub(crate) commander_colour: Color,
    pub(crate) error_colour: Color,
    pub(crate) cursor_bg: Color,

    pub(crate) facet_label_fg: Color,
    pub(crate) facet_option_fg: Color,
    pub(crate) facet_count_fg: Color,

    pub(crate) table_title_fg: Color,
    pub(crate) table_platform_fg: Color,
    pub(crate) table_year_fg: Color,
    pub(crate) table_company_fg: Color,
    pub(crate) table_system_fg: Color,
    pub(crate) table_orientation_fg: Color,
}

impl Default for Theme {
    // Returns the standard application theme.
    fn default() -> Self {
        Self::default_theme()
    }
}

impl Theme {
    // Constructs the default theme.
    pub(crate) const fn default_theme() -> Self {
        Self {
            background_colour: Color::Rgb(20, 24, 40),
            accent_colour: Color::Rgb(255, 94, 160),
            border_colour: Color::Rgb(102, 102, 102),
            active_border_colour: Color::Rgb(80, 220, 240),
            gauge_track_colour: Color::Rgb(36, 42, 66),
            commander_colour: Color::Rgb(255, 255, 255),
            error_colour: Color::Rgb(255, 85, 85),
            cursor_bg: Color::Rgb(48, 72, 160),

            facet_label_fg: Color::Rgb(80, 220, 240),
            facet_option_fg: Color::Rgb(230, 230, 230),
            facet_count_fg: Color::Rgb(140, 140, 150),

            table_title_fg: Color::Rgb(255, 255, 255),
            table_platform_fg: Color::Rgb(179, 157, 219),
            table_year_fg: Color::Rgb(162, 161, 166),
            table_company_fg: Color::Rgb(255, 215, 0),
            table_system_fg: Color::Rgb(162, 161, 166),
            table_orientation_fg: Color::Rgb(120, 200, 120),
        }
    }

    /// Converts a [`ratatui::style::Color`] into a CSS-style hexadecimal
    /// string, used to set the terminal emulator's background colour.
    ///
    /// Non-RGB colours have no portable hex form and map to black.
    pub(crate) fn to_hex(colour: Color) -> String {
        match colour {
            Color::Rgb(r, g, b) => format!("#{:02x}{:02x}{:02x}", r, g, b),
            _ => "#000000".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_conversion() {
        assert_eq!(Theme::to_hex(Color::Rgb(20, 24, 40)), "#141828");
        assert_eq!(Theme::to_hex(Color::Red), "#000000");
    }
}
