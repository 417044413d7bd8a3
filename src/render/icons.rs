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

//! Unicode symbols for the TUI.
//!
//! Text-style variants (Variation Selector-15, `\u{FE0E}`) force terminals to
//! render the glyphs as monochrome text so they respect the theme colours.

pub(crate) const ICON_PLAY: &str = "\u{25B6}\u{FE0E}";
pub(crate) const ICON_STOP: &str = "\u{23F9}\u{FE0E}";
pub(crate) const ICON_CURSOR: &str = "\u{25B8}";

pub(crate) const ICON_VOLUME: &str = "\u{1F50A}\u{FE0E}";
pub(crate) const ICON_MUTED: &str = "\u{1F507}\u{FE0E}";

pub(crate) const CHECK_ON: &str = "\u{25C9}";
pub(crate) const CHECK_OFF: &str = "\u{25CB}";

pub(crate) const SPINNER: [&str; 4] = ["\u{25DC}", "\u{25DD}", "\u{25DE}", "\u{25DF}"];
