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

//! Render the command-line interface.
//!
//! Shows the command being typed with its cursor, or a short key hint when
//! command mode is inactive.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::App;

const HINT: &str = "t search  n/p move  o launch  x stop  -/= volume  m mute  Tab filters  : command  q quit";

pub(crate) fn draw_commander(f: &mut Frame, area: Rect, app: &App) {
    let commander = &app.commander;
    let style = Style::default()
        .fg(app.theme.commander_colour)
        .bg(app.theme.gauge_track_colour);

    if !commander.active() {
        let hint = Paragraph::new(Line::from(Span::styled(
            format!(" {}", HINT),
            Style::default().add_modifier(Modifier::DIM),
        )))
        .style(style);
        f.render_widget(hint, area);
        return;
    }

    let line = Line::from(vec![Span::raw(" :"), Span::raw(commander.input.value())]);
    f.render_widget(Paragraph::new(line).style(style), area);

    let cursor_x = area.x + 2 + commander.input.visual_cursor() as u16;
    f.set_cursor_position((cursor_x.min(area.right().saturating_sub(1)), area.y));
}
