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

//! Render the status bar: now playing, volume, busy marker, the current
//! location fragment and the last message.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Padding, Paragraph},
};

use crate::{
    App,
    render::icons::{ICON_MUTED, ICON_PLAY, ICON_STOP, ICON_VOLUME, SPINNER},
};

pub(crate) fn draw_status(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;

    let block = Block::default()
        .borders(Borders::TOP | Borders::BOTTOM)
        .border_style(Style::default().fg(theme.border_colour))
        .padding(Padding::horizontal(1));

    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(3),
            Constraint::Length(26),
        ])
        .split(inner);

    let mut spans = match &app.now_playing {
        Some(now_playing) => vec![
            Span::raw(format!("{} ", ICON_PLAY)).white(),
            Span::styled(
                now_playing.title.as_str(),
                Style::default().fg(theme.accent_colour).add_modifier(Modifier::BOLD),
            ),
        ],
        None => vec![
            Span::raw(format!("{} ", ICON_STOP)).white(),
            Span::styled("No Game Selected", Style::default().add_modifier(Modifier::DIM)),
        ],
    };

    let fragment = app.history.current();
    if !fragment.is_empty() {
        spans.push(Span::styled(
            format!("  #{}", fragment),
            Style::default().fg(theme.facet_count_fg),
        ));
    }

    if let Some(status) = &app.status {
        let colour = if status.is_error {
            theme.error_colour
        } else {
            theme.facet_option_fg
        };
        spans.push(Span::styled(format!("  {}", status.text), Style::default().fg(colour)));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), chunks[0]);

    if app.busy.is_visible() {
        let spinner = SPINNER[app.tick % SPINNER.len()];
        let marker = match app.busy.pending() {
            n if n > 1 => format!("{}{}", spinner, n),
            _ => spinner.to_string(),
        };
        f.render_widget(
            Paragraph::new(marker).style(Style::default().fg(theme.accent_colour)),
            chunks[1],
        );
    }

    let volume = app.volume.level();
    let volume_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(5),
        ])
        .split(chunks[2]);

    let icon = if volume == 0 { ICON_MUTED } else { ICON_VOLUME };
    f.render_widget(Paragraph::new(icon).white(), volume_layout[0]);

    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(theme.accent_colour).bg(theme.gauge_track_colour))
        .ratio(volume as f64 / 100.0)
        .label("")
        .use_unicode(true);
    f.render_widget(gauge, volume_layout[1]);

    f.render_widget(
        Paragraph::new(format!(" {:>3}%", volume)).white(),
        volume_layout[2],
    );
}
