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

//! Render the game list and the search line above it.

use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
};

use crate::{
    App,
    model::{ORIENTATION_PREFIX, PLATFORM_PREFIX},
    render::icons::{ICON_CURSOR, ICON_PLAY},
};

pub(crate) fn draw_search(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let focused = app.search.is_focused();

    let border = if focused {
        theme.active_border_colour
    } else {
        theme.border_colour
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Search ")
        .border_style(Style::default().fg(border));

    let inner = block.inner(area);

    let text = if focused {
        Line::from(app.search.input.value())
    } else {
        Line::from(Span::styled(
            "press t or / to search",
            Style::default().add_modifier(Modifier::DIM),
        ))
    };

    f.render_widget(Paragraph::new(text).block(block), area);

    if focused {
        let cursor_x = inner.x + app.search.input.visual_cursor() as u16;
        f.set_cursor_position((cursor_x.min(inner.right().saturating_sub(1)), inner.y));
    }
}

/// Draws the games table.
///
/// The orientation and platform columns are dropped while a filter on that
/// axis is active, since every row would show the same value.
pub(crate) fn draw_games(f: &mut Frame, area: Rect, app: &mut App) {
    let theme = app.theme;
    let oriented = app.facets.selection().with_prefix(ORIENTATION_PREFIX).next().is_some();
    let platformed = app.facets.selection().with_prefix(PLATFORM_PREFIX).next().is_some();

    let running = app.navigator.running().map(str::to_string);

    let rows = app.games.games().iter().map(|game| {
        let is_running = running.as_deref() == Some(game.id.as_str());
        let marker = if is_running { ICON_PLAY } else { "" };
        let title_style = if is_running {
            Style::default().fg(theme.accent_colour).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.table_title_fg)
        };

        let mut cells = vec![
            Cell::from(Line::from(marker).style(Style::default().fg(theme.accent_colour))),
            Cell::from(Line::from(game.title.as_str()).style(title_style)),
        ];
        if !platformed {
            cells.push(Cell::from(
                Line::from(game.platform_id.as_deref().unwrap_or(""))
                    .style(Style::default().fg(theme.table_platform_fg)),
            ));
        }
        cells.push(Cell::from(
            Line::from(game.year.as_deref().unwrap_or("")).style(Style::default().fg(theme.table_year_fg)),
        ));
        cells.push(Cell::from(
            Line::from(game.company.as_deref().unwrap_or(""))
                .style(Style::default().fg(theme.table_company_fg)),
        ));
        cells.push(Cell::from(
            Line::from(game.system.as_deref().unwrap_or(""))
                .style(Style::default().fg(theme.table_system_fg)),
        ));
        if !oriented {
            cells.push(Cell::from(
                Line::from(game.orientation().map_or("", |o| o.as_str()))
                    .style(Style::default().fg(theme.table_orientation_fg)),
            ));
        }

        Row::new(cells)
    });

    let mut header = vec![Cell::from(""), Cell::from("Title")];
    let mut widths = vec![Constraint::Length(2), Constraint::Percentage(40)];
    if !platformed {
        header.push(Cell::from("Platform"));
        widths.push(Constraint::Length(10));
    }
    header.extend([Cell::from("Year"), Cell::from("Company"), Cell::from("System")]);
    widths.extend([
        Constraint::Length(6),
        Constraint::Percentage(20),
        Constraint::Percentage(20),
    ]);
    if !oriented {
        header.push(Cell::from("Orientation"));
        widths.push(Constraint::Length(11));
    }

    let border = if app.sidebar.is_active || app.search.is_focused() {
        theme.border_colour
    } else {
        theme.active_border_colour
    };

    let title = format!(" Games ({}) ", app.games.games().len());

    let table = Table::new(rows, widths)
        .header(
            Row::new(header)
                .style(Style::default().bold().fg(theme.accent_colour))
                .bottom_margin(1),
        )
        .row_highlight_style(Style::default().bg(theme.cursor_bg).fg(theme.table_title_fg))
        .highlight_symbol(ICON_CURSOR)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(Style::default().fg(border)),
        );

    f.render_stateful_widget(table, area, &mut app.navigator.table_state);
}
