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

//! Render the filter sidebar.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
};

use crate::{
    App,
    model::FacetKind,
    render::icons::{CHECK_OFF, CHECK_ON},
};

pub(crate) fn draw_filters(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let facets = app.facets.facets();
    let selection = app.facets.selection();

    let mut items = Vec::new();
    let mut cursor_row = None;

    for (facet_idx, facet) in facets.iter().enumerate() {
        let mut label_style = Style::default().fg(theme.facet_label_fg);
        if app.facets.is_active(&facet.id) {
            label_style = label_style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
        }
        let kind = match facet.kind {
            FacetKind::Single => "",
            FacetKind::Multi => " (any)",
        };
        items.push(ListItem::new(Line::from(Span::styled(
            format!("{}{}", facet.label, kind),
            label_style,
        ))));

        for (option_idx, option) in facet.options.iter().enumerate() {
            if app.sidebar.is_active
                && facet_idx == app.sidebar.facet_idx()
                && option_idx == app.sidebar.option_idx()
            {
                cursor_row = Some(items.len());
            }

            let selected = selection.contains(&facet.key_for(option));
            let (check, check_style) = if selected {
                (CHECK_ON, Style::default().fg(theme.accent_colour))
            } else {
                (CHECK_OFF, Style::default().fg(theme.facet_count_fg))
            };

            items.push(ListItem::new(Line::from(vec![
                Span::styled(format!(" {} ", check), check_style),
                Span::styled(option.name.as_str(), Style::default().fg(theme.facet_option_fg)),
                Span::styled(
                    format!(" ({})", option.match_count),
                    Style::default().fg(theme.facet_count_fg),
                ),
            ])));
        }
    }

    let border = if app.sidebar.is_active {
        theme.active_border_colour
    } else {
        theme.border_colour
    };

    let title = match selection.len() {
        0 => " Filters ".to_string(),
        n => format!(" Filters ({}) ", n),
    };

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(Style::default().fg(border)),
        )
        .highlight_style(Style::default().bg(theme.cursor_bg));

    let mut state = ListState::default().with_selected(cursor_row);
    f.render_stateful_widget(list, area, &mut state);
}
