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

//! The search box.
//!
//! The search term only takes part in list refreshes while the box has
//! focus; once closed, the text is cleared and the list is unfiltered by
//! title again.

use crossterm::event::Event;
use tui_input::{Input, backend::crossterm::EventHandler};

#[derive(Debug, Default)]
pub(crate) struct SearchBox {
    focused: bool,
    pub(crate) input: Input,
}

impl SearchBox {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn is_focused(&self) -> bool {
        self.focused
    }

    pub(crate) fn focus(&mut self) {
        self.focused = true;
    }

    /// Blurs and clears the box.
    pub(crate) fn close(&mut self) {
        self.focused = false;
        self.input.reset();
    }

    /// Passes a key to the text input. Returns `true` when the text changed.
    pub(crate) fn handle_event(&mut self, event: &Event) -> bool {
        self.input
            .handle_event(event)
            .is_some_and(|changed| changed.value)
    }

    /// The term to send with a list refresh.
    pub(crate) fn term(&self) -> &str {
        if self.focused { self.input.value() } else { "" }
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    use super::*;

    fn type_char(search: &mut SearchBox, c: char) -> bool {
        search.handle_event(&Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)))
    }

    #[test]
    fn term_only_counts_while_focused() {
        let mut search = SearchBox::new();
        search.focus();
        assert!(type_char(&mut search, 'p'));
        assert!(type_char(&mut search, 'a'));
        assert_eq!(search.term(), "pa");

        search.close();
        assert_eq!(search.term(), "");
        assert_eq!(search.input.value(), "");
    }

    #[test]
    fn unfocused_text_is_ignored() {
        let mut search = SearchBox::new();
        search.input = Input::new("galaga".into());
        assert_eq!(search.term(), "");
    }
}
