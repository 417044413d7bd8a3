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

//! Keyboard selection over the visible game list.
//!
//! Tracks two independent ids: the cursor (keyboard-highlighted game) and
//! the game running on the remote host. Both are held by id so that they
//! survive wholesale replacement of the list.

use ratatui::widgets::TableState;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum NavigatorState {
    Idle,
    Cursor(String),
    Running(String),
}

#[derive(Debug, Default)]
pub(crate) struct Navigator {
    visible: Vec<String>,
    active: Option<String>,
    running: Option<String>,
    pub(crate) table_state: TableState,
}

impl Navigator {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Binds to a freshly materialized list, dropping the cursor if its game
    /// is no longer visible.
    pub(crate) fn rebind(&mut self, ids: Vec<String>) {
        self.visible = ids;
        if let Some(active) = &self.active
            && !self.visible.contains(active)
        {
            self.active = None;
        }
        self.sync_table_state();
    }

    /// Moves the cursor by `step` in list order, holding at either end. A
    /// zero step clears the cursor.
    pub(crate) fn move_by(&mut self, step: i32) {
        if step == 0 {
            self.clear();
            return;
        }

        let len = self.visible.len();
        if len == 0 {
            return;
        }

        let next = match self.active_index() {
            None if step > 0 => 0,
            None => len - 1,
            Some(i) => (i as i64 + step as i64).clamp(0, len as i64 - 1) as usize,
        };

        self.active = Some(self.visible[next].clone());
        self.sync_table_state();
    }

    /// The game a launch should be issued for, if any.
    pub(crate) fn activate(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub(crate) fn clear(&mut self) {
        self.active = None;
        self.sync_table_state();
    }

    /// Applies a server-confirmed "now playing" id. `None` means nothing is
    /// running.
    pub(crate) fn set_running(&mut self, id: Option<String>) {
        self.running = id;
    }

    pub(crate) fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub(crate) fn running(&self) -> Option<&str> {
        self.running.as_deref()
    }

    pub(crate) fn state(&self) -> NavigatorState {
        match (&self.active, &self.running) {
            (Some(active), _) => NavigatorState::Cursor(active.clone()),
            (None, Some(running)) => NavigatorState::Running(running.clone()),
            (None, None) => NavigatorState::Idle,
        }
    }

    fn active_index(&self) -> Option<usize> {
        let active = self.active.as_ref()?;
        self.visible.iter().position(|id| id == active)
    }

    fn sync_table_state(&mut self) {
        let index = self.active_index();
        self.table_state.select(index);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn navigator(ids: &[&str]) -> Navigator {
        let mut nav = Navigator::new();
        nav.rebind(ids.iter().map(|s| s.to_string()).collect());
        nav
    }

    #[test]
    fn first_move_picks_an_end() {
        let mut nav = navigator(&["a", "b", "c"]);
        nav.move_by(1);
        assert_eq!(nav.active(), Some("a"));

        let mut nav = navigator(&["a", "b", "c"]);
        nav.move_by(-1);
        assert_eq!(nav.active(), Some("c"));
    }

    #[test]
    fn holds_at_boundaries() {
        let mut nav = navigator(&["a", "b"]);
        nav.move_by(1);
        nav.move_by(1);
        nav.move_by(1);
        assert_eq!(nav.active(), Some("b"));

        nav.move_by(-1);
        nav.move_by(-1);
        assert_eq!(nav.active(), Some("a"));
        assert_eq!(nav.table_state.selected(), Some(0));
    }

    #[test]
    fn zero_step_clears() {
        let mut nav = navigator(&["a"]);
        nav.move_by(1);
        nav.move_by(0);
        assert_eq!(nav.state(), NavigatorState::Idle);
        assert_eq!(nav.table_state.selected(), None);
    }

    #[test]
    fn empty_list_has_no_cursor() {
        let mut nav = navigator(&[]);
        nav.move_by(1);
        assert!(nav.activate().is_none());
    }

    #[test]
    fn rebind_keeps_cursor_by_id() {
        let mut nav = navigator(&["a", "b", "c"]);
        nav.move_by(1);
        nav.move_by(1);
        nav.rebind(vec!["x".into(), "b".into()]);
        assert_eq!(nav.active(), Some("b"));
        assert_eq!(nav.table_state.selected(), Some(1));

        nav.rebind(vec!["x".into()]);
        assert_eq!(nav.active(), None);
    }

    #[test]
    fn running_is_independent_of_cursor() {
        let mut nav = navigator(&["a", "b"]);
        nav.set_running(Some("a".into()));
        assert_eq!(nav.state(), NavigatorState::Running("a".into()));

        nav.move_by(-1);
        assert_eq!(nav.state(), NavigatorState::Cursor("b".into()));
        assert_eq!(nav.running(), Some("a"));

        nav.set_running(None);
        nav.clear();
        assert_eq!(nav.state(), NavigatorState::Idle);
    }
}
