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

use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind};

use crate::{
    App,
    events::{
        AppEvent,
        handlers::{request_launch, request_stop, request_volume, sync_game_list},
    },
    model::hash::Navigation,
    tasks::AppTask,
};

/// Maps keyboard input to application actions and remote calls.
///
/// Input is offered, in order, to the command line, the search box, the
/// filter sidebar and finally the game list. The first one that owns the key
/// consumes it.
///
/// # Errors
///
/// Returns an error if a task cannot be sent to the background worker or the
/// pre-mute volume cannot be stored.
pub(super) fn process_key_event(app: &mut App, key: KeyEvent) -> Result<()> {
    if key.kind == KeyEventKind::Release {
        return Ok(());
    }

    let event = Event::Key(key);

    if app.commander.active() {
        app.commander.handle_event(&event, &app.event_tx)?;
        return Ok(());
    }

    if app.search.is_focused() {
        return process_search_key_event(app, key, &event);
    }

    if app.commander.handle_event(&event, &app.event_tx)? {
        return Ok(());
    }

    if app.sidebar.is_active {
        return process_sidebar_key_event(app, key);
    }

    process_list_key_event(app, key)
}

fn process_search_key_event(app: &mut App, key: KeyEvent, event: &Event) -> Result<()> {
    match key.code {
        KeyCode::Esc => close_search(app)?,
        KeyCode::Up => app.navigator.move_by(-1),
        KeyCode::Down => app.navigator.move_by(1),
        KeyCode::Enter => {
            if let Some(id) = app.navigator.activate().map(str::to_string) {
                request_launch(app, id)?;
                close_search(app)?;
            }
        }
        _ => {
            if app.search.handle_event(event) {
                sync_game_list(app, Navigation::Replace)?;
            }
        }
    }

    Ok(())
}

fn close_search(app: &mut App) -> Result<()> {
    app.search.close();
    app.navigator.clear();
    sync_game_list(app, Navigation::Replace)
}

fn process_sidebar_key_event(app: &mut App, key: KeyEvent) -> Result<()> {
    let facets = app.facets.facets();

    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.sidebar.next_option(facets),
        KeyCode::Char('k') | KeyCode::Up => app.sidebar.previous_option(),
        KeyCode::Char('h') | KeyCode::Left => app.sidebar.previous_facet(facets),
        KeyCode::Char('l') | KeyCode::Right => app.sidebar.next_facet(facets),

        KeyCode::Enter => toggle_filter(app, false)?,
        KeyCode::Char(' ') => toggle_filter(app, true)?,

        KeyCode::Tab | KeyCode::Esc => app.sidebar.is_active = false,

        KeyCode::Char('q') => app.event_tx.send(AppEvent::ExitApplication)?,

        _ => {}
    }

    Ok(())
}

/// A user toggle is intentional, so it gets its own history entry.
fn toggle_filter(app: &mut App, extend: bool) -> Result<()> {
    let Some((facet_id, key)) = app.sidebar.current(app.facets.facets()) else {
        return Ok(());
    };

    if app.facets.toggle(&facet_id, &key, extend) {
        sync_game_list(app, Navigation::Push)?;
    }

    Ok(())
}

fn process_list_key_event(app: &mut App, key: KeyEvent) -> Result<()> {
    let fine = app.config.volume_step as i32;
    let coarse = app.config.volume_coarse_step as i32;

    match key.code {
        KeyCode::Char('q') => app.event_tx.send(AppEvent::ExitApplication)?,

        KeyCode::Char('t') | KeyCode::Char('/') => app.search.focus(),

        // Cursor
        KeyCode::Char('n') | KeyCode::Char('j') | KeyCode::Down => app.navigator.move_by(1),
        KeyCode::Char('p') | KeyCode::Char('k') | KeyCode::Up => app.navigator.move_by(-1),
        KeyCode::Esc => app.navigator.clear(),

        KeyCode::Enter | KeyCode::Char('o') => {
            if let Some(id) = app.navigator.activate().map(str::to_string) {
                request_launch(app, id)?;
                app.navigator.clear();
            }
        }

        KeyCode::Char('x') => request_stop(app)?,

        // Volume
        KeyCode::Char('-') => adjust_volume(app, -fine)?,
        KeyCode::Char('=') => adjust_volume(app, fine)?,
        KeyCode::Char('_') => adjust_volume(app, -coarse)?,
        KeyCode::Char('+') => adjust_volume(app, coarse)?,
        KeyCode::Char('m') => {
            if let Some(level) = app.volume.toggle_mute(&mut app.prefs)? {
                request_volume(app, level)?;
            }
        }

        KeyCode::Tab => app.sidebar.is_active = true,
        KeyCode::Char('r') => app.task_tx.send(AppTask::FetchFilters)?,

        _ => {}
    }

    Ok(())
}

fn adjust_volume(app: &mut App, delta: i32) -> Result<()> {
    if let Some(level) = app.volume.adjust(delta, &mut app.prefs)? {
        request_volume(app, level)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyModifiers;

    use super::*;
    use crate::{
        events::{
            handlers::{handle_filters_loaded, handle_games_loaded, handle_volume_set},
            tests::*,
        },
        model::volume::PreMuteMemory,
        navigator::NavigatorState,
        tasks::tests::game,
    };

    fn press(app: &mut App, code: KeyCode) {
        process_key_event(app, KeyEvent::new(code, KeyModifiers::NONE)).unwrap();
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn app_with_games() -> (App, tokio::sync::mpsc::UnboundedReceiver<AppTask>) {
        let (mut app, mut task_rx) = test_app("");
        handle_filters_loaded(&mut app, facets()).unwrap();
        let seq = app.games.issue();
        handle_games_loaded(
            &mut app,
            seq,
            vec![
                game("a", "Galaga", "portrait"),
                game("b", "Out Run", "landscape"),
                game("c", "Pac-Man", "portrait"),
            ],
        );
        drain(&mut task_rx);
        (app, task_rx)
    }

    #[test]
    fn enter_launches_cursor_then_clears_it() {
        let (mut app, mut task_rx) = app_with_games();

        press(&mut app, KeyCode::Char('p'));
        assert_eq!(app.navigator.state(), NavigatorState::Cursor("c".into()));

        press(&mut app, KeyCode::Char('o'));
        assert!(matches!(drain(&mut task_rx).as_slice(), [AppTask::Launch(id)] if id == "c"));
        assert_eq!(app.navigator.active(), None);
        assert!(app.busy.is_visible());
    }

    #[test]
    fn enter_without_cursor_does_nothing() {
        let (mut app, mut task_rx) = app_with_games();
        press(&mut app, KeyCode::Enter);
        assert!(drain(&mut task_rx).is_empty());
    }

    #[test]
    fn typing_refreshes_only_while_search_is_open() {
        let (mut app, mut task_rx) = app_with_games();

        press(&mut app, KeyCode::Char('/'));
        type_text(&mut app, "ga");

        let searches: Vec<String> = drain(&mut task_rx)
            .into_iter()
            .filter_map(|t| match t {
                AppTask::FetchGames { query, .. } => Some(query.search),
                _ => None,
            })
            .collect();
        assert_eq!(searches, vec!["g".to_string(), "ga".to_string()]);

        // Typing a command letter goes into the box, not the list.
        press(&mut app, KeyCode::Char('q'));
        assert_eq!(app.search.input.value(), "gaq");

        press(&mut app, KeyCode::Esc);
        assert!(!app.search.is_focused());
        match drain(&mut task_rx).last() {
            Some(AppTask::FetchGames { query, .. }) => assert_eq!(query.search, ""),
            other => panic!("unexpected task {:?}", other),
        }
    }

    #[test]
    fn search_enter_launches_and_closes() {
        let (mut app, mut task_rx) = app_with_games();

        press(&mut app, KeyCode::Char('t'));
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);

        let tasks = drain(&mut task_rx);
        assert!(matches!(tasks.first(), Some(AppTask::Launch(id)) if id == "a"));
        assert!(matches!(tasks.last(), Some(AppTask::FetchGames { .. })));
        assert!(!app.search.is_focused());
        assert_eq!(app.navigator.active(), None);
    }

    #[test]
    fn sidebar_toggle_pushes_history() {
        let (mut app, mut task_rx) = app_with_games();

        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.facets.selection().to_csv(), "o:portrait");
        assert_eq!(app.history.current(), "filters=o:portrait");
        assert_eq!(app.history.len(), 2);
        assert!(matches!(drain(&mut task_rx).as_slice(), [AppTask::FetchGames { .. }]));

        // Exclusive toggle of a sibling replaces it.
        press(&mut app, KeyCode::Char('k'));
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.facets.selection().to_csv(), "o:landscape");
    }

    #[test]
    fn sidebar_extend_on_multi_facet() {
        let (mut app, _task_rx) = app_with_games();

        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Char('h'));
        assert_eq!(app.sidebar.facet_idx(), 2);

        press(&mut app, KeyCode::Char(' '));
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char(' '));
        assert_eq!(app.facets.selection().to_csv(), "t:coop,t:fighting");
        assert!(app.facets.is_active("tag"));

        press(&mut app, KeyCode::Esc);
        assert!(!app.sidebar.is_active);
    }

    #[test]
    fn volume_keys_step_and_clamp() {
        let (mut app, mut task_rx) = app_with_games();
        handle_volume_set(&mut app, Some(99));

        press(&mut app, KeyCode::Char('='));
        assert!(matches!(drain(&mut task_rx).as_slice(), [AppTask::SetVolume(100)]));

        handle_volume_set(&mut app, Some(100));
        press(&mut app, KeyCode::Char('+'));
        assert!(drain(&mut task_rx).is_empty());

        press(&mut app, KeyCode::Char('_'));
        assert!(matches!(drain(&mut task_rx).as_slice(), [AppTask::SetVolume(90)]));
    }

    #[test]
    fn mute_round_trip() {
        let (mut app, mut task_rx) = app_with_games();
        handle_volume_set(&mut app, Some(40));

        press(&mut app, KeyCode::Char('m'));
        assert!(matches!(drain(&mut task_rx).as_slice(), [AppTask::SetVolume(0)]));
        assert_eq!(app.prefs.recall().unwrap(), Some(40));

        handle_volume_set(&mut app, Some(0));
        press(&mut app, KeyCode::Char('m'));
        assert!(matches!(drain(&mut task_rx).as_slice(), [AppTask::SetVolume(40)]));
        assert_eq!(app.prefs.recall().unwrap(), None);
    }

    #[test]
    fn unmute_without_memory_is_a_no_op() {
        let (mut app, mut task_rx) = app_with_games();
        press(&mut app, KeyCode::Char('m'));
        assert!(drain(&mut task_rx).is_empty());
    }

    #[test]
    fn command_line_takes_precedence() {
        let (mut app, mut task_rx) = app_with_games();

        type_text(&mut app, ":stop");
        assert!(drain(&mut task_rx).is_empty());
        press(&mut app, KeyCode::Enter);

        assert!(matches!(app.event_rx.try_recv().unwrap(), AppEvent::StopRequested));
    }
}
